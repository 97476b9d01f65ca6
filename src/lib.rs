//! Meadow - procedural grass field engine
//!
//! Terrain height fields, a ground mesh builder, instanced grass blades and
//! a wind animation model. Produces raw vertex, instance and uniform data
//! for a renderer to upload.

pub mod core;
pub mod terrain;
pub mod grass;
