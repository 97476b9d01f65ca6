//! Instanced grass field.
//!
//! Blades are copies of one triangle template placed by per-instance
//! transforms over a height field. Wind bends each blade per vertex at
//! render time from the values advanced once per frame in [`WindState`].

pub mod blade;
pub mod color;
pub mod config;
pub mod field;
pub mod instances;
pub mod params;
pub mod wind;

pub use blade::BladeGeometry;
pub use color::Color;
pub use config::GrassConfig;
pub use field::{GrassField, Rebuilt};
pub use instances::{BladeTransform, InstanceRaw, PlacementParams};
pub use params::GrassUniform;
pub use wind::{wind_displacement, WindConfig, WindNoise, WindState};
