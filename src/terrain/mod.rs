//! Terrain height fields and ground mesh generation

pub mod height;
pub use height::{Flat, HeightField, HeightSample};

pub mod hill;
pub use hill::Hill;

pub mod composite;
pub use composite::Composite;

pub mod shape;
pub use shape::TerrainShape;

pub mod mesh;
pub use mesh::TerrainMesh;
