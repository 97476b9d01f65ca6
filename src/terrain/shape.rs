//! Serializable terrain description.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::composite::{summed_gradient, summed_height};
use super::height::{Flat, HeightField, HeightSample};
use super::hill::Hill;
use crate::core::Result;

/// Terrain shape as it appears in configuration files.
///
/// ```json
/// { "type": "composite", "children": [
///     { "type": "hill", "center": [-3, 0], "radius": 6, "height": 2 },
///     { "type": "hill", "center": [4, 2], "radius": 4, "height": 1.2 }
/// ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TerrainShape {
    #[default]
    Flat,
    Hill(Hill),
    Composite { children: Vec<TerrainShape> },
}

impl TerrainShape {
    /// Composite of hills.
    pub fn hills(hills: impl IntoIterator<Item = Hill>) -> Self {
        TerrainShape::Composite {
            children: hills.into_iter().map(TerrainShape::Hill).collect(),
        }
    }

    /// Validate every hill in the tree.
    pub fn validate(&self) -> Result<()> {
        match self {
            TerrainShape::Flat => Ok(()),
            TerrainShape::Hill(hill) => hill.validate(),
            TerrainShape::Composite { children } => {
                children.iter().try_for_each(TerrainShape::validate)
            }
        }
    }

    /// Number of hills in the tree.
    pub fn hill_count(&self) -> usize {
        match self {
            TerrainShape::Flat => 0,
            TerrainShape::Hill(_) => 1,
            TerrainShape::Composite { children } => {
                children.iter().map(TerrainShape::hill_count).sum()
            }
        }
    }
}

impl HeightField for TerrainShape {
    fn height(&self, x: f32, z: f32) -> f32 {
        match self {
            TerrainShape::Flat => Flat.height(x, z),
            TerrainShape::Hill(hill) => hill.height(x, z),
            TerrainShape::Composite { children } => summed_height(children, x, z),
        }
    }

    fn gradient(&self, x: f32, z: f32) -> Vec2 {
        match self {
            TerrainShape::Flat => Flat.gradient(x, z),
            TerrainShape::Hill(hill) => hill.gradient(x, z),
            TerrainShape::Composite { children } => summed_gradient(children, x, z),
        }
    }

    fn sample(&self, x: f32, z: f32) -> HeightSample {
        match self {
            TerrainShape::Flat => HeightSample::FLAT,
            _ => HeightSample::from_gradient(self.height(x, z), self.gradient(x, z)),
        }
    }
}
