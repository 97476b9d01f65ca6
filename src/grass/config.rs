//! Grass field configuration.
//!
//! Every field has a default so partial JSON files are accepted. The
//! configuration is checked by [`GrassConfig::validate`] before any
//! geometry is generated.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::instances::PlacementParams;
use super::wind::WindConfig;
use crate::core::{Error, Result};
use crate::terrain::mesh::MAX_SEGMENTS;
use crate::terrain::{Hill, TerrainShape};

/// User-facing configuration of one grass field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    /// Field extent `[width, depth]` in meters, centered on the origin.
    pub area: [f32; 2],
    /// Number of blade instances.
    pub blade_count: u32,
    /// Inclusive per-blade height range `[min, max]`.
    pub blade_height_range: [f32; 2],
    /// Half-width of the blade triangle base.
    pub blade_width: f32,
    /// Terrain shape sampled by both the mesh and the blade placer.
    pub terrain: TerrainShape,
    /// Terrain mesh quads per edge.
    pub terrain_segments: u32,
    /// Placement seed. `None` gives a different field every build.
    pub seed: Option<u64>,
    /// Seed of the wind noise.
    pub noise_seed: u32,
    pub wind: WindConfig,
    pub base_color: Color,
    pub tip_color: Color,
    pub terrain_color: Color,
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            area: [10.0, 10.0],
            blade_count: 10_000,
            blade_height_range: [0.3, 0.8],
            blade_width: 0.05,
            terrain: TerrainShape::Flat,
            terrain_segments: 64,
            seed: None,
            noise_seed: 0,
            wind: WindConfig::default(),
            base_color: Color::rgb(0.1, 0.3, 0.05),
            tip_color: Color::rgb(0.45, 0.7, 0.2),
            terrain_color: Color::rgb(0.12, 0.25, 0.06),
        }
    }
}

impl GrassConfig {
    /// A 30 x 30 meadow over three overlapping hills.
    pub fn rolling_hills() -> Self {
        Self {
            area: [30.0, 30.0],
            blade_count: 60_000,
            terrain: TerrainShape::hills([
                Hill::new([-6.0, -4.0], 8.0, 2.5)
                    .with_plateau(0.15)
                    .with_skirt(1.5),
                Hill::new([7.0, 3.0], 6.0, 1.6)
                    .with_scale(1.6, 1.0)
                    .with_rotation(0.5),
                Hill::new([0.0, 9.0], 5.0, 1.2)
                    .with_roundness(1.4)
                    .with_ridge(2.0, 0.3),
            ]),
            terrain_segments: 128,
            seed: Some(1),
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!("Loaded grass config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Reject configurations generation is not defined for.
    pub fn validate(&self) -> Result<()> {
        let [width, depth] = self.area;
        if !(width.is_finite() && depth.is_finite() && width > 0.0 && depth > 0.0) {
            return Err(Error::config(format!("area must be positive, got {:?}", self.area)));
        }
        let [h_min, h_max] = self.blade_height_range;
        if !(h_min.is_finite() && h_max.is_finite()) || h_min < 0.0 || h_min > h_max {
            return Err(Error::config(format!(
                "blade_height_range must satisfy 0 <= min <= max, got {:?}",
                self.blade_height_range
            )));
        }
        if !self.blade_width.is_finite() || self.blade_width <= 0.0 {
            return Err(Error::config(format!("blade_width must be > 0, got {}", self.blade_width)));
        }
        if !(1..=MAX_SEGMENTS).contains(&self.terrain_segments) {
            return Err(Error::config(format!(
                "terrain_segments must be in 1..={}, got {}",
                MAX_SEGMENTS, self.terrain_segments
            )));
        }
        self.terrain.validate()?;
        self.wind.validate()?;
        Ok(())
    }

    /// Inputs that determine the blade instance buffer.
    pub fn placement(&self) -> PlacementParams {
        PlacementParams {
            count: self.blade_count,
            area: self.area,
            height_range: self.blade_height_range,
            seed: self.seed,
        }
    }
}
