//! A configured grass field: terrain mesh, blade template, instance buffer
//! and wind state, kept consistent with one [`GrassConfig`].

use std::time::Instant;

use glam::Vec3;

use super::blade::BladeGeometry;
use super::config::GrassConfig;
use super::instances::{self, BladeTransform, InstanceRaw};
use super::params::GrassUniform;
use super::wind::{WindNoise, WindState};
use crate::core::Result;
use crate::terrain::{HeightField, HeightSample, TerrainMesh};

/// Which parts of the field a reconfiguration rebuilt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rebuilt {
    pub instances: bool,
    pub terrain_mesh: bool,
    pub blade: bool,
}

impl Rebuilt {
    pub fn any(&self) -> bool {
        self.instances || self.terrain_mesh || self.blade
    }
}

/// Owns every buffer derived from a [`GrassConfig`].
///
/// Buffers are only ever replaced wholesale, between frames, so the render
/// stage never sees a partially written instance buffer.
pub struct GrassField {
    config: GrassConfig,
    terrain_mesh: TerrainMesh,
    blade: BladeGeometry,
    transforms: Vec<BladeTransform>,
    wind: WindState,
    noise: WindNoise,
}

impl GrassField {
    /// Validate `config` and build every buffer.
    pub fn new(config: GrassConfig) -> Result<Self> {
        if let Err(e) = config.validate() {
            log::warn!("Rejected grass config: {}", e);
            return Err(e);
        }

        let start = Instant::now();
        let terrain_mesh = build_mesh(&config);
        let transforms = instances::generate(&config.placement(), &config.terrain);
        let blade = BladeGeometry::new(config.blade_width);
        let wind = WindState::new(config.wind.clone());
        let noise = WindNoise::new(config.noise_seed);

        log::info!(
            "Grass field built: {} blades, {} terrain vertices, {} hills in {:.1}ms",
            transforms.len(),
            terrain_mesh.vertex_count(),
            config.terrain.hill_count(),
            start.elapsed().as_secs_f64() * 1000.0,
        );

        Ok(Self {
            config,
            terrain_mesh,
            blade,
            transforms,
            wind,
            noise,
        })
    }

    /// Replace the configuration, regenerating only what its changes touch.
    ///
    /// Instance buffer: count, area, height range, terrain, seed.
    /// Terrain mesh: area, segments, terrain.
    /// Blade template: blade width.
    /// Wind and colors never trigger a rebuild. An invalid config leaves the
    /// field untouched.
    pub fn reconfigure(&mut self, config: GrassConfig) -> Result<Rebuilt> {
        if let Err(e) = config.validate() {
            log::warn!("Rejected grass config: {}", e);
            return Err(e);
        }

        let old = &self.config;
        let mut rebuilt = Rebuilt::default();

        if old.placement() != config.placement() || old.terrain != config.terrain {
            self.transforms = instances::generate(&config.placement(), &config.terrain);
            rebuilt.instances = true;
        }
        if old.area != config.area
            || old.terrain_segments != config.terrain_segments
            || old.terrain != config.terrain
        {
            self.terrain_mesh = build_mesh(&config);
            rebuilt.terrain_mesh = true;
        }
        if old.blade_width != config.blade_width {
            self.blade = BladeGeometry::new(config.blade_width);
            rebuilt.blade = true;
        }
        if old.wind != config.wind {
            self.wind.set_config(config.wind.clone());
        }
        if old.noise_seed != config.noise_seed {
            self.noise = WindNoise::new(config.noise_seed);
        }

        if rebuilt.any() {
            log::info!("Grass field reconfigured: {:?}", rebuilt);
        }
        self.config = config;
        Ok(rebuilt)
    }

    /// Advance the wind animation by one frame.
    pub fn update(&mut self, dt: f32) {
        self.wind.advance(dt);
    }

    /// Restart the wind animation at t = 0.
    pub fn reset_time(&mut self) {
        self.wind.reset();
    }

    #[inline]
    pub fn config(&self) -> &GrassConfig {
        &self.config
    }

    #[inline]
    pub fn terrain_mesh(&self) -> &TerrainMesh {
        &self.terrain_mesh
    }

    #[inline]
    pub fn blade(&self) -> &BladeGeometry {
        &self.blade
    }

    #[inline]
    pub fn transforms(&self) -> &[BladeTransform] {
        &self.transforms
    }

    #[inline]
    pub fn wind(&self) -> &WindState {
        &self.wind
    }

    #[inline]
    pub fn noise(&self) -> &WindNoise {
        &self.noise
    }

    /// Terrain sample at a ground position.
    pub fn height_at(&self, x: f32, z: f32) -> HeightSample {
        self.config.terrain.sample(x, z)
    }

    /// Linear RGB the renderer shades the terrain mesh with.
    pub fn terrain_color(&self) -> [f32; 3] {
        self.config.terrain_color.into()
    }

    /// GPU instance buffer contents.
    pub fn instance_data(&self) -> Vec<InstanceRaw> {
        self.transforms.iter().map(InstanceRaw::from).collect()
    }

    /// World-space tip position of blade `index` at the current time,
    /// including wind bend.
    pub fn blade_tip(&self, index: usize) -> Option<Vec3> {
        let t = self.transforms.get(index)?;
        let tip = t.to_mat4().transform_point3(Vec3::Y);
        Some(tip + self.wind.displacement(tip, 1.0, &self.noise))
    }

    /// Per-frame uniform for the blade shader.
    pub fn uniform(&self) -> GrassUniform {
        let wind = self.wind.config();
        GrassUniform {
            time: self.wind.time(),
            wind_strength: wind.strength,
            wind_speed: wind.speed,
            wind_turbulence: wind.turbulence,
            wind_direction: wind.heading().to_array(),
            gust: self.wind.gust(),
            gust_frequency: wind.gust_frequency,
            gust_strength: wind.gust_strength,
            blade_half_width: self.blade.half_width(),
            base_phase: self.wind.base_phase(),
            base_color: self.config.base_color.0,
            _pad0: 0.0,
            tip_color: self.config.tip_color.0,
            _pad1: 0.0,
        }
    }
}

fn build_mesh(config: &GrassConfig) -> TerrainMesh {
    TerrainMesh::build(
        config.area[0],
        config.area[1],
        config.terrain_segments,
        &config.terrain,
    )
}
