//! Wind animation for grass blades.
//!
//! [`WindState`] is advanced once per frame and carries the elapsed time
//! plus per-frame derived scalars. [`wind_displacement`] is the per-vertex
//! bend the blade vertex stage applies; it is a pure function of world
//! position, height along the blade, config and time so it can be checked
//! without a GPU.

use glam::{Vec2, Vec3};
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Wind parameters. Replaced as a whole, never patched field by field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Overall displacement amplitude at the blade tip.
    pub strength: f32,
    /// Time multiplier for every oscillation.
    pub speed: f32,
    /// Wind heading in the XZ plane (radians, 0 = +X).
    pub direction: f32,
    /// Weight of the noise turbulence term.
    pub turbulence: f32,
    /// Gust cycles per unit of `time * speed`.
    pub gust_frequency: f32,
    /// Peak gust contribution.
    pub gust_strength: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            strength: 0.3,
            speed: 1.0,
            direction: 0.0,
            turbulence: 0.5,
            gust_frequency: 0.2,
            gust_strength: 0.3,
        }
    }
}

impl WindConfig {
    /// Unit heading vector in the XZ plane.
    pub fn heading(&self) -> Vec3 {
        let (sin, cos) = self.direction.sin_cos();
        Vec3::new(cos, 0.0, sin)
    }

    /// Horizontal unit vector perpendicular to the heading.
    pub fn crosswind(&self) -> Vec3 {
        let (sin, cos) = self.direction.sin_cos();
        Vec3::new(-sin, 0.0, cos)
    }

    pub fn validate(&self) -> Result<()> {
        let values = [
            self.strength,
            self.speed,
            self.direction,
            self.turbulence,
            self.gust_frequency,
            self.gust_strength,
        ];
        if !values.iter().all(|v| v.is_finite()) {
            return Err(Error::config(format!("wind parameters must be finite, got {:?}", self)));
        }
        Ok(())
    }
}

/// Seeded 3D gradient noise shared by the turbulence and sway terms.
#[derive(Clone)]
pub struct WindNoise {
    perlin: Perlin,
}

impl WindNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Noise in roughly [-1, 1].
    #[inline]
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        self.perlin.get([x as f64, y as f64, z as f64]) as f32
    }
}

impl Default for WindNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl std::fmt::Debug for WindNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindNoise").finish_non_exhaustive()
    }
}

/// Gust envelope `gust_strength * (0.5 + 0.5 sin(t * speed * gust_frequency))^4`.
#[inline]
pub fn gust_envelope(config: &WindConfig, time: f32) -> f32 {
    let s = 0.5 + 0.5 * (time * config.speed * config.gust_frequency).sin();
    config.gust_strength * s.powi(4)
}

/// Horizontal phase offset so neighbouring blades do not sway in lockstep.
#[inline]
pub fn spatial_phase(world: Vec2) -> f32 {
    world.x * 0.5 + world.y * 0.5
}

/// Displacement of a blade vertex.
///
/// `height_fraction` is the normalized position along the blade and is
/// clamped to [0, 1]. The bend scales with its square, so the root is pinned
/// and the tip moves most.
pub fn wind_displacement(
    world_pos: Vec3,
    height_fraction: f32,
    config: &WindConfig,
    time: f32,
    noise: &WindNoise,
) -> Vec3 {
    let h = height_fraction.clamp(0.0, 1.0);
    let weight = h * h;
    if weight == 0.0 {
        return Vec3::ZERO;
    }

    let ground = Vec2::new(world_pos.x, world_pos.z);
    let t = time * config.speed;

    let base_wave = (t * 2.0 + spatial_phase(ground)).sin();
    let turbulence = noise.sample(ground.x * 0.1, ground.y * 0.1, t * 0.5) * config.turbulence;
    let gust = gust_envelope(config, time);

    let bend = (base_wave + turbulence + gust) * config.strength * weight;
    let sway = noise.sample(ground.x * 0.2 + 100.0, ground.y * 0.2 + 100.0, t * 0.7)
        * config.turbulence
        * config.strength
        * 0.3
        * weight;

    config.heading() * bend + config.crosswind() * sway
}

/// Per-frame wind animation state.
#[derive(Clone, Debug, Default)]
pub struct WindState {
    config: WindConfig,
    /// Elapsed animation time in seconds.
    time: f32,
    /// `time * speed * 2`, the base wave phase before the spatial offset.
    base_phase: f32,
    /// Current gust envelope value.
    gust: f32,
}

impl WindState {
    pub fn new(config: WindConfig) -> Self {
        let mut state = Self {
            config,
            ..Default::default()
        };
        state.recompute();
        state
    }

    /// Advance elapsed time by `dt` seconds and recompute derived values.
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
        self.recompute();
    }

    /// Jump to an absolute elapsed time.
    pub fn set_time(&mut self, time: f32) {
        self.time = time;
        self.recompute();
    }

    /// Back to t = 0, as on a fresh mount.
    pub fn reset(&mut self) {
        self.set_time(0.0);
    }

    /// Replace the configuration. Elapsed time is kept.
    pub fn set_config(&mut self, config: WindConfig) {
        self.config = config;
        self.recompute();
    }

    #[inline]
    pub fn config(&self) -> &WindConfig {
        &self.config
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn base_phase(&self) -> f32 {
        self.base_phase
    }

    #[inline]
    pub fn gust(&self) -> f32 {
        self.gust
    }

    /// Displacement of one vertex at the current time.
    pub fn displacement(&self, world_pos: Vec3, height_fraction: f32, noise: &WindNoise) -> Vec3 {
        wind_displacement(world_pos, height_fraction, &self.config, self.time, noise)
    }

    fn recompute(&mut self) {
        self.base_phase = self.time * self.config.speed * 2.0;
        self.gust = gust_envelope(&self.config, self.time);
    }
}
