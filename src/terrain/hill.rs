//! Parametric hill height field.
//!
//! A radially decaying bump with configurable profile: roundness exponent,
//! a flat-topped plateau, anisotropic stretch, rotation and an optional
//! ridge that sharpens the bump along one axis. Outside `radius + skirt`
//! the field is flat.

use serde::{Deserialize, Serialize};

use super::height::{central_gradient, HeightField, HeightSample};
use crate::core::{Error, Result, Vec2};

/// Parameters for a single hill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hill {
    /// Ground position `[x, z]` of the peak.
    pub center: [f32; 2],
    /// Radius of the bump in local (scaled) units.
    pub radius: f32,
    /// Peak height at the center.
    pub height: f32,
    /// Profile exponent on `(1 - t)`. 1 = cone, 2 = rounded.
    pub roundness: f32,
    /// Fraction of the radius held at peak height `[0, 1)`.
    pub plateau: f32,
    /// Width of the flat transition band beyond `radius`.
    pub skirt: f32,
    /// Anisotropic stretch `[sx, sz]` applied before measuring distance.
    pub scale: [f32; 2],
    /// Rotation about the vertical axis (radians).
    pub rotation: f32,
    /// Ridge sharpening factor. 0 disables the ridge.
    pub ridge: f32,
    /// Ridge axis direction in hill-local space (radians).
    pub ridge_direction: f32,
}

impl Default for Hill {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            radius: 5.0,
            height: 1.0,
            roundness: 2.0,
            plateau: 0.0,
            skirt: 0.0,
            scale: [1.0, 1.0],
            rotation: 0.0,
            ridge: 0.0,
            ridge_direction: 0.0,
        }
    }
}

impl Hill {
    /// Hill at `center` with the given radius and peak height; every other
    /// parameter takes its default.
    pub fn new(center: [f32; 2], radius: f32, height: f32) -> Self {
        Self {
            center,
            radius,
            height,
            ..Default::default()
        }
    }

    pub fn with_roundness(mut self, roundness: f32) -> Self {
        self.roundness = roundness;
        self
    }

    pub fn with_plateau(mut self, plateau: f32) -> Self {
        self.plateau = plateau;
        self
    }

    pub fn with_skirt(mut self, skirt: f32) -> Self {
        self.skirt = skirt;
        self
    }

    pub fn with_scale(mut self, sx: f32, sz: f32) -> Self {
        self.scale = [sx, sz];
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_ridge(mut self, ridge: f32, direction: f32) -> Self {
        self.ridge = ridge;
        self.ridge_direction = direction;
        self
    }

    /// Outer extent of the hill's influence in local units.
    #[inline]
    pub fn extent(&self) -> f32 {
        self.radius + self.skirt
    }

    /// Reject parameter sets the height function is not defined for.
    pub fn validate(&self) -> Result<()> {
        let finite = self.center.iter().chain(self.scale.iter()).all(|v| v.is_finite())
            && [
                self.radius,
                self.height,
                self.roundness,
                self.plateau,
                self.skirt,
                self.rotation,
                self.ridge,
                self.ridge_direction,
            ]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(Error::config("hill parameters must be finite"));
        }
        if self.radius <= 0.0 {
            return Err(Error::config(format!("hill radius must be > 0, got {}", self.radius)));
        }
        if self.roundness < 0.0 {
            return Err(Error::config(format!("hill roundness must be >= 0, got {}", self.roundness)));
        }
        if !(0.0..1.0).contains(&self.plateau) {
            return Err(Error::config(format!("hill plateau must be in [0, 1), got {}", self.plateau)));
        }
        if self.skirt < 0.0 {
            return Err(Error::config(format!("hill skirt must be >= 0, got {}", self.skirt)));
        }
        if self.scale[0] <= 0.0 || self.scale[1] <= 0.0 {
            return Err(Error::config(format!("hill scale must be > 0, got {:?}", self.scale)));
        }
        if self.ridge < 0.0 {
            return Err(Error::config(format!("hill ridge must be >= 0, got {}", self.ridge)));
        }
        Ok(())
    }

    /// Transform a world ground position into hill-local, scaled coordinates.
    fn to_local(&self, x: f32, z: f32) -> (f32, f32) {
        let dx = x - self.center[0];
        let dz = z - self.center[1];
        let (sin, cos) = self.rotation.sin_cos();
        // Inverse rotation
        let lx = dx * cos + dz * sin;
        let lz = -dx * sin + dz * cos;
        (lx / self.scale[0], lz / self.scale[1])
    }

    fn ridge_factor(&self, lx: f32, lz: f32) -> f32 {
        if self.ridge <= 0.0 {
            return 1.0;
        }
        let (sin, cos) = self.ridge_direction.sin_cos();
        // Distance from the ridge axis, perpendicular to it
        let across = (-lx * sin + lz * cos).abs();
        (-self.ridge * across / self.radius).exp()
    }

    /// Hill-local distance from the center, in scaled units.
    fn local_distance(&self, x: f32, z: f32) -> f32 {
        let (lx, lz) = self.to_local(x, z);
        (lx * lx + lz * lz).sqrt()
    }
}

impl HeightField for Hill {
    fn height(&self, x: f32, z: f32) -> f32 {
        let (lx, lz) = self.to_local(x, z);
        let dist = (lx * lx + lz * lz).sqrt();

        if dist >= self.extent() {
            return 0.0;
        }
        // Skirt band: flat transition zone
        if dist >= self.radius {
            return 0.0;
        }

        let mut t = dist / self.radius;
        t = if t < self.plateau {
            0.0
        } else {
            (t - self.plateau) / (1.0 - self.plateau)
        };

        self.height * (1.0 - t).max(0.0).powf(self.roundness) * self.ridge_factor(lx, lz)
    }

    // Within GRADIENT_EPSILON of the extent the stencil reaches inside the
    // hill. Outside the extent the surface is flat.
    fn gradient(&self, x: f32, z: f32) -> Vec2 {
        if self.local_distance(x, z) >= self.extent() {
            return Vec2::ZERO;
        }
        central_gradient(self, x, z)
    }

    fn sample(&self, x: f32, z: f32) -> HeightSample {
        if self.local_distance(x, z) >= self.extent() {
            return HeightSample::FLAT;
        }
        HeightSample::from_gradient(self.height(x, z), central_gradient(self, x, z))
    }
}
