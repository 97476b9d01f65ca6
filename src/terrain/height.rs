//! Height field trait and the flat field.
//!
//! A height field maps a ground position `(x, z)` to an elevation and a
//! unit surface normal. Fields are immutable and deterministic: the mesh
//! builder and the blade placer both sample the same field and must agree.

use glam::{Vec2, Vec3};

/// Offset used for central-difference gradients.
pub const GRADIENT_EPSILON: f32 = 0.01;

/// Result of evaluating a height field at one ground position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightSample {
    pub height: f32,
    /// Always unit length.
    pub normal: Vec3,
}

impl HeightSample {
    /// Flat ground at height 0.
    pub const FLAT: Self = Self {
        height: 0.0,
        normal: Vec3::Y,
    };

    /// Build a sample from a height and a gradient `(dh/dx, dh/dz)`.
    pub fn from_gradient(height: f32, gradient: Vec2) -> Self {
        Self {
            height,
            normal: normal_from_gradient(gradient),
        }
    }
}

/// Surface normal `normalize(-dh/dx, 1, -dh/dz)`, falling back to up when
/// the gradient is degenerate.
pub fn normal_from_gradient(gradient: Vec2) -> Vec3 {
    let n = Vec3::new(-gradient.x, 1.0, -gradient.y);
    unit_or_up(n)
}

/// Normalize `v`, substituting `Vec3::Y` for zero-length or non-finite input.
pub fn unit_or_up(v: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if !len_sq.is_finite() || len_sq < 1e-12 {
        return Vec3::Y;
    }
    v / len_sq.sqrt()
}

/// Central-difference gradient of `field.height` at [`GRADIENT_EPSILON`].
pub fn central_gradient<H: HeightField + ?Sized>(field: &H, x: f32, z: f32) -> Vec2 {
    let e = GRADIENT_EPSILON;
    let dx = (field.height(x + e, z) - field.height(x - e, z)) / (2.0 * e);
    let dz = (field.height(x, z + e) - field.height(x, z - e)) / (2.0 * e);
    Vec2::new(dx, dz)
}

/// Pure function from ground position to elevation and surface normal.
pub trait HeightField: Send + Sync {
    /// Elevation at `(x, z)`.
    fn height(&self, x: f32, z: f32) -> f32;

    /// Height gradient `(dh/dx, dh/dz)` at `(x, z)`.
    ///
    /// Defaults to central differences of [`height`](Self::height) at
    /// [`GRADIENT_EPSILON`].
    fn gradient(&self, x: f32, z: f32) -> Vec2 {
        central_gradient(self, x, z)
    }

    /// Height and unit normal at `(x, z)`.
    fn sample(&self, x: f32, z: f32) -> HeightSample {
        HeightSample::from_gradient(self.height(x, z), self.gradient(x, z))
    }
}

impl<T: HeightField + ?Sized> HeightField for &T {
    fn height(&self, x: f32, z: f32) -> f32 {
        (**self).height(x, z)
    }

    fn gradient(&self, x: f32, z: f32) -> Vec2 {
        (**self).gradient(x, z)
    }

    fn sample(&self, x: f32, z: f32) -> HeightSample {
        (**self).sample(x, z)
    }
}

impl<T: HeightField + ?Sized> HeightField for Box<T> {
    fn height(&self, x: f32, z: f32) -> f32 {
        (**self).height(x, z)
    }

    fn gradient(&self, x: f32, z: f32) -> Vec2 {
        (**self).gradient(x, z)
    }

    fn sample(&self, x: f32, z: f32) -> HeightSample {
        (**self).sample(x, z)
    }
}

/// Constant zero-height ground.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Flat;

impl HeightField for Flat {
    fn height(&self, _x: f32, _z: f32) -> f32 {
        0.0
    }

    fn gradient(&self, _x: f32, _z: f32) -> Vec2 {
        Vec2::ZERO
    }

    fn sample(&self, _x: f32, _z: f32) -> HeightSample {
        HeightSample::FLAT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slope(f32);

    impl HeightField for Slope {
        fn height(&self, x: f32, _z: f32) -> f32 {
            x * self.0
        }
    }

    #[test]
    fn test_flat_is_up_everywhere() {
        for (x, z) in [(0.0, 0.0), (123.0, -45.0), (-1e4, 1e4)] {
            let s = Flat.sample(x, z);
            assert_eq!(s.height, 0.0);
            assert_eq!(s.normal, Vec3::Y);
        }
    }

    #[test]
    fn test_default_gradient_matches_slope() {
        let field = Slope(0.5);
        let g = field.gradient(3.0, 1.0);
        assert!((g.x - 0.5).abs() < 1e-3);
        assert!(g.y.abs() < 1e-6);

        let n = field.sample(3.0, 1.0).normal;
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!(n.x < 0.0, "normal should lean away from the uphill side");
    }

    #[test]
    fn test_degenerate_normal_falls_back_to_up() {
        assert_eq!(unit_or_up(Vec3::ZERO), Vec3::Y);
        assert_eq!(unit_or_up(Vec3::new(f32::NAN, 1.0, 0.0)), Vec3::Y);
        let n = normal_from_gradient(Vec2::new(f32::INFINITY, 0.0));
        assert_eq!(n, Vec3::Y);
    }

    #[test]
    fn test_boxed_field_delegates() {
        let field: Box<dyn HeightField> = Box::new(Slope(2.0));
        assert_eq!(field.height(1.5, 0.0), 3.0);
    }
}
