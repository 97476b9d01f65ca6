//! Per-blade instance transform generation.
//!
//! Blades are scattered uniformly over the field area with no spatial
//! structure or collision avoidance; overlap is invisible at grass scale.
//! The whole buffer is regenerated whenever an input changes.

use std::f32::consts::TAU;
use std::time::Instant;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::terrain::height::{unit_or_up, HeightField, HeightSample};

/// Inputs that determine the instance buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementParams {
    pub count: u32,
    /// Field extent `[width, depth]`, centered on the origin.
    pub area: [f32; 2],
    /// Inclusive blade height range `[min, max]`.
    pub height_range: [f32; 2],
    /// RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Affine placement of one blade.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BladeTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl BladeTransform {
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Blade up axis in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

/// GPU instance data: column-major model matrix.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&BladeTransform> for InstanceRaw {
    fn from(t: &BladeTransform) -> Self {
        Self {
            model: t.to_mat4().to_cols_array_2d(),
        }
    }
}

/// Orientation that stands a blade on a surface with normal `normal` and
/// spins it by `yaw` about that normal.
pub fn surface_orientation(normal: Vec3, yaw: f32) -> Quat {
    let normal = unit_or_up(normal);
    let align = Quat::from_rotation_arc(Vec3::Y, normal);
    Quat::from_axis_angle(normal, yaw) * align
}

/// Compose the transform for a blade at `(x, z)` on `sample`.
#[inline]
fn place(x: f32, z: f32, sample: HeightSample, scale_y: f32, yaw: f32) -> BladeTransform {
    BladeTransform {
        translation: Vec3::new(x, sample.height, z),
        rotation: surface_orientation(sample.normal, yaw),
        scale: Vec3::new(1.0, scale_y, 1.0),
    }
}

/// Generate exactly `params.count` transforms using `rng`.
pub fn generate_with_rng<H, R>(params: &PlacementParams, field: &H, rng: &mut R) -> Vec<BladeTransform>
where
    H: HeightField + ?Sized,
    R: Rng,
{
    let half_w = params.area[0] * 0.5;
    let half_d = params.area[1] * 0.5;
    let [h_min, h_max] = params.height_range;

    (0..params.count)
        .map(|_| {
            let x = rng.gen_range(-half_w..=half_w);
            let z = rng.gen_range(-half_d..=half_d);
            let sample = field.sample(x, z);
            let scale_y = rng.gen_range(h_min..=h_max);
            let yaw = rng.gen_range(0.0..TAU);
            place(x, z, sample, scale_y, yaw)
        })
        .collect()
}

/// Generate the instance buffer, seeding the RNG from `params.seed`.
pub fn generate<H: HeightField + ?Sized>(params: &PlacementParams, field: &H) -> Vec<BladeTransform> {
    let start = Instant::now();
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let transforms = generate_with_rng(params, field, &mut rng);
    log::debug!(
        "Generated {} blade transforms in {:.2}ms",
        transforms.len(),
        start.elapsed().as_secs_f64() * 1000.0,
    );
    transforms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::height::Flat;
    use crate::terrain::hill::Hill;

    fn params(count: u32, seed: u64) -> PlacementParams {
        PlacementParams {
            count,
            area: [10.0, 6.0],
            height_range: [0.3, 0.8],
            seed: Some(seed),
        }
    }

    #[test]
    fn test_flat_field_scenario() {
        let p = PlacementParams {
            count: 100,
            area: [10.0, 10.0],
            ..params(0, 7)
        };
        let transforms = generate(&p, &Flat);
        assert_eq!(transforms.len(), 100);
        for t in &transforms {
            assert_eq!(t.translation.y, 0.0);
            assert!((t.up() - Vec3::Y).length() < 1e-5);
        }
    }

    #[test]
    fn test_positions_and_scales_within_bounds() {
        let hill = Hill::new([0.0, 0.0], 4.0, 2.0);
        let transforms = generate(&params(2000, 11), &hill);
        assert_eq!(transforms.len(), 2000);
        for t in &transforms {
            assert!(t.translation.x >= -5.0 && t.translation.x <= 5.0);
            assert!(t.translation.z >= -3.0 && t.translation.z <= 3.0);
            assert!(t.scale.y >= 0.3 && t.scale.y <= 0.8);
            assert_eq!(t.scale.x, 1.0);
            assert_eq!(t.scale.z, 1.0);
        }
    }

    #[test]
    fn test_heights_follow_field() {
        let hill = Hill::new([1.0, 0.0], 3.0, 1.5);
        for t in generate(&params(500, 3), &hill) {
            let expected = hill.sample(t.translation.x, t.translation.z);
            assert_eq!(t.translation.y, expected.height);
            assert!((t.up() - expected.normal).length() < 1e-4);
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(generate(&params(0, 1), &Flat).is_empty());
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let hill = Hill::new([0.0, 0.0], 4.0, 2.0);
        let a = generate(&params(64, 42), &hill);
        let b = generate(&params(64, 42), &hill);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ_but_stay_in_bounds() {
        let a = generate(&params(64, 1), &Flat);
        let b = generate(&params(64, 2), &Flat);
        assert_ne!(a, b);
        for t in a.iter().chain(b.iter()) {
            assert!(t.translation.x.abs() <= 5.0);
            assert!(t.translation.z.abs() <= 3.0);
        }
    }

    #[test]
    fn test_degenerate_height_range() {
        let p = PlacementParams {
            height_range: [0.5, 0.5],
            ..params(32, 9)
        };
        for t in generate(&p, &Flat) {
            assert_eq!(t.scale.y, 0.5);
        }
    }

    #[test]
    fn test_yaw_rotates_about_normal() {
        let normal = Vec3::new(0.3, 1.0, -0.2).normalize();
        for yaw in [0.0, 1.0, 2.5, 5.0] {
            let q = surface_orientation(normal, yaw);
            assert!((q * Vec3::Y - normal).length() < 1e-5);
        }
        let a = surface_orientation(normal, 0.0) * Vec3::X;
        let b = surface_orientation(normal, 1.0) * Vec3::X;
        assert!((a - b).length() > 0.1);
    }

    #[test]
    fn test_degenerate_normal_uses_up() {
        let q = surface_orientation(Vec3::ZERO, 0.0);
        assert!((q * Vec3::Y - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_instance_raw_matches_transform() {
        let t = BladeTransform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::new(1.0, 0.5, 1.0),
        };
        let raw = InstanceRaw::from(&t);
        assert_eq!(raw.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(raw.model[1][1], 0.5);
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 64);
    }
}
