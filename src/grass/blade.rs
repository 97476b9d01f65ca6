//! Blade template geometry shared by every instance.

/// A single flat triangle, one unit tall, rooted at the origin.
///
/// Instances scale it vertically to their own height. `height_fractions`
/// carries the normalized position along the blade (0 at the root, 1 at the
/// tip) which drives both the root-to-tip color gradient and wind weighting.
#[derive(Clone, Debug, PartialEq)]
pub struct BladeGeometry {
    pub positions: [[f32; 3]; 3],
    pub normals: [[f32; 3]; 3],
    pub height_fractions: [f32; 3],
    pub indices: [u32; 3],
}

impl BladeGeometry {
    /// Triangle with base half-width `half_width` in the local XY plane.
    pub fn new(half_width: f32) -> Self {
        Self {
            positions: [
                [-half_width, 0.0, 0.0],
                [half_width, 0.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            normals: [[0.0, 0.0, 1.0]; 3],
            height_fractions: [0.0, 0.0, 1.0],
            indices: [0, 1, 2],
        }
    }

    pub fn half_width(&self) -> f32 {
        self.positions[1][0]
    }
}

impl Default for BladeGeometry {
    fn default() -> Self {
        Self::new(0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_on_ground_tip_at_unit_height() {
        let blade = BladeGeometry::new(0.1);
        assert_eq!(blade.positions[0][1], 0.0);
        assert_eq!(blade.positions[1][1], 0.0);
        assert_eq!(blade.positions[2][1], 1.0);
        assert_eq!(blade.half_width(), 0.1);
    }

    #[test]
    fn test_height_fraction_follows_y() {
        let blade = BladeGeometry::default();
        for (p, h) in blade.positions.iter().zip(blade.height_fractions) {
            assert_eq!(p[1], h);
        }
    }
}
