//! GPU-ready grass uniform (80 bytes, 16-byte aligned).
//!
//! Everything the blade vertex stage needs to reproduce
//! [`wind_displacement`](super::wind::wind_displacement) plus the shading
//! colors.

use bytemuck::{Pod, Zeroable};

/// GPU uniform for the grass blades.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct GrassUniform {
    pub time: f32,
    pub wind_strength: f32,
    pub wind_speed: f32,
    pub wind_turbulence: f32,
    // -- 16 bytes --
    pub wind_direction: [f32; 3],
    pub gust: f32,
    // -- 16 bytes --
    pub gust_frequency: f32,
    pub gust_strength: f32,
    pub blade_half_width: f32,
    pub base_phase: f32,
    // -- 16 bytes --
    pub base_color: [f32; 3],
    pub _pad0: f32,
    // -- 16 bytes --
    pub tip_color: [f32; 3],
    pub _pad1: f32,
    // -- 16 bytes --
    // Total: 80 bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grass_uniform_size() {
        assert_eq!(std::mem::size_of::<GrassUniform>(), 80);
    }

    #[test]
    fn test_grass_uniform_alignment() {
        assert_eq!(std::mem::size_of::<GrassUniform>() % 16, 0);
    }

    #[test]
    fn test_bytemuck_cast() {
        let p = GrassUniform::zeroed();
        let bytes = bytemuck::bytes_of(&p);
        assert_eq!(bytes.len(), 80);
    }
}
