//! Terrain grid mesh generation

use glam::Vec3;
use rayon::prelude::*;

use super::height::{unit_or_up, HeightField};

/// Largest grid resolution the builder accepts. `(MAX_SEGMENTS + 1)^2`
/// vertices stay addressable by `u32` indices.
pub const MAX_SEGMENTS: u32 = 4096;

/// Clamp a requested resolution into `1..=MAX_SEGMENTS`.
pub fn clamp_segments(segments: u32) -> u32 {
    segments.clamp(1, MAX_SEGMENTS)
}

/// Ground surface geometry sampled from a height field.
///
/// Raw vertex data only; the renderer owns buffer upload.
#[derive(Clone, Debug)]
pub struct TerrainMesh {
    /// Quads per edge (vertices per edge = segments + 1)
    pub segments: u32,
    /// Vertex positions in world space
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals recomputed from the triangle geometry
    pub normals: Vec<[f32; 3]>,
    /// UV coordinates over the whole surface
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices (CCW winding seen from above)
    pub indices: Vec<u32>,
    /// AABB minimum corner
    pub aabb_min: [f32; 3],
    /// AABB maximum corner
    pub aabb_max: [f32; 3],
}

impl TerrainMesh {
    /// Build a `width` x `depth` grid centered on the origin.
    ///
    /// Vertex heights equal `field.height(x, z)`. Normals are *not* taken
    /// from the field: they are accumulated from the final triangles so
    /// shading stays continuous across faces. `segments` is clamped with
    /// [`clamp_segments`].
    pub fn build<H: HeightField + ?Sized>(
        width: f32,
        depth: f32,
        segments: u32,
        field: &H,
    ) -> Self {
        let segments = clamp_segments(segments);
        let verts_per_edge = segments as usize + 1;
        let vert_count = verts_per_edge * verts_per_edge;

        let (positions, uvs): (Vec<[f32; 3]>, Vec<[f32; 2]>) = (0..vert_count)
            .into_par_iter()
            .map(|i| {
                let vx = i % verts_per_edge;
                let vz = i / verts_per_edge;
                let u = vx as f32 / segments as f32;
                let v = vz as f32 / segments as f32;
                let x = (u - 0.5) * width;
                let z = (v - 0.5) * depth;
                ([x, field.height(x, z), z], [u, v])
            })
            .unzip();

        let mut aabb_min = [f32::MAX; 3];
        let mut aabb_max = [f32::MIN; 3];
        for pos in &positions {
            for i in 0..3 {
                aabb_min[i] = aabb_min[i].min(pos[i]);
                aabb_max[i] = aabb_max[i].max(pos[i]);
            }
        }

        let indices = grid_indices(segments);
        let normals = vertex_normals(&positions, &indices);

        log::debug!(
            "Terrain mesh: {} vertices, {} triangles, height range [{:.3}, {:.3}]",
            positions.len(),
            indices.len() / 3,
            aabb_min[1],
            aabb_max[1],
        );

        Self {
            segments,
            positions,
            normals,
            uvs,
            indices,
            aabb_min,
            aabb_max,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Export geometry as `(vertices, triangles)` for collision consumers.
    pub fn trimesh_data(&self) -> (Vec<[f32; 3]>, Vec<[u32; 3]>) {
        let triangles = self
            .indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect();
        (self.positions.clone(), triangles)
    }
}

/// Two triangles per quad, CCW when viewed from +Y.
fn grid_indices(segments: u32) -> Vec<u32> {
    let verts_per_edge = segments + 1;
    let quads = segments as usize * segments as usize;
    let mut indices = Vec::with_capacity(quads * 6);

    for qz in 0..segments {
        for qx in 0..segments {
            let tl = qz * verts_per_edge + qx;
            let tr = tl + 1;
            let bl = tl + verts_per_edge;
            let br = bl + 1;

            indices.extend_from_slice(&[tl, bl, br]);
            indices.extend_from_slice(&[tl, br, tr]);
        }
    }

    indices
}

/// Area-weighted vertex normals accumulated from face normals.
fn vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let p0 = Vec3::from(positions[i0]);
        let p1 = Vec3::from(positions[i1]);
        let p2 = Vec3::from(positions[i2]);

        // Unnormalized cross product weights by triangle area
        let face = (p1 - p0).cross(p2 - p0);
        accum[i0] += face;
        accum[i1] += face;
        accum[i2] += face;
    }

    accum.into_iter().map(|n| unit_or_up(n).to_array()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::height::Flat;
    use crate::terrain::hill::Hill;

    #[test]
    fn test_flat_grid_layout() {
        let mesh = TerrainMesh::build(10.0, 6.0, 4, &Flat);
        assert_eq!(mesh.vertex_count(), 5 * 5);
        assert_eq!(mesh.indices.len(), 4 * 4 * 6);
        assert_eq!(mesh.aabb_min, [-5.0, 0.0, -3.0]);
        assert_eq!(mesh.aabb_max, [5.0, 0.0, 3.0]);
        assert_eq!(mesh.uvs[0], [0.0, 0.0]);
        assert_eq!(mesh.uvs[24], [1.0, 1.0]);
    }

    #[test]
    fn test_flat_normals_point_up() {
        let mesh = TerrainMesh::build(10.0, 10.0, 8, &Flat);
        for n in &mesh.normals {
            assert!((n[1] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_vertex_heights_match_field() {
        let hill = Hill::new([1.0, -0.5], 4.0, 2.0);
        let mesh = TerrainMesh::build(12.0, 12.0, 16, &hill);
        for p in &mesh.positions {
            assert_eq!(p[1], hill.height(p[0], p[2]));
        }
        assert!(mesh.aabb_max[1] > 1.5);
    }

    #[test]
    fn test_triangles_face_up() {
        let mesh = TerrainMesh::build(4.0, 4.0, 2, &Flat);
        let (verts, tris) = mesh.trimesh_data();
        assert_eq!(tris.len(), mesh.triangle_count());
        for tri in &tris {
            let p0 = Vec3::from(verts[tri[0] as usize]);
            let p1 = Vec3::from(verts[tri[1] as usize]);
            let p2 = Vec3::from(verts[tri[2] as usize]);
            assert!((p1 - p0).cross(p2 - p0).y > 0.0);
        }
    }

    #[test]
    fn test_normals_are_unit_on_hill() {
        let hill = Hill::new([0.0, 0.0], 3.0, 2.0).with_roundness(1.0);
        let mesh = TerrainMesh::build(8.0, 8.0, 12, &hill);
        for n in &mesh.normals {
            let len = Vec3::from(*n).length();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_segments_clamped() {
        let mesh = TerrainMesh::build(2.0, 2.0, 0, &Flat);
        assert_eq!(mesh.segments, 1);
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn test_segments_clamped_to_index_range() {
        assert_eq!(clamp_segments(0), 1);
        assert_eq!(clamp_segments(MAX_SEGMENTS), MAX_SEGMENTS);
        assert_eq!(clamp_segments(70_000), MAX_SEGMENTS);
        let verts = (MAX_SEGMENTS as u64 + 1).pow(2);
        assert!(verts <= u32::MAX as u64);
    }

    #[test]
    fn test_index_buffer_size() {
        let indices = grid_indices(7);
        assert_eq!(indices.len(), 7 * 7 * 6);
        assert_eq!(indices.iter().copied().max(), Some(8 * 8 - 1));
    }
}
