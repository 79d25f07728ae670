use cubes_geom::{Aabb, Vec2, Vec3};
use cubes_world::ChunkRegion;

use crate::build::VertexSpace;
use crate::constants::VERTS_PER_FACE;

/// CPU-side mesh of one chunk, ready for upload by a renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    pub region: ChunkRegion,
    /// World-space bounds of the chunk region.
    pub bbox: Aabb,
    pub vertex_space: VertexSpace,
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<u32>,
    pub uvs: Vec<Vec2>,
}

impl ChunkMesh {
    #[inline]
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTS_PER_FACE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn flat_positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            out.extend_from_slice(&[v.x, v.y, v.z]);
        }
        out
    }

    pub fn flat_uvs(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.uvs.len() * 2);
        for uv in &self.uvs {
            out.extend_from_slice(&[uv.x, uv.y]);
        }
        out
    }
}
