use cubes_geom::{IVec3, Vec2, Vec3};

use crate::constants::{INDICES_PER_FACE, QUAD_INDICES, VERTS_PER_FACE};
use crate::error::MeshError;

/// Fixed-capacity quad sink sized by the counting pass.
///
/// Buffers are allocated once for exactly `faces` quads and filled through a
/// running face cursor. Writing past the end or finishing short of the
/// reserved count is reported as an error rather than silently resizing.
#[derive(Clone, Debug)]
pub struct MeshBuild {
    vertices: Vec<Vec3>,
    triangles: Vec<u32>,
    uvs: Vec<Vec2>,
    reserved: usize,
    cursor: usize,
}

impl MeshBuild {
    pub fn with_faces(faces: usize) -> Result<Self, MeshError> {
        if faces
            .checked_mul(VERTS_PER_FACE)
            .is_none_or(|v| u32::try_from(v).is_err())
        {
            return Err(MeshError::IndexOverflow { faces });
        }
        Ok(Self {
            vertices: vec![Vec3::ZERO; faces * VERTS_PER_FACE],
            triangles: vec![0; faces * INDICES_PER_FACE],
            uvs: vec![Vec2::ZERO; faces * VERTS_PER_FACE],
            reserved: faces,
            cursor: 0,
        })
    }

    #[inline]
    pub fn faces_written(&self) -> usize {
        self.cursor
    }

    /// Writes one quad with corner `corner` spanned by `a1` and `a2`.
    /// `uvs` are already in slot order for v0..v3.
    pub fn push_face(
        &mut self,
        corner: IVec3,
        a1: IVec3,
        a2: IVec3,
        uvs: [Vec2; 4],
    ) -> Result<(), MeshError> {
        if self.cursor >= self.reserved {
            return Err(MeshError::BufferOverrun {
                counted: self.reserved,
            });
        }
        let vi = self.cursor * VERTS_PER_FACE;
        let ti = self.cursor * INDICES_PER_FACE;
        let corners = [corner, corner + a1, corner + a2, corner + a1 + a2];
        for (slot, c) in corners.into_iter().enumerate() {
            self.vertices[vi + slot] = Vec3::from(c);
            self.uvs[vi + slot] = uvs[slot];
        }
        // `with_faces` bounds the vertex count by u32::MAX.
        let base = vi as u32;
        for (k, off) in QUAD_INDICES.into_iter().enumerate() {
            self.triangles[ti + k] = base + off;
        }
        self.cursor += 1;
        Ok(())
    }

    /// Returns `(vertices, triangles, uvs)` once every reserved face is written.
    pub fn finish(self) -> Result<(Vec<Vec3>, Vec<u32>, Vec<Vec2>), MeshError> {
        if self.cursor != self.reserved {
            return Err(MeshError::FaceCountMismatch {
                counted: self.reserved,
                emitted: self.cursor,
            });
        }
        Ok((self.vertices, self.triangles, self.uvs))
    }
}
