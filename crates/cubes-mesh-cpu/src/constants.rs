//! Shared constants for cubes-mesh-cpu.

pub(crate) const VERTS_PER_FACE: usize = 4;
pub(crate) const INDICES_PER_FACE: usize = 6;

// Quad triangulation over v0..v3: (v0, v1, v2) and (v1, v3, v2).
pub(crate) const QUAD_INDICES: [u32; INDICES_PER_FACE] = [0, 1, 2, 1, 3, 2];
