//! CPU meshing crate: face-culling chunk mesher and helpers (engine-only).
#![forbid(unsafe_code)]

mod build;
mod chunk;
mod constants;
mod emit;
mod error;
mod face;
mod mesh_build;
mod neighbors;

pub use build::{ChunkMesher, MeshOptions, VertexSpace};
pub use chunk::ChunkMesh;
pub use error::MeshError;
pub use face::{EMIT_ORDER, Face, FaceLayout};
pub use mesh_build::MeshBuild;
pub use neighbors::{NeighborQuery, NeighborStates};
