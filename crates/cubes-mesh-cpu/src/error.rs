use cubes_geom::IVec3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("counting pass found {counted} faces but emission wrote {emitted}")]
    FaceCountMismatch { counted: usize, emitted: usize },
    #[error("emission overran buffers sized for {counted} faces")]
    BufferOverrun { counted: usize },
    #[error("block type {block_type} at {pos} has no atlas cell")]
    UnknownBlockType { block_type: i32, pos: IVec3 },
    #[error("{faces} faces exceed the u32 index range")]
    IndexOverflow { faces: usize },
}
