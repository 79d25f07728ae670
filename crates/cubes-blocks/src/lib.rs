//! Block record and texture atlas mapping.
#![forbid(unsafe_code)]

pub mod atlas;
pub mod types;

pub use atlas::{AtlasConfig, AtlasError, AtlasUvMap, CornerOrder, MAX_BLOCK_TYPES};
pub use types::{Block, BlockType};
