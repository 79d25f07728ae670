//! Voxel grid storage, chunk addressing, configuration and terrain generation.
#![forbid(unsafe_code)]

pub mod voxel;
pub mod worldgen;

pub use voxel::{
    ABSENT_BLOCK_TYPE, ChunkCoord, ChunkExtents, ChunkRegion, FlatHeight, GridError, HeightNoise,
    NoiseHeight, TerrainGenerator, VoxelGrid,
};
pub use worldgen::{
    BlockTypePolicy, ChunkConfig, ConfigError, TerrainConfig, TerrainMode, WorldConfig,
};
