mod chunk_coord;
pub mod generation;
mod grid;
pub mod noise;

pub use chunk_coord::{ChunkCoord, ChunkExtents, ChunkRegion};
pub use generation::TerrainGenerator;
pub use grid::{ABSENT_BLOCK_TYPE, GridError, VoxelGrid};
pub use noise::{FlatHeight, HeightNoise, NoiseHeight};
