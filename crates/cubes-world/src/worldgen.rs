use std::error::Error;
use std::fs;
use std::path::Path;

use cubes_blocks::{AtlasConfig, AtlasError};
use serde::Deserialize;
use thiserror::Error;

use crate::voxel::{ChunkCoord, ChunkExtents, ChunkRegion};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Atlas(#[from] AtlasError),
    #[error("chunk {axis} must be at least 1 block")]
    ZeroChunkExtent { axis: &'static str },
    #[error("chunk count must be at least 1")]
    ZeroChunkCount,
    #[error("{count} chunks of {width}x{height}x{depth} per axis exceed the addressable world size")]
    WorldTooLarge {
        width: usize,
        height: usize,
        depth: usize,
        count: usize,
    },
    #[error("terrain.{name} = {value} is outside [0, 1]")]
    RatioOutOfRange { name: &'static str, value: f32 },
    #[error("terrain.min_ratio ({min}) exceeds terrain.max_ratio ({max})")]
    InvertedHeightRange { min: f32, max: f32 },
    #[error("terrain.octaves must be at least 1")]
    ZeroOctaves,
    #[error("terrain.{name} = {value} must be finite and positive")]
    NonPositive { name: &'static str, value: f32 },
}

/// World layout and generation parameters, loaded from the `[chunk]`,
/// `[atlas]` and `[terrain]` tables.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub chunk: ChunkConfig,
    #[serde(default)]
    pub atlas: AtlasConfig,
    #[serde(default)]
    pub terrain: TerrainConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ChunkConfig {
    #[serde(default = "default_chunk_extent")]
    pub width: usize,
    #[serde(default = "default_chunk_extent")]
    pub height: usize,
    #[serde(default = "default_chunk_extent")]
    pub depth: usize,
    /// Chunks per axis.
    #[serde(default = "default_chunk_count")]
    pub count: usize,
}
fn default_chunk_extent() -> usize {
    16
}
fn default_chunk_count() -> usize {
    10
}
impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            width: default_chunk_extent(),
            height: default_chunk_extent(),
            depth: default_chunk_extent(),
            count: default_chunk_count(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TerrainMode {
    Noise,
    Flat,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlockTypePolicy {
    /// Cycle through every block type in traversal order.
    RoundRobin,
    /// Surface, topsoil and deep types per column.
    Layered,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TerrainConfig {
    #[serde(default = "default_mode")]
    pub mode: TerrainMode,
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "default_octaves")]
    pub octaves: u32,
    #[serde(default = "default_persistence")]
    pub persistence: f32,
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,
    #[serde(default = "default_min_ratio")]
    pub min_ratio: f32,
    #[serde(default = "default_max_ratio")]
    pub max_ratio: f32,
    #[serde(default = "default_flat_level")]
    pub flat_level: f32,
    #[serde(default = "default_block_types")]
    pub block_types: BlockTypePolicy,
    #[serde(default = "default_topsoil_depth")]
    pub topsoil_depth: u32,
}
fn default_mode() -> TerrainMode {
    TerrainMode::Noise
}
fn default_seed() -> i32 {
    1337
}
fn default_frequency() -> f32 {
    2.0
}
fn default_octaves() -> u32 {
    3
}
fn default_persistence() -> f32 {
    0.5
}
fn default_lacunarity() -> f32 {
    2.0
}
fn default_min_ratio() -> f32 {
    0.15
}
fn default_max_ratio() -> f32 {
    0.70
}
fn default_flat_level() -> f32 {
    0.5
}
fn default_block_types() -> BlockTypePolicy {
    BlockTypePolicy::RoundRobin
}
fn default_topsoil_depth() -> u32 {
    3
}
impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            seed: default_seed(),
            frequency: default_frequency(),
            octaves: default_octaves(),
            persistence: default_persistence(),
            lacunarity: default_lacunarity(),
            min_ratio: default_min_ratio(),
            max_ratio: default_max_ratio(),
            flat_level: default_flat_level(),
            block_types: default_block_types(),
            topsoil_depth: default_topsoil_depth(),
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("min_ratio", self.min_ratio),
            ("max_ratio", self.max_ratio),
            ("flat_level", self.flat_level),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RatioOutOfRange { name, value });
            }
        }
        if self.min_ratio > self.max_ratio {
            return Err(ConfigError::InvertedHeightRange {
                min: self.min_ratio,
                max: self.max_ratio,
            });
        }
        if self.octaves == 0 {
            return Err(ConfigError::ZeroOctaves);
        }
        for (name, value) in [
            ("frequency", self.frequency),
            ("lacunarity", self.lacunarity),
            ("persistence", self.persistence),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

impl ChunkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, v) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if v == 0 {
                return Err(ConfigError::ZeroChunkExtent { axis });
            }
        }
        if self.count == 0 {
            return Err(ConfigError::ZeroChunkCount);
        }
        let too_large = ConfigError::WorldTooLarge {
            width: self.width,
            height: self.height,
            depth: self.depth,
            count: self.count,
        };
        // Grid coordinates are i32, and the cell and chunk totals must fit usize.
        let mut cells = 1usize;
        for extent in [self.width, self.height, self.depth] {
            let dim = extent
                .checked_mul(self.count)
                .filter(|&d| i32::try_from(d).is_ok())
                .ok_or_else(|| too_large.clone())?;
            cells = cells.checked_mul(dim).ok_or_else(|| too_large.clone())?;
        }
        self.count.checked_pow(3).ok_or(too_large)?;
        Ok(())
    }

    #[inline]
    pub fn extents(&self) -> ChunkExtents {
        ChunkExtents::new(self.width, self.height, self.depth)
    }
}

impl WorldConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: WorldConfig = toml::from_str(toml_str)?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Rejects invalid configuration before any grid or mesh work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunk.validate()?;
        self.atlas.validate()?;
        self.terrain.validate()?;
        Ok(())
    }

    /// Full grid dimensions: `count` chunks along every axis.
    #[inline]
    pub fn grid_dims(&self) -> (usize, usize, usize) {
        let n = self.chunk.count;
        (
            self.chunk.width * n,
            self.chunk.height * n,
            self.chunk.depth * n,
        )
    }

    /// Every chunk coordinate in the world, x outer, z inner.
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        let n = self.chunk.count as i32;
        let mut out = Vec::with_capacity(self.chunk.count.pow(3));
        for cx in 0..n {
            for cy in 0..n {
                for cz in 0..n {
                    out.push(ChunkCoord::new(cx, cy, cz));
                }
            }
        }
        out
    }

    #[inline]
    pub fn region(&self, coord: ChunkCoord) -> ChunkRegion {
        ChunkRegion::for_coord(coord, self.chunk.extents())
    }
}
