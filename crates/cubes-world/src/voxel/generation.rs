use std::time::Instant;

use cubes_blocks::types::stock;
use cubes_blocks::{Block, BlockType, MAX_BLOCK_TYPES};

use super::grid::VoxelGrid;
use super::noise::{FlatHeight, HeightNoise, NoiseHeight};
use crate::worldgen::{BlockTypePolicy, ConfigError, TerrainMode, WorldConfig};

/// Fills a [`VoxelGrid`] from a continuous height function.
///
/// Every cell is solid; a cell is visible iff `y / height < h(x / width, z / depth)`.
pub struct TerrainGenerator {
    width: usize,
    height: usize,
    depth: usize,
    block_type_count: u32,
    policy: BlockTypePolicy,
    topsoil_depth: u32,
    height_fn: Box<dyn HeightNoise>,
}

impl TerrainGenerator {
    /// `block_type_count` is clamped into `[1, MAX_BLOCK_TYPES]`.
    pub fn new(
        dims: (usize, usize, usize),
        block_type_count: u32,
        height_fn: Box<dyn HeightNoise>,
    ) -> Self {
        let (width, height, depth) = dims;
        Self {
            width,
            height,
            depth,
            block_type_count: block_type_count.clamp(1, MAX_BLOCK_TYPES),
            policy: BlockTypePolicy::RoundRobin,
            topsoil_depth: 3,
            height_fn,
        }
    }

    pub fn with_policy(mut self, policy: BlockTypePolicy, topsoil_depth: u32) -> Self {
        self.policy = policy;
        self.topsoil_depth = topsoil_depth;
        self
    }

    /// Validates `cfg` and builds a generator sized `count` chunks per axis.
    pub fn from_config(cfg: &WorldConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let height_fn: Box<dyn HeightNoise> = match cfg.terrain.mode {
            TerrainMode::Noise => Box::new(NoiseHeight::new(&cfg.terrain)),
            TerrainMode::Flat => Box::new(FlatHeight(cfg.terrain.flat_level)),
        };
        Ok(
            Self::new(cfg.grid_dims(), cfg.atlas.block_type_count, height_fn)
                .with_policy(cfg.terrain.block_types, cfg.terrain.topsoil_depth),
        )
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    /// Height at a column, clamped into `[0, 1]`.
    #[inline]
    pub fn column_height(&self, x: usize, z: usize) -> f32 {
        let xn = x as f32 / self.width as f32;
        let zn = z as f32 / self.depth as f32;
        self.height_fn.height(xn, zn).clamp(0.0, 1.0)
    }

    #[inline]
    fn is_visible_at(&self, y: usize, h: f32) -> bool {
        (y as f32 / self.height as f32) < h
    }

    /// Number of visible cells stacked from `y = 0` in a column of height `h`.
    fn visible_run(&self, h: f32) -> usize {
        (0..self.height)
            .take_while(|&y| self.is_visible_at(y, h))
            .count()
    }

    fn layered_type(&self, y: usize, run: usize, visible: bool) -> BlockType {
        let raw = if !visible {
            stock::STONE
        } else {
            let below_surface = run - 1 - y;
            if below_surface == 0 {
                stock::GRASS
            } else if below_surface <= self.topsoil_depth as usize {
                stock::DIRT
            } else {
                stock::STONE
            }
        };
        // The remainder never exceeds `raw`.
        BlockType::try_from(u32::from(raw) % self.block_type_count).unwrap_or(stock::STONE)
    }

    pub fn generate(&self) -> VoxelGrid {
        let start = Instant::now();
        let mut grid = VoxelGrid::new(self.width, self.height, self.depth);

        let heights: Vec<f32> = (0..self.width)
            .flat_map(|x| (0..self.depth).map(move |z| (x, z)))
            .map(|(x, z)| self.column_height(x, z))
            .collect();
        let runs: Vec<usize> = match self.policy {
            BlockTypePolicy::Layered => heights.iter().map(|&h| self.visible_run(h)).collect(),
            BlockTypePolicy::RoundRobin => Vec::new(),
        };

        let mut next_type: BlockType = 0;
        for x in 0..self.width {
            for y in 0..self.height {
                for z in 0..self.depth {
                    let col = x * self.depth + z;
                    let visible = self.is_visible_at(y, heights[col]);
                    let block_type = match self.policy {
                        BlockTypePolicy::RoundRobin => {
                            let bt = next_type;
                            // `block_type_count <= MAX_BLOCK_TYPES`, so the successor fits.
                            next_type =
                                BlockType::try_from((u32::from(next_type) + 1) % self.block_type_count)
                                    .unwrap_or(0);
                            bt
                        }
                        BlockTypePolicy::Layered => self.layered_type(y, runs[col], visible),
                    };
                    let pos = (x as i32, y as i32, z as i32).into();
                    grid.set(pos, Block::new(true, visible, block_type));
                }
            }
        }

        log::info!(
            "terrain generated {}x{}x{} ({} visible of {}) in {} ms",
            self.width,
            self.height,
            self.depth,
            grid.visible_count(),
            grid.len(),
            start.elapsed().as_millis()
        );
        grid
    }
}
