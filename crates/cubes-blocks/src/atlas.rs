use cubes_geom::Vec2;
use serde::Deserialize;
use thiserror::Error;

use crate::types::BlockType;

/// Number of distinct ids a [`BlockType`] can hold.
pub const MAX_BLOCK_TYPES: u32 = BlockType::MAX as u32 + 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AtlasError {
    #[error("atlas grid must have at least one cell (cols={cols}, rows={rows})")]
    EmptyGrid { cols: u32, rows: u32 },
    #[error("atlas must declare at least one block type")]
    NoBlockTypes,
    #[error("{count} block types exceed the {max} representable block type ids")]
    BlockTypeIdRange { count: u32, max: u32 },
    #[error("{count} block types do not fit a {cols}x{rows} atlas")]
    TooManyBlockTypes { count: u32, cols: u32, rows: u32 },
}

/// Texture atlas geometry: a `cols` x `rows` grid of equally sized cells, one
/// cell per block type.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct AtlasConfig {
    #[serde(default = "default_cols")]
    pub cols: u32,
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default = "default_block_type_count")]
    pub block_type_count: u32,
}

fn default_cols() -> u32 {
    2
}
fn default_rows() -> u32 {
    2
}
fn default_block_type_count() -> u32 {
    3
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
            block_type_count: default_block_type_count(),
        }
    }
}

impl AtlasConfig {
    pub const fn new(cols: u32, rows: u32, block_type_count: u32) -> Self {
        Self {
            cols,
            rows,
            block_type_count,
        }
    }

    pub fn validate(&self) -> Result<(), AtlasError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(AtlasError::EmptyGrid {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.block_type_count == 0 {
            return Err(AtlasError::NoBlockTypes);
        }
        if self.block_type_count > MAX_BLOCK_TYPES {
            return Err(AtlasError::BlockTypeIdRange {
                count: self.block_type_count,
                max: MAX_BLOCK_TYPES,
            });
        }
        if u64::from(self.block_type_count) > u64::from(self.cols) * u64::from(self.rows) {
            return Err(AtlasError::TooManyBlockTypes {
                count: self.block_type_count,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(())
    }

    /// Atlas cell `(col, row)` assigned to a block type.
    #[inline]
    pub fn cell(&self, block_type: BlockType) -> Option<(u32, u32)> {
        if self.cols == 0 || u32::from(block_type) >= self.block_type_count {
            return None;
        }
        let bt = u32::from(block_type);
        Some((bt % self.cols, bt / self.cols))
    }
}

/// Order in which the four atlas corners are written to a face's vertex slots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum CornerOrder {
    #[default]
    Default,
    /// Swaps corners 1 and 2 for faces whose in-plane axes are transposed.
    Rotated,
}

impl CornerOrder {
    #[inline]
    pub const fn slots(self) -> [usize; 4] {
        match self {
            CornerOrder::Default => [0, 1, 2, 3],
            CornerOrder::Rotated => [0, 2, 1, 3],
        }
    }
}

/// Precomputed atlas corners per block type.
///
/// Corner layout within a cell:
///
/// ```text
/// 1 -- 3
/// |    |
/// 0 -- 2
/// ```
#[derive(Clone, Debug)]
pub struct AtlasUvMap {
    config: AtlasConfig,
    corners: Vec<[Vec2; 4]>,
}

impl AtlasUvMap {
    pub fn new(config: AtlasConfig) -> Result<Self, AtlasError> {
        config.validate()?;
        let x_shift = 1.0 / config.cols as f32;
        let y_shift = 1.0 / config.rows as f32;
        // `cell` yields every id below `block_type_count`, then `None`.
        let corners = (0..=BlockType::MAX)
            .map_while(|bt| config.cell(bt))
            .map(|(c, r)| {
                let u0 = c as f32 * x_shift;
                let u1 = (c + 1) as f32 * x_shift;
                let v0 = r as f32 * y_shift;
                let v1 = (r + 1) as f32 * y_shift;
                [
                    Vec2::new(u0, v0),
                    Vec2::new(u0, v1),
                    Vec2::new(u1, v0),
                    Vec2::new(u1, v1),
                ]
            })
            .collect();
        Ok(Self { config, corners })
    }

    #[inline]
    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// The four cell corners for `block_type` in slot order `[0, 1, 2, 3]`.
    #[inline]
    pub fn corners(&self, block_type: BlockType) -> Option<[Vec2; 4]> {
        self.corners.get(block_type as usize).copied()
    }

    /// Corners rearranged into vertex-slot order for a face.
    #[inline]
    pub fn face_uvs(&self, block_type: BlockType, order: CornerOrder) -> Option<[Vec2; 4]> {
        let c = self.corners(block_type)?;
        let s = order.slots();
        Some([c[s[0]], c[s[1]], c[s[2]], c[s[3]]])
    }
}
