use cubes_blocks::Block;
use cubes_geom::IVec3;
use thiserror::Error;

/// Returned by [`VoxelGrid::block_type`] for coordinates outside the grid.
pub const ABSENT_BLOCK_TYPE: i32 = -1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("block buffer has {actual} entries, expected {expected} for {width}x{height}x{depth}")]
    LengthMismatch {
        width: usize,
        height: usize,
        depth: usize,
        expected: usize,
        actual: usize,
    },
}

/// Dense block storage for the whole world.
///
/// Any coordinate outside `[0,width) x [0,height) x [0,depth)` does not exist;
/// every query answers it with a defined negative result instead of failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    depth: usize,
    blocks: Vec<Block>,
}

impl VoxelGrid {
    /// Grid of empty (not solid, not visible) blocks.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Self::filled(width, height, depth, Block::EMPTY)
    }

    pub fn filled(width: usize, height: usize, depth: usize, block: Block) -> Self {
        Self {
            width,
            height,
            depth,
            blocks: vec![block; width * height * depth],
        }
    }

    /// Wraps an existing buffer laid out as `(y * depth + z) * width + x`.
    pub fn from_blocks(
        width: usize,
        height: usize,
        depth: usize,
        blocks: Vec<Block>,
    ) -> Result<Self, GridError> {
        let expected = width * height * depth;
        if blocks.len() != expected {
            return Err(GridError::LengthMismatch {
                width,
                height,
                depth,
                expected,
                actual: blocks.len(),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            blocks,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.depth)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.depth + z) * self.width + x
    }

    #[inline]
    fn index_of(&self, pos: IVec3) -> Option<usize> {
        if !self.exists(pos) {
            return None;
        }
        Some(self.idx(pos.x as usize, pos.y as usize, pos.z as usize))
    }

    #[inline]
    pub fn exists(&self, pos: IVec3) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
            && (pos.z as usize) < self.depth
    }

    #[inline]
    pub fn get(&self, pos: IVec3) -> Option<Block> {
        self.index_of(pos).map(|i| self.blocks[i])
    }

    #[inline]
    pub fn is_solid(&self, pos: IVec3) -> bool {
        self.get(pos).is_some_and(|b| b.solid)
    }

    #[inline]
    pub fn is_visible(&self, pos: IVec3) -> bool {
        self.get(pos).is_some_and(|b| b.visible)
    }

    /// Block type at `pos`, or [`ABSENT_BLOCK_TYPE`] when `pos` does not exist.
    #[inline]
    pub fn block_type(&self, pos: IVec3) -> i32 {
        self.get(pos)
            .map_or(ABSENT_BLOCK_TYPE, |b| i32::from(b.block_type))
    }

    /// Writes a block; returns `false` and leaves the grid untouched when `pos`
    /// is out of bounds.
    pub fn set(&mut self, pos: IVec3, block: Block) -> bool {
        match self.index_of(pos) {
            Some(i) => {
                self.blocks[i] = block;
                true
            }
            None => false,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.visible).count()
    }
}
