use serde::{Deserialize, Serialize};

pub type BlockType = u16;

/// Type ids of the stock three-cell atlas.
pub mod stock {
    use super::BlockType;

    pub const STONE: BlockType = 0;
    pub const GRASS: BlockType = 1;
    pub const DIRT: BlockType = 2;
}

/// One grid cell. Position is implied by where the block is stored.
///
/// `solid` and `visible` are independent: a block may be structurally solid
/// while not yet exposed terrain. Meshing keys face emission off `visible`.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Hash, Serialize, Deserialize)]
pub struct Block {
    pub solid: bool,
    pub visible: bool,
    pub block_type: BlockType,
}

impl Block {
    pub const EMPTY: Block = Block {
        solid: false,
        visible: false,
        block_type: 0,
    };

    #[inline]
    pub const fn new(solid: bool, visible: bool, block_type: BlockType) -> Self {
        Self {
            solid,
            visible,
            block_type,
        }
    }

    /// Solid and visible: occludes neighbours and renders.
    #[inline]
    pub const fn opaque(block_type: BlockType) -> Self {
        Self::new(true, true, block_type)
    }

    /// Solid but not visible terrain.
    #[inline]
    pub const fn hidden(block_type: BlockType) -> Self {
        Self::new(true, false, block_type)
    }

    #[inline]
    pub const fn occludes(self) -> bool {
        self.solid && self.visible
    }
}
