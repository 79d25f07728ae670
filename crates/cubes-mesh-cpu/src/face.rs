use cubes_blocks::CornerOrder;
use cubes_geom::{IVec3, Vec3};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

/// Order in which a block's faces are emitted: down, up, back, front, left, right.
pub const EMIT_ORDER: [Face; 6] = [
    Face::NegY,
    Face::PosY,
    Face::NegZ,
    Face::PosZ,
    Face::NegX,
    Face::PosX,
];

/// Quad placement for one face of the unit cube at the block's minimum corner.
///
/// Vertices are laid out as
///
/// ```text
/// 1 -- 3      v0 = origin        v1 = origin + a1
/// |    |      v2 = origin + a2   v3 = origin + a1 + a2
/// 0 -- 2
/// ```
///
/// with triangles `(0, 1, 2)` and `(1, 3, 2)`. `a1 x a2` is the outward normal.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FaceLayout {
    pub origin: IVec3,
    pub a1: IVec3,
    pub a2: IVec3,
    pub order: CornerOrder,
}

// Indexed by `Face::index`.
const LAYOUTS: [FaceLayout; 6] = [
    // PosY (up)
    FaceLayout {
        origin: IVec3::Y,
        a1: IVec3::Z,
        a2: IVec3::X,
        order: CornerOrder::Default,
    },
    // NegY (down)
    FaceLayout {
        origin: IVec3::ZERO,
        a1: IVec3::X,
        a2: IVec3::Z,
        order: CornerOrder::Default,
    },
    // PosX (right)
    FaceLayout {
        origin: IVec3::X,
        a1: IVec3::Y,
        a2: IVec3::Z,
        order: CornerOrder::Default,
    },
    // NegX (left)
    FaceLayout {
        origin: IVec3::ZERO,
        a1: IVec3::Z,
        a2: IVec3::Y,
        order: CornerOrder::Rotated,
    },
    // PosZ (front)
    FaceLayout {
        origin: IVec3::Z,
        a1: IVec3::X,
        a2: IVec3::Y,
        order: CornerOrder::Rotated,
    },
    // NegZ (back)
    FaceLayout {
        origin: IVec3::ZERO,
        a1: IVec3::Y,
        a2: IVec3::X,
        order: CornerOrder::Default,
    },
];

impl Face {
    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a face index `[0..6)` back into a `Face` value.
    #[inline]
    pub fn from_index(i: usize) -> Option<Face> {
        match i {
            0 => Some(Face::PosY),
            1 => Some(Face::NegY),
            2 => Some(Face::PosX),
            3 => Some(Face::NegX),
            4 => Some(Face::PosZ),
            5 => Some(Face::NegZ),
            _ => None,
        }
    }

    /// Returns the integer grid step when leaving the block through this face.
    #[inline]
    pub fn delta(self) -> IVec3 {
        match self {
            Face::PosY => IVec3::Y,
            Face::NegY => -IVec3::Y,
            Face::PosX => IVec3::X,
            Face::NegX => -IVec3::X,
            Face::PosZ => IVec3::Z,
            Face::NegZ => -IVec3::Z,
        }
    }

    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        Vec3::from(self.delta())
    }

    #[inline]
    pub fn layout(self) -> FaceLayout {
        LAYOUTS[self.index()]
    }
}
