use core::ops::BitAnd;

use cubes_geom::IVec3;
use cubes_world::VoxelGrid;

use crate::face::{EMIT_ORDER, Face};

/// One flag per axis direction around a block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborStates {
    pub neg_x: bool,
    pub pos_x: bool,
    pub neg_y: bool,
    pub pos_y: bool,
    pub neg_z: bool,
    pub pos_z: bool,
}

impl NeighborStates {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            neg_x: false,
            pos_x: false,
            neg_y: false,
            pos_y: false,
            neg_z: false,
            pos_z: false,
        }
    }

    #[inline]
    pub fn from_fn(mut f: impl FnMut(Face) -> bool) -> Self {
        Self {
            neg_x: f(Face::NegX),
            pos_x: f(Face::PosX),
            neg_y: f(Face::NegY),
            pos_y: f(Face::PosY),
            neg_z: f(Face::NegZ),
            pos_z: f(Face::PosZ),
        }
    }

    #[inline]
    pub fn get(self, face: Face) -> bool {
        match face {
            Face::NegX => self.neg_x,
            Face::PosX => self.pos_x,
            Face::NegY => self.neg_y,
            Face::PosY => self.pos_y,
            Face::NegZ => self.neg_z,
            Face::PosZ => self.pos_z,
        }
    }

    #[inline]
    pub fn count(self) -> usize {
        EMIT_ORDER.iter().filter(|&&f| self.get(f)).count()
    }
}

impl BitAnd for NeighborStates {
    type Output = NeighborStates;
    #[inline]
    fn bitand(self, rhs: NeighborStates) -> NeighborStates {
        NeighborStates::from_fn(|f| self.get(f) && rhs.get(f))
    }
}

/// Six-direction solid/visible lookups against the shared grid.
///
/// Neighbours outside the grid read as neither solid nor visible, so faces on
/// the world boundary are always exposed.
#[derive(Clone, Copy)]
pub struct NeighborQuery<'g> {
    grid: &'g VoxelGrid,
}

impl<'g> NeighborQuery<'g> {
    #[inline]
    pub fn new(grid: &'g VoxelGrid) -> Self {
        Self { grid }
    }

    /// Stepping past the `i32` range lands outside the grid.
    #[inline]
    fn neighbor(pos: IVec3, face: Face) -> Option<IVec3> {
        pos.checked_add(face.delta())
    }

    #[inline]
    pub fn solid_states(&self, pos: IVec3) -> NeighborStates {
        NeighborStates::from_fn(|f| Self::neighbor(pos, f).is_some_and(|n| self.grid.is_solid(n)))
    }

    #[inline]
    pub fn visible_states(&self, pos: IVec3) -> NeighborStates {
        NeighborStates::from_fn(|f| {
            Self::neighbor(pos, f).is_some_and(|n| self.grid.is_visible(n))
        })
    }

    /// Neighbours that hide the shared face: solid and visible at once.
    #[inline]
    pub fn occluders(&self, pos: IVec3) -> NeighborStates {
        self.solid_states(pos) & self.visible_states(pos)
    }

    /// Faces of the block at `pos` that must be emitted, in emission order.
    #[inline]
    pub fn exposed_faces(&self, pos: IVec3) -> impl Iterator<Item = Face> {
        let occ = self.occluders(pos);
        EMIT_ORDER.into_iter().filter(move |&f| !occ.get(f))
    }

    #[inline]
    pub fn exposed_face_count(&self, pos: IVec3) -> usize {
        6 - self.occluders(pos).count()
    }
}
