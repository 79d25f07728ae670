use std::fmt;

use cubes_geom::{Aabb, IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Index of a chunk within the world's chunk lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    /// Global block coordinate of this chunk's minimum corner.
    #[inline]
    pub fn origin(self, extents: ChunkExtents) -> IVec3 {
        IVec3::new(self.cx, self.cy, self.cz).mul_elem(extents.as_ivec3())
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk {}, {}, {}", self.cx, self.cy, self.cz)
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}

/// Chunk size in blocks along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkExtents {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl ChunkExtents {
    #[inline]
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Extents as grid steps, saturating at `i32::MAX` per axis.
    #[inline]
    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(
            axis_len(self.width),
            axis_len(self.height),
            axis_len(self.depth),
        )
    }
}

#[inline]
fn axis_len(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// A cuboid sub-volume of the global grid. Owns no block data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkRegion {
    pub origin: IVec3,
    pub extents: ChunkExtents,
}

impl ChunkRegion {
    #[inline]
    pub const fn new(origin: IVec3, extents: ChunkExtents) -> Self {
        Self { origin, extents }
    }

    #[inline]
    pub fn for_coord(coord: ChunkCoord, extents: ChunkExtents) -> Self {
        Self::new(coord.origin(extents), extents)
    }

    /// Global coordinate of a local cell; `None` past the `i32` range.
    #[inline]
    pub fn to_global(&self, local: IVec3) -> Option<IVec3> {
        self.origin.checked_add(local)
    }

    #[inline]
    pub fn contains(&self, global: IVec3) -> bool {
        let Some(l) = global.checked_sub(self.origin) else {
            return false;
        };
        l.x >= 0
            && l.y >= 0
            && l.z >= 0
            && (l.x as usize) < self.extents.width
            && (l.y as usize) < self.extents.height
            && (l.z as usize) < self.extents.depth
    }

    /// Local coordinates in meshing order: x outer, then y, z inner.
    pub fn iter_local(&self) -> impl Iterator<Item = IVec3> + '_ {
        let ChunkExtents {
            width,
            height,
            depth,
        } = self.extents;
        (0..axis_len(width)).flat_map(move |x| {
            (0..axis_len(height))
                .flat_map(move |y| (0..axis_len(depth)).map(move |z| IVec3::new(x, y, z)))
        })
    }

    /// World-space bounds in block units.
    pub fn bounds(&self) -> Aabb {
        let min = Vec3::from(self.origin);
        let size = Vec3::new(
            self.extents.width as f32,
            self.extents.height as f32,
            self.extents.depth as f32,
        );
        Aabb::new(min, min + size)
    }
}
