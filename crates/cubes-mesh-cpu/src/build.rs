use std::time::Instant;

use cubes_blocks::{AtlasConfig, AtlasError, AtlasUvMap};
use cubes_geom::IVec3;
use cubes_world::{ChunkExtents, ChunkRegion, VoxelGrid};
use serde::{Deserialize, Serialize};

use crate::chunk::ChunkMesh;
use crate::emit::emit_face;
use crate::error::MeshError;
use crate::mesh_build::MeshBuild;
use crate::neighbors::NeighborQuery;

/// Coordinate frame of emitted vertices.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexSpace {
    /// Block units relative to the chunk origin.
    #[default]
    Local,
    /// Chunk-local positions translated by the chunk origin.
    World,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    pub vertex_space: VertexSpace,
}

fn elapsed_ms(start: Instant) -> u32 {
    start.elapsed().as_millis().min(u128::from(u32::MAX)) as u32
}

/// Face-culling chunk mesher over a shared, read-only `VoxelGrid`.
///
/// A block at global `g` contributes geometry only when visible. Each of its
/// faces is emitted unless the neighbour across it is both solid and visible;
/// neighbours are read from the whole grid, so faces on a chunk seam are culled
/// against the adjacent chunk's cells. Meshing runs in two passes: an exact face
/// count, then emission into buffers of exactly that size.
#[derive(Clone, Debug)]
pub struct ChunkMesher {
    atlas: AtlasUvMap,
    options: MeshOptions,
}

impl ChunkMesher {
    pub fn new(atlas: AtlasUvMap, options: MeshOptions) -> Self {
        Self { atlas, options }
    }

    pub fn from_atlas_config(config: AtlasConfig, options: MeshOptions) -> Result<Self, AtlasError> {
        Ok(Self::new(AtlasUvMap::new(config)?, options))
    }

    #[inline]
    pub fn atlas(&self) -> &AtlasUvMap {
        &self.atlas
    }

    #[inline]
    pub fn options(&self) -> MeshOptions {
        self.options
    }

    /// Counting pass: number of faces `build_region` will emit for `region`.
    pub fn count_visible_faces(&self, grid: &VoxelGrid, region: &ChunkRegion) -> usize {
        let nq = NeighborQuery::new(grid);
        region
            .iter_local()
            .filter_map(|p| region.to_global(p))
            .filter(|&g| grid.is_visible(g))
            .map(|g| nq.exposed_face_count(g))
            .sum()
    }

    pub fn build(
        &self,
        grid: &VoxelGrid,
        origin: IVec3,
        extents: ChunkExtents,
    ) -> Result<ChunkMesh, MeshError> {
        self.build_region(grid, &ChunkRegion::new(origin, extents))
    }

    pub fn build_region(
        &self,
        grid: &VoxelGrid,
        region: &ChunkRegion,
    ) -> Result<ChunkMesh, MeshError> {
        let total_start = Instant::now();
        let counted = self.count_visible_faces(grid, region);
        let count_ms = elapsed_ms(total_start);

        let emit_start = Instant::now();
        let mut mb = MeshBuild::with_faces(counted)?;
        let nq = NeighborQuery::new(grid);
        for p in region.iter_local() {
            // Cells past the i32 range cannot exist in the grid.
            let Some(g) = region.to_global(p) else {
                continue;
            };
            if !grid.is_visible(g) {
                continue;
            }
            let at = match self.options.vertex_space {
                VertexSpace::Local => p,
                VertexSpace::World => g,
            };
            let block_type = grid.block_type(g);
            for face in nq.exposed_faces(g) {
                emit_face(&mut mb, &self.atlas, face, at, block_type, g)?;
            }
        }
        let (vertices, triangles, uvs) = mb.finish()?;
        let emit_ms = elapsed_ms(emit_start);

        log::debug!(
            target: "perf",
            "ms count={} emit={} total={} faces={} mesher origin={}",
            count_ms,
            emit_ms,
            elapsed_ms(total_start),
            counted,
            region.origin
        );

        Ok(ChunkMesh {
            region: *region,
            bbox: region.bounds(),
            vertex_space: self.options.vertex_space,
            vertices,
            triangles,
            uvs,
        })
    }
}
