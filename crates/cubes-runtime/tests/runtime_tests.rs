use std::sync::Arc;

use cubes_blocks::{AtlasConfig, Block};
use cubes_mesh_cpu::{ChunkMesher, MeshError, MeshOptions};
use cubes_runtime::{BuildJob, MeshRuntime};
use cubes_world::{ChunkCoord, ChunkExtents, ChunkRegion, FlatHeight, TerrainGenerator, VoxelGrid};

fn mesher() -> ChunkMesher {
    ChunkMesher::from_atlas_config(AtlasConfig::new(2, 2, 3), MeshOptions::default()).unwrap()
}

fn coords(n: i32) -> Vec<ChunkCoord> {
    let mut v = Vec::new();
    for cx in 0..n {
        for cy in 0..n {
            for cz in 0..n {
                v.push(ChunkCoord::new(cx, cy, cz));
            }
        }
    }
    v
}

fn terrain() -> Arc<VoxelGrid> {
    let tg = TerrainGenerator::new(
        (12, 12, 12),
        3,
        Box::new(|x: f32, z: f32| 0.2 + 0.6 * (x * 3.0 + z * 5.0).sin().abs()),
    );
    Arc::new(tg.generate())
}

#[test]
fn parallel_matches_sequential() {
    let grid = terrain();
    let ext = ChunkExtents::new(4, 4, 4);
    let rt = MeshRuntime::new(grid.clone(), mesher(), ext, 4).unwrap();
    let mut wanted = coords(3);
    wanted.reverse();
    let out = rt.build_all(wanted);
    assert_eq!(out.len(), 27);

    let m = mesher();
    for (o, coord) in out.iter().zip(coords(3)) {
        assert_eq!(o.coord, coord);
        let expected = m
            .build_region(&grid, &ChunkRegion::for_coord(coord, ext))
            .unwrap();
        assert_eq!(o.result.as_ref().unwrap(), &expected);
    }
}

#[test]
fn build_all_skips_duplicate_coords() {
    let grid = Arc::new(VoxelGrid::filled(2, 2, 2, Block::opaque(0)));
    let rt = MeshRuntime::new(grid, mesher(), ChunkExtents::new(1, 1, 1), 2).unwrap();
    let c = ChunkCoord::new(1, 0, 1);
    let out = rt.build_all([c, c, ChunkCoord::new(0, 0, 0)]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].coord, ChunkCoord::new(0, 0, 0));
    assert_eq!(out[1].coord, c);
    assert_eq!(rt.queue_debug_counts(), (0, 0));
}

#[test]
fn submitted_jobs_are_received() {
    let grid = Arc::new(
        TerrainGenerator::new((4, 4, 4), 3, Box::new(FlatHeight(0.5))).generate(),
    );
    let rt = MeshRuntime::new(grid, mesher(), ChunkExtents::new(2, 4, 2), 0).unwrap();
    assert!(rt.workers >= 1);
    for (i, coord) in coords(2).into_iter().filter(|c| c.cy == 0).enumerate() {
        rt.submit(BuildJob::new(coord, i as u64));
    }
    let mut got = Vec::new();
    while let Some(out) = rt.recv() {
        got.push(out);
    }
    assert_eq!(got.len(), 4);
    got.sort_by_key(|o| o.job_id);
    // 2x2x2 visible block per chunk: 4 top, 4 bottom, 4 on each of the two
    // sides facing the grid boundary. Sides facing other chunks are culled.
    for o in &got {
        assert_eq!(o.result.as_ref().unwrap().face_count(), 16);
    }
    assert!(rt.recv().is_none());
    assert!(rt.try_recv().is_none());
}

#[test]
fn results_polled_during_submission_stay_counted() {
    const JOBS: usize = 200;
    let grid = Arc::new(VoxelGrid::filled(1, 1, 1, Block::opaque(0)));
    let rt = MeshRuntime::new(grid, mesher(), ChunkExtents::new(1, 1, 1), 4).unwrap();
    std::thread::scope(|s| {
        let poller = s.spawn(|| {
            let mut got = 0;
            while got < JOBS {
                if rt.try_recv().is_some() {
                    got += 1;
                }
                assert!(rt.pending() <= JOBS, "pending count wrapped: {}", rt.pending());
            }
            got
        });
        for i in 0..JOBS {
            rt.submit(BuildJob::new(ChunkCoord::new(0, 0, 0), i as u64));
        }
        assert_eq!(poller.join().unwrap(), JOBS);
    });
    assert_eq!(rt.pending(), 0);
    assert!(rt.recv().is_none());
}

#[test]
fn submit_coord_assigns_fresh_ids() {
    let grid = Arc::new(VoxelGrid::filled(2, 1, 1, Block::opaque(0)));
    let rt = MeshRuntime::new(grid, mesher(), ChunkExtents::new(1, 1, 1), 1).unwrap();
    let a = rt.submit_coord(ChunkCoord::new(0, 0, 0));
    let b = rt.submit_coord(ChunkCoord::new(1, 0, 0));
    assert_ne!(a, b);
    let mut ids = vec![rt.recv().unwrap().job_id, rt.recv().unwrap().job_id];
    ids.sort();
    assert_eq!(ids, vec![a, b]);
}

#[test]
fn failed_builds_are_reported() {
    let grid = Arc::new(VoxelGrid::filled(1, 1, 1, Block::opaque(9)));
    let rt = MeshRuntime::new(grid, mesher(), ChunkExtents::new(1, 1, 1), 1).unwrap();
    let out = rt.build_all([ChunkCoord::new(0, 0, 0)]);
    assert!(matches!(
        out[0].result,
        Err(MeshError::UnknownBlockType { block_type: 9, .. })
    ));
}
