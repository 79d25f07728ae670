//! Runtime job queue and worker orchestration for chunk meshing.
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use cubes_mesh_cpu::{ChunkMesh, ChunkMesher, MeshError};
use cubes_world::{ChunkCoord, ChunkExtents, ChunkRegion, VoxelGrid};
use hashbrown::HashSet;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to start mesh worker pool: {0}")]
    Pool(#[from] ThreadPoolBuildError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildJob {
    pub coord: ChunkCoord,
    pub job_id: u64,
}

impl BuildJob {
    pub fn new(coord: ChunkCoord, job_id: u64) -> Self {
        Self { coord, job_id }
    }
}

#[derive(Debug)]
pub struct JobOut {
    pub coord: ChunkCoord,
    pub job_id: u64,
    pub result: Result<ChunkMesh, MeshError>,
    pub t_mesh_ms: u32,
}

struct Queued {
    job: BuildJob,
    reply: Sender<JobOut>,
}

fn process_build_job(
    job: BuildJob,
    grid: &VoxelGrid,
    mesher: &ChunkMesher,
    extents: ChunkExtents,
    tx: &Sender<JobOut>,
) {
    let BuildJob { coord, job_id } = job;
    let region = ChunkRegion::for_coord(coord, extents);
    let t0 = Instant::now();
    let result = mesher.build_region(grid, &region);
    let t_mesh_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    match &result {
        Ok(mesh) => log::debug!(
            "{} job={} faces={} mesh_ms={}",
            coord,
            job_id,
            mesh.face_count(),
            t_mesh_ms
        ),
        Err(e) => log::error!("{} job={} mesh build failed: {}", coord, job_id, e),
    }
    // Receiver gone means the caller stopped listening; nothing to report to.
    let _ = tx.send(JobOut {
        coord,
        job_id,
        result,
        t_mesh_ms,
    });
}

/// Meshes chunks of one shared, fully generated grid on a worker pool.
///
/// The grid is taken behind an `Arc` and never mutated, so workers read it
/// without locking. Each job writes only its own `ChunkMesh`.
pub struct MeshRuntime {
    job_tx: Sender<Queued>,
    res_tx: Sender<JobOut>,
    res_rx: Receiver<JobOut>,
    _pool: ThreadPool,
    extents: ChunkExtents,
    next_job_id: AtomicUsize,
    outstanding: AtomicUsize,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    pub workers: usize,
}

impl MeshRuntime {
    /// Starts `workers` mesh workers (0 picks rayon's default thread count).
    pub fn new(
        grid: Arc<VoxelGrid>,
        mesher: ChunkMesher,
        extents: ChunkExtents,
        workers: usize,
    ) -> Result<Self, RuntimeError> {
        let (job_tx, job_rx) = unbounded::<Queued>();
        let (res_tx, res_rx) = unbounded::<JobOut>();
        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("cubes-mesh-{i}"))
            .build()?;
        let workers = pool.current_num_threads();
        let mesher = Arc::new(mesher);
        for _ in 0..workers {
            let rx = job_rx.clone();
            let grid = grid.clone();
            let mesher = mesher.clone();
            let q = queued.clone();
            let inflight = inflight.clone();
            pool.spawn(move || {
                while let Ok(Queued { job, reply }) = rx.recv() {
                    q.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    process_build_job(job, grid.as_ref(), mesher.as_ref(), extents, &reply);
                    inflight.fetch_sub(1, Ordering::Relaxed);
                }
            });
        }
        log::info!(
            "mesh runtime started: {} workers, chunk {}x{}x{}",
            workers,
            extents.width,
            extents.height,
            extents.depth
        );

        Ok(Self {
            job_tx,
            res_tx,
            res_rx,
            _pool: pool,
            extents,
            next_job_id: AtomicUsize::new(0),
            outstanding: AtomicUsize::new(0),
            queued,
            inflight,
            workers,
        })
    }

    #[inline]
    pub fn extents(&self) -> ChunkExtents {
        self.extents
    }

    fn enqueue(&self, job: BuildJob, reply: Sender<JobOut>) -> bool {
        self.queued.fetch_add(1, Ordering::Relaxed);
        if self.job_tx.send(Queued { job, reply }).is_err() {
            self.queued.fetch_sub(1, Ordering::Relaxed);
            return false;
        }
        true
    }

    /// Queues one chunk; its result arrives through `try_recv`/`recv`.
    pub fn submit(&self, job: BuildJob) {
        // Counted before the send so a fast worker's result can never be
        // received while the job is still uncounted.
        self.outstanding.fetch_add(1, Ordering::Relaxed);
        if !self.enqueue(job, self.res_tx.clone()) {
            self.outstanding.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Submitted jobs whose results have not been received yet.
    #[inline]
    pub fn pending(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }

    /// Queues a chunk with a fresh job id and returns that id.
    pub fn submit_coord(&self, coord: ChunkCoord) -> u64 {
        let job_id = self.next_job_id.fetch_add(1, Ordering::Relaxed) as u64;
        self.submit(BuildJob::new(coord, job_id));
        job_id
    }

    pub fn try_recv(&self) -> Option<JobOut> {
        match self.res_rx.try_recv() {
            Ok(out) => {
                self.outstanding.fetch_sub(1, Ordering::Relaxed);
                Some(out)
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Blocks for the next result; `None` once every submitted job was received.
    pub fn recv(&self) -> Option<JobOut> {
        if self.pending() == 0 {
            return None;
        }
        let out = self.res_rx.recv().ok()?;
        self.outstanding.fetch_sub(1, Ordering::Relaxed);
        Some(out)
    }

    pub fn drain_worker_results(&self) -> Vec<JobOut> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Meshes every distinct coordinate in parallel and returns results sorted
    /// by coordinate. Independent of `submit`ted jobs.
    pub fn build_all(&self, coords: impl IntoIterator<Item = ChunkCoord>) -> Vec<JobOut> {
        let start = Instant::now();
        let (tx, rx) = unbounded::<JobOut>();
        let mut seen = HashSet::new();
        let mut expected = 0usize;
        for coord in coords {
            if !seen.insert(coord) {
                continue;
            }
            let job_id = self.next_job_id.fetch_add(1, Ordering::Relaxed) as u64;
            if self.enqueue(BuildJob::new(coord, job_id), tx.clone()) {
                expected += 1;
            }
        }
        drop(tx);

        let mut out: Vec<JobOut> = rx.iter().take(expected).collect();
        out.sort_by_key(|o| o.coord);
        let failed = out.iter().filter(|o| o.result.is_err()).count();
        log::info!(
            "meshed {} chunks ({} failed) in {} ms",
            out.len(),
            failed,
            start.elapsed().as_millis()
        );
        out
    }

    /// `(queued, inflight)` job counts.
    pub fn queue_debug_counts(&self) -> (usize, usize) {
        (
            self.queued.load(Ordering::Relaxed),
            self.inflight.load(Ordering::Relaxed),
        )
    }
}
