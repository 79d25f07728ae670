//! Generates a voxel world and meshes every chunk in parallel.
#![forbid(unsafe_code)]

mod config;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use cubes_mesh_cpu::ChunkMesher;
use cubes_runtime::MeshRuntime;
use cubes_world::TerrainGenerator;
use thiserror::Error;

use crate::config::{CubesConfig, Overrides};

#[derive(Parser, Debug)]
#[command(name = "cubes", version, about = "Voxel terrain generator and chunk mesher")]
struct Cli {
    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Chunks per axis
    #[arg(long)]
    chunk_count: Option<usize>,
    /// Terrain noise seed
    #[arg(long)]
    seed: Option<i32>,
    /// Mesh worker threads (0 = one per core)
    #[arg(long)]
    workers: Option<usize>,
    /// Use flat terrain at this normalised height instead of noise
    #[arg(long, value_name = "LEVEL")]
    flat: Option<f32>,
    /// Emit vertices translated by the chunk origin
    #[arg(long)]
    world_space: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            chunk_count: self.chunk_count,
            seed: self.seed,
            workers: self.workers,
            flat_level: self.flat,
            world_space: self.world_space,
        }
    }
}

#[derive(Debug, Error)]
#[error("{failed} of {total} chunk builds failed")]
struct BuildFailures {
    failed: usize,
    total: usize,
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut cfg = match &cli.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            CubesConfig::from_path(path)?
        }
        None => CubesConfig::default(),
    };
    cfg.apply(&cli.overrides());
    cfg.validate()?;

    let start = Instant::now();
    let generator = TerrainGenerator::from_config(&cfg.world)?;
    let grid = Arc::new(generator.generate());

    let mesher = ChunkMesher::from_atlas_config(cfg.world.atlas, cfg.mesh.options())?;
    let runtime = MeshRuntime::new(grid, mesher, cfg.world.chunk.extents(), cfg.mesh.workers)?;
    let results = runtime.build_all(cfg.world.chunk_coords());

    let total = results.len();
    let mut failed = 0usize;
    let mut faces = 0usize;
    for out in &results {
        match &out.result {
            Ok(mesh) => {
                faces += mesh.face_count();
                log::debug!(
                    "{}: {} faces, {} vertices, {} indices ({} ms)",
                    out.coord,
                    mesh.face_count(),
                    mesh.vertices.len(),
                    mesh.triangles.len(),
                    out.t_mesh_ms
                );
            }
            Err(_) => failed += 1,
        }
    }
    log::info!(
        "{} chunks, {} faces, {} vertices in {} ms",
        total,
        faces,
        faces * 4,
        start.elapsed().as_millis()
    );

    if failed > 0 {
        return Err(BuildFailures { failed, total }.into());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
