use std::error::Error;
use std::fs;
use std::path::Path;

use cubes_mesh_cpu::{MeshOptions, VertexSpace};
use cubes_world::{ConfigError, TerrainMode, WorldConfig};
use serde::Deserialize;

/// `[mesh]` table.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MeshConfig {
    pub vertex_space: VertexSpace,
    /// Mesh worker threads; 0 lets the pool pick.
    pub workers: usize,
}

impl MeshConfig {
    pub fn options(&self) -> MeshOptions {
        MeshOptions {
            vertex_space: self.vertex_space,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CubesConfig {
    #[serde(flatten)]
    pub world: WorldConfig,
    #[serde(default)]
    pub mesh: MeshConfig,
}

/// Command-line values that take precedence over the file.
#[derive(Clone, Copy, Debug, Default)]
pub struct Overrides {
    pub chunk_count: Option<usize>,
    pub seed: Option<i32>,
    pub workers: Option<usize>,
    pub flat_level: Option<f32>,
    pub world_space: bool,
}

impl CubesConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: CubesConfig = toml::from_str(toml_str)?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()
    }

    pub fn apply(&mut self, o: &Overrides) {
        if let Some(n) = o.chunk_count {
            self.world.chunk.count = n;
        }
        if let Some(seed) = o.seed {
            self.world.terrain.seed = seed;
        }
        if let Some(w) = o.workers {
            self.mesh.workers = w;
        }
        if let Some(level) = o.flat_level {
            self.world.terrain.mode = TerrainMode::Flat;
            self.world.terrain.flat_level = level;
        }
        if o.world_space {
            self.mesh.vertex_space = VertexSpace::World;
        }
    }
}
