use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use strata_chunk::BuildOptions;
use strata_runtime::{DEFAULT_LOAD_BUDGET, DEFAULT_RENDER_DISTANCE, StreamConfig};
use strata_world::CHUNK_SIZE;
use strata_world::worldgen::{WorldGenConfig, WorldGenParams};

/// Top-level driver configuration file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub terrain: TerrainSection,
    #[serde(default)]
    pub stream: StreamSection,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TerrainSection {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(flatten)]
    pub generation: WorldGenConfig,
}
fn default_seed() -> i32 {
    69420
}
impl Default for TerrainSection {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            generation: WorldGenConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct StreamSection {
    #[serde(default = "default_render_distance")]
    pub render_distance: i32,
    #[serde(default = "default_load_budget")]
    pub load_budget: usize,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_detail")]
    pub detail_level: usize,
    #[serde(default = "default_collision")]
    pub collision: bool,
    #[serde(default = "default_detail")]
    pub collision_detail: usize,
}
fn default_render_distance() -> i32 {
    DEFAULT_RENDER_DISTANCE
}
fn default_load_budget() -> usize {
    DEFAULT_LOAD_BUDGET
}
fn default_chunk_size() -> usize {
    CHUNK_SIZE
}
fn default_detail() -> usize {
    1
}
fn default_collision() -> bool {
    true
}
impl Default for StreamSection {
    fn default() -> Self {
        Self {
            render_distance: default_render_distance(),
            load_budget: default_load_budget(),
            chunk_size: default_chunk_size(),
            detail_level: default_detail(),
            collision: default_collision(),
            collision_detail: default_detail(),
        }
    }
}

impl StreamSection {
    pub fn to_stream_config(&self) -> StreamConfig {
        StreamConfig {
            render_distance: self.render_distance,
            load_budget: self.load_budget,
            build: BuildOptions {
                detail_level: self.detail_level,
                collision_detail: self.collision.then_some(self.collision_detail),
            },
            ..StreamConfig::default()
        }
    }
}

impl AppConfig {
    pub fn world_params(&self) -> WorldGenParams {
        WorldGenParams::from_config(&self.terrain.generation)
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        let s = &self.stream;
        if s.load_budget == 0 {
            return Err("stream.load_budget must be at least 1".into());
        }
        if s.chunk_size == 0 {
            return Err("stream.chunk_size must be at least 1".into());
        }
        if s.detail_level == 0 || s.collision_detail == 0 {
            return Err("detail levels must be at least 1".into());
        }
        if s.render_distance < 0 {
            return Err("stream.render_distance must not be negative".into());
        }
        Ok(())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<AppConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&s)?;
    cfg.validate()?;
    Ok(cfg)
}
