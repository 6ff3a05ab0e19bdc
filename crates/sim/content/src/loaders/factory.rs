//! Content factory: one entry point per data directory.

use std::path::PathBuf;

use anyhow::Context;

use sim_core::{ConfigTable, Level};

use crate::bake::TileBake;
use crate::loaders::{ConfigLoader, LoadResult, read_file};

/// Loads all game content from one data directory.
///
/// # Directory structure
///
/// ```text
/// data_dir/
/// ├── configs.json
/// └── scenes/
///     ├── village/tilemap.bin
///     └── dungeon/tilemap.bin
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads the config repository from `configs.json`.
    pub fn load_configs(&self) -> LoadResult<ConfigTable> {
        ConfigLoader::load(&self.data_dir.join("configs.json"))
    }

    /// Loads and decodes a scene's baked tilemap from
    /// `scenes/{scene_name}/tilemap.bin`.
    pub fn load_tilemap<F>(&self, scene_name: &str, decompress: F) -> LoadResult<TileBake>
    where
        F: FnOnce(&[u8]) -> anyhow::Result<Vec<u8>>,
    {
        let path = self
            .data_dir
            .join("scenes")
            .join(scene_name)
            .join("tilemap.bin");
        let data = read_file(&path)?;
        TileBake::decode(&data, decompress)
            .with_context(|| format!("failed to decode tilemap {}", path.display()))
    }

    /// Builds a ready-to-run level: scene objects and points instantiated,
    /// baked terrain applied when the scene asks for it.
    pub fn load_level<F>(&self, scene_id: u32, decompress: F) -> LoadResult<Level>
    where
        F: FnOnce(&[u8]) -> anyhow::Result<Vec<u8>>,
    {
        let configs = self.load_configs()?;
        let scene = configs
            .scene(scene_id)
            .with_context(|| format!("scene {scene_id} is not in the config table"))?
            .clone();

        let mut level = Level::from_scene(scene_id, configs)
            .with_context(|| format!("failed to build level for scene {scene_id}"))?;

        if scene.use_baked_tilemap {
            let bake = self.load_tilemap(&scene.name, decompress)?;
            level
                .set_sub_tiles(bake.tiles, bake.sub_width, bake.sub_height, bake.resolution)
                .with_context(|| format!("baked tilemap does not fit scene {scene_id}"))?;
        }

        Ok(level)
    }
}
