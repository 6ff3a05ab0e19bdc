//! Config repository loader.

use std::path::Path;

use anyhow::Context;

use sim_core::ConfigTable;

use crate::loaders::{LoadResult, read_file};

/// Loads the whole config repository from one JSON document.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<ConfigTable> {
        let data = read_file(path)?;
        serde_json::from_slice(&data)
            .with_context(|| format!("failed to parse configs from {}", path.display()))
    }
}
