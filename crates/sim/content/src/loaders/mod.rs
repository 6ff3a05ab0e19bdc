//! File loaders for authored game data.

pub mod configs;
pub mod factory;

pub use configs::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))
}
