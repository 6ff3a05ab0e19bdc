//! Data-driven content loading.
//!
//! `sim-content` turns authored files into `sim-core` values:
//! - the config repository, deserialized from `configs.json`
//! - baked tilemap blobs (`tilemap.bin` per scene)
//!
//! Compression of the bake payload is the host's concern; decoders take the
//! decompression routine as an argument so this crate stays free of
//! transport and codec dependencies.

pub mod bake;
pub mod loaders;

pub use bake::{BakeError, TileBake};
pub use loaders::{ConfigLoader, ContentFactory, LoadResult};
