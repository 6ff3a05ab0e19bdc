//! Scene config records.
//!
//! A scene describes one playable level: tilemap dimensions plus the objects
//! and named points placed by the map editor. Meshes and other render-side
//! placements are host data and do not appear here.

use serde::{Deserialize, Serialize};

use crate::object::{ObjectRecord, PointRecord};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub id: u32,
    pub name: String,
    /// World width in units.
    pub width: u32,
    /// World height in units.
    pub height: u32,
    /// Sub-tiles per world unit.
    pub precision: u8,
    #[serde(default)]
    pub use_baked_tilemap: bool,
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
    #[serde(default)]
    pub points: Vec<PointRecord>,
}
