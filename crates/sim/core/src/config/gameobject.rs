//! Per-object-type config records.
//!
//! Rendering, animation and audio asset references are host concerns; the
//! records keep only their ids so save data and content stay addressable.

use serde::{Deserialize, Serialize};

use super::component::{CombatConfig, HitpointConfig, MonsterCombatConfig, MovementConfig};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterConfig {
    pub id: u32,
    pub name: String,
    pub movement: MovementConfig,
    pub combat: CombatConfig,
    pub hitpoint: HitpointConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterConfig {
    pub id: u32,
    pub name: String,
    pub movement: MovementConfig,
    pub combat: MonsterCombatConfig,
    pub hitpoint: HitpointConfig,
    #[serde(default)]
    pub is_boss: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NpcConfig {
    pub id: u32,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChestConfig {
    pub id: u32,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectileConfig {
    pub id: u32,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub volume: f32,
}
