//! Immutable gameplay configuration.
//!
//! Config records are authored outside the simulation (the content crate
//! deserializes them from JSON) and handed to the core as a read-only
//! [`ConfigTable`] at construction time. Nothing in the core mutates configs
//! or reaches for a global table — the repository is always passed in
//! explicitly, which keeps the simulation testable with hand-built tables.

mod component;
mod gameobject;
mod globals;
mod mission;
mod scene;

pub use component::{CombatConfig, HitpointConfig, MonsterCombatConfig, MovementConfig};
pub use gameobject::{
    AudioConfig, CharacterConfig, ChestConfig, MonsterConfig, NpcConfig, ProjectileConfig,
};
pub use globals::GlobalsConfig;
pub use mission::{MissionConfig, MissionKind};
pub use scene::SceneConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lookup failure: an unknown config id always indicates a caller bug
/// (a dangling reference in authored content), never a recoverable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown character config {0}")]
    UnknownCharacter(u32),
    #[error("unknown monster config {0}")]
    UnknownMonster(u32),
    #[error("unknown npc config {0}")]
    UnknownNpc(u32),
    #[error("unknown chest config {0}")]
    UnknownChest(u32),
    #[error("unknown projectile config {0}")]
    UnknownProjectile(u32),
    #[error("unknown mission config {0}")]
    UnknownMission(u32),
    #[error("unknown scene config {0}")]
    UnknownScene(u32),
    #[error("unknown audio config {0}")]
    UnknownAudio(u32),
}

/// Read-only repository of every config record the simulation can reference.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigTable {
    #[serde(default)]
    pub characters: Vec<CharacterConfig>,
    #[serde(default)]
    pub monsters: Vec<MonsterConfig>,
    #[serde(default)]
    pub npcs: Vec<NpcConfig>,
    #[serde(default)]
    pub chests: Vec<ChestConfig>,
    #[serde(default)]
    pub projectiles: Vec<ProjectileConfig>,
    #[serde(default)]
    pub missions: Vec<MissionConfig>,
    #[serde(default)]
    pub scenes: Vec<SceneConfig>,
    #[serde(default)]
    pub audio: Vec<AudioConfig>,
    #[serde(default)]
    pub globals: GlobalsConfig,
}

impl ConfigTable {
    pub fn character(&self, id: u32) -> Result<&CharacterConfig, ConfigError> {
        self.characters
            .iter()
            .find(|c| c.id == id)
            .ok_or(ConfigError::UnknownCharacter(id))
    }

    pub fn monster(&self, id: u32) -> Result<&MonsterConfig, ConfigError> {
        self.monsters
            .iter()
            .find(|c| c.id == id)
            .ok_or(ConfigError::UnknownMonster(id))
    }

    pub fn npc(&self, id: u32) -> Result<&NpcConfig, ConfigError> {
        self.npcs
            .iter()
            .find(|c| c.id == id)
            .ok_or(ConfigError::UnknownNpc(id))
    }

    pub fn chest(&self, id: u32) -> Result<&ChestConfig, ConfigError> {
        self.chests
            .iter()
            .find(|c| c.id == id)
            .ok_or(ConfigError::UnknownChest(id))
    }

    pub fn projectile(&self, id: u32) -> Result<&ProjectileConfig, ConfigError> {
        self.projectiles
            .iter()
            .find(|c| c.id == id)
            .ok_or(ConfigError::UnknownProjectile(id))
    }

    pub fn mission(&self, id: u32) -> Result<&MissionConfig, ConfigError> {
        self.missions
            .iter()
            .find(|c| c.id == id)
            .ok_or(ConfigError::UnknownMission(id))
    }

    pub fn scene(&self, id: u32) -> Result<&SceneConfig, ConfigError> {
        self.scenes
            .iter()
            .find(|c| c.id == id)
            .ok_or(ConfigError::UnknownScene(id))
    }

    pub fn audio_config(&self, id: u32) -> Result<&AudioConfig, ConfigError> {
        self.audio
            .iter()
            .find(|c| c.id == id)
            .ok_or(ConfigError::UnknownAudio(id))
    }
}
