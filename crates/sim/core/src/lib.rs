//! Deterministic action-RPG simulation core.
//!
//! `sim-core` owns the canonical game rules: the tile grid, pathfinding,
//! game objects with their components, combat, and missions. Everything runs
//! on a fixed 60 Hz tick with no I/O, no clocks and no global state; the
//! host feeds input snapshots into [`level::Level::update`] and drains the
//! event log afterwards. Identical inputs always replay to identical state.
pub mod config;
pub mod event;
pub mod input;
pub mod level;
pub mod mission;
pub mod object;
pub mod rng;
pub mod time;

pub use config::{
    AudioConfig, CharacterConfig, ChestConfig, CombatConfig, ConfigError, ConfigTable,
    GlobalsConfig, HitpointConfig, MissionConfig, MissionKind, MonsterCombatConfig, MonsterConfig,
    MovementConfig, NpcConfig, ProjectileConfig, SceneConfig,
};
pub use event::{EventLog, GameEvent};
pub use input::PlayerInput;
pub use level::pathfinder::PathFinder;
pub use level::tilemap::{TileMap, TileMapError, TileState};
pub use level::{Level, LevelError};
pub use mission::{Mission, MissionCtx, MissionManager};
pub use object::{
    ChestState, Component, ComponentKind, ComponentSet, GameObject, GameObjectId, GameObjectKind,
    GameObjectManager, KindState, NpcState, ObjectError, ObjectRecord, PointRecord,
    ProjectileState, TriggerState, UpdateCtx,
};
pub use time::{Clock, TICK_DELTA, TICKS_PER_SECOND, seconds, ticks};
