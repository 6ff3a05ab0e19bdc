//! Save/load records for objects and named points.
//!
//! Records are the persistence and scene-authoring shape of a game object:
//! position, facing and the kind-specific fields that survive a save.
//! Projectiles are transient and never recorded.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::ConfigTable;
use crate::object::{
    ChestState, GameObject, GameObjectId, GameObjectKind, KindState, NpcState, ObjectError,
    TriggerState,
};
use crate::time::{seconds, ticks};

fn unassigned_id() -> u32 {
    GameObjectId::UNASSIGNED.raw()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Omitted in authored scenes; the manager then allocates one.
    #[serde(default = "unassigned_id")]
    pub id: u32,
    pub kind: GameObjectKind,
    pub config_id: u32,
    pub position: [f32; 2],
    #[serde(default)]
    pub direction: f32,

    // Monster
    #[serde(default)]
    pub freeze_patrol: bool,

    // Npc
    #[serde(default)]
    pub patrol_points: Vec<[f32; 2]>,
    /// Seconds of pause at each patrol end.
    #[serde(default)]
    pub patrol_end_rollback_delay: f32,

    // Chest
    #[serde(default)]
    pub drops: Vec<u32>,
    #[serde(default)]
    pub opened: bool,

    // Trigger
    /// `[x_min, y_min, x_max, y_max]`.
    #[serde(default)]
    pub area: [f32; 4],
    #[serde(default)]
    pub auto_reset: bool,
    #[serde(default)]
    pub triggered: bool,
}

impl ObjectRecord {
    /// Instantiates the recorded object, components included. The id is
    /// carried over verbatim; registration happens at the manager.
    pub fn to_object(&self, configs: &ConfigTable) -> Result<GameObject, ObjectError> {
        let mut object = GameObject::from_config(self.kind, self.config_id, configs)?;
        object.set_id(GameObjectId::from_raw(self.id));
        object.position = Vec2::from(self.position);
        object.direction = self.direction;

        match object.kind_state_mut() {
            KindState::Monster => {
                if self.freeze_patrol {
                    let position = object.position;
                    object
                        .components
                        .require_monster_combat_mut()?
                        .freeze_patrol(position);
                }
            }
            KindState::Npc(state) => {
                state.patrol_points = self.patrol_points.iter().copied().map(Vec2::from).collect();
                state.patrol_end_rollback_delay = ticks(self.patrol_end_rollback_delay);
            }
            KindState::Chest(state) => {
                *state = ChestState {
                    drops: self.drops.clone(),
                    opened: self.opened,
                };
            }
            KindState::Trigger(state) => {
                *state = TriggerState {
                    area: self.area,
                    auto_reset: self.auto_reset,
                    triggered: self.triggered,
                };
            }
            KindState::Character | KindState::Projectile(_) => {}
        }

        Ok(object)
    }

    /// Snapshots a live object. `None` for projectiles.
    pub fn from_object(object: &GameObject) -> Option<Self> {
        let mut record = Self {
            id: object.id().raw(),
            kind: object.kind(),
            config_id: object.config_id(),
            position: object.position.into(),
            direction: object.direction,
            freeze_patrol: false,
            patrol_points: Vec::new(),
            patrol_end_rollback_delay: 0.0,
            drops: Vec::new(),
            opened: false,
            area: [0.0; 4],
            auto_reset: false,
            triggered: false,
        };

        match object.kind_state() {
            KindState::Projectile(_) => return None,
            KindState::Monster => {
                record.freeze_patrol = object
                    .components
                    .monster_combat()
                    .is_some_and(|combat| combat.is_patrol_frozen());
            }
            KindState::Npc(state) => {
                record.patrol_points = state
                    .patrol_points
                    .iter()
                    .map(|point| (*point).into())
                    .collect();
                record.patrol_end_rollback_delay = seconds(state.patrol_end_rollback_delay);
            }
            KindState::Chest(state) => {
                record.drops = state.drops.clone();
                record.opened = state.opened;
            }
            KindState::Trigger(state) => {
                record.area = state.area;
                record.auto_reset = state.auto_reset;
                record.triggered = state.triggered;
            }
            KindState::Character => {}
        }

        Some(record)
    }
}

/// A named world position referenced by missions (teleport targets, NPC
/// move points).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub id: u32,
    pub position: [f32; 2],
}

impl PointRecord {
    pub fn world(&self) -> Vec2 {
        Vec2::from(self.position)
    }
}
