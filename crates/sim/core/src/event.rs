//! Gameplay event log.
//!
//! Components append events as they happen; everything is synchronous and
//! same-tick. The mission system consumes events at the end of the tick and
//! the host drains the log afterwards for animation/audio. The core never
//! reads anything back from its consumers — notification is one-way.

use crate::object::{GameObjectId, GameObjectKind};

/// A single gameplay occurrence within the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    /// Movement speed for animation blending: `|velocity| / configured speed`.
    /// May exceed 1 while dashing.
    Moved { id: GameObjectId, speed_rate: f32 },
    /// Attack windup started.
    PrepareAttack { id: GameObjectId },
    /// Attack resolved (projectile spawned or melee sweep applied).
    Attack { id: GameObjectId },
    Damage { id: GameObjectId, amount: i32 },
    Heal { id: GameObjectId, amount: i32 },
    /// Fired exactly once per life, when hitpoints reach zero.
    Death {
        id: GameObjectId,
        kind: GameObjectKind,
    },
    /// A character entered a trigger area.
    Triggered { id: GameObjectId },
    /// An auto-reset trigger area was vacated.
    TriggerReset { id: GameObjectId },
    Spawned {
        id: GameObjectId,
        kind: GameObjectKind,
    },
    Removed {
        id: GameObjectId,
        kind: GameObjectKind,
    },
    MissionStarted { id: u32 },
    MissionCompleted { id: u32 },
}

/// Append-only per-tick event buffer.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events emitted so far this tick, in occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Hands the tick's events to the host and empties the log.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
