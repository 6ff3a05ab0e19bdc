//! Session facade: one level driven by wall time.

use sim_content::ContentFactory;
use sim_core::{
    ConfigTable, GameEvent, GameObjectId, Level, LevelError, ObjectRecord, PlayerInput, PointRecord,
};
use tracing::debug;

use crate::clock::FrameClock;

/// Owns a running [`Level`] and translates frame times into fixed ticks.
///
/// The host calls [`Session::advance`] once per rendered frame with the
/// frame's elapsed seconds and the current input snapshot; the session runs
/// however many whole ticks are due and hands back the events they
/// produced, in order.
pub struct Session {
    level: Level,
    clock: FrameClock,
}

impl Session {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            clock: FrameClock::new(),
        }
    }

    /// Builds a session from a scene config alone (no baked terrain).
    pub fn from_scene(scene_id: u32, configs: ConfigTable) -> Result<Self, LevelError> {
        Ok(Self::new(Level::from_scene(scene_id, configs)?))
    }

    /// Builds a session through the content pipeline, baked terrain
    /// included when the scene asks for it.
    pub fn load<F>(
        factory: &ContentFactory,
        scene_id: u32,
        decompress: F,
    ) -> anyhow::Result<Self>
    where
        F: FnOnce(&[u8]) -> anyhow::Result<Vec<u8>>,
    {
        Ok(Self::new(factory.load_level(scene_id, decompress)?))
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    /// Advances by `elapsed` wall seconds. Returns the number of ticks that
    /// ran and every event they emitted.
    pub fn advance(&mut self, elapsed: f32, input: &PlayerInput) -> (u32, Vec<GameEvent>) {
        let due = self.clock.accumulate(elapsed);
        if due > 1 {
            debug!(ticks = due, "catching up");
        }
        let mut events = Vec::new();
        for _ in 0..due {
            self.level.update(input);
            events.append(&mut self.level.drain_events());
        }
        (due, events)
    }

    /// Runs exactly one tick, bypassing the frame clock. Test and replay
    /// drivers step the simulation this way.
    pub fn step(&mut self, input: &PlayerInput) -> Vec<GameEvent> {
        self.level.update(input);
        self.level.drain_events()
    }

    /// Snapshots the persistent objects and named points.
    pub fn save(&self) -> (Vec<ObjectRecord>, Vec<PointRecord>) {
        self.level.save()
    }

    /// Instantiates saved records and points into the level.
    pub fn restore(
        &mut self,
        records: &[ObjectRecord],
        points: &[PointRecord],
    ) -> Result<(), LevelError> {
        self.level.load(records, points)
    }

    /// Dialog boundary: the host reports a finished NPC conversation.
    pub fn notify_npc_talked(&mut self, npc: GameObjectId) {
        self.level.notify_npc_talked(npc);
    }
}
