//! Health, regeneration and death.

use crate::config::HitpointConfig;
use crate::event::{EventLog, GameEvent};
use crate::object::{GameObject, GameObjectId, GameObjectKind, UpdateCtx};
use crate::time::ticks;

/// Corpse lifetime before the object is removed from the level.
const DESPAWN_SECONDS: f32 = 0.75;

/// Health pool and team tag. The only component allowed to request its
/// parent's destruction: once dead, it counts down the despawn timer and
/// defers the removal.
#[derive(Clone, Debug)]
pub struct Hitpoint {
    config: HitpointConfig,
    team: i32,
    current: i32,
    regen_delay: i32,
    despawn: u32,
    death_emitted: bool,
}

impl Hitpoint {
    pub fn new(config: HitpointConfig, team: i32) -> Self {
        Self {
            config,
            team,
            current: config.max,
            regen_delay: 0,
            despawn: 0,
            death_emitted: false,
        }
    }

    pub fn team(&self) -> i32 {
        self.team
    }

    pub fn alive(&self) -> bool {
        self.current > 0
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.config.max
    }

    /// Applies damage. Dead targets ignore further hits; the death event
    /// fires exactly once per life.
    pub fn hit(&mut self, id: GameObjectId, kind: GameObjectKind, amount: i32, events: &mut EventLog) {
        if !self.alive() {
            return;
        }
        self.current = (self.current - amount).clamp(0, self.config.max);
        self.regen_delay = ticks(self.config.regen_delay) as i32;
        events.emit(GameEvent::Damage { id, amount });
        if self.current == 0 && !self.death_emitted {
            self.death_emitted = true;
            self.despawn = ticks(DESPAWN_SECONDS);
            events.emit(GameEvent::Death { id, kind });
        }
    }

    /// Restores health up to the configured maximum. Dead targets cannot be
    /// healed back.
    pub fn heal(&mut self, id: GameObjectId, amount: i32, events: &mut EventLog) {
        if !self.alive() {
            return;
        }
        self.current = (self.current + amount).clamp(0, self.config.max);
        events.emit(GameEvent::Heal { id, amount });
    }

    pub(crate) fn update(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        if !self.alive() {
            self.despawn = self.despawn.saturating_sub(1);
            if self.despawn == 0 {
                ctx.objects.defer_remove(parent.id());
            }
            return;
        }

        self.regen_delay -= 1;
        if self.regen_delay <= 0 && self.config.regen_amount > 0 {
            self.regen_delay = ticks(self.config.regen_delay) as i32;
            let id = parent.id();
            self.heal(id, self.config.regen_amount, ctx.events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hitpoint(max: i32) -> Hitpoint {
        Hitpoint::new(
            HitpointConfig {
                max,
                regen_amount: 0,
                regen_delay: 0.0,
            },
            0,
        )
    }

    fn id() -> GameObjectId {
        GameObjectId::from_raw(7)
    }

    #[test]
    fn damage_clamps_at_zero_and_death_fires_once() {
        let mut events = EventLog::new();
        let mut hp = hitpoint(10);
        hp.hit(id(), GameObjectKind::Monster, 25, &mut events);
        assert_eq!(hp.current(), 0);
        assert!(!hp.alive());
        hp.hit(id(), GameObjectKind::Monster, 5, &mut events);

        let deaths = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Death { .. }))
            .count();
        assert_eq!(deaths, 1);
        // The second hit on a corpse emits nothing at all.
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn heal_clamps_at_max_and_skips_the_dead() {
        let mut events = EventLog::new();
        let mut hp = hitpoint(10);
        hp.hit(id(), GameObjectKind::Character, 4, &mut events);
        hp.heal(id(), 100, &mut events);
        assert_eq!(hp.current(), 10);

        hp.hit(id(), GameObjectKind::Character, 100, &mut events);
        hp.heal(id(), 100, &mut events);
        assert_eq!(hp.current(), 0);
        assert!(!hp.alive());
    }

    #[test]
    fn hit_resets_the_regen_delay() {
        let mut events = EventLog::new();
        let mut hp = Hitpoint::new(
            HitpointConfig {
                max: 10,
                regen_amount: 1,
                regen_delay: 2.0,
            },
            0,
        );
        hp.hit(id(), GameObjectKind::Character, 3, &mut events);
        assert_eq!(hp.regen_delay, ticks(2.0) as i32);
    }
}
