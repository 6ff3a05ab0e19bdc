//! Attack initiation, windup and resolution.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use tracing::warn;

use crate::config::CombatConfig;
use crate::event::{EventLog, GameEvent};
use crate::object::{GameObject, KindState, NEUTRAL_TEAM, ProjectileState, UpdateCtx};
use crate::time::ticks;

/// Attack state machine: idle, winding up, cooling down.
///
/// An attack starts with [`Combat::prepare_attack`], which freezes the
/// attacker's movement for the windup. When the windup expires the attack
/// resolves: a projectile spawn for ranged configs, an instantaneous radius
/// sweep for melee.
#[derive(Clone, Debug)]
pub struct Combat {
    config: CombatConfig,
    cooldown: u32,
    windup: Option<u32>,
    aim: f32,
}

impl Combat {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            cooldown: 0,
            windup: None,
            aim: 0.0,
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn can_attack(&self) -> bool {
        self.cooldown == 0 && self.windup.is_none()
    }

    pub fn is_winding_up(&self) -> bool {
        self.windup.is_some()
    }

    /// Starts an attack toward `direction` (an `atan2`-style world angle).
    /// Callers must check [`Self::can_attack`] first; a premature request
    /// trips a debug assertion and is dropped with a warning in release.
    pub fn prepare_attack(&mut self, parent: &mut GameObject, events: &mut EventLog, direction: f32) {
        if !self.can_attack() {
            debug_assert!(false, "attack requested while unable to attack");
            warn!(id = parent.id().raw(), "attack requested while unable to attack");
            return;
        }

        let windup = ticks(self.config.attack_loading_time);
        self.windup = Some(windup);
        self.aim = direction;
        parent.direction = direction + FRAC_PI_2;

        // Lock the attacker in place until the attack resolves.
        if let Some(movement) = parent.components.movement_mut() {
            movement.freeze(windup + 1);
        }

        events.emit(GameEvent::PrepareAttack { id: parent.id() });
    }

    pub(crate) fn update(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        if self.cooldown > 0 {
            self.cooldown -= 1;
        }

        if let Some(remaining) = self.windup {
            if remaining == 0 {
                self.windup = None;
                self.cooldown = ticks(self.config.attack_delay);
                self.resolve(parent, ctx);
            } else {
                self.windup = Some(remaining - 1);
            }
        }
    }

    fn resolve(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        ctx.events.emit(GameEvent::Attack { id: parent.id() });

        if let Some(projectile_id) = self.config.projectile_id {
            let state = ProjectileState {
                team: parent.team(),
                damage: self.config.shoot_damage,
                radius: self.config.shoot_radius,
                velocity: Vec2::new(self.aim.cos(), self.aim.sin()) * self.config.projectile_speed,
                lifetime: ticks(self.config.projectile_lifetime),
            };
            let mut projectile =
                GameObject::new(KindState::Projectile(state), projectile_id, parent.position);
            projectile.direction = parent.direction;
            ctx.objects.defer_spawn(projectile);
        } else {
            let team = parent.team();
            let from = parent.position;
            let radius_squared = self.config.shoot_radius * self.config.shoot_radius;
            let damage = self.config.shoot_damage;
            for other in ctx.objects.iter_mut() {
                let other_team = other.team();
                if other_team == team || other_team == NEUTRAL_TEAM || !other.alive() {
                    continue;
                }
                if (other.position - from).length_squared() > radius_squared {
                    continue;
                }
                let (id, kind) = (other.id(), other.kind());
                if let Some(hitpoint) = other.components.hitpoint_mut() {
                    hitpoint.hit(id, kind, damage, ctx.events);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "unable to attack")]
    fn preparing_during_a_windup_is_a_caller_bug() {
        let mut object = GameObject::new(KindState::Character, 1, Vec2::ZERO);
        let mut events = EventLog::new();
        let mut combat = Combat::new(CombatConfig {
            attack_loading_time: 0.5,
            ..CombatConfig::default()
        });

        combat.prepare_attack(&mut object, &mut events, 0.0);
        combat.prepare_attack(&mut object, &mut events, 0.0);
    }
}
