//! Player-driven movement with dashing and wall sliding.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use tracing::warn;

use crate::config::MovementConfig;
use crate::event::GameEvent;
use crate::object::{GameObject, UpdateCtx};
use crate::time::{TICK_DELTA, ticks};

const DASH_COOLDOWN_SECONDS: f32 = 1.5;

/// Direct-control movement. Reads the input axis each tick, accelerates
/// toward it, and resolves tile collisions by axis-sliding.
#[derive(Clone, Debug)]
pub struct Movement {
    config: MovementConfig,
    velocity: Vec2,
    dashing: bool,
    dash_cooldown: u32,
    freeze: u32,
}

impl Movement {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            velocity: Vec2::ZERO,
            dashing: false,
            dash_cooldown: 0,
            freeze: 0,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_dashing(&self) -> bool {
        self.dashing
    }

    /// Halts integration for the given number of ticks. Used by combat to
    /// lock the attacker in place during the windup.
    pub fn freeze(&mut self, duration: u32) {
        self.freeze = duration;
        self.velocity = Vec2::ZERO;
    }

    pub(crate) fn update(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        if self.dash_cooldown > 0 {
            self.dash_cooldown -= 1;
        }

        if self.freeze > 0 {
            self.freeze -= 1;
            self.velocity = Vec2::ZERO;
            ctx.events.emit(GameEvent::Moved {
                id: parent.id(),
                speed_rate: 0.0,
            });
            return;
        }

        if !parent.alive() {
            warn!(id = parent.id().raw(), "movement update skipped for dead object");
            return;
        }
        if !ctx.tile_map.is_passable(parent.position) {
            warn!(
                id = parent.id().raw(),
                position = ?parent.position,
                "movement update skipped on impassable tile"
            );
            return;
        }

        let axis = ctx.input.axis.clamp_length_max(1.0);

        if ctx.input.dash && !self.dashing && self.dash_cooldown == 0 {
            self.dashing = true;
            self.dash_cooldown = ticks(DASH_COOLDOWN_SECONDS);
            let dash_direction = if axis.length_squared() > 0.0 {
                axis
            } else {
                let angle = parent.direction - FRAC_PI_2;
                Vec2::new(angle.cos(), angle.sin())
            };
            // Full dash speed on the entry tick; decay starts next tick.
            self.velocity = dash_direction * self.config.dash_speed;
        } else if self.dashing {
            self.velocity = self
                .velocity
                .lerp(Vec2::ZERO, self.config.dash_deceleration * TICK_DELTA);
            if self.velocity.length_squared() <= self.config.speed * self.config.speed {
                self.dashing = false;
            }
        } else {
            let target = axis * self.config.speed;
            let rate = if axis.length_squared() > 0.0 {
                self.config.acceleration
            } else {
                self.config.deceleration
            };
            self.velocity = self.velocity.lerp(target, rate * TICK_DELTA);
        }

        let next = parent.position + self.velocity * TICK_DELTA;
        if ctx.tile_map.is_passable(next) {
            parent.position = next;
        } else {
            // Blocked: try sliding along one axis, otherwise stay.
            let keep_x = Vec2::new(parent.position.x, next.y);
            let keep_y = Vec2::new(next.x, parent.position.y);
            if ctx.tile_map.is_passable(keep_x) {
                parent.position = keep_x;
            } else if ctx.tile_map.is_passable(keep_y) {
                parent.position = keep_y;
            }
        }

        if self.velocity.length_squared() > 0.0 {
            parent.direction = self.velocity.y.atan2(self.velocity.x) + FRAC_PI_2;
        }

        ctx.events.emit(GameEvent::Moved {
            id: parent.id(),
            speed_rate: self.velocity.length() / self.config.speed,
        });
    }
}
