//! Waypoint-following movement for AI-controlled objects.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use tracing::warn;

use crate::config::MovementConfig;
use crate::event::GameEvent;
use crate::level::pathfinder::PathFinder;
use crate::object::{GameObject, UpdateCtx};
use crate::time::TICK_DELTA;

/// Moves its parent along a pathfinder route at constant speed, snapping to
/// each waypoint as it is reached. A single tick may consume several
/// waypoints when they are closer than one tick of travel.
#[derive(Clone, Debug)]
pub struct AiMovement {
    config: MovementConfig,
    path: Vec<Vec2>,
    index: usize,
    paused: bool,
}

impl AiMovement {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            path: Vec::new(),
            index: 0,
            paused: false,
        }
    }

    /// Swaps the movement tuning (NPCs use a different config while leading
    /// a mission than while patrolling).
    pub fn set_config(&mut self, config: MovementConfig) {
        self.config = config;
    }

    pub fn is_moving(&self) -> bool {
        self.index < self.path.len()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Replaces the current route with a path to `target`.
    ///
    /// Already being at the target is a no-op. So is an empty pathfinder
    /// result: the previous route stays in place and keeps being followed.
    pub fn move_to(&mut self, from: Vec2, path_finder: &PathFinder, target: Vec2) {
        if from == target {
            return;
        }
        let path = path_finder.find_path(from, target);
        if path.is_empty() {
            warn!(?from, ?target, "no path to target, keeping previous route");
            return;
        }
        self.path = path;
        self.index = 0;
    }

    /// Discards the current route.
    pub fn stop(&mut self) {
        self.path.clear();
        self.index = 0;
    }

    /// Suspends following without discarding the route.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub(crate) fn update(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        if !parent.alive() {
            return;
        }

        if self.paused || !self.is_moving() {
            ctx.events.emit(GameEvent::Moved {
                id: parent.id(),
                speed_rate: 0.0,
            });
            return;
        }

        let mut budget = self.config.speed * TICK_DELTA;
        let mut moved = false;
        while budget > 0.0 && self.index < self.path.len() {
            let waypoint = self.path[self.index];
            let delta = waypoint - parent.position;
            let distance = delta.length();
            if distance > 0.0 {
                parent.direction = delta.y.atan2(delta.x) + FRAC_PI_2;
            }
            if distance <= budget {
                parent.position = waypoint;
                budget -= distance;
                self.index += 1;
            } else {
                parent.position += delta / distance * budget;
                budget = 0.0;
            }
            moved = true;
        }

        if self.index >= self.path.len() {
            self.stop();
        }

        ctx.events.emit(GameEvent::Moved {
            id: parent.id(),
            speed_rate: if moved { 1.0 } else { 0.0 },
        });
    }
}
