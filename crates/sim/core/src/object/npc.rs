//! NPC routines: idle patrol and mission-following.

use glam::Vec2;

use crate::object::{GameObject, UpdateCtx};
use crate::time::ticks;

/// Interval between distance checks while leading a mission.
const WAITING_CHECK_SECONDS: f32 = 0.5;

/// State of an NPC.
///
/// Idle NPCs walk their authored patrol route back and forth, pausing at
/// each end for the rollback delay. While attached to a mission the patrol
/// is suspended and the NPC leads the player instead, waiting whenever the
/// player falls too far behind.
#[derive(Clone, Debug, PartialEq)]
pub struct NpcState {
    pub patrol_points: Vec<Vec2>,
    /// Pause at each end of the patrol route, in ticks.
    pub patrol_end_rollback_delay: u32,
    attached_to_mission: bool,
    patrol_index: usize,
    reverse_patrol: bool,
    patrol_frozen: bool,
    rollback_timer: u32,
    waiting_check: u32,
}

impl Default for NpcState {
    fn default() -> Self {
        Self {
            patrol_points: Vec::new(),
            patrol_end_rollback_delay: 0,
            attached_to_mission: false,
            patrol_index: 0,
            reverse_patrol: false,
            patrol_frozen: false,
            rollback_timer: 0,
            waiting_check: 0,
        }
    }
}

impl NpcState {
    pub fn attached_to_mission(&self) -> bool {
        self.attached_to_mission
    }

    pub(crate) fn set_attached(&mut self, attached: bool) {
        self.attached_to_mission = attached;
        self.waiting_check = ticks(WAITING_CHECK_SECONDS);
    }

    /// Suspends the patrol entirely (used while a dialog or cutscene holds
    /// the NPC in place).
    pub fn set_patrol_frozen(&mut self, frozen: bool) {
        self.patrol_frozen = frozen;
    }

    pub fn is_patrol_frozen(&self) -> bool {
        self.patrol_frozen
    }

    pub(crate) fn update(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        if self.patrol_frozen {
            return;
        }
        if self.rollback_timer > 0 {
            self.rollback_timer -= 1;
            return;
        }

        if self.attached_to_mission {
            self.check_waiting(parent, ctx);
        } else {
            self.advance_patrol(parent, ctx);
        }
    }

    /// Leading a mission: every half second, pause when the player is too
    /// far behind and resume once they close in again.
    fn check_waiting(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        self.waiting_check = self.waiting_check.saturating_sub(1);
        if self.waiting_check > 0 {
            return;
        }
        self.waiting_check = ticks(WAITING_CHECK_SECONDS);

        let Some(player_position) = ctx.objects.player().map(|player| player.position) else {
            return;
        };
        let start_waiting = ctx.configs.globals.npc_start_waiting_player_distance;
        let start_chasing = ctx.configs.globals.npc_start_chasing_player_distance;
        let distance = parent.position.distance_squared(player_position);
        let Some(ai) = parent.components.ai_movement_mut() else {
            return;
        };
        if distance >= start_waiting * start_waiting {
            ai.pause();
        } else if distance <= start_chasing * start_chasing {
            ai.resume();
        }
    }

    /// Idle patrol: walk the route point by point, reverse at each end after
    /// the rollback delay.
    fn advance_patrol(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        if self.patrol_points.is_empty() {
            return;
        }
        let moving = parent
            .components
            .ai_movement()
            .map(|ai| ai.is_moving())
            .unwrap_or(false);
        if moving {
            return;
        }

        let count = self.patrol_points.len();
        if self.patrol_index < count {
            let index = if self.reverse_patrol {
                count - 1 - self.patrol_index
            } else {
                self.patrol_index
            };
            let target = self.patrol_points[index];
            let from = parent.position;
            if let Some(ai) = parent.components.ai_movement_mut() {
                ai.move_to(from, ctx.path_finder, target);
            }
            self.patrol_index += 1;
        } else {
            self.reverse_patrol = !self.reverse_patrol;
            self.patrol_index = 0;
            self.rollback_timer = self.patrol_end_rollback_delay;
        }
    }
}
