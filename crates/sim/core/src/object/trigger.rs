//! Area triggers.

use crate::event::GameEvent;
use crate::object::{GameObject, GameObjectKind, UpdateCtx};

/// A rectangular area that fires when any character steps inside.
///
/// Edge-triggered: one event on entry, and (for auto-reset triggers) one
/// reset event once the area is vacated. Non-resetting triggers latch after
/// the first firing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriggerState {
    /// `[x_min, y_min, x_max, y_max]` in world units.
    pub area: [f32; 4],
    pub auto_reset: bool,
    pub triggered: bool,
}

impl TriggerState {
    fn contains(&self, position: glam::Vec2) -> bool {
        position.x >= self.area[0]
            && position.x <= self.area[2]
            && position.y >= self.area[1]
            && position.y <= self.area[3]
    }

    pub(crate) fn update(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        if self.triggered && !self.auto_reset {
            return;
        }

        let inside = ctx
            .objects
            .iter()
            .any(|object| object.kind() == GameObjectKind::Character && self.contains(object.position));

        if inside == self.triggered {
            return;
        }

        self.triggered = inside;
        if inside {
            ctx.events.emit(GameEvent::Triggered { id: parent.id() });
        } else {
            ctx.events.emit(GameEvent::TriggerReset { id: parent.id() });
        }
    }
}
