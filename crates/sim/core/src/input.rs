//! Abstract per-tick player input.
//!
//! The simulation never polls devices; the host samples its input layer and
//! hands the core one snapshot per tick.

use glam::Vec2;

/// Input snapshot consumed by the player character each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    /// Movement axis. Magnitude is clamped to 1 by the movement component.
    pub axis: Vec2,
    /// Dash request. Latched by the movement component until the dash fires.
    pub dash: bool,
    /// Attack request with a world-space facing angle in radians.
    pub attack_direction: Option<f32>,
}

impl PlayerInput {
    pub const NONE: Self = Self {
        axis: Vec2::ZERO,
        dash: false,
        attack_direction: None,
    };
}
