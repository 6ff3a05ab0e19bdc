//! Per-component config records.

use serde::{Deserialize, Serialize};

/// Tuning for player and AI movement. Rates are per-second; the movement
/// components convert to per-tick factors themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    pub speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    #[serde(default)]
    pub dash_speed: f32,
    #[serde(default)]
    pub dash_deceleration: f32,
}

/// Base attack tuning shared by players and monsters.
///
/// `projectile_id` switches the attack between an instantaneous melee sweep
/// (`None`) and a spawned projectile. Durations are seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Cooldown after an attack resolves.
    pub attack_delay: f32,
    /// Windup between attack initiation and its effect.
    #[serde(default)]
    pub attack_loading_time: f32,
    #[serde(default)]
    pub can_attack_while_moving: bool,
    pub shoot_damage: i32,
    pub shoot_radius: f32,
    #[serde(default)]
    pub projectile_id: Option<u32>,
    #[serde(default)]
    pub projectile_speed: f32,
    /// Projectile flight time in seconds.
    #[serde(default)]
    pub projectile_lifetime: f32,
    #[serde(default)]
    pub audio_id: u32,
}

/// Monster combat = base combat plus alert/patrol tuning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonsterCombatConfig {
    #[serde(flatten)]
    pub combat: CombatConfig,
    pub alert_in_radius: f32,
    pub alert_out_radius: f32,
    pub patrol_radius: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HitpointConfig {
    pub max: i32,
    #[serde(default)]
    pub regen_amount: i32,
    /// Seconds without damage before regen resumes.
    #[serde(default)]
    pub regen_delay: f32,
}
