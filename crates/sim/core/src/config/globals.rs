//! Global tuning shared across scenes.

use serde::{Deserialize, Serialize};

use super::component::MovementConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalsConfig {
    /// Movement used by an NPC while leading the player on a mission.
    pub npc_movement: MovementConfig,
    /// Movement used by an idle NPC walking its patrol route.
    pub npc_patrol_movement: MovementConfig,
    /// Distance at which a mission NPC stops and waits for the player.
    pub npc_start_waiting_player_distance: f32,
    /// Distance at which a waiting NPC resumes leading.
    pub npc_start_chasing_player_distance: f32,
}
