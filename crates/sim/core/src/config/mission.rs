//! Mission config records.

use serde::{Deserialize, Serialize};

/// The five mission archetypes. Each determines how `required_progress` is
/// derived and which events advance the mission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionKind {
    #[default]
    Dummy,
    /// One progress point per listed trigger firing.
    Trigger,
    /// One point per listed monster dying.
    KillMonsters,
    /// Fixed kill count against any monster in the level.
    KillAnyMonster,
    /// Single point granted by the dialog layer.
    TalkToNpc,
    /// One point per ordered move point the linked NPC reaches.
    FollowNpc,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionConfig {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub dependency_ids: Vec<u32>,
    #[serde(default)]
    pub group_id: u32,
    pub scene_id: u32,
    pub kind: MissionKind,
    /// Point the player is teleported to when the mission is instantiated.
    #[serde(default)]
    pub tp_point: Option<u32>,

    // UI - HUD
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,

    // Params if kind == Trigger
    #[serde(default)]
    pub trigger_ids: Vec<u32>,

    // Params if kind == KillMonsters
    #[serde(default)]
    pub monster_ids: Vec<u32>,

    // Params if kind == KillAnyMonster
    #[serde(default)]
    pub monster_count: u32,

    // Params if kind == TalkToNpc / FollowNpc
    #[serde(default)]
    pub npc_id: Option<u32>,
    #[serde(default)]
    pub npc_move_point_ids: Vec<u32>,
}
