//! Missions: sequenced objectives driven by gameplay events.
//!
//! At most one mission is active at a time. The manager archives a finished
//! mission on the tick after it completes and then opens the next config
//! whose scene matches and whose dependencies are all done. Progress comes
//! from the tick's event log (trigger firings, deaths) or, for dialog
//! missions, from an explicit host notification.

use std::collections::HashMap;

use glam::Vec2;
use tracing::warn;

use crate::config::{ConfigTable, MissionConfig, MissionKind};
use crate::event::{EventLog, GameEvent};
use crate::level::pathfinder::PathFinder;
use crate::object::{GameObjectId, GameObjectKind, GameObjectManager, KindState};

/// Level state the mission system may read and steer.
pub struct MissionCtx<'a> {
    pub scene_id: u32,
    pub objects: &'a mut GameObjectManager,
    pub path_finder: &'a PathFinder,
    pub points: &'a HashMap<u32, Vec2>,
    pub events: &'a mut EventLog,
    pub configs: &'a ConfigTable,
}

/// One active mission instance.
///
/// Construction snapshots the level: objectives that are already satisfied
/// (a trigger that has fired, a monster that is dead or absent) are credited
/// immediately, and a mission whose requirement is already met completes on
/// the spot. The teleport to `tp_point` happens before that check.
pub struct Mission {
    config: MissionConfig,
    required: u32,
    progress: u32,
    completed: bool,
    /// Listed triggers that were still unfired at construction.
    watched_triggers: Vec<u32>,
    /// Listed monsters that were still alive at construction.
    watched_monsters: Vec<u32>,
    npc: Option<GameObjectId>,
    npc_move_points: Vec<Vec2>,
}

impl Mission {
    fn new(config: &MissionConfig, ctx: &mut MissionCtx<'_>) -> Self {
        let mut mission = Self {
            config: config.clone(),
            required: 1,
            progress: 0,
            completed: false,
            watched_triggers: Vec::new(),
            watched_monsters: Vec::new(),
            npc: None,
            npc_move_points: Vec::new(),
        };

        match config.kind {
            MissionKind::Dummy | MissionKind::TalkToNpc => {}
            MissionKind::Trigger => {
                mission.required = config.trigger_ids.len() as u32;
                for &trigger_id in &config.trigger_ids {
                    match ctx.objects.get(GameObjectId::from_raw(trigger_id)) {
                        Some(object) => match object.kind_state() {
                            KindState::Trigger(state) if state.triggered => mission.progress += 1,
                            KindState::Trigger(_) => mission.watched_triggers.push(trigger_id),
                            _ => warn!(
                                mission = config.id,
                                trigger_id, "listed object is not a trigger"
                            ),
                        },
                        None => warn!(mission = config.id, trigger_id, "listed trigger is missing"),
                    }
                }
            }
            MissionKind::KillMonsters => {
                mission.required = config.monster_ids.len() as u32;
                for &monster_id in &config.monster_ids {
                    match ctx.objects.get(GameObjectId::from_raw(monster_id)) {
                        Some(object) if object.components.hitpoint().is_some_and(|hp| hp.alive()) => {
                            mission.watched_monsters.push(monster_id);
                        }
                        // Already dead or gone: credit it.
                        _ => mission.progress += 1,
                    }
                }
            }
            MissionKind::KillAnyMonster => {
                mission.required = config.monster_count;
                let killable = ctx
                    .objects
                    .iter()
                    .filter(|object| {
                        object.kind() == GameObjectKind::Monster
                            && object.components.hitpoint().is_some_and(|hp| hp.alive())
                    })
                    .count() as u32;
                mission.progress = config.monster_count.saturating_sub(killable);
            }
            MissionKind::FollowNpc => {
                mission.required = config.npc_move_point_ids.len() as u32;
                let npc_id = config.npc_id.map(GameObjectId::from_raw);
                match npc_id.and_then(|id| ctx.objects.get(id)) {
                    Some(object) if object.kind() == GameObjectKind::Npc => {
                        mission.npc = npc_id;
                        for &point_id in &config.npc_move_point_ids {
                            match ctx.points.get(&point_id) {
                                Some(point) => mission.npc_move_points.push(*point),
                                None => {
                                    warn!(mission = config.id, point_id, "move point is missing");
                                    mission.progress = mission.required;
                                    break;
                                }
                            }
                        }
                    }
                    _ => {
                        warn!(mission = config.id, "mission has no npc to follow");
                        mission.progress = mission.required;
                    }
                }
            }
        }

        if let Some(point_id) = config.tp_point {
            match ctx.points.get(&point_id) {
                Some(point) => {
                    let point = *point;
                    if let Some(player) = ctx
                        .objects
                        .iter_mut()
                        .find(|object| object.kind() == GameObjectKind::Character)
                    {
                        player.position = point;
                    }
                }
                None => warn!(mission = config.id, point_id, "teleport point is missing"),
            }
        }

        if mission.progress >= mission.required {
            mission.complete(ctx);
        }

        mission
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn required_progress(&self) -> u32 {
        self.required
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    fn start(&mut self, ctx: &mut MissionCtx<'_>) {
        ctx.events.emit(GameEvent::MissionStarted { id: self.config.id });
        if self.config.kind == MissionKind::FollowNpc && !self.completed {
            self.attach_npc(ctx, true);
            self.move_npc_to_next_point(ctx);
        }
    }

    fn update(&mut self, ctx: &mut MissionCtx<'_>) {
        self.consume_events(ctx);

        if self.config.kind == MissionKind::FollowNpc && !self.completed {
            let Some(npc_position) = self.npc.and_then(|id| ctx.objects.get(id)).map(|o| o.position)
            else {
                return;
            };
            let Some(point) = self.npc_move_points.get(self.progress as usize).copied() else {
                return;
            };
            if npc_position.distance_squared(point) < 0.1 {
                self.advance(ctx);
                if !self.completed {
                    self.move_npc_to_next_point(ctx);
                }
            }
        }
    }

    /// Advances progress from this tick's trigger and death events.
    fn consume_events(&mut self, ctx: &mut MissionCtx<'_>) {
        if self.completed {
            return;
        }
        let events: Vec<GameEvent> = ctx.events.iter().copied().collect();
        for event in events {
            if self.completed {
                break;
            }
            match (self.config.kind, event) {
                (MissionKind::Trigger, GameEvent::Triggered { id }) => {
                    if self.watched_triggers.contains(&id.raw()) {
                        self.advance(ctx);
                    }
                }
                (MissionKind::KillMonsters, GameEvent::Death { id, .. }) => {
                    if self.watched_monsters.contains(&id.raw()) {
                        self.advance(ctx);
                    }
                }
                (MissionKind::KillAnyMonster, GameEvent::Death { kind, .. }) => {
                    if kind == GameObjectKind::Monster {
                        self.advance(ctx);
                    }
                }
                _ => {}
            }
        }
    }

    /// Credits one dialog interaction with the mission's NPC.
    fn notify_npc_talked(&mut self, npc_object_id: GameObjectId, ctx: &mut MissionCtx<'_>) {
        if self.config.kind != MissionKind::TalkToNpc || self.completed {
            return;
        }
        if self.config.npc_id == Some(npc_object_id.raw()) {
            self.advance(ctx);
        }
    }

    fn advance(&mut self, ctx: &mut MissionCtx<'_>) {
        if self.progress < self.required {
            self.progress += 1;
            if self.progress >= self.required {
                self.complete(ctx);
            }
        }
    }

    fn complete(&mut self, ctx: &mut MissionCtx<'_>) {
        self.progress = self.required;
        self.completed = true;
        if self.config.kind == MissionKind::FollowNpc {
            self.attach_npc(ctx, false);
        }
        ctx.events.emit(GameEvent::MissionCompleted { id: self.config.id });
    }

    fn attach_npc(&self, ctx: &mut MissionCtx<'_>, attached: bool) {
        let Some(npc) = self.npc.and_then(|id| ctx.objects.get_mut(id)) else {
            return;
        };
        npc.set_npc_mission_attachment(attached, ctx.configs);
    }

    fn move_npc_to_next_point(&self, ctx: &mut MissionCtx<'_>) {
        let Some(point) = self.npc_move_points.get(self.progress as usize).copied() else {
            return;
        };
        let Some(npc) = self.npc.and_then(|id| ctx.objects.get_mut(id)) else {
            return;
        };
        let from = npc.position;
        if let Some(ai) = npc.components.ai_movement_mut() {
            ai.move_to(from, ctx.path_finder, point);
        }
    }
}

/// Drives mission progression for one level.
#[derive(Default)]
pub struct MissionManager {
    current: Option<Mission>,
    /// Completed mission ids, append-only.
    completed: Vec<u32>,
}

impl MissionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Mission> {
        self.current.as_ref()
    }

    pub fn is_mission_completed(&self, mission_id: u32) -> bool {
        self.completed.contains(&mission_id)
    }

    /// Runs after the object pass each tick. A mission that completed last
    /// tick is archived here, and its successor (if any) starts.
    pub fn update(&mut self, ctx: &mut MissionCtx<'_>) {
        let finished = self.current.as_ref().is_none_or(Mission::is_completed);
        if finished {
            if let Some(mission) = self.current.take() {
                self.completed.push(mission.config.id);
            }
            self.current = self.search_open_mission(ctx);
            if let Some(mission) = &mut self.current {
                mission.start(ctx);
            }
        } else if let Some(mission) = &mut self.current {
            mission.update(ctx);
        }
    }

    /// Dialog boundary: the host reports that the player talked to an NPC.
    pub fn notify_npc_talked(&mut self, npc_object_id: GameObjectId, ctx: &mut MissionCtx<'_>) {
        if let Some(mission) = &mut self.current {
            mission.notify_npc_talked(npc_object_id, ctx);
        }
    }

    /// First config for this scene that is not completed and whose
    /// dependencies all are.
    fn search_open_mission(&self, ctx: &mut MissionCtx<'_>) -> Option<Mission> {
        let config = ctx.configs.missions.iter().find(|config| {
            config.scene_id == ctx.scene_id
                && !self.is_mission_completed(config.id)
                && config
                    .dependency_ids
                    .iter()
                    .all(|id| self.is_mission_completed(*id))
        })?;
        let config = config.clone();
        Some(Mission::new(&config, ctx))
    }

    pub fn completed_missions_in_group(&self, configs: &ConfigTable, group_id: u32) -> Vec<u32> {
        configs
            .missions
            .iter()
            .filter(|mission| mission.group_id == group_id)
            .filter(|mission| self.is_mission_completed(mission.id))
            .map(|mission| mission.id)
            .collect()
    }

    pub fn total_missions_in_group(&self, configs: &ConfigTable, group_id: u32) -> usize {
        configs
            .missions
            .iter()
            .filter(|mission| mission.group_id == group_id)
            .count()
    }
}
