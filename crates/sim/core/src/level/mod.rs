//! A running level: tiles, objects, missions and the per-tick update loop.

pub mod pathfinder;
pub mod tilemap;

use std::collections::HashMap;

use glam::Vec2;
use thiserror::Error;

use crate::config::{ConfigError, ConfigTable};
use crate::event::{EventLog, GameEvent};
use crate::input::PlayerInput;
use crate::mission::{MissionCtx, MissionManager};
use crate::object::{
    GameObject, GameObjectId, GameObjectKind, GameObjectManager, ObjectError, ObjectRecord,
    PointRecord, UpdateCtx,
};
use crate::time::Clock;

use pathfinder::PathFinder;
use tilemap::{TileMap, TileMapError, TileState};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Object(#[from] ObjectError),
    #[error(transparent)]
    TileMap(#[from] TileMapError),
}

/// The simulation root. Owns every piece of mutable game state and advances
/// it one fixed tick at a time; all I/O stays with the caller.
///
/// Update order within a tick: objects in insertion order (kind behavior,
/// then components in registration order), deferred spawns/removals, then
/// missions. The host drains the event log after each tick.
pub struct Level {
    scene_id: u32,
    clock: Clock,
    tile_map: TileMap,
    path_finder: PathFinder,
    objects: GameObjectManager,
    missions: MissionManager,
    points: HashMap<u32, Vec2>,
    events: EventLog,
    configs: ConfigTable,
}

impl Level {
    /// Builds an empty level with the given dimensions. Tiles start out
    /// impassable; the host loads baked terrain or authors tiles before
    /// anything can move.
    pub fn new(scene_id: u32, width: u32, height: u32, resolution: u8, configs: ConfigTable) -> Self {
        let tile_map = TileMap::new(width, height, resolution);
        let path_finder = PathFinder::new(&tile_map);
        Self {
            scene_id,
            clock: Clock::default(),
            tile_map,
            path_finder,
            objects: GameObjectManager::new(),
            missions: MissionManager::new(),
            points: HashMap::new(),
            events: EventLog::new(),
            configs,
        }
    }

    /// Builds a level from its scene config, instantiating the authored
    /// objects and points.
    pub fn from_scene(scene_id: u32, configs: ConfigTable) -> Result<Self, LevelError> {
        let scene = configs.scene(scene_id)?.clone();
        let mut level = Self::new(scene_id, scene.width, scene.height, scene.precision, configs);
        level.load(&scene.objects, &scene.points)?;
        Ok(level)
    }

    pub fn scene_id(&self) -> u32 {
        self.scene_id
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn configs(&self) -> &ConfigTable {
        &self.configs
    }

    pub fn tile_map(&self) -> &TileMap {
        &self.tile_map
    }

    pub fn objects(&self) -> &GameObjectManager {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut GameObjectManager {
        &mut self.objects
    }

    pub fn missions(&self) -> &MissionManager {
        &self.missions
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Hands this tick's events to the host and clears the log.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn point(&self, id: u32) -> Option<Vec2> {
        self.points.get(&id).copied()
    }

    /// Walkability of the tile under a world position.
    pub fn is_passable_tile(&self, position: Vec2) -> bool {
        self.tile_map.is_passable(position)
    }

    /// Writes one tile and rebuilds the path grid.
    pub fn set_tile_state(&mut self, position: Vec2, state: TileState) -> Result<(), LevelError> {
        self.tile_map.set(position, state)?;
        self.path_finder.update_grid(&self.tile_map);
        Ok(())
    }

    /// Replaces the whole tile grid (baked terrain) and rebuilds the path
    /// grid.
    pub fn set_sub_tiles(
        &mut self,
        buffer: Vec<u8>,
        sub_w: u32,
        sub_h: u32,
        resolution: u8,
    ) -> Result<(), LevelError> {
        self.tile_map.set_sub_tiles(buffer, sub_w, sub_h, resolution)?;
        self.path_finder.update_grid(&self.tile_map);
        Ok(())
    }

    /// Spawns a configured object at a position.
    pub fn spawn(
        &mut self,
        kind: GameObjectKind,
        config_id: u32,
        position: Vec2,
    ) -> Result<GameObjectId, LevelError> {
        let mut object = GameObject::from_config(kind, config_id, &self.configs)?;
        object.position = position;
        let id = self.objects.add(object)?;
        self.events.emit(GameEvent::Spawned { id, kind });
        Ok(id)
    }

    /// Instantiates saved records and named points into the level.
    pub fn load(
        &mut self,
        records: &[ObjectRecord],
        points: &[PointRecord],
    ) -> Result<(), LevelError> {
        for record in records {
            let object = record.to_object(&self.configs)?;
            let kind = object.kind();
            let id = self.objects.add(object)?;
            self.events.emit(GameEvent::Spawned { id, kind });
        }
        for point in points {
            self.points.insert(point.id, point.world());
        }
        Ok(())
    }

    /// Snapshots the persistent objects and points.
    pub fn save(&self) -> (Vec<ObjectRecord>, Vec<PointRecord>) {
        let mut points: Vec<PointRecord> = self
            .points
            .iter()
            .map(|(id, position)| PointRecord {
                id: *id,
                position: (*position).into(),
            })
            .collect();
        points.sort_by_key(|point| point.id);
        (self.objects.save(), points)
    }

    /// Advances the simulation by exactly one tick.
    pub fn update(&mut self, input: &PlayerInput) {
        self.clock.advance();

        // Take-out/put-back over the slots that existed at tick start;
        // objects spawned this tick first update next tick.
        let slot_count = self.objects.slot_count();
        for slot in 0..slot_count {
            let Some(mut object) = self.objects.take_slot(slot) else {
                continue;
            };
            let mut ctx = UpdateCtx {
                input,
                tile_map: &self.tile_map,
                path_finder: &self.path_finder,
                objects: &mut self.objects,
                events: &mut self.events,
                configs: &self.configs,
            };
            object.update(&mut ctx);
            self.objects.restore_slot(slot, object);
        }

        self.objects.apply_deferred(&mut self.events);

        let mut ctx = MissionCtx {
            scene_id: self.scene_id,
            objects: &mut self.objects,
            path_finder: &self.path_finder,
            points: &self.points,
            events: &mut self.events,
            configs: &self.configs,
        };
        self.missions.update(&mut ctx);
    }

    /// Dialog boundary: credits TalkToNpc missions for the given NPC.
    pub fn notify_npc_talked(&mut self, npc: GameObjectId) {
        let mut ctx = MissionCtx {
            scene_id: self.scene_id,
            objects: &mut self.objects,
            path_finder: &self.path_finder,
            points: &self.points,
            events: &mut self.events,
            configs: &self.configs,
        };
        self.missions.notify_npc_talked(npc, &mut ctx);
    }
}
