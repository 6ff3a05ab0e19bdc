//! Game objects and their components.
//!
//! Every simulated entity is a [`GameObject`]: a stable id, a world position,
//! a facing angle and a [`ComponentSet`]. Kind-specific behavior (projectile
//! flight, trigger areas, NPC routines) lives in [`KindState`] and runs
//! before the components each tick; components then update in registration
//! order.
//!
//! Updates use a take-out/put-back discipline: the level removes the object
//! from its manager slot, and the object removes each component (and its
//! kind state) from itself before updating it. The piece being updated
//! therefore gets `&mut` access to its parent and, through [`UpdateCtx`], to
//! every other object, without aliasing.

mod chest;
mod manager;
mod npc;
mod projectile;
mod record;
mod trigger;

pub mod component;

pub use chest::ChestState;
pub use manager::GameObjectManager;
pub use npc::NpcState;
pub use projectile::ProjectileState;
pub use record::{ObjectRecord, PointRecord};
pub use trigger::TriggerState;

use arrayvec::ArrayVec;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::{ConfigError, ConfigTable};
use crate::event::EventLog;
use crate::input::PlayerInput;
use crate::level::pathfinder::PathFinder;
use crate::level::tilemap::TileMap;

use component::{AiMovement, Combat, Hitpoint, MonsterCombat, Movement};

/// Team of player characters.
pub const PLAYER_TEAM: i32 = 1;
/// Team of monsters.
pub const MONSTER_TEAM: i32 = 0;
/// Pseudo-team of objects that never attack and are never targeted.
pub const NEUTRAL_TEAM: i32 = -1;

/// Stable object identifier. Ids are allocated monotonically and never
/// reused within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameObjectId(u32);

impl GameObjectId {
    /// Sentinel for objects that have not been registered yet; the manager
    /// allocates a real id on add.
    pub const UNASSIGNED: Self = Self(u32::MAX);

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameObjectKind {
    Character,
    Monster,
    Npc,
    Projectile,
    Chest,
    Trigger,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Movement,
    AiMovement,
    Combat,
    MonsterCombat,
    Hitpoint,
}

const MAX_COMPONENTS: usize = 5;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ObjectError {
    #[error("component {0:?} is already present")]
    DuplicateComponent(ComponentKind),
    #[error("component {0:?} is missing")]
    MissingComponent(ComponentKind),
    #[error("object id {} is already registered", .0.raw())]
    IdCollision(GameObjectId),
    #[error("object id {} is not registered", .0.raw())]
    NotRegistered(GameObjectId),
    #[error("{0} objects are transient and cannot be built from configs")]
    TransientKind(GameObjectKind),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything an object may touch while updating. The object itself is
/// absent from `objects` for the duration of its update.
pub struct UpdateCtx<'a> {
    pub input: &'a PlayerInput,
    pub tile_map: &'a TileMap,
    pub path_finder: &'a PathFinder,
    pub objects: &'a mut GameObjectManager,
    pub events: &'a mut EventLog,
    pub configs: &'a ConfigTable,
}

/// Kind-specific state and per-tick behavior.
#[derive(Clone, Debug, PartialEq)]
pub enum KindState {
    Character,
    Monster,
    Npc(NpcState),
    Projectile(ProjectileState),
    Chest(ChestState),
    Trigger(TriggerState),
}

impl KindState {
    pub fn kind(&self) -> GameObjectKind {
        match self {
            KindState::Character => GameObjectKind::Character,
            KindState::Monster => GameObjectKind::Monster,
            KindState::Npc(_) => GameObjectKind::Npc,
            KindState::Projectile(_) => GameObjectKind::Projectile,
            KindState::Chest(_) => GameObjectKind::Chest,
            KindState::Trigger(_) => GameObjectKind::Trigger,
        }
    }

    fn update(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        match self {
            KindState::Character => character_update(parent, ctx),
            KindState::Monster | KindState::Chest(_) => {}
            KindState::Npc(state) => state.update(parent, ctx),
            KindState::Projectile(state) => state.update(parent, ctx),
            KindState::Trigger(state) => state.update(parent, ctx),
        }
    }
}

/// One attachable behavior. At most one of each kind per object.
#[derive(Clone, Debug)]
pub enum Component {
    Movement(Movement),
    AiMovement(AiMovement),
    Combat(Combat),
    MonsterCombat(MonsterCombat),
    Hitpoint(Hitpoint),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Movement(_) => ComponentKind::Movement,
            Component::AiMovement(_) => ComponentKind::AiMovement,
            Component::Combat(_) => ComponentKind::Combat,
            Component::MonsterCombat(_) => ComponentKind::MonsterCombat,
            Component::Hitpoint(_) => ComponentKind::Hitpoint,
        }
    }

    fn update(&mut self, parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
        match self {
            Component::Movement(c) => c.update(parent, ctx),
            Component::AiMovement(c) => c.update(parent, ctx),
            Component::Combat(c) => c.update(parent, ctx),
            Component::MonsterCombat(c) => c.update(parent, ctx),
            Component::Hitpoint(c) => c.update(parent, ctx),
        }
    }
}

/// The components attached to one object, updated in registration order.
#[derive(Clone, Debug, Default)]
pub struct ComponentSet {
    movement: Option<Movement>,
    ai_movement: Option<AiMovement>,
    combat: Option<Combat>,
    monster_combat: Option<MonsterCombat>,
    hitpoint: Option<Hitpoint>,
    order: ArrayVec<ComponentKind, MAX_COMPONENTS>,
}

impl ComponentSet {
    pub fn add(&mut self, component: Component) -> Result<(), ObjectError> {
        let kind = component.kind();
        let slot_taken = match &component {
            Component::Movement(_) => self.movement.is_some(),
            Component::AiMovement(_) => self.ai_movement.is_some(),
            Component::Combat(_) => self.combat.is_some(),
            Component::MonsterCombat(_) => self.monster_combat.is_some(),
            Component::Hitpoint(_) => self.hitpoint.is_some(),
        };
        if slot_taken {
            return Err(ObjectError::DuplicateComponent(kind));
        }
        self.restore(component);
        self.order.push(kind);
        Ok(())
    }

    /// Registration (= update) order.
    pub fn order(&self) -> &ArrayVec<ComponentKind, MAX_COMPONENTS> {
        &self.order
    }

    /// Removes a component for updating; [`Self::restore`] puts it back.
    /// Registration order is unaffected.
    pub fn take(&mut self, kind: ComponentKind) -> Option<Component> {
        match kind {
            ComponentKind::Movement => self.movement.take().map(Component::Movement),
            ComponentKind::AiMovement => self.ai_movement.take().map(Component::AiMovement),
            ComponentKind::Combat => self.combat.take().map(Component::Combat),
            ComponentKind::MonsterCombat => self.monster_combat.take().map(Component::MonsterCombat),
            ComponentKind::Hitpoint => self.hitpoint.take().map(Component::Hitpoint),
        }
    }

    pub fn restore(&mut self, component: Component) {
        match component {
            Component::Movement(c) => self.movement = Some(c),
            Component::AiMovement(c) => self.ai_movement = Some(c),
            Component::Combat(c) => self.combat = Some(c),
            Component::MonsterCombat(c) => self.monster_combat = Some(c),
            Component::Hitpoint(c) => self.hitpoint = Some(c),
        }
    }

    pub fn movement(&self) -> Option<&Movement> {
        self.movement.as_ref()
    }

    pub fn movement_mut(&mut self) -> Option<&mut Movement> {
        self.movement.as_mut()
    }

    pub fn ai_movement(&self) -> Option<&AiMovement> {
        self.ai_movement.as_ref()
    }

    pub fn ai_movement_mut(&mut self) -> Option<&mut AiMovement> {
        self.ai_movement.as_mut()
    }

    pub fn combat(&self) -> Option<&Combat> {
        self.combat.as_ref()
    }

    pub fn combat_mut(&mut self) -> Option<&mut Combat> {
        self.combat.as_mut()
    }

    pub fn monster_combat(&self) -> Option<&MonsterCombat> {
        self.monster_combat.as_ref()
    }

    pub fn monster_combat_mut(&mut self) -> Option<&mut MonsterCombat> {
        self.monster_combat.as_mut()
    }

    pub fn hitpoint(&self) -> Option<&Hitpoint> {
        self.hitpoint.as_ref()
    }

    pub fn hitpoint_mut(&mut self) -> Option<&mut Hitpoint> {
        self.hitpoint.as_mut()
    }

    pub fn require_hitpoint(&self) -> Result<&Hitpoint, ObjectError> {
        self.hitpoint()
            .ok_or(ObjectError::MissingComponent(ComponentKind::Hitpoint))
    }

    pub fn require_ai_movement_mut(&mut self) -> Result<&mut AiMovement, ObjectError> {
        self.ai_movement
            .as_mut()
            .ok_or(ObjectError::MissingComponent(ComponentKind::AiMovement))
    }

    pub fn require_monster_combat_mut(&mut self) -> Result<&mut MonsterCombat, ObjectError> {
        self.monster_combat
            .as_mut()
            .ok_or(ObjectError::MissingComponent(ComponentKind::MonsterCombat))
    }
}

#[derive(Clone, Debug)]
pub struct GameObject {
    id: GameObjectId,
    config_id: u32,
    pub position: Vec2,
    /// Facing angle in radians, `atan2(vy, vx) + PI/2` of the last movement.
    /// Chests and triggers never read it.
    pub direction: f32,
    kind: KindState,
    pub components: ComponentSet,
}

impl GameObject {
    pub fn new(kind: KindState, config_id: u32, position: Vec2) -> Self {
        Self {
            id: GameObjectId::UNASSIGNED,
            config_id,
            position,
            direction: 0.0,
            kind,
            components: ComponentSet::default(),
        }
    }

    /// Builds an object with the component set its kind prescribes.
    /// Projectiles carry runtime-only state and are spawned by combat
    /// instead.
    pub fn from_config(
        kind: GameObjectKind,
        config_id: u32,
        configs: &ConfigTable,
    ) -> Result<Self, ObjectError> {
        match kind {
            GameObjectKind::Character => {
                let config = configs.character(config_id)?;
                let mut object = Self::new(KindState::Character, config_id, Vec2::ZERO);
                object
                    .components
                    .add(Component::Hitpoint(Hitpoint::new(config.hitpoint, PLAYER_TEAM)))?;
                object
                    .components
                    .add(Component::Combat(Combat::new(config.combat)))?;
                object
                    .components
                    .add(Component::Movement(Movement::new(config.movement)))?;
                Ok(object)
            }
            GameObjectKind::Monster => {
                let config = configs.monster(config_id)?;
                let mut object = Self::new(KindState::Monster, config_id, Vec2::ZERO);
                object
                    .components
                    .add(Component::Hitpoint(Hitpoint::new(config.hitpoint, MONSTER_TEAM)))?;
                object
                    .components
                    .add(Component::AiMovement(AiMovement::new(config.movement)))?;
                object
                    .components
                    .add(Component::MonsterCombat(MonsterCombat::new(config.combat)))?;
                Ok(object)
            }
            GameObjectKind::Npc => {
                configs.npc(config_id)?;
                let mut object =
                    Self::new(KindState::Npc(NpcState::default()), config_id, Vec2::ZERO);
                object.components.add(Component::AiMovement(AiMovement::new(
                    configs.globals.npc_patrol_movement,
                )))?;
                Ok(object)
            }
            GameObjectKind::Chest => {
                configs.chest(config_id)?;
                Ok(Self::new(
                    KindState::Chest(ChestState::default()),
                    config_id,
                    Vec2::ZERO,
                ))
            }
            GameObjectKind::Trigger => Ok(Self::new(
                KindState::Trigger(TriggerState::default()),
                config_id,
                Vec2::ZERO,
            )),
            GameObjectKind::Projectile => Err(ObjectError::TransientKind(kind)),
        }
    }

    pub fn id(&self) -> GameObjectId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: GameObjectId) {
        self.id = id;
    }

    pub fn config_id(&self) -> u32 {
        self.config_id
    }

    pub fn kind(&self) -> GameObjectKind {
        self.kind.kind()
    }

    pub fn kind_state(&self) -> &KindState {
        &self.kind
    }

    pub fn kind_state_mut(&mut self) -> &mut KindState {
        &mut self.kind
    }

    /// Combat team. Objects without a hitpoint are neutral, except
    /// projectiles, which inherit their shooter's team.
    pub fn team(&self) -> i32 {
        if let KindState::Projectile(state) = &self.kind {
            return state.team;
        }
        self.components
            .hitpoint()
            .map(Hitpoint::team)
            .unwrap_or(NEUTRAL_TEAM)
    }

    /// Objects without a hitpoint cannot die and count as alive.
    pub fn alive(&self) -> bool {
        self.components.hitpoint().map(Hitpoint::alive).unwrap_or(true)
    }

    /// Flips an NPC between mission-following and idle patrol, swapping its
    /// movement tuning accordingly.
    pub fn set_npc_mission_attachment(&mut self, attached: bool, configs: &ConfigTable) {
        let KindState::Npc(state) = &mut self.kind else {
            warn!(id = self.id.raw(), "mission attachment on a non-npc object");
            return;
        };
        state.set_attached(attached);
        if let Some(ai) = self.components.ai_movement_mut() {
            ai.set_config(if attached {
                configs.globals.npc_movement
            } else {
                configs.globals.npc_patrol_movement
            });
        }
    }

    /// Runs one tick: kind behavior first, then components in registration
    /// order.
    pub fn update(&mut self, ctx: &mut UpdateCtx<'_>) {
        let mut kind = std::mem::replace(&mut self.kind, KindState::Character);
        kind.update(self, ctx);
        self.kind = kind;

        let order = self.components.order().clone();
        for component_kind in order {
            let Some(mut component) = self.components.take(component_kind) else {
                continue;
            };
            component.update(self, ctx);
            self.components.restore(component);
        }
    }
}

/// Player-driven attack initiation. Movement input is consumed by the
/// movement component itself.
fn character_update(parent: &mut GameObject, ctx: &mut UpdateCtx<'_>) {
    let Some(direction) = ctx.input.attack_direction else {
        return;
    };
    let Some(Component::Combat(mut combat)) = parent.components.take(ComponentKind::Combat) else {
        return;
    };
    if combat.can_attack() {
        combat.prepare_attack(parent, ctx.events, direction);
    }
    parent.components.restore(Component::Combat(combat));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MovementConfig;

    #[test]
    fn duplicate_component_is_rejected() {
        let mut set = ComponentSet::default();
        set.add(Component::Movement(Movement::new(MovementConfig::default())))
            .unwrap();
        let err = set
            .add(Component::Movement(Movement::new(MovementConfig::default())))
            .unwrap_err();
        assert_eq!(err, ObjectError::DuplicateComponent(ComponentKind::Movement));
    }

    #[test]
    fn take_and_restore_keep_registration_order() {
        let mut set = ComponentSet::default();
        set.add(Component::Hitpoint(Hitpoint::new(Default::default(), PLAYER_TEAM)))
            .unwrap();
        set.add(Component::Movement(Movement::new(MovementConfig::default())))
            .unwrap();
        let taken = set.take(ComponentKind::Hitpoint).unwrap();
        assert!(set.hitpoint().is_none());
        set.restore(taken);
        assert!(set.hitpoint().is_some());
        assert_eq!(
            set.order().as_slice(),
            &[ComponentKind::Hitpoint, ComponentKind::Movement]
        );
    }

    #[test]
    fn objects_without_hitpoint_are_neutral_and_alive() {
        let object = GameObject::new(KindState::Chest(ChestState::default()), 1, Vec2::ZERO);
        assert_eq!(object.team(), NEUTRAL_TEAM);
        assert!(object.alive());
    }

    #[test]
    fn projectiles_take_their_shooter_team() {
        let state = ProjectileState {
            team: PLAYER_TEAM,
            damage: 5,
            radius: 0.5,
            velocity: Vec2::X,
            lifetime: 10,
        };
        let object = GameObject::new(KindState::Projectile(state), 1, Vec2::ZERO);
        assert_eq!(object.team(), PLAYER_TEAM);
    }

    #[test]
    fn required_component_lookup_reports_missing() {
        let set = ComponentSet::default();
        assert_eq!(
            set.require_hitpoint().unwrap_err(),
            ObjectError::MissingComponent(ComponentKind::Hitpoint)
        );
    }
}
