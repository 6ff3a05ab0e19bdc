//! Object registry and id allocation.

use std::collections::HashMap;

use tracing::warn;

use crate::config::ConfigTable;
use crate::event::{EventLog, GameEvent};
use crate::object::{GameObject, GameObjectId, GameObjectKind, ObjectError, ObjectRecord};

/// Owns every live object in a level.
///
/// Objects sit in slots that preserve insertion order, which is also update
/// order. Ids are allocated monotonically and never reused. Structural
/// changes requested mid-tick go through the deferred queues so the update
/// pass never invalidates itself; the level applies them once the pass ends.
#[derive(Debug, Default)]
pub struct GameObjectManager {
    slots: Vec<Option<GameObject>>,
    index: HashMap<GameObjectId, usize>,
    next_id: u32,
    spawn_queue: Vec<GameObject>,
    removal_queue: Vec<GameObjectId>,
}

impl GameObjectManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Registers an object. An unassigned id gets the next free one; an
    /// explicit id bumps the allocator past itself so later allocations
    /// never collide.
    pub fn add(&mut self, mut object: GameObject) -> Result<GameObjectId, ObjectError> {
        let id = if object.id() == GameObjectId::UNASSIGNED {
            let id = GameObjectId::from_raw(self.next_id);
            self.next_id += 1;
            object.set_id(id);
            id
        } else {
            let id = object.id();
            if self.index.contains_key(&id) {
                return Err(ObjectError::IdCollision(id));
            }
            self.next_id = self.next_id.max(id.raw() + 1);
            id
        };

        self.index.insert(id, self.slots.len());
        self.slots.push(Some(object));
        Ok(id)
    }

    /// Builds an object from its config and registers it.
    pub fn create_object(
        &mut self,
        kind: GameObjectKind,
        config_id: u32,
        configs: &ConfigTable,
    ) -> Result<GameObjectId, ObjectError> {
        let object = GameObject::from_config(kind, config_id, configs)?;
        self.add(object)
    }

    /// Unregisters an object and returns it.
    pub fn remove(&mut self, id: GameObjectId) -> Result<GameObject, ObjectError> {
        let slot = self.index.remove(&id).ok_or(ObjectError::NotRegistered(id))?;
        self.slots[slot].take().ok_or(ObjectError::NotRegistered(id))
    }

    pub fn contains(&self, id: GameObjectId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: GameObjectId) -> Option<&GameObject> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_ref()
    }

    pub fn get_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_mut()
    }

    /// Live objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut GameObject> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// The player: first character in insertion order.
    pub fn player(&self) -> Option<&GameObject> {
        self.iter()
            .find(|object| object.kind() == GameObjectKind::Character)
    }

    /// Queues an object to be registered when the update pass ends.
    pub fn defer_spawn(&mut self, object: GameObject) {
        self.spawn_queue.push(object);
    }

    /// Queues a removal for when the update pass ends.
    pub fn defer_remove(&mut self, id: GameObjectId) {
        self.removal_queue.push(id);
    }

    /// Applies the queued removals and spawns, emitting the matching events.
    pub fn apply_deferred(&mut self, events: &mut EventLog) {
        for id in std::mem::take(&mut self.removal_queue) {
            match self.remove(id) {
                Ok(object) => events.emit(GameEvent::Removed {
                    id,
                    kind: object.kind(),
                }),
                Err(_) => warn!(id = id.raw(), "deferred removal of an unregistered object"),
            }
        }

        for object in std::mem::take(&mut self.spawn_queue) {
            let kind = object.kind();
            match self.add(object) {
                Ok(id) => events.emit(GameEvent::Spawned { id, kind }),
                Err(error) => warn!(%error, "deferred spawn failed"),
            }
        }

        self.compact();
    }

    /// Reclaims slots vacated by removals once they outnumber the live
    /// objects. Safe here because no update pass is in flight.
    fn compact(&mut self) {
        if self.slots.len() < 32 || self.index.len() * 2 > self.slots.len() {
            return;
        }
        self.slots.retain(Option::is_some);
        self.index = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(slot, object)| object.as_ref().map(|o| (o.id(), slot)))
            .collect();
    }

    // Slot-level access for the level's take-out/put-back update loop.

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn take_slot(&mut self, slot: usize) -> Option<GameObject> {
        self.slots.get_mut(slot)?.take()
    }

    pub(crate) fn restore_slot(&mut self, slot: usize, object: GameObject) {
        self.slots[slot] = Some(object);
    }

    /// Snapshots every persistent object. Projectiles are transient and
    /// skipped.
    pub fn save(&self) -> Vec<ObjectRecord> {
        self.iter().filter_map(ObjectRecord::from_object).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::KindState;
    use glam::Vec2;

    fn object() -> GameObject {
        GameObject::new(KindState::Character, 1, Vec2::ZERO)
    }

    fn object_with_id(id: u32) -> GameObject {
        let mut object = object();
        object.set_id(GameObjectId::from_raw(id));
        object
    }

    #[test]
    fn unassigned_ids_are_allocated_monotonically() {
        let mut manager = GameObjectManager::new();
        let a = manager.add(object()).unwrap();
        let b = manager.add(object()).unwrap();
        assert_eq!(a.raw() + 1, b.raw());
    }

    #[test]
    fn explicit_id_bumps_the_allocator() {
        let mut manager = GameObjectManager::new();
        manager.add(object_with_id(10)).unwrap();
        let next = manager.add(object()).unwrap();
        assert_eq!(next.raw(), 11);
    }

    #[test]
    fn id_collision_is_an_error() {
        let mut manager = GameObjectManager::new();
        manager.add(object_with_id(3)).unwrap();
        assert_eq!(
            manager.add(object_with_id(3)).unwrap_err(),
            ObjectError::IdCollision(GameObjectId::from_raw(3))
        );
    }

    #[test]
    fn removing_unregistered_object_is_an_error() {
        let mut manager = GameObjectManager::new();
        assert_eq!(
            manager.remove(GameObjectId::from_raw(5)).unwrap_err(),
            ObjectError::NotRegistered(GameObjectId::from_raw(5))
        );
    }

    #[test]
    fn ids_are_never_reused_after_removal() {
        let mut manager = GameObjectManager::new();
        let a = manager.add(object()).unwrap();
        manager.remove(a).unwrap();
        let b = manager.add(object()).unwrap();
        assert!(b.raw() > a.raw());
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut manager = GameObjectManager::new();
        let ids: Vec<_> = (0..4).map(|_| manager.add(object()).unwrap()).collect();
        manager.remove(ids[1]).unwrap();
        let seen: Vec<_> = manager.iter().map(GameObject::id).collect();
        assert_eq!(seen, vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn deferred_changes_apply_with_events() {
        let mut manager = GameObjectManager::new();
        let id = manager.add(object()).unwrap();
        manager.defer_remove(id);
        manager.defer_spawn(object());
        let mut events = EventLog::new();
        manager.apply_deferred(&mut events);

        assert!(!manager.contains(id));
        assert_eq!(manager.len(), 1);
        let drained = events.drain();
        assert!(matches!(drained[0], GameEvent::Removed { .. }));
        assert!(matches!(drained[1], GameEvent::Spawned { .. }));
    }
}
