//! Active entity bookkeeping
//!
//! Entities are kept sorted by id so iteration order is stable. Removal only
//! clears the `active` flag; dead slots are dropped by `compact`.

use serde::Serialize;

use super::entity::{Entity, EntityClass, EntityId, SpawnParams};

/// Entities owned by one session
///
/// Serialize-only: lookups rely on the id ordering that `spawn` maintains,
/// which deserialized data could not guarantee.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntityPool {
    entities: Vec<Entity>,
    next_id: u64,
}

impl EntityPool {
    /// Empty pool; the first handle is 1
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Add an entity and return its handle
    pub fn spawn(&mut self, params: SpawnParams) -> EntityId {
        // Default-constructed pools start at zero; ids begin at 1 either way
        let id = EntityId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.entities.push(Entity {
            id,
            kind: params.kind,
            pos: params.pos,
            vel: params.vel,
            size: params.size,
            active: true,
        });
        id
    }

    /// Active entity by handle
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id)
            .map(|i| &self.entities[i])
            .filter(|e| e.active)
    }

    /// Active entity by handle, mutable
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        match self.index_of(id) {
            Some(i) if self.entities[i].active => Some(&mut self.entities[i]),
            _ => None,
        }
    }

    /// True while the handle refers to a live entity
    pub fn is_active(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Deactivate an entity. Returns the removed entity, or `None` if it was
    /// already gone.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.get_mut(id)?;
        entity.active = false;
        Some(entity.clone())
    }

    /// Number of live entities of a class
    pub fn count_active(&self, class: EntityClass) -> usize {
        self.iter_active(class).count()
    }

    /// Live entities of a class, in id order
    pub fn iter_active(&self, class: EntityClass) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |e| e.active && e.class() == class)
    }

    /// Visit every active entity of a class. Entities removed by an earlier
    /// visit in the same pass are skipped.
    pub fn for_each_active<F>(&mut self, class: EntityClass, mut f: F)
    where
        F: FnMut(&mut Entity),
    {
        for entity in self.entities.iter_mut() {
            if entity.active && entity.class() == class {
                f(entity);
            }
        }
    }

    /// Deactivate every entity of a class, returning what was removed
    pub fn clear_class(&mut self, class: EntityClass) -> Vec<Entity> {
        let mut removed = Vec::new();
        self.for_each_active(class, |e| {
            e.active = false;
            removed.push(e.clone());
        });
        removed
    }

    /// Drop inactive slots
    pub fn compact(&mut self) {
        self.entities.retain(|e| e.active);
    }

    /// Number of slots, including inactive ones not yet compacted
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when no slots remain
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;
    use glam::Vec2;

    fn croc(x: f32) -> SpawnParams {
        SpawnParams {
            kind: EntityKind::Crocodile { speed: 150.0 },
            pos: Vec2::new(x, 660.0),
            vel: Vec2::new(-150.0, 0.0),
            size: Vec2::new(180.0, 80.0),
        }
    }

    fn bomb() -> SpawnParams {
        SpawnParams {
            kind: EntityKind::Bomb { speed: 700.0 },
            pos: Vec2::new(640.0, 180.0),
            vel: Vec2::new(0.0, 700.0),
            size: Vec2::new(24.0, 32.0),
        }
    }

    #[test]
    fn test_spawn_assigns_increasing_ids() {
        let mut pool = EntityPool::new();
        let a = pool.spawn(croc(800.0));
        let b = pool.spawn(bomb());
        assert!(b > a);
        assert_eq!(pool.count_active(EntityClass::Crocodile), 1);
        assert_eq!(pool.count_active(EntityClass::Bomb), 1);
        assert_eq!(pool.count_active(EntityClass::Cloud), 0);
    }

    #[test]
    fn test_default_pool_ids_start_at_one() {
        let mut pool = EntityPool::default();
        assert_eq!(pool.spawn(bomb()), EntityId(1));
        assert_eq!(pool.spawn(bomb()), EntityId(2));
    }

    #[test]
    fn test_ids_keep_increasing_past_u32() {
        let mut pool = EntityPool::new();
        let early = pool.spawn(croc(800.0));
        pool.next_id = u64::from(u32::MAX);
        let a = pool.spawn(croc(950.0));
        let b = pool.spawn(bomb());
        assert_eq!(a, EntityId(u64::from(u32::MAX)));
        assert!(early < a && a < b);
        assert_eq!(pool.get(early).map(|e| e.pos.x), Some(800.0));
        assert_eq!(pool.get(a).map(|e| e.pos.x), Some(950.0));
        assert!(pool.is_active(b));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut pool = EntityPool::new();
        let id = pool.spawn(croc(800.0));
        assert!(pool.remove(id).is_some());
        assert!(pool.remove(id).is_none());
        assert!(!pool.is_active(id));
        assert_eq!(pool.count_active(EntityClass::Crocodile), 0);

        pool.compact();
        assert!(pool.remove(id).is_none());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_for_each_active_skips_removed() {
        let mut pool = EntityPool::new();
        let a = pool.spawn(croc(800.0));
        let b = pool.spawn(croc(950.0));
        pool.remove(a);

        let mut seen = Vec::new();
        pool.for_each_active(EntityClass::Crocodile, |e| seen.push(e.id));
        assert_eq!(seen, vec![b]);
    }

    #[test]
    fn test_clear_class_leaves_other_classes() {
        let mut pool = EntityPool::new();
        pool.spawn(croc(800.0));
        pool.spawn(croc(950.0));
        let bomb_id = pool.spawn(bomb());

        let removed = pool.clear_class(EntityClass::Crocodile);
        assert_eq!(removed.len(), 2);
        assert_eq!(pool.count_active(EntityClass::Crocodile), 0);
        assert!(pool.is_active(bomb_id));
    }

    #[test]
    fn test_lookup_after_compact() {
        let mut pool = EntityPool::new();
        let a = pool.spawn(croc(800.0));
        let b = pool.spawn(croc(950.0));
        let c = pool.spawn(croc(1100.0));
        pool.remove(b);
        pool.compact();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(a).map(|e| e.pos.x), Some(800.0));
        assert_eq!(pool.get(c).map(|e| e.pos.x), Some(1100.0));
    }
}
