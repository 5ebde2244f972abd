//! Bomb/crocodile overlap detection and resolution
//!
//! Bodies are axis-aligned boxes centered on the entity position, the same
//! shape the host's arcade physics uses.

use glam::Vec2;

use super::entity::{Entity, EntityClass, EntityId};
use super::pool::EntityPool;
use super::state::{DestroyCause, GameEvent, GameState};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn of(entity: &Entity) -> Self {
        Self::from_center(entity.pos, entity.size)
    }

    /// Strict overlap; touching edges don't count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// All overlapping (bomb, crocodile) pairs, ordered by bomb id then
/// crocodile id
pub fn bomb_croc_overlaps(pool: &EntityPool) -> Vec<(EntityId, EntityId)> {
    let crocs: Vec<(EntityId, Aabb)> = pool
        .iter_active(EntityClass::Crocodile)
        .map(|c| (c.id, Aabb::of(c)))
        .collect();

    let mut pairs = Vec::new();
    for bomb in pool.iter_active(EntityClass::Bomb) {
        let bomb_box = Aabb::of(bomb);
        for (croc_id, croc_box) in &crocs {
            if bomb_box.overlaps(croc_box) {
                pairs.push((bomb.id, *croc_id));
            }
        }
    }
    pairs
}

/// Destroy a bomb and a crocodile and score the hit.
///
/// Only acts when both are still active, so a pair whose members were
/// already consumed (by another pair or by culling) is a no-op. Returns
/// whether the hit counted.
pub fn resolve_hit(
    pool: &mut EntityPool,
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    bomb: EntityId,
    croc: EntityId,
) -> bool {
    let bomb_live = is_active_as(pool, bomb, EntityClass::Bomb);
    let croc_live = is_active_as(pool, croc, EntityClass::Crocodile);
    if !bomb_live || !croc_live {
        return false;
    }

    for (id, class) in [(bomb, EntityClass::Bomb), (croc, EntityClass::Crocodile)] {
        pool.remove(id);
        events.push(GameEvent::Destroyed {
            id,
            class,
            cause: DestroyCause::Hit,
        });
    }
    log::debug!("Bomb {:?} hit croc {:?}", bomb, croc);
    state.record_hit(events);
    true
}

fn is_active_as(pool: &EntityPool, id: EntityId, class: EntityClass) -> bool {
    pool.get(id).is_some_and(|e| e.class() == class)
}
