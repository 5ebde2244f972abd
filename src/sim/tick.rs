//! Per-frame simulation step
//!
//! Order within one tick is fixed:
//! 1. Body integration (crocodiles and bombs move by velocity)
//! 2. Bomb/crocodile overlap resolution
//! 3. Cloud scroll and cull
//! 4. Crocodile miss check
//! 5. Bomb miss check

use super::collision::{bomb_croc_overlaps, resolve_hit};
use super::entity::{EntityClass, EntityId, EntityKind};
use super::pool::EntityPool;
use super::session::GameSession;
use super::state::{DestroyCause, GameEvent, GameState};

/// Advance the session by `dt` seconds
pub fn tick(session: &mut GameSession, dt: f32) {
    let dt = dt.max(0.0);
    if !session.state.is_over() {
        session.state.time_ticks += 1;
    }

    integrate_bodies(&mut session.pool, dt);
    resolve_overlaps(session);
    advance_clouds(&mut session.pool, &mut session.events);

    let GameSession {
        pool,
        state,
        events,
        settings,
        ..
    } = session;
    cull_crocs(pool, state, events);
    cull_bombs(pool, state, events, settings.screen.height);

    pool.compact();
}

/// Host physics stand-in: move crocodiles and bombs by their velocity
pub fn integrate_bodies(pool: &mut EntityPool, dt: f32) {
    for class in [EntityClass::Crocodile, EntityClass::Bomb] {
        pool.for_each_active(class, |e| e.pos += e.vel * dt);
    }
}

/// Resolve every bomb/crocodile overlap in id order
pub fn resolve_overlaps(session: &mut GameSession) {
    for (bomb, croc) in bomb_croc_overlaps(&session.pool) {
        resolve_hit(
            &mut session.pool,
            &mut session.state,
            &mut session.events,
            bomb,
            croc,
        );
    }
}

/// Scroll clouds left by their per-tick speed, dropping any that left the
/// screen
pub fn advance_clouds(pool: &mut EntityPool, events: &mut Vec<GameEvent>) {
    pool.for_each_active(EntityClass::Cloud, |cloud| {
        if let EntityKind::Cloud { speed, .. } = cloud.kind {
            cloud.pos.x -= speed;
        }
        if cloud.past_left_edge() {
            cloud.active = false;
            events.push(GameEvent::Destroyed {
                id: cloud.id,
                class: EntityClass::Cloud,
                cause: DestroyCause::OutOfBounds,
            });
        }
    });
}

/// Crocodiles that swam off the left edge count as misses
pub fn cull_crocs(pool: &mut EntityPool, state: &mut GameState, events: &mut Vec<GameEvent>) {
    let escaped: Vec<_> = pool
        .iter_active(EntityClass::Crocodile)
        .filter(|c| c.past_left_edge())
        .map(|c| c.id)
        .collect();

    for id in escaped {
        record_escape(pool, state, events, id, EntityClass::Crocodile);
    }
}

/// Bombs that fell into the river count as misses
pub fn cull_bombs(
    pool: &mut EntityPool,
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    screen_height: f32,
) {
    let sunk: Vec<_> = pool
        .iter_active(EntityClass::Bomb)
        .filter(|b| b.below(screen_height))
        .map(|b| b.id)
        .collect();

    for id in sunk {
        record_escape(pool, state, events, id, EntityClass::Bomb);
    }
}

fn record_escape(
    pool: &mut EntityPool,
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    id: EntityId,
    class: EntityClass,
) {
    // Already consumed by a hit this tick
    if pool.remove(id).is_none() {
        return;
    }
    events.push(GameEvent::Destroyed {
        id,
        class,
        cause: DestroyCause::OutOfBounds,
    });
    log::debug!("{:?} {:?} escaped", class, id);
    state.record_miss(events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Screen, Settings};
    use crate::sim::entity::{CloudSize, SpawnParams};
    use glam::Vec2;

    fn session() -> GameSession {
        let mut settings = Settings::default().with_seed(12345);
        settings.screen = Screen {
            width: 800.0,
            height: 600.0,
        };
        GameSession::new(settings)
    }

    fn add_croc(session: &mut GameSession, x: f32, speed: f32) -> EntityId {
        session.pool.spawn(SpawnParams {
            kind: EntityKind::Crocodile { speed },
            pos: Vec2::new(x, 540.0),
            vel: Vec2::new(-speed, 0.0),
            size: Vec2::new(180.0, 80.0),
        })
    }

    fn add_cloud(session: &mut GameSession, x: f32, speed: f32) -> EntityId {
        session.pool.spawn(SpawnParams {
            kind: EntityKind::Cloud {
                speed,
                size: CloudSize::Small,
                depth: -1,
            },
            pos: Vec2::new(x, 100.0),
            vel: Vec2::ZERO,
            size: Vec2::new(120.0, 72.0),
        })
    }

    #[test]
    fn test_cloud_scrolls_per_tick() {
        let mut s = session();
        let id = add_cloud(&mut s, 500.0, 2.0);
        // Cloud speed is per tick regardless of dt
        tick(&mut s, 0.5);
        assert_eq!(s.pool.get(id).map(|c| c.pos.x), Some(498.0));
        tick(&mut s, 0.001);
        assert_eq!(s.pool.get(id).map(|c| c.pos.x), Some(496.0));
    }

    #[test]
    fn test_cloud_culled_silently() {
        let mut s = session();
        let id = add_cloud(&mut s, -119.0, 2.0);
        tick(&mut s, 1.0 / 60.0);
        assert!(!s.pool.is_active(id));
        assert_eq!(s.snapshot().misses, 0);
        assert!(s.events.contains(&GameEvent::Destroyed {
            id,
            class: EntityClass::Cloud,
            cause: DestroyCause::OutOfBounds,
        }));
    }

    #[test]
    fn test_bomb_falls_then_misses() {
        let mut s = session();
        let id = s.drop_bomb(400.0, 590.0).unwrap();
        let speed = s.settings.tuning.bomb_speed;

        let dt = 0.01;
        let expected_y = 590.0 + speed * dt;
        tick(&mut s, dt);
        let bomb = s.pool.get(id).map(|b| b.pos.y);
        if expected_y > 600.0 {
            assert!(bomb.is_none());
        } else {
            assert_eq!(bomb, Some(expected_y));
        }

        // Keep falling until it crosses the bottom
        for _ in 0..10 {
            tick(&mut s, dt);
        }
        assert!(!s.pool.is_active(id));
        assert_eq!(s.snapshot().misses, 1);
    }

    #[test]
    fn test_bomb_partial_step_stays() {
        let mut s = session();
        s.settings.tuning.bomb_speed = 500.0;
        let id = s.drop_bomb(400.0, 590.0).unwrap();
        tick(&mut s, 0.01);
        let y = s.pool.get(id).map(|b| b.pos.y).unwrap();
        assert!((y - 595.0).abs() < 1e-3);
        assert_eq!(s.snapshot().misses, 0);

        tick(&mut s, 0.012);
        assert!(!s.pool.is_active(id));
        assert_eq!(s.snapshot().misses, 1);
    }

    #[test]
    fn test_three_croc_escapes_end_game() {
        let mut s = session();
        for x in [-150.0, 100.0, 400.0] {
            add_croc(&mut s, x, 600.0);
        }

        let mut seen_misses = Vec::new();
        for _ in 0..200 {
            tick(&mut s, 1.0 / 60.0);
            let snap = s.snapshot();
            if seen_misses.last() != Some(&snap.misses) {
                seen_misses.push(snap.misses);
                assert_eq!(snap.game_over, snap.misses >= 3);
            }
        }
        assert_eq!(seen_misses, vec![0, 1, 2, 3]);
        assert!(s.snapshot().game_over);
    }

    #[test]
    fn test_hit_and_escape_same_tick_count_once() {
        let mut s = session();
        // Croc crosses the edge this tick while a bomb overlaps it
        let croc = add_croc(&mut s, -179.5, 60.0);
        s.drop_bomb(-179.5, 540.0);

        tick(&mut s, 1.0 / 60.0);
        let snap = s.snapshot();
        assert!(!s.pool.is_active(croc));
        assert_eq!(snap.score, 1);
        assert_eq!(snap.misses, 0);
    }

    #[test]
    fn test_bomb_hits_croc() {
        let mut s = session();
        let croc = add_croc(&mut s, 400.0, 120.0);
        let bomb = s.drop_bomb(400.0, 520.0).unwrap();

        tick(&mut s, 1.0 / 60.0);
        assert!(!s.pool.is_active(croc));
        assert!(!s.pool.is_active(bomb));
        assert_eq!(s.snapshot().score, 1);
        assert_eq!(s.snapshot().misses, 0);
    }

    #[test]
    fn test_compacts_after_tick() {
        let mut s = session();
        add_cloud(&mut s, -200.0, 1.0);
        add_croc(&mut s, 400.0, 120.0);
        tick(&mut s, 1.0 / 60.0);
        assert_eq!(s.pool.len(), 1);
    }
}
