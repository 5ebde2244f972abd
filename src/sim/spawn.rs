//! Spawn scheduling for clouds and crocodiles
//!
//! These run from the host's looped timers. Crocodiles are placed with a
//! rejection-sampling heuristic so new arrivals don't stack on top of each
//! other off the right edge.

use glam::Vec2;
use rand::Rng;

use super::entity::{CloudSize, EntityClass, EntityId, EntityKind, SpawnParams};
use super::pool::EntityPool;
use crate::consts::{CLOUD_DEPTH, CLOUD_SPRITE_HEIGHT, CLOUD_SPRITE_WIDTH};
use crate::settings::{CrocSpawnPolicy, Screen, Tuning};

/// Uniform draw that tolerates a reversed or empty range
fn uniform<R: Rng>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    rng.random_range(lo..=hi)
}

/// Build a cloud just past the right edge
pub fn roll_cloud<R: Rng>(rng: &mut R, tuning: &Tuning, screen: &Screen) -> SpawnParams {
    let y = uniform(rng, tuning.cloud_y_min, tuning.cloud_y_max);
    let (size, scale) = if rng.random::<f32>() < tuning.big_cloud_chance {
        (CloudSize::Big, tuning.cloud_scale_big)
    } else {
        (CloudSize::Small, tuning.cloud_scale_small)
    };
    let x = screen.width + uniform(rng, 0.0, tuning.cloud_spawn_jitter);
    let speed = uniform(rng, tuning.cloud_speed_min, tuning.cloud_speed_max);

    SpawnParams {
        kind: EntityKind::Cloud {
            speed,
            size,
            depth: CLOUD_DEPTH,
        },
        pos: Vec2::new(x, y),
        // Clouds are scrolled per tick, not integrated
        vel: Vec2::ZERO,
        size: Vec2::new(CLOUD_SPRITE_WIDTH, CLOUD_SPRITE_HEIGHT) * scale,
    }
}

/// Spawn one cloud
pub fn spawn_cloud<R: Rng>(
    pool: &mut EntityPool,
    rng: &mut R,
    tuning: &Tuning,
    screen: &Screen,
) -> EntityId {
    let params = roll_cloud(rng, tuning, screen);
    let id = pool.spawn(params);
    log::debug!("Cloud {:?} spawned at ({:.0}, {:.0})", id, params.pos.x, params.pos.y);
    id
}

/// True if no active crocodile sits within `min_separation` of `x`
pub fn croc_x_is_clear(pool: &EntityPool, x: f32, min_separation: f32) -> bool {
    !pool
        .iter_active(EntityClass::Crocodile)
        .any(|c| (c.pos.x - x).abs() < min_separation)
}

/// Crocodile body at `x` with a rolled speed
pub fn croc_params<R: Rng>(rng: &mut R, tuning: &Tuning, screen: &Screen, x: f32) -> SpawnParams {
    let speed = uniform(rng, tuning.croc_speed_min, tuning.croc_speed_max).round();
    SpawnParams {
        kind: EntityKind::Crocodile { speed },
        pos: Vec2::new(x, screen.height - tuning.croc_bottom_offset),
        vel: Vec2::new(-speed, 0.0),
        size: Vec2::new(tuning.croc_width, tuning.croc_height),
    }
}

/// Fill free crocodile slots.
///
/// Draws up to `croc_placement_trials` candidate positions in
/// `[screen.width, screen.width + croc_spawn_window]` and accepts any that
/// keep clear of every active crocodile, including ones placed earlier in
/// this call. Returns the handles spawned (possibly none).
pub fn spawn_crocs<R: Rng>(
    pool: &mut EntityPool,
    rng: &mut R,
    tuning: &Tuning,
    screen: &Screen,
) -> Vec<EntityId> {
    let active = pool.count_active(EntityClass::Crocodile);
    let to_spawn = tuning.max_crocs.saturating_sub(active);
    let to_spawn = match tuning.croc_spawn_policy {
        CrocSpawnPolicy::Single => to_spawn.min(1),
        CrocSpawnPolicy::UpToDeficit => to_spawn,
    };

    let mut spawned = Vec::new();
    if to_spawn == 0 {
        return spawned;
    }

    for trial in 0..tuning.croc_placement_trials {
        if spawned.len() >= to_spawn {
            break;
        }

        let x = screen.width + rng.random_range(0..=tuning.croc_spawn_window) as f32;
        if !croc_x_is_clear(pool, x, tuning.croc_min_separation) {
            log::trace!("Croc trial {} at x={} rejected", trial, x);
            continue;
        }

        let params = croc_params(rng, tuning, screen, x);
        let id = pool.spawn(params);
        log::debug!("Croc {:?} spawned at x={} moving at {}", id, x, -params.vel.x);
        spawned.push(id);
    }

    spawned
}
