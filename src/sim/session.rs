//! One play-through, from start or restart until the next restart
//!
//! The host engine drives a session through `on_tick` and the two spawn
//! timer hooks, forwards player input to `press_action` (or `drop_bomb`),
//! and drains `GameEvent`s to keep its sprites and HUD in sync.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::resolve_hit;
use super::entity::{EntityClass, EntityId, EntityKind, SpawnParams};
use super::pool::EntityPool;
use super::spawn::{spawn_cloud, spawn_crocs};
use super::state::{DestroyCause, GameEvent, GameState, Snapshot};
use super::tick::tick;
use crate::consts::{BOMB_SCALE, BOMB_SPRITE_HEIGHT, BOMB_SPRITE_WIDTH, GOOSE_Y};
use crate::settings::{Screen, Settings};

/// What the play button did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Dropped(EntityId),
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) settings: Settings,
    pub(crate) pool: EntityPool,
    pub(crate) state: GameState,
    /// Pending notifications for the host (drained each frame)
    pub(crate) events: Vec<GameEvent>,
    rng: Pcg32,
    goose: Vec2,
}

impl GameSession {
    /// Start a session seeded from `settings.seed`
    pub fn new(settings: Settings) -> Self {
        log::info!(
            "Session start: {} profile, {}x{} play area, seed {}",
            settings.profile.as_str(),
            settings.screen.width,
            settings.screen.height,
            settings.seed
        );
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            goose: goose_position(&settings.screen),
            state: GameState::new(settings.tuning.max_misses),
            pool: EntityPool::new(),
            events: Vec::new(),
            settings,
        }
    }

    /// Advance the simulation one frame
    pub fn on_tick(&mut self, dt: f32) {
        tick(self, dt);
    }

    /// Cloud timer hook; clouds keep drifting in even after game over
    pub fn on_cloud_spawn_timer(&mut self) -> EntityId {
        let id = spawn_cloud(
            &mut self.pool,
            &mut self.rng,
            &self.settings.tuning,
            &self.settings.screen,
        );
        self.events.push(GameEvent::Spawned {
            id,
            class: EntityClass::Cloud,
        });
        id
    }

    /// Crocodile timer hook. No-op once the game is over.
    pub fn on_croc_spawn_timer(&mut self) -> Vec<EntityId> {
        if self.state.is_over() {
            return Vec::new();
        }
        let ids = spawn_crocs(
            &mut self.pool,
            &mut self.rng,
            &self.settings.tuning,
            &self.settings.screen,
        );
        self.events.extend(ids.iter().map(|&id| GameEvent::Spawned {
            id,
            class: EntityClass::Crocodile,
        }));
        ids
    }

    /// Launch a bomb straight down from `(x, y)`. Returns `None` once the
    /// game is over.
    pub fn drop_bomb(&mut self, x: f32, y: f32) -> Option<EntityId> {
        if self.state.is_over() {
            return None;
        }
        let speed = self.settings.tuning.bomb_speed;
        let id = self.pool.spawn(SpawnParams {
            kind: EntityKind::Bomb { speed },
            pos: Vec2::new(x, y),
            vel: Vec2::new(0.0, speed),
            size: Vec2::new(BOMB_SPRITE_WIDTH, BOMB_SPRITE_HEIGHT) * BOMB_SCALE,
        });
        self.events.push(GameEvent::Spawned {
            id,
            class: EntityClass::Bomb,
        });
        log::debug!("Bomb {:?} dropped at ({:.0}, {:.0})", id, x, y);
        Some(id)
    }

    /// Drop a bomb just below the goose
    pub fn drop_bomb_from_goose(&mut self) -> Option<EntityId> {
        let origin = self.bomb_origin();
        self.drop_bomb(origin.x, origin.y)
    }

    /// The single play button: bomb while playing, restart after game over
    pub fn press_action(&mut self) -> Action {
        match self.drop_bomb_from_goose() {
            Some(id) => Action::Dropped(id),
            None => {
                self.restart();
                Action::Restarted
            }
        }
    }

    /// Apply an overlap reported by the host's physics
    pub fn resolve_overlap(&mut self, bomb: EntityId, croc: EntityId) -> bool {
        resolve_hit(
            &mut self.pool,
            &mut self.state,
            &mut self.events,
            bomb,
            croc,
        )
    }

    /// Clear crocodiles and bombs and zero the counters
    pub fn restart(&mut self) {
        let mut classes = vec![EntityClass::Crocodile, EntityClass::Bomb];
        if self.settings.tuning.clear_clouds_on_restart {
            classes.push(EntityClass::Cloud);
        }
        for class in classes {
            for entity in self.pool.clear_class(class) {
                self.events.push(GameEvent::Destroyed {
                    id: entity.id,
                    class,
                    cause: DestroyCause::Cleared,
                });
            }
        }
        self.pool.compact();

        self.state.reset(&mut self.events);
        log::info!("Session restarted");
    }

    /// Adopt a new play-area size (window resize / orientation change)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.settings.screen = Screen { width, height };
        self.goose = goose_position(&self.settings.screen);
    }

    /// Score, misses and game-over flag for display
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Take the notifications queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Entities, for the host to sync sprites against
    pub fn pool(&self) -> &EntityPool {
        &self.pool
    }

    /// Full counters, including ticks survived
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Settings this session runs with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Goose position (center)
    pub fn goose(&self) -> Vec2 {
        self.goose
    }

    /// Where `drop_bomb_from_goose` launches from
    pub fn bomb_origin(&self) -> Vec2 {
        self.goose + Vec2::new(0.0, self.settings.tuning.bomb_drop_offset)
    }
}

fn goose_position(screen: &Screen) -> Vec2 {
    Vec2::new(screen.width / 2.0, GOOSE_Y)
}
