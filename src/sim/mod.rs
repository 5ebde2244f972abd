//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod pool;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Aabb, bomb_croc_overlaps, resolve_hit};
pub use entity::{CloudSize, Entity, EntityClass, EntityId, EntityKind, SpawnParams};
pub use pool::EntityPool;
pub use session::{Action, GameSession};
pub use spawn::{croc_x_is_clear, spawn_cloud, spawn_crocs};
pub use state::{DestroyCause, GameEvent, GamePhase, GameState, Snapshot};
pub use tick::tick;
pub use timer::IntervalTimer;
