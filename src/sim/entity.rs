//! Entity types for clouds, crocodiles and bombs

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable handle to a pooled entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Entity kind without payload, used for queries and events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityClass {
    Cloud,
    Crocodile,
    Bomb,
}

/// Cloud size variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudSize {
    Small,
    Big,
}

/// Kind-specific entity data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Background cloud, scrolled by hand rather than by physics
    Cloud {
        /// Leftward scroll (units/tick)
        speed: f32,
        size: CloudSize,
        /// Render layer (negative = behind the river)
        depth: i8,
    },
    /// Leftward speed magnitude (units/second)
    Crocodile { speed: f32 },
    /// Downward speed (units/second)
    Bomb { speed: f32 },
}

impl EntityKind {
    /// Kind without payload
    pub fn class(&self) -> EntityClass {
        match self {
            EntityKind::Cloud { .. } => EntityClass::Cloud,
            EntityKind::Crocodile { .. } => EntityClass::Crocodile,
            EntityKind::Bomb { .. } => EntityClass::Bomb,
        }
    }
}

/// A pooled entity
///
/// `pos` is the center of the body; `size` is its display size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub active: bool,
}

impl Entity {
    /// Kind without payload
    pub fn class(&self) -> EntityClass {
        self.kind.class()
    }

    /// True once the body has scrolled past the left edge.
    ///
    /// Measured as `x + width < 0`, which leaves the sprite a little slack
    /// beyond the visible edge.
    pub fn past_left_edge(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }

    /// True once the body has dropped below the bottom of the screen
    pub fn below(&self, screen_height: f32) -> bool {
        self.pos.y > screen_height
    }
}

/// Initial state for a new entity; the pool assigns the id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}
