//! Bombombini - a goose bombs crocodiles drifting down the river
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity pool, spawning, culling, scoring)
//! - `settings`: Per-device tuning, loaded from JSON
//! - `runner`: Fixed-step frame driver with spawn timers and autoplay
//! - `highscores`: Leaderboard of finished sessions

pub mod highscores;
pub mod runner;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use runner::Runner;
pub use settings::{CrocSpawnPolicy, Profile, Settings, Tuning};
pub use sim::{GameSession, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (matches the host's 60 Hz refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default play area (logical pixels)
    pub const DEFAULT_SCREEN_WIDTH: f32 = 1280.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 720.0;

    /// Goose hovers at this height, centered horizontally
    pub const GOOSE_Y: f32 = 140.0;

    /// Unscaled sprite dimensions; display size = sprite size * scale
    pub const CLOUD_SPRITE_WIDTH: f32 = 400.0;
    pub const CLOUD_SPRITE_HEIGHT: f32 = 240.0;
    pub const BOMB_SPRITE_WIDTH: f32 = 300.0;
    pub const BOMB_SPRITE_HEIGHT: f32 = 400.0;
    pub const BOMB_SCALE: f32 = 0.08;

    /// Clouds render behind everything else
    pub const CLOUD_DEPTH: i8 = -1;
}
