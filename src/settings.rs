//! Game settings and tuning
//!
//! Every gameplay number lives here so balance can be changed from JSON
//! without touching the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};

/// Device profile (touch devices get bigger sprites and faster pieces)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Profile {
    #[default]
    Desktop,
    Mobile,
}

impl Profile {
    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Desktop => "Desktop",
            Profile::Mobile => "Mobile",
        }
    }

    /// Parse a profile name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" | "pc" => Some(Profile::Desktop),
            "mobile" | "touch" => Some(Profile::Mobile),
            _ => None,
        }
    }

    /// Fraction of the window height used for the play area
    pub fn height_fraction(&self) -> f32 {
        match self {
            Profile::Desktop => 1.0,
            Profile::Mobile => 0.5,
        }
    }
}

/// How many crocodiles one spawn trigger may place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CrocSpawnPolicy {
    /// Place at most one crocodile per trigger
    Single,
    /// Keep placing until the cap is reached or the trials run out
    #[default]
    UpToDeficit,
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Crocodiles ===
    pub croc_width: f32,
    pub croc_height: f32,
    /// Leftward speed range (units/second)
    pub croc_speed_min: f32,
    pub croc_speed_max: f32,
    /// Distance from the bottom of the screen to the crocodile center
    pub croc_bottom_offset: f32,
    pub max_crocs: usize,
    /// Minimum horizontal gap to any active crocodile at spawn time
    pub croc_min_separation: f32,
    pub croc_placement_trials: u32,
    /// Candidates are drawn from [screen_width, screen_width + window]
    pub croc_spawn_window: u32,
    pub croc_spawn_policy: CrocSpawnPolicy,

    // === Bombs ===
    /// Downward speed (units/second)
    pub bomb_speed: f32,
    /// Bombs leave the goose this far below its center
    pub bomb_drop_offset: f32,

    // === Clouds ===
    pub cloud_scale_small: f32,
    pub cloud_scale_big: f32,
    pub big_cloud_chance: f32,
    pub cloud_y_min: f32,
    pub cloud_y_max: f32,
    /// Scroll speed range (units/tick)
    pub cloud_speed_min: f32,
    pub cloud_speed_max: f32,
    pub cloud_spawn_jitter: f32,

    // === Timers ===
    pub cloud_interval_ms: u32,
    pub croc_interval_ms: u32,

    // === Session ===
    pub max_misses: u32,
    pub clear_clouds_on_restart: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_profile(Profile::Desktop)
    }
}

impl Tuning {
    /// Tuning for a device profile
    pub fn for_profile(profile: Profile) -> Self {
        let mobile = profile == Profile::Mobile;
        Self {
            croc_width: if mobile { 190.0 } else { 180.0 },
            croc_height: if mobile { 90.0 } else { 80.0 },
            croc_speed_min: if mobile { 130.0 } else { 120.0 },
            croc_speed_max: if mobile { 250.0 } else { 240.0 },
            croc_bottom_offset: 60.0,
            max_crocs: 5,
            croc_min_separation: 130.0,
            croc_placement_trials: 50,
            croc_spawn_window: 200,
            croc_spawn_policy: CrocSpawnPolicy::UpToDeficit,

            bomb_speed: if mobile { 800.0 } else { 700.0 },
            bomb_drop_offset: 40.0,

            cloud_scale_small: if mobile { 0.4 } else { 0.3 },
            cloud_scale_big: if mobile { 0.7 } else { 0.6 },
            big_cloud_chance: 0.2,
            cloud_y_min: 30.0,
            cloud_y_max: 180.0,
            cloud_speed_min: 1.0,
            cloud_speed_max: 2.5,
            cloud_spawn_jitter: 100.0,

            cloud_interval_ms: 1500,
            croc_interval_ms: 1000,

            max_misses: 3,
            clear_clouds_on_restart: false,
        }
    }
}

/// Play-area dimensions in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

/// Complete settings for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub profile: Profile,
    pub screen: Screen,
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: Profile::Desktop,
            screen: Screen::default(),
            tuning: Tuning::default(),
            seed: 0,
        }
    }
}

impl Settings {
    /// Settings for a profile on a window of the given size
    pub fn for_profile(profile: Profile, window_width: f32, window_height: f32) -> Self {
        Self {
            profile,
            screen: Screen {
                width: window_width,
                height: window_height * profile.height_fraction(),
            },
            tuning: Tuning::for_profile(profile),
            seed: 0,
        }
    }

    /// Replace the run seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read settings {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Write settings as JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
