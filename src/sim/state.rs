//! Score, misses and the game-over state machine

use serde::{Deserialize, Serialize};

use super::entity::{EntityClass, EntityId};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    /// Miss limit reached; frozen until restart
    GameOver,
}

/// Why an entity left the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestroyCause {
    OutOfBounds,
    Hit,
    /// Swept by a restart
    Cleared,
}

/// Notifications for the host engine and UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Create a render/physics representation
    Spawned { id: EntityId, class: EntityClass },
    /// Detach the render/physics representation
    Destroyed {
        id: EntityId,
        class: EntityClass,
        cause: DestroyCause,
    },
    ScoreChanged(u32),
    MissesChanged(u32),
    GameOver { final_score: u32 },
    Restarted,
}

/// Read-only view for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u32,
    pub misses: u32,
    pub game_over: bool,
}

/// Per-session counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub misses: u32,
    pub phase: GamePhase,
    /// Ticks simulated since the last restart
    pub time_ticks: u64,
    /// Misses that end the game
    max_misses: u32,
}

impl GameState {
    /// Fresh counters; `max_misses` is clamped to at least one
    pub fn new(max_misses: u32) -> Self {
        Self {
            max_misses: max_misses.max(1),
            ..Default::default()
        }
    }

    /// True once the miss limit was reached
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Count one hit. Ignored once the game is over.
    pub fn record_hit(&mut self, events: &mut Vec<GameEvent>) {
        if self.is_over() {
            return;
        }
        self.score += 1;
        events.push(GameEvent::ScoreChanged(self.score));
    }

    /// Count one miss, ending the game when the limit is reached.
    /// Ignored once the game is over.
    pub fn record_miss(&mut self, events: &mut Vec<GameEvent>) {
        if self.is_over() {
            return;
        }
        self.misses += 1;
        events.push(GameEvent::MissesChanged(self.misses));

        if self.misses >= self.max_misses {
            self.phase = GamePhase::GameOver;
            log::info!("Game over - final score {}", self.score);
            events.push(GameEvent::GameOver {
                final_score: self.score,
            });
        }
    }

    /// Back to a fresh session
    pub fn reset(&mut self, events: &mut Vec<GameEvent>) {
        self.score = 0;
        self.misses = 0;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        events.push(GameEvent::Restarted);
        events.push(GameEvent::ScoreChanged(0));
        events.push(GameEvent::MissesChanged(0));
    }

    /// Counters for the HUD
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            misses: self.misses,
            game_over: self.is_over(),
        }
    }
}
