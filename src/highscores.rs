//! High score leaderboard
//!
//! Keeps the best finished sessions, highest score first.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Crocodiles bombed
    pub score: u32,
    /// How long the session lasted (simulation ticks)
    pub ticks: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero never qualifies; otherwise the board must have room or the score
    /// must beat the last entry
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.len() < MAX_HIGH_SCORES
            || self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Rank a score would achieve (1-indexed)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a finished session. Ties rank below earlier entries.
    pub fn add_score(&mut self, score: u32, ticks: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(rank - 1, HighScoreEntry { score, ticks });
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("High score {} recorded at rank {}", score, rank);
        Some(rank)
    }

    /// True before any session qualified
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score so far
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Parse a leaderboard from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the leaderboard to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load from disk, starting fresh if the file is missing or corrupt
    pub fn load(path: &Path) -> Self {
        let Ok(json) = std::fs::read_to_string(path) else {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        };
        match Self::from_json(&json) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Discarding corrupt high scores {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Write the leaderboard to disk
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
