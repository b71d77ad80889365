//! High score leaderboard
//!
//! Fed once a game reaches `GameOver`; tracks the top 10 runs. Persisted as JSON
//! under the platform data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::settings::APP_DIR;
use crate::sim::{Difficulty, GameState};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level reached
    pub level: u32,
    pub difficulty: Difficulty,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    const FILE_NAME: &'static str = "highscores.json";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Index a score would be inserted at. Entries stay sorted by score,
    /// highest first; a tie lands after the runs already holding that score.
    fn slot_for(&self, score: u64) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        self.potential_rank(score).is_some()
    }

    /// Rank a score would achieve (1-indexed). Empty runs never rank.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        let slot = self.slot_for(score);
        (score > 0 && slot < MAX_HIGH_SCORES).then_some(slot + 1)
    }

    /// Insert a run if it ranks, returning the rank achieved
    pub fn add_score(
        &mut self,
        score: u64,
        level: u32,
        difficulty: Difficulty,
        timestamp: u64,
    ) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                level,
                difficulty,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Record a finished game
    pub fn record(&mut self, state: &GameState, timestamp: u64) -> Option<usize> {
        if !state.is_game_over() {
            log::warn!("Ignoring score of a game still in progress");
            return None;
        }
        self.add_score(state.score, state.level, state.difficulty(), timestamp)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Default leaderboard file location
    pub fn path() -> Result<PathBuf, StoreError> {
        dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR).join(Self::FILE_NAME))
            .ok_or(StoreError::NoDataDir("high scores"))
    }

    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        let json = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location, starting fresh on any problem
    pub fn load() -> Self {
        let path = match Self::path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("{}; high scores disabled", e);
                return Self::new();
            }
        };

        if !path.exists() {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        }

        match Self::load_from(&path) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) => {
                log::warn!("Failed to load high scores: {}", e);
                Self::new()
            }
        }
    }

    pub fn save(&self) {
        match Self::path().and_then(|path| self.save_to(&path)) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Failed to save high scores: {}", e),
        }
    }
}
