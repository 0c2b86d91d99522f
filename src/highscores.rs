//! High score leaderboard system
//!
//! Only a run that beats the session best is recorded. The list stays sorted
//! by score (descending), is capped at a fixed capacity and is written back to
//! storage after every change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Pipes passed
    pub score: u32,
    /// When it was achieved (ISO-8601 in storage)
    pub date: DateTime<Utc>,
}

/// Bounded best-score list
#[derive(Debug, Clone)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    capacity: usize,
    best: u32,
}

impl Leaderboard {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappy_leaderboard";

    /// Create empty leaderboard holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
            best: 0,
        }
    }

    /// Load the leaderboard; missing or malformed data yields an empty list
    pub fn load(storage: &dyn Storage, capacity: usize) -> Self {
        let mut board = Self::new(capacity);

        let json = match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                return board;
            }
            Err(e) => {
                log::warn!("Could not read high scores: {e}");
                return board;
            }
        };

        match serde_json::from_str::<Vec<LeaderboardEntry>>(&json) {
            Ok(entries) => {
                board.entries = entries;
                board.normalize();
                board.best = board.top_score().unwrap_or(0);
                log::info!("Loaded {} high scores", board.entries.len());
            }
            Err(e) => log::warn!("Discarding malformed high scores: {e}"),
        }
        board
    }

    /// Save high scores to storage (best-effort, never fails the caller)
    pub fn save(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => match storage.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
                Err(e) => log::warn!("Could not save high scores: {e}"),
            },
            Err(e) => log::warn!("Could not serialize high scores: {e}"),
        }
    }

    /// Record `score` if it beats the best so far, then persist
    ///
    /// Returns true when a new best was recorded.
    pub fn record_if_best(
        &mut self,
        score: u32,
        now: DateTime<Utc>,
        storage: &mut dyn Storage,
    ) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.entries.push(LeaderboardEntry { score, date: now });
        self.normalize();
        self.save(storage);
        true
    }

    /// Current entries, best first
    pub fn query(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Best score seen this session (including loaded entries)
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Sort descending by score (stable: earlier entries win ties) and cap
    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
    }
}
