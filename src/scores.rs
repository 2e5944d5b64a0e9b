//! Local leaderboard
//!
//! One score table per mode/difficulty pair, each capped to the top 10,
//! persisted as a single JSON file. Only session boundaries touch disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{Difficulty, GameMode};

/// Entries kept per mode/difficulty table
pub const MAX_ENTRIES: usize = 10;

/// One recorded session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: i64,
    /// 0.0 - 1.0; None when the session resolved no attempts
    pub accuracy: Option<f32>,
    pub avg_reaction_ms: Option<f32>,
    pub hits: u32,
    pub misses: u32,
    pub headshots: u32,
    /// Seconds since the Unix epoch
    pub timestamp: u64,
}

/// All score tables: mode → difficulty → descending top-10
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    tables: BTreeMap<String, BTreeMap<String, Vec<ScoreEntry>>>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished session. Returns the 1-indexed rank the entry
    /// landed at, or None if it fell off the bottom of a full table.
    pub fn record(
        &mut self,
        mode: GameMode,
        difficulty: Difficulty,
        entry: ScoreEntry,
    ) -> Option<usize> {
        let table = self
            .tables
            .entry(mode.as_str().to_string())
            .or_default()
            .entry(difficulty.as_str().to_string())
            .or_default();

        // Insertion point: sorted descending by score
        let pos = table
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(table.len());
        if pos >= MAX_ENTRIES {
            return None;
        }
        table.insert(pos, entry);
        table.truncate(MAX_ENTRIES);
        Some(pos + 1)
    }

    /// Entries for one mode/difficulty, best first
    pub fn entries(&self, mode: GameMode, difficulty: Difficulty) -> &[ScoreEntry] {
        self.tables
            .get(mode.as_str())
            .and_then(|t| t.get(difficulty.as_str()))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn high_score(&self, mode: GameMode, difficulty: Difficulty) -> Option<i64> {
        self.entries(mode, difficulty).first().map(|e| e.score)
    }

    /// Whether a score would make it onto the table
    pub fn qualifies(&self, mode: GameMode, difficulty: Difficulty, score: i64) -> bool {
        let entries = self.entries(mode, difficulty);
        if entries.len() < MAX_ENTRIES {
            return true;
        }
        entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Load the board from disk; any failure yields an empty board
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<ScoreBoard>(&json) {
                Ok(board) => {
                    log::info!("Loaded scores from {}", path.display());
                    board
                }
                Err(e) => {
                    log::warn!("Malformed scores file ({e}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No scores file, starting fresh");
                Self::new()
            }
        }
    }

    /// Write the board to disk, creating the parent directory if needed
    pub fn save(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    log::warn!("Failed to save scores: {e}");
                } else {
                    log::info!("Scores saved");
                }
            }
            Err(e) => log::warn!("Failed to serialize scores: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: i64) -> ScoreEntry {
        ScoreEntry {
            score,
            accuracy: Some(0.8),
            avg_reaction_ms: Some(320.0),
            hits: 24,
            misses: 6,
            headshots: 4,
            timestamp: 1_700_000_000,
        }
    }

    #[test]
    fn test_entries_sorted_descending() {
        let mut board = ScoreBoard::new();
        board.record(GameMode::Flick, Difficulty::Medium, entry(500));
        board.record(GameMode::Flick, Difficulty::Medium, entry(900));
        board.record(GameMode::Flick, Difficulty::Medium, entry(700));

        let scores: Vec<i64> = board
            .entries(GameMode::Flick, Difficulty::Medium)
            .iter()
            .map(|e| e.score)
            .collect();
        assert_eq!(scores, vec![900, 700, 500]);
        assert_eq!(board.high_score(GameMode::Flick, Difficulty::Medium), Some(900));
    }

    #[test]
    fn test_rank_reported() {
        let mut board = ScoreBoard::new();
        assert_eq!(
            board.record(GameMode::Spike, Difficulty::Hard, entry(100)),
            Some(1)
        );
        assert_eq!(
            board.record(GameMode::Spike, Difficulty::Hard, entry(300)),
            Some(1)
        );
        assert_eq!(
            board.record(GameMode::Spike, Difficulty::Hard, entry(200)),
            Some(2)
        );
    }

    #[test]
    fn test_table_capped_at_ten() {
        let mut board = ScoreBoard::new();
        for i in 0..15 {
            board.record(GameMode::Switch, Difficulty::Easy, entry(i * 10));
        }
        let entries = board.entries(GameMode::Switch, Difficulty::Easy);
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert_eq!(entries[0].score, 140);

        // A score below the floor of a full table is rejected
        assert!(!board.qualifies(GameMode::Switch, Difficulty::Easy, 10));
        assert_eq!(
            board.record(GameMode::Switch, Difficulty::Easy, entry(10)),
            None
        );
    }

    #[test]
    fn test_buckets_are_independent() {
        let mut board = ScoreBoard::new();
        board.record(GameMode::Flick, Difficulty::Easy, entry(111));
        board.record(GameMode::Flick, Difficulty::Hard, entry(222));

        assert_eq!(board.entries(GameMode::Flick, Difficulty::Easy).len(), 1);
        assert_eq!(board.high_score(GameMode::Flick, Difficulty::Hard), Some(222));
        assert_eq!(board.high_score(GameMode::Tracking, Difficulty::Easy), None);
    }

    #[test]
    fn test_json_round_trip() {
        let mut board = ScoreBoard::new();
        board.record(GameMode::Tracking, Difficulty::Extreme, entry(777));

        let json = serde_json::to_string(&board).unwrap();
        let back: ScoreBoard = serde_json::from_str(&json).unwrap();
        assert_eq!(
            back.entries(GameMode::Tracking, Difficulty::Extreme),
            board.entries(GameMode::Tracking, Difficulty::Extreme)
        );
    }
}
