//! Persistent player records: best score and lifetime stats
//!
//! Loaded once at startup and written back whenever they change. Stored data
//! that cannot be read falls back to defaults instead of failing.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Storage};
use crate::score::HighScoreSink;

/// Lifetime statistics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameStats {
    pub games_played: u32,
    pub perfect_jumps: u32,
    /// Longest stick ever stretched, in pixels
    pub longest_stick: f32,
}

/// High score plus stats, with a dirty flag for write-back
#[derive(Debug, Clone, Default)]
pub struct Records {
    high_score: u64,
    stats: GameStats,
    dirty: bool,
}

impl Records {
    /// Storage key of the high score (plain integer string)
    pub const HIGH_SCORE_KEY: &'static str = "stickHeroHighScore";
    /// Storage key of the stats (JSON object)
    pub const STATS_KEY: &'static str = "stickHeroStats";

    pub fn new(high_score: u64, stats: GameStats) -> Self {
        Self {
            high_score,
            stats,
            dirty: false,
        }
    }

    /// Read both records, defaulting whatever is missing or malformed
    pub fn load(storage: &dyn Storage) -> Self {
        let high_score = match storage.get_item(Self::HIGH_SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|err| {
                log::warn!("Ignoring stored high score {raw:?}: {err}");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                log::warn!("Could not read high score: {err}");
                0
            }
        };
        let stats = persistence::load_json(storage, Self::STATS_KEY).unwrap_or_default();

        log::info!("Loaded records: high score {high_score}, {stats:?}");
        Self::new(high_score, stats)
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Raise the high score if `score` beats it; returns true on a new record
    pub fn update_high_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            self.dirty = true;
            true
        } else {
            false
        }
    }

    pub fn increment_games_played(&mut self) {
        self.stats.games_played += 1;
        self.dirty = true;
    }

    pub fn increment_perfect_jumps(&mut self) {
        self.stats.perfect_jumps += 1;
        self.dirty = true;
    }

    pub fn update_longest_stick(&mut self, length: f32) {
        if length > self.stats.longest_stick {
            self.stats.longest_stick = length;
            self.dirty = true;
        }
    }

    /// Write both records back if anything changed since the last write
    pub fn persist_if_dirty(&mut self, storage: &mut dyn Storage) {
        if !self.dirty {
            return;
        }
        if let Err(err) = storage.set_item(Self::HIGH_SCORE_KEY, &self.high_score.to_string()) {
            log::warn!("Failed to save high score: {err}");
        }
        persistence::save_json(storage, Self::STATS_KEY, &self.stats);
        self.dirty = false;
        log::debug!("Records saved");
    }
}

impl HighScoreSink for Records {
    fn report_total(&mut self, total: i64) {
        self.update_high_score(total.max(0) as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use proptest::prelude::*;

    #[test]
    fn test_load_defaults_when_empty() {
        let records = Records::load(&MemoryStorage::new());
        assert_eq!(records.high_score(), 0);
        assert_eq!(*records.stats(), GameStats::default());
        assert!(!records.is_dirty());
    }

    #[test]
    fn test_load_reads_both_keys() {
        let mut storage = MemoryStorage::new();
        storage.set_item(Records::HIGH_SCORE_KEY, "42").unwrap();
        storage
            .set_item(
                Records::STATS_KEY,
                r#"{"gamesPlayed":3,"perfectJumps":7,"longestStick":180.5}"#,
            )
            .unwrap();
        let records = Records::load(&storage);
        assert_eq!(records.high_score(), 42);
        assert_eq!(
            *records.stats(),
            GameStats { games_played: 3, perfect_jumps: 7, longest_stick: 180.5 }
        );
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let mut storage = MemoryStorage::new();
        storage.set_item(Records::HIGH_SCORE_KEY, "lots").unwrap();
        storage.set_item(Records::STATS_KEY, "[1, 2").unwrap();
        let records = Records::load(&storage);
        assert_eq!(records.high_score(), 0);
        assert_eq!(*records.stats(), GameStats::default());
    }

    #[test]
    fn test_partial_stats_fill_defaults() {
        let mut storage = MemoryStorage::new();
        storage.set_item(Records::STATS_KEY, r#"{"gamesPlayed":9}"#).unwrap();
        let records = Records::load(&storage);
        assert_eq!(records.stats().games_played, 9);
        assert_eq!(records.stats().perfect_jumps, 0);
    }

    #[test]
    fn test_high_score_only_rises() {
        let mut records = Records::default();
        assert!(records.update_high_score(5));
        assert!(!records.update_high_score(3));
        assert!(!records.update_high_score(5));
        assert_eq!(records.high_score(), 5);
    }

    #[test]
    fn test_persist_writes_once_per_change() {
        let mut storage = MemoryStorage::new();
        let mut records = Records::default();
        records.persist_if_dirty(&mut storage);
        assert!(storage.is_empty());

        records.report_total(12);
        records.increment_games_played();
        records.increment_perfect_jumps();
        records.persist_if_dirty(&mut storage);
        assert!(!records.is_dirty());
        assert_eq!(
            storage.get_item(Records::HIGH_SCORE_KEY).unwrap().as_deref(),
            Some("12")
        );

        let reloaded = Records::load(&storage);
        assert_eq!(reloaded.high_score(), 12);
        assert_eq!(reloaded.stats().games_played, 1);
        assert_eq!(reloaded.stats().perfect_jumps, 1);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let json = serde_json::to_string(&GameStats::default()).unwrap();
        assert!(json.contains("gamesPlayed"));
        assert!(json.contains("perfectJumps"));
        assert!(json.contains("longestStick"));
    }

    proptest! {
        #[test]
        fn prop_longest_stick_is_monotone(lengths in prop::collection::vec(0.0f32..2000.0, 1..50)) {
            let mut records = Records::default();
            let mut previous = 0.0;
            for length in &lengths {
                records.update_longest_stick(*length);
                let current = records.stats().longest_stick;
                prop_assert!(current >= previous);
                previous = current;
            }
            let max = lengths.iter().copied().fold(0.0, f32::max);
            prop_assert_eq!(records.stats().longest_stick, max);
        }
    }
}
