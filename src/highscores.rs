//! High score record
//!
//! A single best score, persisted through a `KvStore` under `highScore`.

use serde::{Deserialize, Serialize};

use crate::consts::{HIGH_SCORE_KEY, HIGH_SCORE_TTL_DAYS};
use crate::persistence::KvStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Load the stored high score (0 if absent or unreadable)
    pub fn load(store: &dyn KvStore) -> Self {
        let best = store.get_or_zero(HIGH_SCORE_KEY).min(u32::MAX as u64) as u32;
        log::info!("Loaded high score: {}", best);
        Self { best }
    }

    /// Check if a score beats the record
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished run's score. Returns true on a new record.
    ///
    /// The in-memory record updates even if persisting fails.
    pub fn submit(&mut self, score: u32, store: &mut dyn KvStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match store.set(HIGH_SCORE_KEY, score as u64, HIGH_SCORE_TTL_DAYS) {
            Ok(()) => log::info!("New high score saved: {}", score),
            Err(e) => log::warn!("New high score {} not saved: {}", score, e),
        }
        true
    }
}
