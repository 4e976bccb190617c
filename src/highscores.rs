//! Best score across runs
//!
//! Updated once when a run ends, loaded at startup and saved at shutdown.

use serde::{Deserialize, Serialize};

use crate::persistence::BestScoreStore;

/// Highest score seen. Never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    value: u32,
}

impl BestScore {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Check if a finished run's score beats the record
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.value
    }

    /// Offer a finished run's score. Returns true if it became the new best.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        true
    }

    /// Load from the store (0 if nothing usable is stored)
    pub fn load_from(store: &impl BestScoreStore) -> Self {
        let value = store.load();
        log::info!("Best score loaded: {}", value);
        Self { value }
    }

    /// Save to the store. Failures are logged, never fatal.
    pub fn save_to(&self, store: &mut impl BestScoreStore) -> bool {
        match store.save(self.value) {
            Ok(()) => {
                log::info!("Best score saved: {}", self.value);
                true
            }
            Err(e) => {
                log::error!("Could not save best score: {}", e);
                false
            }
        }
    }
}
