//! Best-rally record
//!
//! The only persisted gameplay number: the longest rally ever played.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::platform::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best_rally: u32,
}

impl HighScore {
    /// Storage key
    const STORAGE_KEY: &'static str = "highscore";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished rally; returns true if it set a new record
    pub fn submit(&mut self, rally: u32) -> bool {
        if rally > self.best_rally {
            self.best_rally = rally;
            true
        } else {
            false
        }
    }

    /// Load the saved record, starting fresh if there is none
    pub fn load() -> Self {
        match storage::load::<Self>(Self::STORAGE_KEY) {
            Ok(Some(score)) => {
                log::info!("Loaded best rally: {}", score.best_rally);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score: {e}");
                Self::new()
            }
        }
    }

    pub fn save(&self) -> Result<(), StorageError> {
        storage::save(Self::STORAGE_KEY, self)?;
        log::info!("High score saved ({})", self.best_rally);
        Ok(())
    }
}
