//! Per-mode best score tracking
//!
//! Persisted to LocalStorage on the web build, in-memory elsewhere.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::AmmoMode;

/// Where the session records best scores
pub trait BestScoreStore {
    /// Best score recorded for `mode`, zero if none
    fn best(&self, mode: AmmoMode) -> u64;

    /// Record `score` if it beats the stored best. Returns true if it did.
    fn set_best_if_higher(&mut self, mode: AmmoMode, score: u64) -> bool;
}

/// Best score per ammo mode, keyed by mode key ("16", "32", "∞")
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BestScores {
    pub entries: BTreeMap<String, u64>,
}

impl BestScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snowball_toss_best_scores";

    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Parse stored JSON, falling back to an empty table
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<BestScores>(json) {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("Ignoring unreadable best scores: {}", e);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{\"entries\":{}}".to_string())
    }

    /// Load best scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let scores = Self::from_json(&json);
                log::info!("Loaded best scores for {} modes", scores.entries.len());
                return scores;
            }
        }

        log::info!("No best scores found, starting fresh");
        Self::new()
    }

    /// Save best scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if storage.set_item(Self::STORAGE_KEY, &self.to_json()).is_ok() {
                log::info!("Best scores saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

impl BestScoreStore for BestScores {
    fn best(&self, mode: AmmoMode) -> u64 {
        self.entries.get(mode.key()).copied().unwrap_or(0)
    }

    fn set_best_if_higher(&mut self, mode: AmmoMode, score: u64) -> bool {
        if score <= self.best(mode) {
            return false;
        }
        self.entries.insert(mode.key().to_string(), score);
        self.save();
        true
    }
}
