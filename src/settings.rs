//! Player preferences
//!
//! Persisted separately from best scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::sim::AmmoMode;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Mode preselected on the start menu (last one played)
    #[serde(default)]
    pub mode: AmmoMode,
    /// Draw the dotted aim path while dragging
    pub trajectory_preview: bool,
    /// Draw the flick power meter while dragging
    pub power_meter: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: AmmoMode::Unlimited,
            trajectory_preview: true,
            power_meter: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snowball_toss_settings";

    /// Remember the mode the player just started
    pub fn remember_mode(&mut self, mode: AmmoMode) {
        if self.mode != mode {
            self.mode = mode;
            self.save();
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                log::warn!("Stored settings unreadable, using defaults");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.mode, AmmoMode::Unlimited);
        assert!(s.trajectory_preview);
        assert!(s.power_meter);
    }

    #[test]
    fn test_missing_mode_defaults_to_unlimited() {
        let s: Settings =
            serde_json::from_str(r#"{"trajectory_preview":false,"power_meter":true}"#).unwrap();
        assert_eq!(s.mode, AmmoMode::Unlimited);
        assert!(!s.trajectory_preview);
    }

    #[test]
    fn test_remember_mode() {
        let mut s = Settings::default();
        s.remember_mode(AmmoMode::Sixteen);
        assert_eq!(s.mode, AmmoMode::Sixteen);
    }
}
