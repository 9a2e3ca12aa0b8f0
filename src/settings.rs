//! Game settings and preferences
//!
//! Persisted in LocalStorage. Only preferences live here, never game progress.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all cues
    pub muted: bool,

    // === Presentation ===
    /// Show the game-over message as a blocking alert instead of an overlay
    pub blocking_game_over_alert: bool,

    // === Debug ===
    /// Fixed RNG seed for reproducible runs (clock-seeded when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
            blocking_game_over_alert: true,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "alien_dodge_settings";

    /// Parse settings JSON, falling back to defaults when malformed
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Flip the mute flag. Returns the new value.
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Seed for this run: the configured one, or `fallback`
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
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

    /// Native: read JSON from the `ALIEN_DODGE_SETTINGS` environment variable
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var("ALIEN_DODGE_SETTINGS") {
            Ok(json) => Self::from_json(&json),
            Err(_) => {
                log::debug!("No {} override, using defaults", Self::STORAGE_KEY);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"muted": true, "seed": 7}"#);
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.master_volume, 1.0);
        assert!(settings.blocking_game_over_alert);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_seed_or() {
        let mut settings = Settings::default();
        assert_eq!(settings.seed_or(123), 123);
        settings.seed = Some(5);
        assert_eq!(settings.seed_or(123), 5);
    }

    #[test]
    fn test_toggle_muted_survives_reload() {
        let mut settings = Settings::default();
        assert!(settings.toggle_muted());
        let json = serde_json::to_string(&settings).unwrap();
        assert!(Settings::from_json(&json).muted);

        assert!(!settings.toggle_muted());
        assert!(!settings.muted);
    }

    #[test]
    fn test_roundtrip() {
        let settings = Settings {
            master_volume: 0.3,
            blocking_game_over_alert: false,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }
}
