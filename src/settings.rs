//! Game settings and preferences
//!
//! Persisted as JSON. Fields missing from a saved record keep their defaults,
//! so older saves stay loadable.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Fraction of the camera's distance to its target that remains after
    /// one reference frame (0 = snap, closer to 1 = lazier)
    pub camera_smoothness: f32,
    /// Background music
    pub music_enabled: bool,
    /// Sound effects
    pub sfx_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera_smoothness: 0.1,
            music_enabled: true,
            sfx_enabled: true,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "settings";

    /// Highest smoothness accepted; 1.0 would freeze the camera
    pub const MAX_CAMERA_SMOOTHNESS: f32 = 0.99;

    /// Set camera smoothness, clamping out-of-range or non-finite input
    pub fn set_camera_smoothness(&mut self, value: f32) {
        self.camera_smoothness = if value.is_finite() {
            value.clamp(0.0, Self::MAX_CAMERA_SMOOTHNESS)
        } else {
            Self::default().camera_smoothness
        };
    }

    /// Load settings, replacing anything unreadable with defaults
    pub fn load(storage: &dyn Storage) -> Self {
        if let Some(json) = storage.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    let smoothness = settings.camera_smoothness;
                    settings.set_camera_smoothness(smoothness);
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Discarding malformed settings: {e}"),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json) {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {e}"),
        }
    }
}
