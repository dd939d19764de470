//! Game balance values
//!
//! Per-frame quantities are expressed at the 60 FPS reference rate and scaled
//! by the frame scale at runtime.

use serde::{Deserialize, Serialize};

use crate::persistence::Storage;

/// Tunable balance values for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal speed per reference frame
    pub move_speed: f32,
    /// Initial vertical velocity of a jump
    pub jump_force: f32,
    /// Fall speed of hazards/bonuses per reference frame.
    /// The player feels a ninth of this as acceleration.
    pub gravity: f32,

    /// Chance that a spawned entity is a bonus
    pub bonus_chance: f64,
    /// How long one collected bonus keeps boosting (ms)
    pub boost_duration_ms: f64,
    /// Speed multiplier added per active boost
    pub boost_amount: f32,

    /// Spawn interval at session start (ms)
    pub spawn_interval_ms: f64,
    /// Multiplier applied to the interval after every spawn
    pub spawn_decay: f64,
    /// Floor for the spawn interval (ms)
    pub min_spawn_interval_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 0.12,
            jump_force: 0.31,
            gravity: 0.17,

            bonus_chance: 0.1,
            boost_duration_ms: 8000.0,
            boost_amount: 0.2,

            spawn_interval_ms: 1200.0,
            spawn_decay: 0.985,
            min_spawn_interval_ms: 150.0,
        }
    }
}

impl Tuning {
    /// Storage key for balance overrides
    const STORAGE_KEY: &'static str = "tuning";

    /// Player vertical acceleration per reference frame squared
    #[inline]
    pub fn player_gravity(&self) -> f32 {
        self.gravity / 9.0
    }

    /// Parse tuning overrides from JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning JSON ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Load overrides saved under the tuning key; defaults when absent
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Applying tuning overrides");
                Self::from_json(&json)
            }
            None => Self::default(),
        }
    }
}
