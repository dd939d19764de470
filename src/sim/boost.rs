//! Speed boosts from collected bonuses
//!
//! Every collection adds an independent timer; overlapping timers stack
//! linearly with no cap.

use serde::{Deserialize, Serialize};

/// Active boost expiries (ms timestamps)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Boosts {
    expiries: Vec<f64>,
}

impl Boosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new boost lasting `duration_ms`
    pub fn grant(&mut self, now_ms: f64, duration_ms: f64) {
        self.expiries.push(now_ms + duration_ms);
    }

    /// Drop boosts whose expiry has passed
    pub fn prune(&mut self, now_ms: f64) {
        self.expiries.retain(|&end| end > now_ms);
    }

    /// Push every expiry forward (pause compensation)
    pub fn shift(&mut self, offset_ms: f64) {
        for end in &mut self.expiries {
            *end += offset_ms;
        }
    }

    pub fn clear(&mut self) {
        self.expiries.clear();
    }

    pub fn active(&self) -> usize {
        self.expiries.len()
    }

    /// Speed multiplier for the current active count
    pub fn multiplier(&self, amount_per_stack: f32) -> f32 {
        1.0 + self.expiries.len() as f32 * amount_per_stack
    }
}
