//! Lava Dodge - A falling-hazard browser arcade game
//!
//! Core modules:
//! - `sim`: Simulation (player physics, spawning, collisions, game session)
//! - `input`: Held-key state mapped to logical actions
//! - `platform`: Browser/native platform abstraction (clock)
//! - `persistence`: Key-value storage backends
//! - `settings` / `best_time`: Persisted preferences and record
//! - `audio`: Sound effects and music
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD text and render snapshots for the page

pub mod audio;
pub mod best_time;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use best_time::BestTime;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Reference frame rate that per-frame tuning values are expressed in
    pub const TARGET_FPS: f32 = 60.0;
    /// Longest single simulation step (seconds); longer frames are split
    pub const MAX_STEP_DT: f32 = 0.1;

    /// Horizontal world bounds
    pub const WORLD_MIN_X: f32 = -8.0;
    pub const WORLD_MAX_X: f32 = 8.0;

    /// Player sprite rests with its center at this height
    pub const GROUND_Y: f32 = 1.3;

    /// Falling entities appear at this height
    pub const SPAWN_HEIGHT: f32 = 16.0;
    /// Falling entities below this height are discarded
    pub const DESPAWN_Y: f32 = -5.0;

    /// Collision half-extents (entity center vs player center)
    pub const HIT_HALF_WIDTH: f32 = 0.7;
    pub const HIT_HALF_HEIGHT: f32 = 1.3;

    /// Bonus spin per reference frame (radians, each axis)
    pub const BONUS_SPIN: f32 = 0.05;

    /// Camera rest position
    pub const CAMERA_START: [f32; 3] = [0.0, 5.0, 10.0];
}

/// Convert a frame delta in seconds to a frame-scale factor
#[inline]
pub fn frame_scale(dt_secs: f32) -> f32 {
    dt_secs.max(0.0) * consts::TARGET_FPS
}

/// Round seconds to one decimal place (the precision shown to players)
#[inline]
pub fn round_tenths(secs: f64) -> f64 {
    (secs * 10.0).round() / 10.0
}
