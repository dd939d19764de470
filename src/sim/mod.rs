//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Timestamps are passed in, never read
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)

pub mod boost;
pub mod collision;
pub mod physics;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use boost::Boosts;
pub use collision::{SweepResult, overlaps, sweep};
pub use physics::{follow_camera, step_player};
pub use session::GameSession;
pub use spawn::SpawnScheduler;
pub use state::{
    Camera, EntityRegistry, FallingEntity, FallingKind, GameEvent, GamePhase, Player,
};
pub use tick::{TickInput, tick};
