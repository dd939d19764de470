//! Per-frame update
//!
//! Order within a step: player physics, spawn check, collision sweep, camera.
//! Each stage sees the results of the previous one; the input snapshot is
//! taken once per frame.

use super::collision::sweep;
use super::physics::{follow_camera, step_player};
use super::session::GameSession;
use super::state::GamePhase;
use crate::consts::MAX_STEP_DT;
use crate::frame_scale;
use crate::settings::Settings;

/// Held actions for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the session to `now_ms`
///
/// Must be called every animation frame, paused or not, so the frame clock
/// stays current. Frames longer than `MAX_STEP_DT` run as several equal steps
/// so fast entities cannot pass through the player and no time is lost.
pub fn tick(session: &mut GameSession, input: &TickInput, now_ms: f64, settings: &Settings) {
    let dt_ms = session.advance_clock(now_ms);

    // Don't tick unless playing
    if session.phase != GamePhase::Playing {
        return;
    }

    let max_step_ms = f64::from(MAX_STEP_DT) * 1000.0;
    let steps = (dt_ms / max_step_ms).ceil().max(1.0) as u32;
    let step_ms = dt_ms / f64::from(steps);
    let s = frame_scale((step_ms / 1000.0) as f32);
    let start_ms = now_ms - dt_ms;

    for i in 1..=steps {
        let step_now = if i == steps {
            now_ms
        } else {
            start_ms + step_ms * f64::from(i)
        };
        if !step(session, input, step_now, s, settings) {
            break;
        }
    }
}

/// One simulation step ending at `now_ms`. Returns false once the run is over.
fn step(
    session: &mut GameSession,
    input: &TickInput,
    now_ms: f64,
    s: f32,
    settings: &Settings,
) -> bool {
    session.boosts.prune(now_ms);
    let speed_multiplier = session.speed_multiplier();
    step_player(
        &mut session.player,
        input,
        &session.tuning,
        speed_multiplier,
        s,
    );

    session.spawn_due(now_ms);

    let result = sweep(
        &mut session.entities,
        session.player.pos,
        session.tuning.gravity,
        s,
    );

    for _ in 0..result.bonuses {
        session.collect_bonus(now_ms);
    }

    if result.hazard_hit {
        session.game_over(now_ms);
        return false;
    }

    follow_camera(
        &mut session.camera,
        session.player.pos.x,
        settings.camera_smoothness,
        s,
    );
    true
}
