//! Player movement and camera follow
//!
//! Everything here is scaled by the frame scale (elapsed time in 60 FPS
//! frames), so a frame at 30 FPS moves things exactly as far as two frames at
//! 60 FPS. Vertical motion uses the closed-form constant-acceleration step
//! rather than Euler integration to keep that true for jumps as well.

use super::state::{Camera, Player};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;

/// Advance the player by one frame
pub fn step_player(
    player: &mut Player,
    input: &TickInput,
    tuning: &Tuning,
    speed_multiplier: f32,
    frame_scale: f32,
) {
    let s = frame_scale.max(0.0);

    // Horizontal: both keys held cancel out
    let dir = input.right as i32 - input.left as i32;
    player.pos.x += dir as f32 * tuning.move_speed * speed_multiplier * s;

    if input.jump && player.grounded {
        player.vel_y = tuning.jump_force;
        player.grounded = false;
    }

    let g = tuning.player_gravity();
    player.pos.y += player.vel_y * s - 0.5 * g * s * s;
    player.vel_y -= g * s;

    if player.pos.y <= GROUND_Y {
        player.pos.y = GROUND_Y;
        player.vel_y = 0.0;
        player.grounded = true;
    }

    player.pos.x = player.pos.x.clamp(WORLD_MIN_X, WORLD_MAX_X);
}

/// Ease the camera toward the player horizontally
///
/// `smoothness` is the fraction of the remaining distance left after one
/// reference frame.
pub fn follow_camera(camera: &mut Camera, player_x: f32, smoothness: f32, frame_scale: f32) {
    let target_x = player_x / 2.0;
    let blend = 1.0 - smoothness.clamp(0.0, 1.0).powf(frame_scale.max(0.0));
    camera.pos.x += (target_x - camera.pos.x) * blend;
}
