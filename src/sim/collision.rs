//! Collision detection between the player and falling entities
//!
//! Axis-aligned proximity with fixed half-extents. The bounds are exclusive:
//! an entity exactly `HIT_HALF_WIDTH` away does not touch.

use glam::Vec2;

use super::state::{EntityRegistry, FallingKind};
use crate::consts::{HIT_HALF_HEIGHT, HIT_HALF_WIDTH};

/// Outcome of sweeping the registry for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepResult {
    /// A hazard touched the player; the sweep stopped there
    pub hazard_hit: bool,
    /// Bonuses collected this frame
    pub bonuses: u32,
    /// Entities that fell out of the world
    pub despawned: u32,
}

/// Check whether an entity at `entity_pos` touches the player
#[inline]
pub fn overlaps(entity_pos: Vec2, player_pos: Vec2) -> bool {
    let d = (entity_pos - player_pos).abs();
    d.x < HIT_HALF_WIDTH && d.y < HIT_HALF_HEIGHT
}

/// Advance every entity and resolve contacts against the player
///
/// Visits entities newest first so removals never disturb indices still to be
/// visited. The first hazard contact ends the sweep: entities not yet visited
/// keep their previous positions.
pub fn sweep(
    registry: &mut EntityRegistry,
    player_pos: Vec2,
    gravity: f32,
    frame_scale: f32,
) -> SweepResult {
    let mut result = SweepResult::default();

    for i in (0..registry.len()).rev() {
        let Some(entity) = registry.get_mut(i) else {
            continue;
        };
        entity.fall(gravity, frame_scale);
        let kind = entity.kind;
        let touching = overlaps(entity.pos, player_pos);
        let gone = entity.out_of_world();

        match kind {
            FallingKind::Hazard if touching => {
                result.hazard_hit = true;
                break;
            }
            FallingKind::Bonus if touching => {
                registry.remove(i);
                result.bonuses += 1;
                continue;
            }
            _ => {}
        }

        if gone {
            registry.remove(i);
            result.despawned += 1;
        }
    }

    result
}
