//! Core simulation types
//!
//! Positions live in world units on the z = 0 plane; the camera sits in front
//! of it and only slides horizontally.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu shown, nothing simulated
    Idle,
    /// Active gameplay
    Playing,
    /// Game is paused (explicitly or by window blur)
    Paused,
    /// Run ended by a hazard hit
    GameOver,
}

impl GamePhase {
    /// A run has started and not yet ended
    pub fn in_progress(&self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Paused)
    }
}

/// Notable things that happened, drained by audio/UI once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    BonusCollected {
        total: u32,
    },
    GameOver {
        survived_secs: f64,
        collected: u32,
        new_record: bool,
        best_secs: f64,
    },
}

/// The player sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel_y: f32,
    pub grounded: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(0.0, GROUND_Y),
            vel_y: 0.0,
            grounded: false,
        }
    }
}

/// Falling entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallingKind {
    /// Lava: touching it ends the run
    Hazard,
    /// Cat: touching it grants a speed boost
    Bonus,
}

/// A hazard or bonus dropping from the sky
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingEntity {
    pub id: u32,
    pub kind: FallingKind,
    pub pos: Vec2,
    /// Euler angles; only bonuses spin
    pub rotation: Vec3,
}

impl FallingEntity {
    /// Create an entity at spawn height above `x`
    pub fn new<R: Rng>(id: u32, kind: FallingKind, x: f32, rng: &mut R) -> Self {
        let rotation = match kind {
            FallingKind::Bonus => {
                use std::f32::consts::TAU;
                Vec3::new(
                    rng.random::<f32>() * TAU,
                    rng.random::<f32>() * TAU,
                    rng.random::<f32>() * TAU,
                )
            }
            FallingKind::Hazard => Vec3::ZERO,
        };
        Self {
            id,
            kind,
            pos: Vec2::new(x, SPAWN_HEIGHT),
            rotation,
        }
    }

    /// Drop and (for bonuses) spin by one frame's worth
    pub fn fall(&mut self, gravity: f32, frame_scale: f32) {
        self.pos.y -= gravity * frame_scale;
        if self.kind == FallingKind::Bonus {
            self.rotation += Vec3::splat(BONUS_SPIN * frame_scale);
        }
    }

    pub fn out_of_world(&self) -> bool {
        self.pos.y < DESPAWN_Y
    }
}

/// Scene camera; follows the player horizontally
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vec3::from_array(CAMERA_START),
        }
    }
}

/// Ordered collection of falling entities (insertion order)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRegistry {
    entities: Vec<FallingEntity>,
    next_id: u32,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push(&mut self, entity: FallingEntity) {
        self.entities.push(entity);
    }

    pub fn remove(&mut self, index: usize) -> FallingEntity {
        self.entities.remove(index)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FallingEntity> {
        self.entities.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FallingEntity> {
        self.entities.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FallingEntity> {
        self.entities.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_bonus_spins_hazard_does_not() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut hazard = FallingEntity::new(1, FallingKind::Hazard, 0.0, &mut rng);
        let mut bonus = FallingEntity::new(2, FallingKind::Bonus, 0.0, &mut rng);
        let start_rot = bonus.rotation;

        hazard.fall(0.17, 2.0);
        bonus.fall(0.17, 2.0);

        assert_eq!(hazard.rotation, Vec3::ZERO);
        assert!((bonus.rotation.x - start_rot.x - 0.1).abs() < 1e-5);
        assert!((hazard.pos.y - (SPAWN_HEIGHT - 0.34)).abs() < 1e-5);
    }

    #[test]
    fn test_registry_ids() {
        let mut registry = EntityRegistry::new();
        assert_eq!(registry.next_entity_id(), 1);
        assert_eq!(registry.next_entity_id(), 2);
        assert!(registry.is_empty());
    }
}
