//! Spawn scheduling
//!
//! One entity per elapsed interval; the interval shrinks geometrically after
//! every spawn until it hits the floor.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{EntityRegistry, FallingEntity, FallingKind};
use crate::consts::{WORLD_MAX_X, WORLD_MIN_X};
use crate::tuning::Tuning;

/// Spawn timer and current (decaying) interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Current gap between spawns (ms)
    pub interval_ms: f64,
    /// Timestamp of the last spawn (ms)
    pub last_spawn_ms: f64,
    decay: f64,
    min_interval_ms: f64,
    bonus_chance: f64,
}

impl SpawnScheduler {
    pub fn new(tuning: &Tuning, now_ms: f64) -> Self {
        Self {
            interval_ms: tuning.spawn_interval_ms.max(tuning.min_spawn_interval_ms),
            last_spawn_ms: now_ms,
            decay: tuning.spawn_decay.clamp(0.0, 1.0),
            min_interval_ms: tuning.min_spawn_interval_ms,
            bonus_chance: tuning.bonus_chance.clamp(0.0, 1.0),
        }
    }

    /// Whether a spawn is owed at `now_ms`
    pub fn due(&self, now_ms: f64) -> bool {
        now_ms - self.last_spawn_ms >= self.interval_ms
    }

    /// Shift the timer forward (pause compensation)
    pub fn shift(&mut self, offset_ms: f64) {
        self.last_spawn_ms += offset_ms;
    }

    /// Roll a kind and x position for a new entity
    pub fn roll<R: Rng>(&self, rng: &mut R) -> (FallingKind, f32) {
        let x = WORLD_MIN_X + rng.random::<f32>() * (WORLD_MAX_X - WORLD_MIN_X);
        let kind = if rng.random_bool(self.bonus_chance) {
            FallingKind::Bonus
        } else {
            FallingKind::Hazard
        };
        (kind, x)
    }

    /// Spawn into the registry if due. Returns the new entity's ID.
    pub fn update<R: Rng>(
        &mut self,
        now_ms: f64,
        registry: &mut EntityRegistry,
        rng: &mut R,
    ) -> Option<u32> {
        if !self.due(now_ms) {
            return None;
        }

        let (kind, x) = self.roll(rng);
        let id = registry.next_entity_id();
        registry.push(FallingEntity::new(id, kind, x, rng));

        self.interval_ms = (self.interval_ms * self.decay).max(self.min_interval_ms);
        self.last_spawn_ms = now_ms;

        log::trace!("Spawned {:?} #{} at x={:.2}", kind, id, x);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_waits_for_interval() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut registry = EntityRegistry::new();
        let mut spawner = SpawnScheduler::new(&tuning, 1000.0);

        assert_eq!(spawner.update(2199.0, &mut registry, &mut rng), None);
        assert!(spawner.update(2200.0, &mut registry, &mut rng).is_some());
        assert_eq!(registry.len(), 1);
        assert!((spawner.interval_ms - 1200.0 * 0.985).abs() < 1e-9);
        assert_eq!(spawner.last_spawn_ms, 2200.0);

        // One spawn per update even if far behind
        spawner.update(100_000.0, &mut registry, &mut rng);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_interval_floor() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut registry = EntityRegistry::new();
        let mut spawner = SpawnScheduler::new(&tuning, 0.0);

        let mut now = 0.0;
        for _ in 0..500 {
            now += spawner.interval_ms;
            spawner.update(now, &mut registry, &mut rng);
        }
        assert_eq!(spawner.interval_ms, tuning.min_spawn_interval_ms);
    }

    #[test]
    fn test_spawn_positions_in_bounds() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let spawner = SpawnScheduler::new(&tuning, 0.0);

        let mut bonuses = 0;
        for _ in 0..2000 {
            let (kind, x) = spawner.roll(&mut rng);
            assert!((WORLD_MIN_X..=WORLD_MAX_X).contains(&x));
            if kind == FallingKind::Bonus {
                bonuses += 1;
            }
        }
        // ~10% bonus rate
        assert!((100..=300).contains(&bonuses), "bonuses = {bonuses}");
    }
}
