//! Game session and its state machine
//!
//! Phases: Idle -> Playing <-> Paused -> GameOver -> (Idle | Playing).
//! Timestamps are shifted forward on resume so survival time, the spawn timer
//! and boost expiries never count time spent paused.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::boost::Boosts;
use super::spawn::SpawnScheduler;
use super::state::{Camera, EntityRegistry, GameEvent, GamePhase, Player};
use crate::best_time::BestTime;
use crate::round_tenths;
use crate::tuning::Tuning;

/// Everything one browser tab needs to run the game
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: GamePhase,
    pub tuning: Tuning,
    pub player: Player,
    pub camera: Camera,
    pub entities: EntityRegistry,
    pub boosts: Boosts,
    pub spawner: SpawnScheduler,
    /// Bonuses collected this run
    pub collected: u32,
    pub best: BestTime,

    started_at_ms: f64,
    paused_at_ms: Option<f64>,
    paused_total_ms: f64,
    /// Pause state to restore when the window regains focus
    paused_before_blur: bool,
    survived_secs: f64,
    last_frame_ms: Option<f64>,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create an idle session (menu showing)
    pub fn new(tuning: Tuning, best: BestTime, seed: u64) -> Self {
        let spawner = SpawnScheduler::new(&tuning, 0.0);
        Self {
            phase: GamePhase::Idle,
            tuning,
            player: Player::default(),
            camera: Camera::default(),
            entities: EntityRegistry::new(),
            boosts: Boosts::new(),
            spawner,
            collected: 0,
            best,
            started_at_ms: 0.0,
            paused_at_ms: None,
            paused_total_ms: 0.0,
            paused_before_blur: false,
            survived_secs: 0.0,
            last_frame_ms: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Start a fresh run from any phase
    pub fn start(&mut self, now_ms: f64) {
        self.entities.clear();
        self.boosts.clear();
        self.player = Player::default();
        self.camera = Camera::default();
        self.spawner = SpawnScheduler::new(&self.tuning, now_ms);
        self.collected = 0;
        self.survived_secs = 0.0;

        self.started_at_ms = now_ms;
        self.paused_at_ms = None;
        self.paused_total_ms = 0.0;
        self.paused_before_blur = false;
        self.phase = GamePhase::Playing;

        self.events.push(GameEvent::Started);
        log::info!("Run started");
    }

    /// Start again after a game over
    pub fn restart(&mut self, now_ms: f64) {
        self.start(now_ms);
    }

    /// Leave to the menu. Returns false if already there.
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase == GamePhase::Idle {
            return false;
        }
        self.phase = GamePhase::Idle;
        self.paused_at_ms = None;
        true
    }

    /// Pause or resume a run in progress. Returns true if the phase changed.
    pub fn set_paused(&mut self, paused: bool, now_ms: f64) -> bool {
        match (self.phase, paused) {
            (GamePhase::Playing, true) => {
                self.phase = GamePhase::Paused;
                self.paused_at_ms = Some(now_ms);
                self.events.push(GameEvent::Paused);
                log::info!("Paused");
                true
            }
            (GamePhase::Paused, false) => {
                let paused_for = self
                    .paused_at_ms
                    .take()
                    .map(|at| (now_ms - at).max(0.0))
                    .unwrap_or(0.0);
                self.started_at_ms += paused_for;
                self.spawner.shift(paused_for);
                self.boosts.shift(paused_for);
                self.paused_total_ms += paused_for;
                self.phase = GamePhase::Playing;
                self.events.push(GameEvent::Resumed);
                log::info!("Resumed after {:.0}ms", paused_for);
                true
            }
            _ => false,
        }
    }

    /// Pause button. Ignored outside a run.
    pub fn toggle_pause(&mut self, now_ms: f64) -> bool {
        match self.phase {
            GamePhase::Playing => self.set_paused(true, now_ms),
            GamePhase::Paused => self.set_paused(false, now_ms),
            _ => false,
        }
    }

    /// Window lost focus: force pause, remembering whether we already were
    pub fn blur(&mut self, now_ms: f64) {
        if self.phase.in_progress() {
            self.paused_before_blur = self.phase == GamePhase::Paused;
            self.set_paused(true, now_ms);
        }
    }

    /// Window regained focus: restore the pause state from before the blur
    pub fn focus(&mut self, now_ms: f64) {
        if self.phase.in_progress() {
            self.set_paused(self.paused_before_blur, now_ms);
        }
    }

    /// End the run: freeze survival time and settle the best time
    pub(crate) fn game_over(&mut self, now_ms: f64) {
        let survived_secs = round_tenths(((now_ms - self.started_at_ms) / 1000.0).max(0.0));
        let new_record = self.best.submit(survived_secs);

        self.survived_secs = survived_secs;
        self.paused_at_ms = None;
        self.phase = GamePhase::GameOver;

        self.events.push(GameEvent::GameOver {
            survived_secs,
            collected: self.collected,
            new_record,
            best_secs: self.best.secs(),
        });
        log::info!(
            "Game over after {:.1}s with {} collected{}",
            survived_secs,
            self.collected,
            if new_record { " (new record)" } else { "" }
        );
    }

    /// Survival time excluding pauses (ms)
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        match self.phase {
            GamePhase::Idle => 0.0,
            GamePhase::Playing => (now_ms - self.started_at_ms).max(0.0),
            GamePhase::Paused => {
                let at = self.paused_at_ms.unwrap_or(now_ms);
                (at - self.started_at_ms).max(0.0)
            }
            GamePhase::GameOver => self.survived_secs * 1000.0,
        }
    }

    /// Survival time excluding pauses (seconds)
    pub fn elapsed_secs(&self, now_ms: f64) -> f64 {
        self.elapsed_ms(now_ms) / 1000.0
    }

    /// Total time spent paused this run (ms), excluding a pause in progress
    pub fn paused_total_ms(&self) -> f64 {
        self.paused_total_ms
    }

    /// Survival time of the last finished run
    pub fn survived_secs(&self) -> f64 {
        self.survived_secs
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.boosts.multiplier(self.tuning.boost_amount)
    }

    /// Milliseconds since the previous frame; zero on the first frame
    pub(crate) fn advance_clock(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_frame_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        dt
    }

    /// Let the scheduler spawn into the registry if an entity is owed
    pub(crate) fn spawn_due(&mut self, now_ms: f64) -> Option<u32> {
        self.spawner.update(now_ms, &mut self.entities, &mut self.rng)
    }

    /// Count a collected bonus and start its boost
    pub(crate) fn collect_bonus(&mut self, now_ms: f64) {
        self.collected += 1;
        self.boosts.grant(now_ms, self.tuning.boost_duration_ms);
        self.events.push(GameEvent::BonusCollected {
            total: self.collected,
        });
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(Tuning::default(), BestTime::default(), 12345)
    }

    #[test]
    fn test_start_from_idle() {
        let mut s = session();
        assert_eq!(s.phase, GamePhase::Idle);
        assert_eq!(s.elapsed_secs(500.0), 0.0);

        s.start(1000.0);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.spawner.last_spawn_ms, 1000.0);
        assert_eq!(s.drain_events(), vec![GameEvent::Started]);
        assert!((s.elapsed_secs(3500.0) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_pause_excluded_from_elapsed() {
        let mut s = session();
        s.start(0.0);
        assert!(s.set_paused(true, 2000.0));
        assert!(!s.set_paused(true, 2500.0));
        // Frozen while paused
        assert!((s.elapsed_ms(9000.0) - 2000.0).abs() < 1e-9);

        assert!(s.set_paused(false, 7000.0));
        assert_eq!(s.spawner.last_spawn_ms, 5000.0);
        assert!((s.elapsed_ms(8000.0) - 3000.0).abs() < 1e-9);
        assert_eq!(s.paused_total_ms(), 5000.0);
    }

    #[test]
    fn test_toggle_ignored_outside_run() {
        let mut s = session();
        assert!(!s.toggle_pause(0.0));
        s.start(0.0);
        assert!(s.toggle_pause(10.0));
        assert_eq!(s.phase, GamePhase::Paused);
        assert!(s.toggle_pause(20.0));
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_blur_focus_restores_prior_state() {
        let mut s = session();

        // Not in a run: nothing happens
        s.blur(0.0);
        assert_eq!(s.phase, GamePhase::Idle);

        s.start(0.0);
        s.blur(100.0);
        assert_eq!(s.phase, GamePhase::Paused);
        s.focus(200.0);
        assert_eq!(s.phase, GamePhase::Playing);

        // Already paused before blur: stays paused on focus
        s.toggle_pause(300.0);
        s.blur(400.0);
        s.focus(500.0);
        assert_eq!(s.phase, GamePhase::Paused);
    }

    #[test]
    fn test_game_over_records_best() {
        let mut s = session();
        s.start(0.0);
        s.drain_events();
        s.game_over(12_340.0);

        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.survived_secs(), 12.3);
        assert_eq!(s.best.secs(), 12.3);
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::GameOver {
                survived_secs: 12.3,
                collected: 0,
                new_record: true,
                best_secs: 12.3,
            }]
        );

        // Shorter run keeps the record
        s.restart(20_000.0);
        s.game_over(25_000.0);
        assert_eq!(s.best.secs(), 12.3);
        assert!(matches!(
            s.drain_events().last(),
            Some(GameEvent::GameOver {
                new_record: false,
                ..
            })
        ));

        // Focus after game over does nothing
        s.focus(30_000.0);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert!(s.return_to_menu());
        assert!(!s.return_to_menu());
    }

    #[test]
    fn test_frame_clock() {
        let mut s = session();
        assert_eq!(s.advance_clock(1000.0), 0.0);
        assert_eq!(s.advance_clock(1016.0), 16.0);
        // Long stalls are kept whole
        assert_eq!(s.advance_clock(5000.0), 3984.0);
        // Clock going backwards reads as no time
        assert_eq!(s.advance_clock(4000.0), 0.0);
    }
}
