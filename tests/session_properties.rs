use lava_dodge::consts::*;
use lava_dodge::sim::*;
use lava_dodge::{BestTime, Settings, Tuning, frame_scale};
use proptest::prelude::*;

fn new_session(seed: u64) -> GameSession {
    GameSession::new(Tuning::default(), BestTime::default(), seed)
}

fn input_from_bits(bits: u8) -> TickInput {
    TickInput {
        left: bits & 1 != 0,
        right: bits & 2 != 0,
        jump: bits & 4 != 0,
    }
}

fn airborne_player(y: f32, vel_y: f32) -> Player {
    Player {
        pos: glam::Vec2::new(0.0, y),
        vel_y,
        grounded: false,
    }
}

proptest! {
    #[test]
    fn split_frame_equals_combined_frame(
        y in (GROUND_Y + 0.01)..12.0f32,
        vel_y in -0.5f32..0.5,
        s1 in 0.0f32..4.0,
        s2 in 0.0f32..4.0,
    ) {
        let tuning = Tuning::default();
        let idle = TickInput::default();

        let mut whole = airborne_player(y, vel_y);
        let mut split = whole.clone();
        step_player(&mut whole, &idle, &tuning, 1.0, s1 + s2);
        step_player(&mut split, &idle, &tuning, 1.0, s1);
        step_player(&mut split, &idle, &tuning, 1.0, s2);

        prop_assert!((whole.pos.y - split.pos.y).abs() < 1e-3,
            "whole {} vs split {}", whole.pos.y, split.pos.y);
        prop_assert!((whole.vel_y - split.vel_y).abs() < 1e-4);
        prop_assert_eq!(whole.grounded, split.grounded);
    }

    #[test]
    fn player_stays_in_world(
        inputs in prop::collection::vec((0u8..8, 0.0f32..10.0, 1.0f32..3.0), 1..200),
    ) {
        let tuning = Tuning::default();
        let mut player = Player::default();
        for (bits, frame_scale, multiplier) in inputs {
            step_player(&mut player, &input_from_bits(bits), &tuning, multiplier, frame_scale);
            prop_assert!(player.pos.x >= WORLD_MIN_X && player.pos.x <= WORLD_MAX_X);
            prop_assert!(player.pos.y >= GROUND_Y);
        }
    }

    #[test]
    fn spawn_interval_never_increases(
        seed in any::<u64>(),
        gaps in prop::collection::vec(0.0f64..3000.0, 1..300),
    ) {
        let tuning = Tuning::default();
        let mut rng = <rand_pcg::Pcg32 as rand::SeedableRng>::seed_from_u64(seed);
        let mut registry = EntityRegistry::new();
        let mut spawner = SpawnScheduler::new(&tuning, 0.0);

        let mut now = 0.0;
        let mut previous = spawner.interval_ms;
        for gap in gaps {
            now += gap;
            spawner.update(now, &mut registry, &mut rng);
            prop_assert!(spawner.interval_ms <= previous);
            prop_assert!(spawner.interval_ms >= tuning.min_spawn_interval_ms);
            previous = spawner.interval_ms;
        }
    }

    #[test]
    fn pause_does_not_count_toward_survival(
        pause_at in 0.0f64..10_000.0,
        pause_for in 0.0f64..1_000_000.0,
        after in 0.0f64..10_000.0,
    ) {
        let mut steady = new_session(1);
        let mut paused = new_session(1);
        steady.start(0.0);
        paused.start(0.0);

        paused.set_paused(true, pause_at);
        paused.set_paused(false, pause_at + pause_for);

        let expected = steady.elapsed_secs(pause_at + after);
        let actual = paused.elapsed_secs(pause_at + pause_for + after);
        prop_assert!((expected - actual).abs() < 1e-6);
        prop_assert!(
            (steady.spawner.last_spawn_ms + pause_for - paused.spawner.last_spawn_ms).abs() < 1e-6
        );
    }
}

#[test]
fn collision_boundaries() {
    let player = glam::Vec2::new(0.0, GROUND_Y);
    assert!(overlaps(player, player));
    assert!(!overlaps(player + glam::Vec2::new(0.8, 0.0), player));
    assert!(!overlaps(player + glam::Vec2::new(0.0, 1.4), player));
}

#[test]
fn jump_scenario_through_session() {
    let settings = Settings::default();
    let mut session = new_session(7);
    session.start(0.0);

    // Settle on the ground
    tick(&mut session, &TickInput::default(), 0.0, &settings);
    assert!(session.player.grounded);

    let jump = TickInput {
        jump: true,
        ..Default::default()
    };
    let mut now = 16.0;
    tick(&mut session, &jump, now, &settings);
    assert!(!session.player.grounded);
    assert!(session.player.pos.y > GROUND_Y);
    // Launched at the jump force, less this frame's gravity
    let tuning = Tuning::default();
    let s = frame_scale(0.016);
    let expected_vel = tuning.jump_force - tuning.player_gravity() * s;
    assert!(
        (session.player.vel_y - expected_vel).abs() < 1e-5,
        "vel_y {} vs {}",
        session.player.vel_y,
        expected_vel
    );

    let mut peak = session.player.pos.y;
    let mut landed = false;
    // Short enough that no spawned hazard reaches the ground
    for _ in 0..120 {
        now += 16.0;
        tick(&mut session, &TickInput::default(), now, &settings);
        assert_eq!(session.phase, GamePhase::Playing);
        peak = peak.max(session.player.pos.y);
        if session.player.grounded {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert!(peak > GROUND_Y + 1.0);
    assert_eq!(session.player.pos.y, GROUND_Y);
}

#[test]
fn hazard_at_player_ends_run_and_records_best() {
    let settings = Settings::default();
    let mut session = new_session(7);
    session.start(1000.0);
    tick(&mut session, &TickInput::default(), 1000.0, &settings);
    session.drain_events();

    let id = session.entities.next_entity_id();
    session.entities.push(FallingEntity {
        id,
        kind: FallingKind::Hazard,
        pos: session.player.pos,
        rotation: glam::Vec3::ZERO,
    });

    tick(&mut session, &TickInput::default(), 1016.0, &settings);
    assert_eq!(session.phase, GamePhase::GameOver);

    let events = session.drain_events();
    assert_eq!(
        events,
        vec![GameEvent::GameOver {
            survived_secs: 0.0,
            collected: 0,
            new_record: false,
            best_secs: 0.0,
        }]
    );

    // Restart clears the field
    session.restart(2000.0);
    assert!(session.entities.is_empty());
    assert_eq!(session.phase, GamePhase::Playing);
}
