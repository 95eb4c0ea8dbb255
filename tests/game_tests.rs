//! Game mechanics validation test
//!
//! Covers the win and loss conditions, player commands and spawning.

use junction_sim::simulation::{
    Command, Direction, GameState, LossReason, Outcome, Position, SimConfig, SimWorld, Template,
    VehicleKind, JAM_THRESHOLD, WIN_TIME,
};

fn quiet_world(template: Template) -> SimWorld {
    SimWorld::with_config(template, SimConfig::without_spawning(), Some(3)).unwrap()
}

/// Queue of west-bound cars held by the horizontal red light of phase 0
fn queue_west(world: &mut SimWorld, count: usize) {
    let mut x = 305.0;
    for _ in 0..count {
        world.insert_vehicle(VehicleKind::Car, Direction::W, Position::new(x, 405.0));
        x -= 40.0;
    }
}

#[test]
fn test_game_state_initialization() {
    let game_state = GameState::new();
    assert_eq!(game_state.time_survived, 0.0);
    assert_eq!(game_state.outcome, Outcome::Running);
    assert!(!game_state.is_over());
}

#[test]
fn test_game_state_survive_and_progress() {
    let mut game_state = GameState::new();
    assert!(!game_state.survive(5.0, WIN_TIME));
    assert_eq!(game_state.progress(WIN_TIME), 50.0);
    assert!(game_state.survive(5.0, WIN_TIME));
    assert_eq!(game_state.outcome, Outcome::Won);
    assert_eq!(game_state.progress(WIN_TIME), 100.0);
}

#[test]
fn test_outcome_display() {
    assert_eq!(Outcome::Running.to_string(), "RUNNING");
    assert_eq!(Outcome::Won.to_string(), "WON");
    assert_eq!(
        Outcome::Lost(LossReason::Collision).to_string(),
        "LOST (collision)"
    );
    assert_eq!(Outcome::Lost(LossReason::Jam).to_string(), "LOST (jam)");
}

#[test]
fn test_win_after_surviving() {
    let mut world = quiet_world(Template::Cross);

    for _ in 0..19 {
        world.tick(0.5);
    }
    assert_eq!(world.outcome(), Outcome::Running);

    world.tick(0.5);
    assert_eq!(world.outcome(), Outcome::Won);
    assert_eq!(world.game_state.time_survived, 10.0);
}

#[test]
fn test_world_freezes_after_end() {
    let mut world = quiet_world(Template::Cross);
    for _ in 0..20 {
        world.tick(0.5);
    }
    assert_eq!(world.outcome(), Outcome::Won);

    let time = world.time;
    let phase = world.controller.phase_index();
    world.tick(0.5);
    world.force_advance_phase();

    assert_eq!(world.time, time);
    assert_eq!(world.controller.phase_index(), phase);
    assert_eq!(world.game_state.time_survived, 10.0);
}

#[test]
fn test_jam_at_threshold() {
    let mut world = quiet_world(Template::Cross);
    queue_west(&mut world, JAM_THRESHOLD);

    world.tick(0.01);

    assert_eq!(world.waiting_count(), JAM_THRESHOLD);
    assert_eq!(world.outcome(), Outcome::Lost(LossReason::Jam));
}

#[test]
fn test_no_jam_below_threshold() {
    let mut world = quiet_world(Template::Cross);
    queue_west(&mut world, JAM_THRESHOLD - 1);

    for _ in 0..50 {
        world.tick(0.01);
    }

    assert_eq!(world.waiting_count(), JAM_THRESHOLD - 1);
    assert_eq!(world.outcome(), Outcome::Running);
    assert_eq!(world.stats.peak_waiting, JAM_THRESHOLD - 1);
}

#[test]
fn test_jam_threshold_is_configurable() {
    let config = SimConfig {
        jam_threshold: 3,
        ..SimConfig::without_spawning()
    };
    let mut world = SimWorld::with_config(Template::Cross, config, Some(3)).unwrap();
    queue_west(&mut world, 3);

    world.tick(0.01);

    assert_eq!(world.outcome(), Outcome::Lost(LossReason::Jam));
}

#[test]
fn test_collision_in_intersection() {
    let mut world = quiet_world(Template::Cross);
    world.insert_vehicle(VehicleKind::Car, Direction::N, Position::new(395.0, 400.0));
    let crossing =
        world.insert_vehicle(VehicleKind::Car, Direction::W, Position::new(400.0, 405.0));
    world.vehicle_mut(crossing).unwrap().passed_stop = true;

    world.tick(0.01);

    assert_eq!(world.outcome(), Outcome::Lost(LossReason::Collision));
}

#[test]
fn test_collision_reported_before_jam() {
    let mut world = quiet_world(Template::Cross);
    queue_west(&mut world, JAM_THRESHOLD);
    world.insert_vehicle(VehicleKind::Car, Direction::N, Position::new(395.0, 400.0));
    let crossing =
        world.insert_vehicle(VehicleKind::Car, Direction::W, Position::new(400.0, 405.0));
    world.vehicle_mut(crossing).unwrap().passed_stop = true;

    world.tick(0.01);

    assert_eq!(world.waiting_count(), JAM_THRESHOLD);
    assert_eq!(world.outcome(), Outcome::Lost(LossReason::Collision));
}

#[test]
fn test_jam_reported_before_win() {
    let config = SimConfig {
        win_time: 0.01,
        ..SimConfig::without_spawning()
    };
    let mut world = SimWorld::with_config(Template::Cross, config, Some(3)).unwrap();
    queue_west(&mut world, JAM_THRESHOLD);

    world.tick(0.01);

    assert_eq!(world.outcome(), Outcome::Lost(LossReason::Jam));
    assert_eq!(world.game_state.time_survived, 0.0);
}

#[test]
fn test_overlap_outside_intersection_is_not_a_collision() {
    let mut world = quiet_world(Template::Cross);
    world.insert_vehicle(VehicleKind::Car, Direction::N, Position::new(395.0, 50.0));
    world.insert_vehicle(VehicleKind::Car, Direction::N, Position::new(395.0, 60.0));

    world.tick(0.01);

    assert_eq!(world.outcome(), Outcome::Running);
}

#[test]
fn test_advance_phase_command() {
    let mut world = quiet_world(Template::Cross);
    world.apply_command(Command::AdvancePhase).unwrap();

    assert_eq!(world.controller.phase_index(), 1);
    assert_eq!(world.stats.manual_advances, 1);
}

#[test]
fn test_reset_clears_run_and_switches_template() {
    let mut world = quiet_world(Template::Cross);
    queue_west(&mut world, JAM_THRESHOLD);
    world.tick(0.01);
    world.force_advance_phase();
    assert!(world.outcome().is_over());

    world.apply_command(Command::Reset(Template::T)).unwrap();

    assert_eq!(world.layout.template, Template::T);
    assert!(world.vehicles.is_empty());
    assert_eq!(world.outcome(), Outcome::Running);
    assert_eq!(world.controller.phase_index(), 0);
    assert_eq!(world.game_state.time_survived, 0.0);
    assert_eq!(world.stats.vehicles_spawned, 0);

    // Ids stay unique across resets
    let id = world.spawn_vehicle(Direction::S, VehicleKind::Car);
    assert_eq!(id.0, JAM_THRESHOLD);
}

#[test]
fn test_spawning_respects_template() {
    let config = SimConfig {
        spawn_probability: 1.0,
        ..SimConfig::default()
    };
    let mut world = SimWorld::with_config(Template::T, config, Some(11)).unwrap();

    for _ in 0..4 {
        world.tick(0.5);
    }

    assert_eq!(world.stats.vehicles_spawned, 2);
    assert_eq!(world.vehicles.len(), 2);
    assert!(world.vehicles.iter().all(|v| v.direction != Direction::N));
}

#[test]
fn test_no_spawns_with_zero_probability() {
    let mut world = quiet_world(Template::Cross);
    for _ in 0..10 {
        world.tick(0.5);
    }
    assert_eq!(world.stats.vehicles_spawned, 0);
}

#[test]
fn test_seeded_worlds_are_reproducible() {
    let mut a = SimWorld::new_with_seed(Template::Cross, 42).unwrap();
    let mut b = SimWorld::new_with_seed(Template::Cross, 42).unwrap();

    for _ in 0..100 {
        a.tick(0.05);
        b.tick(0.05);
    }

    assert_eq!(a.vehicle_snapshots(), b.vehicle_snapshots());
    assert_eq!(a.outcome(), b.outcome());
}
