//! Intersection layout and signal plan tests

use std::collections::BTreeMap;

use junction_sim::simulation::{
    ApproachGroup, Direction, IntersectionController, LightState, Position, RoadLayout, Template,
    TrafficLight, DEFAULT_CYCLE_TIME, PHASES,
};

#[test]
fn test_template_parsing() {
    assert_eq!("cross".parse::<Template>().unwrap(), Template::Cross);
    assert_eq!("+".parse::<Template>().unwrap(), Template::Cross);
    assert_eq!("T".parse::<Template>().unwrap(), Template::T);
    assert!("roundabout".parse::<Template>().is_err());
}

#[test]
fn test_cross_has_all_arms() {
    let layout = RoadLayout::new(Template::Cross).unwrap();
    assert_eq!(layout.allowed_directions(), Direction::ALL.to_vec());
}

#[test]
fn test_t_template_drops_north_arm() {
    let layout = RoadLayout::new(Template::T).unwrap();
    assert!(!layout.has_arm(Direction::N));
    assert_eq!(
        layout.allowed_directions(),
        vec![Direction::S, Direction::W, Direction::E]
    );
}

#[test]
fn test_layout_needs_three_arms() {
    let mut arms = BTreeMap::new();
    arms.insert(Direction::N, true);
    arms.insert(Direction::S, true);
    assert!(RoadLayout::with_arms(arms).is_err());
}

#[test]
fn test_custom_layout_takes_template_from_arms() {
    let mut arms: BTreeMap<Direction, bool> = Direction::ALL.iter().map(|&d| (d, true)).collect();
    assert_eq!(RoadLayout::with_arms(arms.clone()).unwrap().template, Template::Cross);

    // Dropping the north arm is the T junction, whatever the caller meant
    arms.insert(Direction::N, false);
    let layout = RoadLayout::with_arms(arms).unwrap();
    assert_eq!(layout.template, Template::T);

    // Resetting to the reported template rebuilds the same topology
    let rebuilt = RoadLayout::new(layout.template).unwrap();
    assert_eq!(rebuilt.allowed_directions(), layout.allowed_directions());
}

#[test]
fn test_custom_layout_without_matching_template_is_rejected() {
    let mut arms: BTreeMap<Direction, bool> = Direction::ALL.iter().map(|&d| (d, true)).collect();
    arms.insert(Direction::W, false);
    assert!(RoadLayout::with_arms(arms).is_err());
}

#[test]
fn test_geometry_reference_points() {
    let layout = RoadLayout::new(Template::Cross).unwrap();
    assert_eq!(layout.center(), Position::new(450.0, 350.0));

    // Stop lines sit 125 units before the center on every approach
    assert_eq!(layout.stop_line(Direction::N), 225.0);
    assert_eq!(layout.stop_line(Direction::S), 475.0);
    assert_eq!(layout.stop_line(Direction::W), 325.0);
    assert_eq!(layout.stop_line(Direction::E), 575.0);

    assert_eq!(layout.lane_center(Direction::N), 395.0);
    assert_eq!(layout.lane_center(Direction::S), 505.0);
    assert_eq!(layout.lane_center(Direction::W), 405.0);
    assert_eq!(layout.lane_center(Direction::E), 295.0);

    assert_eq!(layout.spawn_point(Direction::N), Position::new(395.0, -50.0));
    assert_eq!(layout.spawn_point(Direction::E), Position::new(950.0, 295.0));
}

#[test]
fn test_spawn_points_are_off_screen_but_not_culled() {
    let layout = RoadLayout::new(Template::Cross).unwrap();
    for direction in Direction::ALL {
        let spawn = layout.spawn_point(direction);
        assert!(layout.is_outside(&spawn, 0.0), "{} spawn is visible", direction);
        assert!(!layout.is_outside(&spawn, 80.0), "{} spawn is culled", direction);
    }
}

#[test]
fn test_controller_starts_vertical_green() {
    let layout = RoadLayout::new(Template::Cross).unwrap();
    let controller = IntersectionController::for_layout(&layout);

    assert_eq!(controller.phase_index(), 0);
    assert_eq!(controller.group_state(ApproachGroup::Vertical), LightState::Green);
    assert_eq!(controller.group_state(ApproachGroup::Horizontal), LightState::Red);
    assert_eq!(controller.lights(ApproachGroup::Vertical).len(), 2);
    assert_eq!(controller.lights(ApproachGroup::Horizontal).len(), 2);
}

#[test]
fn test_t_controller_has_one_vertical_light() {
    let layout = RoadLayout::new(Template::T).unwrap();
    let controller = IntersectionController::for_layout(&layout);
    assert_eq!(controller.lights(ApproachGroup::Vertical).len(), 1);
    assert_eq!(controller.all_lights().count(), 3);
}

#[test]
fn test_phase_cycle_visits_every_phase_in_order() {
    let layout = RoadLayout::new(Template::Cross).unwrap();
    let mut controller = IntersectionController::for_layout(&layout);

    // Full cycle is 13 seconds; half-second steps land exactly on each boundary
    let mut visited = vec![controller.phase_index()];
    for _ in 0..26 {
        if controller.advance(0.5) {
            visited.push(controller.phase_index());
        }
    }

    assert_eq!(visited, vec![0, 1, 2, 3, 4, 5, 0]);
}

#[test]
fn test_groups_follow_phase_table() {
    let layout = RoadLayout::new(Template::Cross).unwrap();
    let mut controller = IntersectionController::for_layout(&layout);

    for (index, phase) in PHASES.iter().enumerate() {
        assert_eq!(controller.phase_index(), index);
        for light in controller.lights(ApproachGroup::Vertical) {
            assert_eq!(light.state(), phase.vertical);
        }
        for light in controller.lights(ApproachGroup::Horizontal) {
            assert_eq!(light.state(), phase.horizontal);
        }
        assert_eq!(controller.state_for(Direction::S), phase.vertical);
        assert_eq!(controller.state_for(Direction::E), phase.horizontal);
        controller.force_advance();
    }
    assert_eq!(controller.phase_index(), 0);
}

#[test]
fn test_never_both_groups_green() {
    for phase in PHASES {
        let vertical_go = !phase.vertical.is_red_like();
        let horizontal_go = !phase.horizontal.is_red_like();
        assert!(!(vertical_go && horizontal_go), "conflicting phase {:?}", phase);
    }
}

#[test]
fn test_advance_makes_at_most_one_transition() {
    let layout = RoadLayout::new(Template::Cross).unwrap();
    let mut controller = IntersectionController::for_layout(&layout);

    assert!(controller.advance(100.0));
    assert_eq!(controller.phase_index(), 1);
    assert_eq!(controller.elapsed(), 0.0);
}

#[test]
fn test_force_advance_resets_timer() {
    let layout = RoadLayout::new(Template::Cross).unwrap();
    let mut controller = IntersectionController::for_layout(&layout);

    controller.advance(3.0);
    assert_eq!(controller.elapsed(), 3.0);
    controller.force_advance();
    assert_eq!(controller.phase_index(), 1);
    assert_eq!(controller.elapsed(), 0.0);

    controller.reset();
    assert_eq!(controller.phase_index(), 0);
}

#[test]
fn test_standalone_light_cycles_on_its_own_timer() {
    let mut light = TrafficLight::new(Position::new(0.0, 0.0), ApproachGroup::Vertical);
    assert_eq!(light.state(), LightState::Red);

    light.update(DEFAULT_CYCLE_TIME - 0.5);
    assert_eq!(light.state(), LightState::Red);
    assert_eq!(light.timer(), DEFAULT_CYCLE_TIME - 0.5);
    light.update(0.5);
    assert_eq!(light.state(), LightState::RedYellow);
    assert_eq!(light.timer(), 0.0);

    light.update(1.0);
    light.set_state(LightState::Yellow);
    assert_eq!(light.timer(), 0.0, "an explicit state change restarts the cycle");

    light.switch_manual();
    assert_eq!(light.state(), LightState::Red);
    light.switch_manual();
    light.switch_manual();
    assert_eq!(light.state(), LightState::Green);
}

#[test]
fn test_lamps_match_state() {
    let lamps = LightState::RedYellow.lamps();
    assert!(lamps.red && lamps.yellow && !lamps.green);
    assert!(LightState::RedYellow.color().is_none());

    let lamps = LightState::Green.lamps();
    assert!(!lamps.red && !lamps.yellow && lamps.green);
    assert_eq!(LightState::RedYellow.to_string(), "RED_YELLOW");
}

#[test]
fn test_light_cycle_closes_after_four_steps() {
    for state in [
        LightState::Red,
        LightState::RedYellow,
        LightState::Yellow,
        LightState::Green,
    ] {
        assert_eq!(state.next().next().next().next(), state);
    }
    assert_eq!(LightState::Red.next().next(), LightState::Green);
}

#[test]
fn test_manual_advance_changes_vertical_state() {
    let layout = RoadLayout::new(Template::Cross).unwrap();
    let mut controller = IntersectionController::for_layout(&layout);
    let initial = controller.group_state(ApproachGroup::Vertical);

    controller.force_advance();

    assert_ne!(controller.group_state(ApproachGroup::Vertical), initial);
}
