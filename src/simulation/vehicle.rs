//! Vehicle movement and decision logic
//!
//! Standalone implementation that doesn't depend on Bevy. Each vehicle reads
//! a [`WorldView`] built once per tick and never touches other vehicles.

use std::fmt;

use super::config::{STOP_MARGIN, YIELD_DISTANCE};
use super::rng::SimRng;
use super::road::RoadLayout;
use super::traffic_light::LightState;
use super::types::{Direction, Position, Rect, VehicleId, CULL_MARGIN, VEHICLE_SIZE};

/// Speed of an ordinary car in units per second
pub const CAR_SPEED: f32 = 140.0;

/// Speed of an ambulance in units per second
pub const AMBULANCE_SPEED: f32 = 200.0;

/// Speed of a police car in units per second
pub const POLICE_CAR_SPEED: f32 = 190.0;

/// Margin past the stop line after which a vehicle is committed
const PASSED_STOP_MARGIN: f32 = 2.0;

/// Kind of vehicle in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleKind {
    Car,
    Ambulance,
    PoliceCar,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [
        VehicleKind::Car,
        VehicleKind::Ambulance,
        VehicleKind::PoliceCar,
    ];

    pub fn speed(self) -> f32 {
        match self {
            VehicleKind::Car => CAR_SPEED,
            VehicleKind::Ambulance => AMBULANCE_SPEED,
            VehicleKind::PoliceCar => POLICE_CAR_SPEED,
        }
    }

    /// Priority vehicles ignore red lights and never yield
    pub fn is_priority(self) -> bool {
        matches!(self, VehicleKind::Ambulance | VehicleKind::PoliceCar)
    }

    pub fn color(self) -> (u8, u8, u8) {
        match self {
            VehicleKind::Car => (40, 170, 240),
            VehicleKind::Ambulance => (255, 255, 255),
            VehicleKind::PoliceCar => (40, 90, 255),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VehicleKind::Car => "Car",
            VehicleKind::Ambulance => "Ambulance",
            VehicleKind::PoliceCar => "PoliceCar",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a priority vehicle at the start of the vehicle pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityMarker {
    pub direction: Direction,
    pub position: Position,
}

/// Read-only state a vehicle consults while deciding what to do
#[derive(Debug, Clone)]
pub struct WorldView<'a> {
    pub layout: &'a RoadLayout,
    pub vertical: LightState,
    pub horizontal: LightState,
    pub priority_vehicles: Vec<PriorityMarker>,
}

impl WorldView<'_> {
    pub fn light_for(&self, direction: Direction) -> LightState {
        if direction.is_vertical() {
            self.vertical
        } else {
            self.horizontal
        }
    }
}

/// Result of a vehicle update indicating what happened this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleUpdateResult {
    /// Blocked, stopped at the line, or yielding
    Held,
    /// Moved along its lane
    Continue,
    /// Switched to a perpendicular lane and moved
    Turned(Direction),
    /// Left the visible area and should be removed
    Despawn,
}

/// A vehicle travelling through the intersection
#[derive(Debug, Clone)]
pub struct SimVehicle {
    pub id: VehicleId,
    pub kind: VehicleKind,
    pub position: Position,
    pub direction: Direction,
    pub alive: bool,
    /// Too close to the vehicle ahead; set by the world after each pass
    pub blocked: bool,
    /// Crossed its stop line; never resets
    pub passed_stop: bool,
    /// Stop (or yield) decision from the last evaluated update
    pub should_stop_cached: bool,
    /// Exit chosen for a forced turn, cleared once the turn happens
    pub turn_target: Option<Direction>,
    pub turn_triggered: bool,
}

impl SimVehicle {
    pub fn new(id: VehicleId, kind: VehicleKind, position: Position, direction: Direction) -> Self {
        Self {
            id,
            kind,
            position,
            direction,
            alive: true,
            blocked: false,
            passed_stop: false,
            should_stop_cached: false,
            turn_target: None,
            turn_triggered: false,
        }
    }

    pub fn speed(&self) -> f32 {
        self.kind.speed()
    }

    pub fn is_priority(&self) -> bool {
        self.kind.is_priority()
    }

    /// Used for jam detection
    pub fn is_waiting(&self) -> bool {
        self.blocked || self.should_stop_cached
    }

    /// Bounding rectangle, long side along the travel axis
    pub fn rect(&self) -> Rect {
        let (across, along) = VEHICLE_SIZE;
        if self.direction.is_vertical() {
            Rect::centered(self.position, across, along)
        } else {
            Rect::centered(self.position, along, across)
        }
    }

    /// Progress of the front bumper along the direction of travel
    fn leading_edge(&self) -> f32 {
        self.direction.progress(&self.position) + VEHICLE_SIZE.1 / 2.0
    }

    /// Run one decision step: stop, yield, turn, then move
    pub fn update(
        &mut self,
        delta_secs: f32,
        view: &WorldView,
        rng: &mut SimRng,
    ) -> VehicleUpdateResult {
        if self.blocked {
            return VehicleUpdateResult::Held;
        }

        self.should_stop_cached = self.should_stop(view);
        if self.should_stop_cached {
            return VehicleUpdateResult::Held;
        }

        if !self.is_priority() && self.should_yield(view) {
            self.should_stop_cached = true;
            return VehicleUpdateResult::Held;
        }

        let turned = self.try_turn_if_needed(view.layout, rng);

        let step = self.direction.velocity(self.speed() * delta_secs);
        self.position.x += step.x;
        self.position.y += step.y;

        if view.layout.is_outside(&self.position, CULL_MARGIN) {
            self.alive = false;
        }

        self.update_passed_stop(view.layout);

        if !self.alive {
            VehicleUpdateResult::Despawn
        } else if let Some(direction) = turned {
            VehicleUpdateResult::Turned(direction)
        } else {
            VehicleUpdateResult::Continue
        }
    }

    /// True when a red-like light holds this vehicle at its stop line
    pub fn should_stop(&self, view: &WorldView) -> bool {
        if self.is_priority() || self.passed_stop {
            return false;
        }

        if !view.light_for(self.direction).is_red_like() {
            return false;
        }

        let stop_line = view.layout.stop_line(self.direction) * self.direction.sign();
        self.leading_edge() >= stop_line - STOP_MARGIN
    }

    /// True when a priority vehicle is close ahead in the same lane
    pub fn should_yield(&self, view: &WorldView) -> bool {
        let own = self.direction.progress(&self.position);
        view.priority_vehicles
            .iter()
            .filter(|other| other.direction == self.direction)
            .any(|other| {
                let ahead = self.direction.progress(&other.position) - own;
                ahead > 0.0 && ahead < YIELD_DISTANCE
            })
    }

    /// Handle the forced turn of a vehicle whose straight-ahead arm is missing.
    /// Returns the new direction on the tick the turn happens.
    fn try_turn_if_needed(&mut self, layout: &RoadLayout, rng: &mut SimRng) -> Option<Direction> {
        if self.turn_triggered {
            return None;
        }

        if self.turn_target.is_none() {
            if layout.has_arm(self.direction.opposite()) {
                return None;
            }

            let candidates = if self.direction.is_vertical() {
                [Direction::E, Direction::W]
            } else {
                [Direction::S, Direction::N]
            };
            let options: Vec<Direction> = candidates
                .into_iter()
                .filter(|d| layout.has_arm(d.opposite()))
                .collect();

            self.turn_target = Some(*rng.choose(&options)?);
        }

        let center = layout.center_line(self.direction) * self.direction.sign();
        if self.direction.progress(&self.position) < center {
            return None;
        }

        let new_direction = self.turn_target.take()?;
        let lane = layout.lane_center(new_direction);
        if new_direction.is_vertical() {
            self.position.x = lane;
        } else {
            self.position.y = lane;
        }
        self.direction = new_direction;
        self.turn_triggered = true;

        Some(new_direction)
    }

    fn update_passed_stop(&mut self, layout: &RoadLayout) {
        if self.passed_stop {
            return;
        }
        let stop_line = layout.stop_line(self.direction) * self.direction.sign();
        if self.leading_edge() >= stop_line + PASSED_STOP_MARGIN {
            self.passed_stop = true;
        }
    }
}
