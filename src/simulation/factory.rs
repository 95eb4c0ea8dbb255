//! Vehicle factory
//!
//! Picks the kind of each new vehicle and places it at the entry point of
//! its arm.

use super::rng::SimRng;
use super::road::RoadLayout;
use super::types::{Direction, VehicleId};
use super::vehicle::{SimVehicle, VehicleKind};

/// Rolls below this value produce an ambulance
pub const AMBULANCE_THRESHOLD: f32 = 0.08;

/// Rolls below this value (and above the ambulance one) produce a police car
pub const POLICE_CAR_THRESHOLD: f32 = 0.14;

impl VehicleKind {
    /// Map a uniform roll in `[0, 1)` onto a vehicle kind
    pub fn from_roll(roll: f32) -> Self {
        if roll < AMBULANCE_THRESHOLD {
            VehicleKind::Ambulance
        } else if roll < POLICE_CAR_THRESHOLD {
            VehicleKind::PoliceCar
        } else {
            VehicleKind::Car
        }
    }
}

/// Create a vehicle of a specific kind at the entry point of `direction`
pub fn create_vehicle(
    id: VehicleId,
    kind: VehicleKind,
    direction: Direction,
    layout: &RoadLayout,
) -> SimVehicle {
    SimVehicle::new(id, kind, layout.spawn_point(direction), direction)
}

/// Create a vehicle with a randomly rolled kind
pub fn spawn_random_vehicle(
    id: VehicleId,
    direction: Direction,
    layout: &RoadLayout,
    rng: &mut SimRng,
) -> SimVehicle {
    let kind = VehicleKind::from_roll(rng.unit());
    create_vehicle(id, kind, direction, layout)
}
