//! Standalone intersection simulation module
//!
//! This module contains all the core simulation logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full game.

mod command;
mod config;
mod controller;
mod factory;
mod game_state;
mod rng;
mod road;
mod stats;
mod traffic_light;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use command::Command;
#[allow(unused_imports)]
pub use config::{
    SimConfig, FOLLOW_GAP, JAM_THRESHOLD, SPAWN_INTERVAL, SPAWN_PROBABILITY, STOP_MARGIN,
    WIN_TIME, YIELD_DISTANCE,
};
#[allow(unused_imports)]
pub use controller::{IntersectionController, Phase, PHASES};
#[allow(unused_imports)]
pub use factory::{create_vehicle, spawn_random_vehicle, AMBULANCE_THRESHOLD, POLICE_CAR_THRESHOLD};
#[allow(unused_imports)]
pub use game_state::{GameState, LossReason, Outcome};
#[allow(unused_imports)]
pub use rng::SimRng;
#[allow(unused_imports)]
pub use road::{RoadLayout, Template, LANE_WIDTH, ROAD_WIDTH, STOP_OFFSET};
#[allow(unused_imports)]
pub use stats::SimStats;
#[allow(unused_imports)]
pub use traffic_light::{Lamps, LightState, TrafficLight, DEFAULT_CYCLE_TIME};
#[allow(unused_imports)]
pub use types::{
    ApproachGroup, Direction, Position, Rect, VehicleId, CULL_MARGIN, SPAWN_OFFSET, VEHICLE_SIZE,
    WORLD_HEIGHT, WORLD_WIDTH,
};
#[allow(unused_imports)]
pub use vehicle::{
    PriorityMarker, SimVehicle, VehicleKind, VehicleUpdateResult, WorldView, AMBULANCE_SPEED,
    CAR_SPEED, POLICE_CAR_SPEED,
};
pub use world::{SimWorld, VehicleSnapshot};
