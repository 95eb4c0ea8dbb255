//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;

use crate::simulation::{
    ApproachGroup, Command, Position, SimWorld, VehicleId, WORLD_HEIGHT, WORLD_WIDTH,
};

/// World units per simulation unit
pub const SCENE_SCALE: f32 = 0.1;

/// Convert a simulation position (y grows downwards) to the ground plane
pub fn to_scene(position: &Position, height: f32) -> Vec3 {
    Vec3::new(
        (position.x - WORLD_WIDTH / 2.0) * SCENE_SCALE,
        height,
        (position.y - WORLD_HEIGHT / 2.0) * SCENE_SCALE,
    )
}

/// Convert an (r, g, b) triple to a Bevy color
pub fn rgb(color: (u8, u8, u8)) -> Color {
    Color::srgb_u8(color.0, color.1, color.2)
}

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

/// Commands gathered from input, applied before the next tick
#[derive(Resource, Default)]
pub struct PendingCommands(pub Vec<Command>);

/// Set when the road layout changed and the scenery must be rebuilt
#[derive(Resource, Default)]
pub struct SceneryDirty(pub bool);

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for static road pieces and light housings, rebuilt on reset
#[derive(Component)]
pub struct Scenery;

/// Links a Bevy entity to a simulation vehicle
#[derive(Component)]
pub struct VehicleLink(pub VehicleId);

/// Which lamp of a light head an entity represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampColor {
    Red,
    Yellow,
    Green,
}

/// Links a lamp entity to a light of an approach group
#[derive(Component)]
pub struct LampLink {
    pub group: ApproachGroup,
    pub index: usize,
    pub lamp: LampColor,
}

/// Marker for HUD text elements
#[derive(Component)]
pub enum HudText {
    /// Survived time against the win time
    Timer,
    /// Waiting vehicles against the jam threshold
    Waiting,
    /// Current signal phase
    Phase,
    /// Win / loss banner
    Outcome,
}
