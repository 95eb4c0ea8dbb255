//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for presentation - all simulation logic is in the `simulation` module.
//! The UI reads state from `SimWorld`, renders it, and forwards player commands.

mod components;
mod hud;
mod input;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{PendingCommands, SimWorldResource};

use components::SceneryDirty;
use hud::setup_hud;
use input::handle_input;
use sync::{sync_lights, sync_vehicles, tick_simulation, update_hud_text};
use world::{rebuild_scenery, setup_world, spawn_scenery};

/// Plugin to register all UI systems.
///
/// Expects a [`SimWorldResource`] to be inserted before the app runs.
pub struct IntersectionUIPlugin;

impl Plugin for IntersectionUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingCommands>()
            .init_resource::<SceneryDirty>()
            .add_systems(Startup, (setup_world, spawn_scenery, setup_hud))
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (
                    handle_input,
                    rebuild_scenery,
                    sync_vehicles,
                    sync_lights,
                    update_hud_text,
                ),
            );
    }
}
