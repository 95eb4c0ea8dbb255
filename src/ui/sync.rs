//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{
    rgb, to_scene, HudText, LampColor, LampLink, PendingCommands, SceneryDirty,
    SimWorldResource, VehicleLink, SCENE_SCALE,
};
use crate::simulation::{ApproachGroup, Command, LossReason, Outcome, VehicleId, PHASES};

const LAMP_OFF_COLOR: Color = Color::srgb(0.2, 0.2, 0.2);
const WAITING_TINT: Color = Color::srgb(0.9, 0.5, 0.1);

/// System to apply queued commands and run a simulation tick
pub fn tick_simulation(
    time: Res<Time>,
    mut sim_world: ResMut<SimWorldResource>,
    mut pending: ResMut<PendingCommands>,
    mut dirty: ResMut<SceneryDirty>,
) {
    for command in pending.0.drain(..) {
        if let Err(e) = sim_world.0.apply_command(command) {
            bevy::log::warn!("Failed to apply {:?}: {}", command, e);
            continue;
        }
        if matches!(command, Command::Reset(_)) {
            dirty.0 = true;
        }
    }

    sim_world.0.tick(time.delta_secs());
}

/// System to sync vehicle visuals from simulation state
pub fn sync_vehicles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut vehicle_query: Query<(
        Entity,
        &VehicleLink,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    let world = &sim_world.0;
    let mut existing: HashSet<VehicleId> = HashSet::new();

    for (entity, link, mut transform, material_handle) in vehicle_query.iter_mut() {
        if let Some(vehicle) = world.vehicle(link.0) {
            existing.insert(link.0);
            let rect = vehicle.rect();
            transform.translation = to_scene(&vehicle.position, 0.5);
            transform.scale = Vec3::new(rect.width * SCENE_SCALE, 1.0, rect.height * SCENE_SCALE);

            if let Some(material) = materials.get_mut(&material_handle.0) {
                material.base_color = if vehicle.is_waiting() && !vehicle.is_priority() {
                    WAITING_TINT
                } else {
                    rgb(vehicle.kind.color())
                };
            }
        } else {
            // Vehicle no longer exists in simulation, despawn
            commands.entity(entity).despawn();
        }
    }

    for vehicle in &world.vehicles {
        if existing.contains(&vehicle.id) {
            continue;
        }
        let rect = vehicle.rect();
        commands.spawn((
            VehicleLink(vehicle.id),
            Mesh3d(meshes.add(Cuboid::new(1.0, 0.6, 1.0))),
            MeshMaterial3d(materials.add(rgb(vehicle.kind.color()))),
            Transform::from_translation(to_scene(&vehicle.position, 0.5)).with_scale(Vec3::new(
                rect.width * SCENE_SCALE,
                1.0,
                rect.height * SCENE_SCALE,
            )),
        ));
    }
}

/// System to light the lamps of every light head
pub fn sync_lights(
    sim_world: Res<SimWorldResource>,
    lamp_query: Query<(&LampLink, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (link, material_handle) in lamp_query.iter() {
        let Some(light) = sim_world.0.controller.lights(link.group).get(link.index) else {
            continue;
        };
        let lamps = light.state().lamps();
        let (lit, on_color) = match link.lamp {
            LampColor::Red => (lamps.red, Color::srgb(0.8, 0.0, 0.0)),
            LampColor::Yellow => (lamps.yellow, Color::srgb(0.9, 0.9, 0.0)),
            LampColor::Green => (lamps.green, Color::srgb(0.0, 0.8, 0.0)),
        };
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = if lit { on_color } else { LAMP_OFF_COLOR };
        }
    }
}

/// System to update the HUD text
pub fn update_hud_text(
    sim_world: Res<SimWorldResource>,
    mut text_query: Query<(&HudText, &mut Text)>,
) {
    let world = &sim_world.0;

    for (hud, mut text) in text_query.iter_mut() {
        match hud {
            HudText::Timer => {
                **text = format!(
                    "Time: {:.1}/{:.0}s",
                    world.game_state.time_survived, world.config.win_time
                );
            }
            HudText::Waiting => {
                **text = format!(
                    "Waiting cars: {}/{}",
                    world.waiting_count(),
                    world.config.jam_threshold
                );
            }
            HudText::Phase => {
                **text = format!(
                    "Phase {}/{}: vertical={} horizontal={}",
                    world.controller.phase_index() + 1,
                    PHASES.len(),
                    world.group_light_state(ApproachGroup::Vertical),
                    world.group_light_state(ApproachGroup::Horizontal)
                );
            }
            HudText::Outcome => {
                **text = match world.outcome() {
                    Outcome::Running => "SPACE: next phase".to_string(),
                    Outcome::Won => "YOU WIN! (R to restart)".to_string(),
                    Outcome::Lost(LossReason::Collision) => {
                        "CRASH! GAME OVER (R to restart)".to_string()
                    }
                    Outcome::Lost(LossReason::Jam) => "JAM! GAME OVER (R to restart)".to_string(),
                };
            }
        }
    }
}
