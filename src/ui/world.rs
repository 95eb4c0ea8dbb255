//! World setup systems for camera, lighting, road and traffic lights

use bevy::prelude::*;

use super::components::{
    rgb, to_scene, LampColor, LampLink, MainCamera, Scenery, SceneryDirty, SimWorldResource,
    SCENE_SCALE,
};
use crate::simulation::{
    ApproachGroup, Direction, Position, SimWorld, ROAD_WIDTH, WORLD_HEIGHT, WORLD_WIDTH,
};

const ROAD_COLOR: (u8, u8, u8) = (60, 60, 60);
const STOP_LINE_COLOR: (u8, u8, u8) = (255, 255, 255);
const HOUSING_COLOR: (u8, u8, u8) = (20, 20, 20);
const LAMP_OFF_COLOR: (u8, u8, u8) = (50, 50, 50);

/// System to setup the environment (ground, lighting, camera)
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Top-down camera; screen up is -Z so simulation y maps onto +Z
    commands.spawn((
        MainCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 90.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Mesh3d(meshes.add(
            Plane3d::default()
                .mesh()
                .size(WORLD_WIDTH * SCENE_SCALE * 1.5, WORLD_HEIGHT * SCENE_SCALE * 1.5),
        )),
        MeshMaterial3d(materials.add(Color::srgb(0.12, 0.12, 0.12))),
    ));
}

/// Startup system building the road and lights for the initial template
pub fn spawn_scenery(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
) {
    build_scenery(&mut commands, &mut meshes, &mut materials, &sim_world.0);
}

/// Rebuild the scenery after a reset switched templates
pub fn rebuild_scenery(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim_world: Res<SimWorldResource>,
    mut dirty: ResMut<SceneryDirty>,
    scenery: Query<Entity, With<Scenery>>,
) {
    if !dirty.0 {
        return;
    }
    dirty.0 = false;

    for entity in scenery.iter() {
        commands.entity(entity).despawn();
    }
    build_scenery(&mut commands, &mut meshes, &mut materials, &sim_world.0);
}

fn build_scenery(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    world: &SimWorld,
) {
    let layout = &world.layout;
    let road_material = materials.add(rgb(ROAD_COLOR));
    let center = layout.center();
    let half = ROAD_WIDTH / 2.0;

    // Intersection square
    spawn_slab(commands, meshes, road_material.clone(), center, ROAD_WIDTH, ROAD_WIDTH, 0.01);

    // One slab per existing arm, from the square to the edge of the screen
    for direction in layout.allowed_directions() {
        let (position, width, depth) = match direction {
            Direction::N => {
                let len = center.y - half;
                (Position::new(center.x, len / 2.0), ROAD_WIDTH, len)
            }
            Direction::S => {
                let len = layout.height - center.y - half;
                (Position::new(center.x, center.y + half + len / 2.0), ROAD_WIDTH, len)
            }
            Direction::W => {
                let len = center.x - half;
                (Position::new(len / 2.0, center.y), len, ROAD_WIDTH)
            }
            Direction::E => {
                let len = layout.width - center.x - half;
                (Position::new(center.x + half + len / 2.0, center.y), len, ROAD_WIDTH)
            }
        };
        spawn_slab(commands, meshes, road_material.clone(), position, width, depth, 0.01);

        // Stop line across the arm
        let stop = layout.stop_line(direction);
        let (line_pos, line_w, line_d) = if direction.is_vertical() {
            (Position::new(center.x, stop), ROAD_WIDTH * 0.95, 7.0)
        } else {
            (Position::new(stop, center.y), 7.0, ROAD_WIDTH * 0.95)
        };
        let line_material = materials.add(rgb(STOP_LINE_COLOR));
        spawn_slab(commands, meshes, line_material, line_pos, line_w, line_d, 0.02);
    }

    for group in [ApproachGroup::Vertical, ApproachGroup::Horizontal] {
        for (index, light) in world.controller.lights(group).iter().enumerate() {
            spawn_light_head(commands, meshes, materials, group, index, &light.position);
        }
    }
}

fn spawn_slab(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    position: Position,
    width: f32,
    depth: f32,
    height: f32,
) {
    commands.spawn((
        Scenery,
        Mesh3d(meshes.add(Cuboid::new(width * SCENE_SCALE, height, depth * SCENE_SCALE))),
        MeshMaterial3d(material),
        Transform::from_translation(to_scene(&position, height / 2.0)),
    ));
}

fn spawn_light_head(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    group: ApproachGroup,
    index: usize,
    position: &Position,
) {
    // Vertical heads stack their lamps along Z, horizontal ones along X
    let (w, d, step) = match group {
        ApproachGroup::Vertical => (26.0, 70.0, Vec3::new(0.0, 0.0, 18.0 * SCENE_SCALE)),
        ApproachGroup::Horizontal => (70.0, 26.0, Vec3::new(18.0 * SCENE_SCALE, 0.0, 0.0)),
    };
    let base = to_scene(position, 0.3);

    commands.spawn((
        Scenery,
        Mesh3d(meshes.add(Cuboid::new(w * SCENE_SCALE, 0.4, d * SCENE_SCALE))),
        MeshMaterial3d(materials.add(rgb(HOUSING_COLOR))),
        Transform::from_translation(base),
    ));

    let lamps = [
        (LampColor::Red, -1.0_f32),
        (LampColor::Yellow, 0.0),
        (LampColor::Green, 1.0),
    ];
    for (lamp, offset) in lamps {
        commands.spawn((
            Scenery,
            LampLink { group, index, lamp },
            Mesh3d(meshes.add(Cuboid::new(1.4, 0.2, 1.4))),
            MeshMaterial3d(materials.add(rgb(LAMP_OFF_COLOR))),
            Transform::from_translation(base + Vec3::Y * 0.3 + step * offset),
        ));
    }
}
