//! Input handling systems

use bevy::prelude::*;

use super::components::{PendingCommands, SimWorldResource};
use crate::simulation::{Command, Template};

/// Translate key presses into simulation commands
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    sim_world: Res<SimWorldResource>,
    mut pending: ResMut<PendingCommands>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }

    if keyboard.just_pressed(KeyCode::Space) {
        pending.0.push(Command::AdvancePhase);
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        let template = sim_world.0.layout.template;
        pending.0.push(Command::Reset(template));
    }

    if keyboard.just_pressed(KeyCode::Digit1) {
        pending.0.push(Command::Reset(Template::Cross));
    }

    if keyboard.just_pressed(KeyCode::Digit2) {
        pending.0.push(Command::Reset(Template::T));
    }
}
