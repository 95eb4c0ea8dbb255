//! Heads-up display setup

use bevy::prelude::*;

use super::components::HudText;

/// System to spawn the HUD panel at the top-left of the screen
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            spawn_hud_text(parent, HudText::Timer, "Time: 0.0s", 20.0, Color::WHITE);
            spawn_hud_text(parent, HudText::Waiting, "Waiting cars: 0", 20.0, Color::WHITE);
            spawn_hud_text(
                parent,
                HudText::Phase,
                "Phase 1",
                14.0,
                Color::srgb(0.8, 0.8, 0.8),
            );
            spawn_hud_text(
                parent,
                HudText::Outcome,
                "SPACE: next phase",
                18.0,
                Color::srgb(1.0, 1.0, 0.5),
            );
        });
}

fn spawn_hud_text(
    parent: &mut ChildSpawnerCommands,
    hud: HudText,
    text: &str,
    font_size: f32,
    color: Color,
) {
    parent.spawn((
        hud,
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
    ));
}
