//! Debug overlay for fast movement iteration.
//!
//! F1 toggles a text overlay watching the controller state: velocity,
//! grounded, jumping, dive availability.

use bevy::prelude::*;

use crate::movement::{CharacterMotor, ControllerInput, Player};

/// Resource tracking debug overlay state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub overlay_visible: bool,
}

/// Marker for the overlay text entity
#[derive(Component, Debug)]
struct DebugOverlay;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (toggle_overlay, update_overlay));
    }
}

/// Toggle the overlay with F1 or backtick
fn toggle_overlay(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing: Query<Entity, With<DebugOverlay>>,
) {
    let toggle = keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote);
    if !toggle {
        return;
    }

    debug_state.overlay_visible = !debug_state.overlay_visible;

    if debug_state.overlay_visible {
        commands.spawn((
            DebugOverlay,
            Text::new(""),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(8.0),
                top: Val::Px(8.0),
                ..default()
            },
        ));
        info!("Debug overlay enabled");
    } else {
        for entity in &existing {
            commands.entity(entity).despawn();
        }
    }
}

fn update_overlay(
    input: Res<ControllerInput>,
    motors: Query<&CharacterMotor, With<Player>>,
    mut overlay: Query<&mut Text, With<DebugOverlay>>,
) {
    for mut text in &mut overlay {
        let Some(motor) = motors.iter().next() else {
            continue;
        };
        let controller = &motor.controller;

        text.0 = format!(
            "velocity: ({:.1}, {:.1})\ngrounded: {}  jumping: {}\ncan_dive: {}  facing: {}\naxis: {:.1}  jump buffered: {}",
            controller.velocity().x,
            controller.velocity().y,
            controller.is_grounded(),
            controller.is_jumping(),
            controller.can_dive(),
            if controller.facing_left() { "left" } else { "right" },
            input.axis.x,
            input.jump_buffer_timer > 0.0,
        );
    }
}
