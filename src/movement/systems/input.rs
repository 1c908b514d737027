//! Movement domain: keyboard sampling and edge events.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::controller::DiveDirection;
use crate::movement::{
    CharacterMotor, ControllerInput, DiveRequested, InputTuning, JumpReleased, Player,
};

pub(crate) fn read_input(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    tuning: Res<InputTuning>,
    mut input: ResMut<ControllerInput>,
    mut jump_released: MessageWriter<JumpReleased>,
    mut dive_requested: MessageWriter<DiveRequested>,
    motors: Query<&CharacterMotor, With<Player>>,
) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (aims the upward dive)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = Vec2::new(x, y);
    input.jump_held = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);

    // Presses buffer; the buffer bleeds out until the motor consumes it.
    if keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK) {
        input.jump_buffer_timer = tuning.jump_buffer_time;
    } else if input.jump_buffer_timer > 0.0 {
        input.jump_buffer_timer -= time.delta_secs();
    }

    if keyboard.just_released(KeyCode::Space) || keyboard.just_released(KeyCode::KeyK) {
        jump_released.write(JumpReleased);
    }

    if keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyJ) {
        let direction = if y > 0.0 {
            DiveDirection::Up
        } else if x < 0.0 {
            DiveDirection::Left
        } else if x > 0.0 {
            DiveDirection::Right
        } else {
            // Neutral press dives the way the character is facing.
            let facing_left = motors
                .iter()
                .next()
                .is_some_and(|motor| motor.controller.facing_left());
            if facing_left {
                DiveDirection::Left
            } else {
                DiveDirection::Right
            }
        };
        dive_requested.write(DiveRequested(direction));
    }
}
