//! Movement domain: Bevy integration around the controller core.
//!
//! Owns the player entity, keyboard sampling, the avian2d sweep-and-slide
//! resolver, and the fixed-step system that drives [`MovementController`]
//! each physics tick.
//!
//! [`MovementController`]: crate::controller::MovementController

mod bootstrap;
mod components;
mod dev;
mod messages;
mod resources;
mod sweep;
mod systems;

pub use components::{CharacterMotor, GameLayer, Ground, Player};
pub use messages::{DiveRequested, JumpReleased};
pub use resources::{ControllerInput, InputTuning};

use bevy::prelude::*;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControllerInput>()
            .init_resource::<InputTuning>()
            .add_message::<JumpReleased>()
            .add_message::<DiveRequested>()
            .add_systems(Startup, (bootstrap::spawn_player, dev::spawn_test_room))
            .add_systems(Update, systems::read_input)
            .add_systems(FixedUpdate, systems::step_motor);
    }
}
