//! Movement domain: player spawn from the tuning file.

use std::path::Path;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::animation::{AnimTree, LandSquash};
use crate::content::{self, ContentLoadError};
use crate::controller::{MovementController, MovementTuning, TuningError};
use crate::movement::{CharacterMotor, GameLayer, Player};

fn fallback_tuning(error: ContentLoadError) -> MovementTuning {
    warn!("{}, using default movement tuning", error);
    MovementTuning::default()
}

pub(crate) fn spawn_player(mut commands: Commands) {
    let mut tuning = content::load_movement_tuning(Path::new("assets/data"))
        .unwrap_or_else(fallback_tuning);

    let clamped: Vec<TuningError> = tuning.sanitize();
    for error in clamped {
        warn!("{}", error);
    }

    info!(
        "Spawning player: jump_velocity={}, gravity={}, lenience={}s",
        tuning.jump_velocity, tuning.gravity, tuning.jump_lenience_time
    );

    commands.spawn((
        // Identity & Movement
        (
            Player,
            CharacterMotor {
                controller: MovementController::new(tuning),
            },
            AnimTree::default(),
            LandSquash::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(Vec2::new(24.0, 48.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 100.0, 0.0),
        // Physics: kinematic body, the motor integrates velocity itself
        (
            RigidBody::Kinematic,
            Collider::rectangle(24.0, 48.0),
            LockedAxes::ROTATION_LOCKED,
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground]),
        ),
    ));
}
