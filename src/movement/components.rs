//! Movement domain: components and physics layers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::controller::MovementController;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, walls)
    Ground,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for static level colliders
#[derive(Component, Debug)]
pub struct Ground;

/// The controller core carried by a character entity.
#[derive(Component, Debug)]
pub struct CharacterMotor {
    pub controller: MovementController,
}
