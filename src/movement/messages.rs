//! Movement domain: edge-triggered input messages.

use bevy::ecs::message::Message;

use crate::controller::DiveDirection;

/// Fired on the frame the jump key is released
#[derive(Debug)]
pub struct JumpReleased;

impl Message for JumpReleased {}

/// Fired when the dive key is pressed, with the aimed direction
#[derive(Debug)]
pub struct DiveRequested(pub DiveDirection);

impl Message for DiveRequested {}
