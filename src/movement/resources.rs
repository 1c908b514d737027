//! Movement domain: input resources.

use bevy::prelude::*;

use crate::controller::InputBuffer;

#[derive(Resource, Debug, Clone)]
pub struct InputTuning {
    /// How long a jump press stays buffered before it is discarded.
    pub jump_buffer_time: f32,
}

impl Default for InputTuning {
    fn default() -> Self {
        Self {
            jump_buffer_time: 0.12,
        }
    }
}

/// Sampled keyboard state shared with the fixed-step motor update.
#[derive(Resource, Debug, Default)]
pub struct ControllerInput {
    pub axis: Vec2,
    pub jump_held: bool,
    /// Counts down after a jump press; positive means a jump is buffered.
    pub jump_buffer_timer: f32,
}

impl InputBuffer for ControllerInput {
    fn jump_buffered(&self) -> bool {
        self.jump_buffer_timer > 0.0
    }

    fn consume_jump_buffer(&mut self) {
        self.jump_buffer_timer = 0.0;
    }

    fn jump_held(&self) -> bool {
        self.jump_held
    }
}
