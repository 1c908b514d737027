//! Serde-facing definitions for the tuning file.

use bevy::math::Vec2;
use serde::Deserialize;

use crate::controller::MovementTuning;

/// File form of [`MovementTuning`]. Vectors are plain tuples so the file
/// format does not depend on math-crate serde support; every field falls
/// back to the built-in default when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MovementTuningDef {
    pub jump_velocity: f32,
    pub gravity: f32,
    pub jumping_gravity: f32,
    pub max_falling_speed: f32,
    pub jump_cancel_strength: f32,
    pub grounded_acceleration: f32,
    pub air_acceleration: f32,
    pub ground_damping: f32,
    pub grounded_stop_damping: f32,
    pub air_damping: f32,
    pub dive_up_velocity: (f32, f32),
    pub dive_horizontal_velocity: (f32, f32),
    pub jump_lenience_time: f32,
}

impl Default for MovementTuningDef {
    fn default() -> Self {
        MovementTuning::default().into()
    }
}

impl From<MovementTuning> for MovementTuningDef {
    fn from(tuning: MovementTuning) -> Self {
        Self {
            jump_velocity: tuning.jump_velocity,
            gravity: tuning.gravity,
            jumping_gravity: tuning.jumping_gravity,
            max_falling_speed: tuning.max_falling_speed,
            jump_cancel_strength: tuning.jump_cancel_strength,
            grounded_acceleration: tuning.grounded_acceleration,
            air_acceleration: tuning.air_acceleration,
            ground_damping: tuning.ground_damping,
            grounded_stop_damping: tuning.grounded_stop_damping,
            air_damping: tuning.air_damping,
            dive_up_velocity: tuning.dive_up_velocity.into(),
            dive_horizontal_velocity: tuning.dive_horizontal_velocity.into(),
            jump_lenience_time: tuning.jump_lenience_time,
        }
    }
}

impl From<MovementTuningDef> for MovementTuning {
    fn from(def: MovementTuningDef) -> Self {
        Self {
            jump_velocity: def.jump_velocity,
            gravity: def.gravity,
            jumping_gravity: def.jumping_gravity,
            max_falling_speed: def.max_falling_speed,
            jump_cancel_strength: def.jump_cancel_strength,
            grounded_acceleration: def.grounded_acceleration,
            air_acceleration: def.air_acceleration,
            ground_damping: def.ground_damping,
            grounded_stop_damping: def.grounded_stop_damping,
            air_damping: def.air_damping,
            dive_up_velocity: Vec2::from(def.dive_up_velocity),
            dive_horizontal_velocity: Vec2::from(def.dive_horizontal_velocity),
            jump_lenience_time: def.jump_lenience_time,
        }
    }
}
