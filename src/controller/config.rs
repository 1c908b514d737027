//! Controller tuning: per-character movement constants.

use bevy::math::Vec2;

/// Movement constants for one character, authored in screen coordinates
/// (+y down, so upward velocities are negative).
#[derive(Debug, Clone)]
pub struct MovementTuning {
    pub jump_velocity: f32,
    pub gravity: f32,
    /// Softer gravity applied during an uncancelled jump ascent.
    pub jumping_gravity: f32,
    pub max_falling_speed: f32,
    /// Fraction of upward velocity removed when a jump is cancelled, 0..=1.
    pub jump_cancel_strength: f32,
    pub grounded_acceleration: f32,
    pub air_acceleration: f32,
    /// Per-step damping while grounded with input held, 0..=1.
    pub ground_damping: f32,
    /// Stronger damping while grounded with neutral input, 0..=1.
    pub grounded_stop_damping: f32,
    /// Damping while airborne, 0..=1.
    pub air_damping: f32,
    /// Base velocity of an upward dive; x is scaled by horizontal input.
    pub dive_up_velocity: Vec2,
    /// Velocity of a sideways dive (rightward; mirrored for left).
    pub dive_horizontal_velocity: Vec2,
    /// How long a buffered jump is still honored after leaving the ground.
    pub jump_lenience_time: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            jump_velocity: -460.0,
            gravity: 1100.0,
            jumping_gravity: 700.0,
            max_falling_speed: 700.0,
            jump_cancel_strength: 0.55,
            grounded_acceleration: 2400.0,
            air_acceleration: 1400.0,
            ground_damping: 0.35,
            grounded_stop_damping: 0.55,
            air_damping: 0.12,
            dive_up_velocity: Vec2::new(260.0, -520.0),
            dive_horizontal_velocity: Vec2::new(430.0, -160.0),
            jump_lenience_time: 0.1,
        }
    }
}

/// A tuning value that was out of range and got clamped at load time.
#[derive(Debug)]
pub struct TuningError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tuning field '{}': {}", self.field, self.message)
    }
}

impl MovementTuning {
    /// Clamp out-of-range values in place and report what was touched.
    ///
    /// Runs once at load time; the per-step code assumes sanitized values
    /// and never validates.
    pub fn sanitize(&mut self) -> Vec<TuningError> {
        let mut errors = Vec::new();

        let mut unit_range = |field: &'static str, value: &mut f32| {
            if !(0.0..=1.0).contains(value) {
                let clamped = value.clamp(0.0, 1.0);
                errors.push(TuningError {
                    field,
                    message: format!("{} outside 0..=1, clamped to {}", value, clamped),
                });
                *value = clamped;
            }
        };

        unit_range("jump_cancel_strength", &mut self.jump_cancel_strength);
        unit_range("ground_damping", &mut self.ground_damping);
        unit_range("grounded_stop_damping", &mut self.grounded_stop_damping);
        unit_range("air_damping", &mut self.air_damping);

        if self.max_falling_speed < 0.0 {
            errors.push(TuningError {
                field: "max_falling_speed",
                message: format!("negative ({}), using absolute value", self.max_falling_speed),
            });
            self.max_falling_speed = self.max_falling_speed.abs();
        }

        if self.jump_lenience_time < 0.0 {
            errors.push(TuningError {
                field: "jump_lenience_time",
                message: format!("negative ({}), reset to 0.1", self.jump_lenience_time),
            });
            self.jump_lenience_time = 0.1;
        }

        errors
    }
}
