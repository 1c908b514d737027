//! Movement controller core: a self-contained platformer state machine
//! stepped once per fixed physics tick.
//!
//! The controller knows nothing about the ECS or the physics backend. Each
//! step it is handed its collaborators (input buffer, motion resolver,
//! animator, effects sink) as trait objects owned by the caller, mutates its
//! own velocity and state, and delegates collision response to the resolver.
//!
//! Velocity uses screen coordinates (+y is down): the tuning values were
//! authored in that convention, so `jump_velocity` is negative and
//! `max_falling_speed` is a positive clamp. The Bevy layer converts to
//! world coordinates at the resolver boundary.

mod config;
mod hooks;
mod motor;
#[cfg(test)]
mod tests;

pub use config::{MovementTuning, TuningError};
pub use hooks::{
    Animator, DiveDirection, EffectKind, EffectsSink, InputBuffer, MotionResolver, ParamValue,
    anim_paths,
};
pub use motor::{DEFAULT_MAX_SLIDES, MovementController, UP};
