//! Collaborator traits the controller is stepped against.

/// Directions a dive can be aimed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiveDirection {
    Up,
    Left,
    Right,
}

/// Particle effects the controller can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Jump,
    Land,
    Dive,
}

/// A value written into the animation blend tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Flag(bool),
    Index(i32),
    Scalar(f32),
}

/// Blend-tree parameter paths the controller writes.
pub mod anim_paths {
    /// Grounded/airborne top-level switch: 0 = airborne, 1 = grounded.
    pub const GROUNDED: &str = "Grounded/current";
    /// Grounded sub-state: 0 = idle, 1 = run.
    pub const GROUNDED_STATE: &str = "GroundedState/current";
    /// Run playback scale, |horizontal input|.
    pub const RUN_SPEED: &str = "RunSpeed/scale";
    /// Fall blend position, vertical velocity in screen coords.
    pub const FALL_SPEED: &str = "FallSpeed/blend_position";
    /// Landing one-shot flag.
    pub const LAND_ACTIVE: &str = "Land/active";
    /// Dive availability indicator (drives the character's glow).
    pub const DIVE_READY: &str = "DiveReady/active";
}

/// Buffered jump input, polled once per step.
///
/// The buffer is a short press-to-window store: a jump pressed slightly
/// before it can be honored still counts. The controller consumes it
/// exactly once per successful jump.
pub trait InputBuffer {
    fn jump_buffered(&self) -> bool;
    fn consume_jump_buffer(&mut self);
    fn jump_held(&self) -> bool;
}

/// Collision backend: kinematic sweep-and-slide plus the floor contact it
/// produced.
pub trait MotionResolver {
    /// Sweep the character along `velocity`, sliding along obstacles, and
    /// return the corrected velocity. `max_slides` caps the slide
    /// iterations; `None` uses the resolver's default.
    fn resolve_motion(
        &mut self,
        velocity: bevy::math::Vec2,
        up: bevy::math::Vec2,
        max_slides: Option<u32>,
    ) -> bevy::math::Vec2;

    /// Floor contact as of the last `resolve_motion` call.
    fn is_on_floor(&self) -> bool;
}

/// Opaque key/value writes into an animation blend tree.
pub trait Animator {
    fn set_param(&mut self, path: &str, value: ParamValue);
}

/// Fire-and-forget particle triggers.
pub trait EffectsSink {
    fn restart(&mut self, effect: EffectKind);
}
