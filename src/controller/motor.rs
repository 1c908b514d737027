//! The movement state machine itself.

use bevy::math::Vec2;

use super::config::MovementTuning;
use super::hooks::{
    Animator, DiveDirection, EffectKind, EffectsSink, InputBuffer, MotionResolver, ParamValue,
    anim_paths,
};

/// Up direction in screen coordinates.
pub const UP: Vec2 = Vec2::new(0.0, -1.0);

/// Slide iterations a resolver should use when the caller does not cap them.
pub const DEFAULT_MAX_SLIDES: u32 = 4;

/// Grounded sub-states of the blend tree, by index.
enum GroundedAnim {
    Idle,
    Run,
}

/// Per-character movement state machine, stepped once per physics tick.
///
/// Owns its velocity exclusively; everything it touches beyond that goes
/// through the collaborator traits passed into [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct MovementController {
    tuning: MovementTuning,
    velocity: Vec2,
    is_grounded: bool,
    is_jumping: bool,
    can_dive: bool,
    facing_left: bool,
    /// Countdown started on the ground→air transition; while it has time
    /// left, a buffered jump is still honored.
    ground_remember: f32,
}

impl MovementController {
    pub fn new(tuning: MovementTuning) -> Self {
        Self {
            tuning,
            velocity: Vec2::ZERO,
            is_grounded: false,
            is_jumping: false,
            can_dive: false,
            facing_left: false,
            ground_remember: 0.0,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn can_dive(&self) -> bool {
        self.can_dive
    }

    pub fn facing_left(&self) -> bool {
        self.facing_left
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    /// Advance one fixed physics step.
    ///
    /// `horizontal_input` is the current axis value in -1..=1, 0 neutral.
    /// The phases run in a fixed order: horizontal integration, vertical
    /// integration (jump / grounded bias / gravity), animation writes,
    /// motion resolution, ground-transition detection against the contact
    /// the resolver just produced.
    pub fn update(
        &mut self,
        delta: f32,
        horizontal_input: f32,
        input: &mut impl InputBuffer,
        physics: &mut impl MotionResolver,
        anim: &mut impl Animator,
        effects: &mut impl EffectsSink,
    ) {
        if self.ground_remember > 0.0 {
            self.ground_remember = (self.ground_remember - delta).max(0.0);
        }

        self.integrate_horizontal(delta, horizontal_input);
        self.integrate_vertical(delta, input, effects);
        self.animate(horizontal_input, anim);

        // One slide at most while ascending, so the character does not snap
        // along a ceiling it clips mid-jump.
        let max_slides = if self.is_jumping { Some(1) } else { None };
        self.velocity = physics.resolve_motion(self.velocity, UP, max_slides);

        let on_floor = physics.is_on_floor();
        if on_floor != self.is_grounded {
            self.is_grounded = on_floor;
            if on_floor {
                self.land(anim, effects);
            } else {
                self.leave_ground(anim);
            }
        }
    }

    fn integrate_horizontal(&mut self, delta: f32, horizontal_input: f32) {
        if horizontal_input != 0.0 {
            self.facing_left = horizontal_input < 0.0;
        }

        if self.is_grounded {
            self.velocity.x += horizontal_input * self.tuning.grounded_acceleration * delta;
            let damping = if horizontal_input == 0.0 {
                self.tuning.grounded_stop_damping
            } else {
                self.tuning.ground_damping
            };
            self.velocity.x *= (1.0 - damping).powf(delta * 10.0);
            return;
        }

        self.velocity.x += horizontal_input * self.tuning.air_acceleration * delta;
        self.velocity.x *= (1.0 - self.tuning.air_damping).powf(delta * 10.0);
    }

    fn integrate_vertical(
        &mut self,
        delta: f32,
        input: &mut impl InputBuffer,
        effects: &mut impl EffectsSink,
    ) {
        if input.jump_buffered() && (self.is_grounded || self.ground_remember > 0.0) {
            self.jump(input, effects);
            return;
        }

        if self.is_grounded {
            // Small downward bias so the slide resolver keeps reporting
            // floor contact while resting.
            self.velocity.y = 1.0;
            self.is_jumping = false;
            return;
        }

        // Past the apex the jump no longer counts as cancellable ascent.
        if self.velocity.y > 0.0 {
            self.is_jumping = false;
        }

        let gravity = if self.is_jumping {
            self.tuning.jumping_gravity
        } else {
            self.tuning.gravity
        };
        self.velocity.y += gravity * delta;
        if self.velocity.y > self.tuning.max_falling_speed {
            self.velocity.y = self.tuning.max_falling_speed;
        }
    }

    fn animate(&mut self, horizontal_input: f32, anim: &mut impl Animator) {
        if !self.is_grounded {
            anim.set_param(anim_paths::GROUNDED, ParamValue::Index(0));
            anim.set_param(anim_paths::FALL_SPEED, ParamValue::Scalar(self.velocity.y));
            return;
        }

        anim.set_param(anim_paths::GROUNDED, ParamValue::Index(1));

        if horizontal_input != 0.0 {
            anim.set_param(
                anim_paths::GROUNDED_STATE,
                ParamValue::Index(GroundedAnim::Run as i32),
            );
            anim.set_param(
                anim_paths::RUN_SPEED,
                ParamValue::Scalar(horizontal_input.abs()),
            );
            return;
        }

        anim.set_param(
            anim_paths::GROUNDED_STATE,
            ParamValue::Index(GroundedAnim::Idle as i32),
        );
    }

    fn jump(&mut self, input: &mut impl InputBuffer, effects: &mut impl EffectsSink) {
        self.is_jumping = true;
        self.velocity.y = self.tuning.jump_velocity;

        input.consume_jump_buffer();

        // Tapped rather than held: truncate the ascent right away.
        if !input.jump_held() {
            self.cancel_jump();
        }

        effects.restart(EffectKind::Jump);
    }

    /// End an active jump ascent early, producing a short hop.
    ///
    /// Idempotent: once `is_jumping` is clear this does nothing.
    pub fn cancel_jump(&mut self) {
        if !self.is_jumping {
            return;
        }

        self.is_jumping = false;
        self.velocity.y *= 1.0 - self.tuning.jump_cancel_strength;
    }

    /// Spend the dive on a burst of velocity in `direction`.
    ///
    /// No-op unless a dive is available. An upward dive scales its
    /// horizontal component by the current input, so it can be aimed.
    pub fn dive(
        &mut self,
        direction: DiveDirection,
        horizontal_input: f32,
        anim: &mut impl Animator,
        effects: &mut impl EffectsSink,
    ) {
        if !self.can_dive {
            return;
        }
        self.set_can_dive(false, anim);
        self.is_jumping = false;

        match direction {
            DiveDirection::Up => {
                self.velocity = self.tuning.dive_up_velocity * Vec2::new(horizontal_input, 1.0);
            }
            DiveDirection::Left => {
                self.facing_left = true;
                self.velocity = self.tuning.dive_horizontal_velocity * Vec2::new(-1.0, 1.0);
            }
            DiveDirection::Right => {
                self.facing_left = false;
                self.velocity = self.tuning.dive_horizontal_velocity;
            }
        }

        effects.restart(EffectKind::Dive);
    }

    /// Make a dive available. The controller itself never grants dives;
    /// when one becomes available is the owning layer's policy.
    pub fn grant_dive(&mut self, anim: &mut impl Animator) {
        self.set_can_dive(true, anim);
    }

    fn set_can_dive(&mut self, value: bool, anim: &mut impl Animator) {
        if value == self.can_dive {
            return;
        }
        self.can_dive = value;
        anim.set_param(anim_paths::DIVE_READY, ParamValue::Flag(value));
    }

    fn land(&mut self, anim: &mut impl Animator, effects: &mut impl EffectsSink) {
        self.set_can_dive(false, anim);
        effects.restart(EffectKind::Land);
        anim.set_param(anim_paths::LAND_ACTIVE, ParamValue::Flag(true));
    }

    fn leave_ground(&mut self, anim: &mut impl Animator) {
        self.ground_remember = self.tuning.jump_lenience_time;
        anim.set_param(anim_paths::LAND_ACTIVE, ParamValue::Flag(false));
    }
}
