//! Controller core: unit tests against recording collaborators.

use bevy::math::Vec2;

use super::{
    Animator, DiveDirection, EffectKind, EffectsSink, InputBuffer, MotionResolver,
    MovementController, MovementTuning, ParamValue, anim_paths,
};

const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct TestInput {
    buffered: bool,
    held: bool,
}

impl InputBuffer for TestInput {
    fn jump_buffered(&self) -> bool {
        self.buffered
    }

    fn consume_jump_buffer(&mut self) {
        self.buffered = false;
    }

    fn jump_held(&self) -> bool {
        self.held
    }
}

/// Pass-through resolver with scripted floor contact.
#[derive(Default)]
struct TestResolver {
    on_floor: bool,
    last_max_slides: Option<Option<u32>>,
}

impl MotionResolver for TestResolver {
    fn resolve_motion(&mut self, velocity: Vec2, _up: Vec2, max_slides: Option<u32>) -> Vec2 {
        self.last_max_slides = Some(max_slides);
        velocity
    }

    fn is_on_floor(&self) -> bool {
        self.on_floor
    }
}

#[derive(Default)]
struct RecordingAnim {
    writes: Vec<(String, ParamValue)>,
}

impl RecordingAnim {
    fn last(&self, path: &str) -> Option<ParamValue> {
        self.writes
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, v)| *v)
    }
}

impl Animator for RecordingAnim {
    fn set_param(&mut self, path: &str, value: ParamValue) {
        self.writes.push((path.to_string(), value));
    }
}

#[derive(Default)]
struct RecordingFx {
    fired: Vec<EffectKind>,
}

impl EffectsSink for RecordingFx {
    fn restart(&mut self, effect: EffectKind) {
        self.fired.push(effect);
    }
}

struct Rig {
    motor: MovementController,
    input: TestInput,
    resolver: TestResolver,
    anim: RecordingAnim,
    fx: RecordingFx,
}

impl Rig {
    fn new(tuning: MovementTuning) -> Self {
        Self {
            motor: MovementController::new(tuning),
            input: TestInput::default(),
            resolver: TestResolver::default(),
            anim: RecordingAnim::default(),
            fx: RecordingFx::default(),
        }
    }

    /// Rig that has already landed on the floor.
    fn grounded(tuning: MovementTuning) -> Self {
        let mut rig = Self::new(tuning);
        rig.resolver.on_floor = true;
        rig.step(0.0);
        assert!(rig.motor.is_grounded());
        // Drop the landing the setup step just recorded.
        rig.fx.fired.clear();
        rig.anim.writes.clear();
        rig
    }

    fn step(&mut self, horizontal_input: f32) {
        self.motor.update(
            DT,
            horizontal_input,
            &mut self.input,
            &mut self.resolver,
            &mut self.anim,
            &mut self.fx,
        );
    }
}

#[test]
fn grounded_idle_rests_with_floor_bias() {
    let mut rig = Rig::grounded(MovementTuning::default());
    rig.step(0.0);

    assert_eq!(rig.motor.velocity().y, 1.0);
    assert!(!rig.motor.is_jumping());
    assert_eq!(
        rig.anim.last(anim_paths::GROUNDED),
        Some(ParamValue::Index(1))
    );
    assert_eq!(
        rig.anim.last(anim_paths::GROUNDED_STATE),
        Some(ParamValue::Index(0))
    );
}

#[test]
fn neutral_input_damps_horizontal_speed_toward_zero() {
    let mut rig = Rig::grounded(MovementTuning::default());

    for _ in 0..30 {
        rig.step(1.0);
    }
    assert!(rig.motor.velocity().x > 0.0);

    let mut previous = rig.motor.velocity().x;
    for _ in 0..120 {
        rig.step(0.0);
        let current = rig.motor.velocity().x;
        assert!(current.abs() <= previous.abs());
        previous = current;
    }
    assert!(previous.abs() < 1.0);
}

#[test]
fn zero_input_does_not_change_facing() {
    let mut rig = Rig::grounded(MovementTuning::default());
    rig.step(-1.0);
    assert!(rig.motor.facing_left());

    for _ in 0..10 {
        rig.step(0.0);
    }
    assert!(rig.motor.facing_left());
}

#[test]
fn grounded_jump_overrides_prior_vertical_velocity() {
    let tuning = MovementTuning {
        jump_velocity: -400.0,
        ..default_tuning()
    };
    let mut rig = Rig::grounded(tuning);
    rig.input.buffered = true;
    rig.input.held = true;
    rig.step(0.0);

    assert_eq!(rig.motor.velocity().y, -400.0);
    assert!(rig.motor.is_jumping());
    assert!(!rig.input.buffered, "jump consumes the buffer");
    assert_eq!(rig.fx.fired, vec![EffectKind::Jump]);
}

#[test]
fn tapped_jump_is_truncated_immediately() {
    let tuning = MovementTuning {
        jump_velocity: -400.0,
        jump_cancel_strength: 0.5,
        ..default_tuning()
    };
    let mut rig = Rig::grounded(tuning);
    rig.input.buffered = true;
    rig.input.held = false;
    rig.step(0.0);

    assert_eq!(rig.motor.velocity().y, -200.0);
    assert!(!rig.motor.is_jumping());
}

#[test]
fn cancel_jump_is_idempotent() {
    let tuning = MovementTuning {
        jump_velocity: -400.0,
        jump_cancel_strength: 0.6,
        ..default_tuning()
    };
    let mut rig = Rig::grounded(tuning);
    rig.input.buffered = true;
    rig.input.held = true;
    rig.step(0.0);

    rig.motor.cancel_jump();
    let after_once = rig.motor.velocity().y;
    rig.motor.cancel_jump();

    assert_eq!(rig.motor.velocity().y, after_once);
}

#[test]
fn buffered_jump_honored_inside_lenience_window() {
    let mut rig = Rig::grounded(default_tuning());
    rig.resolver.on_floor = false;
    rig.step(0.0);
    assert!(!rig.motor.is_grounded());

    // 0.05 s of airtime, jump_lenience_time is 0.1 s.
    for _ in 0..3 {
        rig.step(0.0);
    }

    rig.input.buffered = true;
    rig.input.held = true;
    rig.step(0.0);

    assert!(rig.motor.is_jumping());
    assert_eq!(rig.motor.velocity().y, rig.motor.tuning().jump_velocity);
}

#[test]
fn buffered_jump_rejected_after_lenience_expires() {
    let mut rig = Rig::grounded(default_tuning());
    rig.resolver.on_floor = false;
    rig.step(0.0);

    // Well past the 0.1 s window.
    for _ in 0..12 {
        rig.step(0.0);
    }

    rig.input.buffered = true;
    rig.input.held = true;
    rig.step(0.0);

    assert!(!rig.motor.is_jumping());
    assert!(rig.input.buffered, "rejected jump leaves the buffer intact");
    assert!(rig.fx.fired.is_empty());
}

#[test]
fn jump_caps_slide_iterations_until_apex() {
    let mut rig = Rig::grounded(default_tuning());
    rig.input.buffered = true;
    rig.input.held = true;
    rig.resolver.on_floor = false;
    rig.step(0.0);
    assert_eq!(rig.resolver.last_max_slides, Some(Some(1)));

    // Still ascending: cap stays.
    rig.step(0.0);
    assert_eq!(rig.resolver.last_max_slides, Some(Some(1)));

    rig.motor.cancel_jump();
    rig.step(0.0);
    assert_eq!(rig.resolver.last_max_slides, Some(None));
}

#[test]
fn falling_speed_is_clamped() {
    let mut rig = Rig::new(default_tuning());
    for _ in 0..600 {
        rig.step(0.0);
    }

    assert_eq!(
        rig.motor.velocity().y,
        rig.motor.tuning().max_falling_speed
    );
    assert_eq!(
        rig.anim.last(anim_paths::GROUNDED),
        Some(ParamValue::Index(0))
    );
    assert_eq!(
        rig.anim.last(anim_paths::FALL_SPEED),
        Some(ParamValue::Scalar(rig.motor.tuning().max_falling_speed))
    );
}

#[test]
fn softer_gravity_applies_while_jump_is_held() {
    let tuning = MovementTuning {
        jump_velocity: -400.0,
        gravity: 1000.0,
        jumping_gravity: 500.0,
        ..default_tuning()
    };
    let mut rig = Rig::grounded(tuning);
    rig.input.buffered = true;
    rig.input.held = true;
    rig.resolver.on_floor = false;
    rig.step(0.0);

    rig.step(0.0);
    let expected = -400.0 + 500.0 * DT;
    assert!((rig.motor.velocity().y - expected).abs() < 1e-4);
}

#[test]
fn landing_clears_dive_and_fires_effect() {
    let mut rig = Rig::grounded(default_tuning());
    rig.resolver.on_floor = false;
    rig.step(0.0);
    rig.motor.grant_dive(&mut rig.anim);
    assert!(rig.motor.can_dive());
    assert_eq!(
        rig.anim.last(anim_paths::DIVE_READY),
        Some(ParamValue::Flag(true))
    );

    rig.resolver.on_floor = true;
    rig.step(0.0);

    assert!(!rig.motor.can_dive());
    assert_eq!(rig.fx.fired, vec![EffectKind::Land]);
    assert_eq!(
        rig.anim.last(anim_paths::LAND_ACTIVE),
        Some(ParamValue::Flag(true))
    );
    assert_eq!(
        rig.anim.last(anim_paths::DIVE_READY),
        Some(ParamValue::Flag(false))
    );
}

#[test]
fn dive_left_mirrors_horizontal_burst() {
    let tuning = MovementTuning {
        dive_horizontal_velocity: Vec2::new(430.0, -160.0),
        ..default_tuning()
    };
    let mut rig = Rig::new(tuning);
    rig.step(0.0);
    rig.motor.grant_dive(&mut rig.anim);

    rig.motor
        .dive(DiveDirection::Left, 0.0, &mut rig.anim, &mut rig.fx);

    assert!(rig.motor.facing_left());
    assert_eq!(rig.motor.velocity(), Vec2::new(-430.0, -160.0));
    assert!(!rig.motor.can_dive());
    assert_eq!(rig.fx.fired, vec![EffectKind::Dive]);
}

#[test]
fn dive_up_is_aimed_by_horizontal_input() {
    let tuning = MovementTuning {
        dive_up_velocity: Vec2::new(260.0, -520.0),
        ..default_tuning()
    };
    let mut rig = Rig::new(tuning);
    rig.motor.grant_dive(&mut rig.anim);

    rig.motor
        .dive(DiveDirection::Up, -1.0, &mut rig.anim, &mut rig.fx);

    assert_eq!(rig.motor.velocity(), Vec2::new(-260.0, -520.0));
}

#[test]
fn dive_requires_a_grant() {
    let mut rig = Rig::new(default_tuning());
    let before = rig.motor.velocity();

    rig.motor
        .dive(DiveDirection::Right, 0.0, &mut rig.anim, &mut rig.fx);

    assert_eq!(rig.motor.velocity(), before);
    assert!(rig.fx.fired.is_empty());
}

#[test]
fn dive_ends_an_active_jump() {
    let mut rig = Rig::grounded(default_tuning());
    rig.input.buffered = true;
    rig.input.held = true;
    rig.resolver.on_floor = false;
    rig.step(0.0);
    assert!(rig.motor.is_jumping());

    rig.motor.grant_dive(&mut rig.anim);
    rig.motor
        .dive(DiveDirection::Right, 0.0, &mut rig.anim, &mut rig.fx);

    assert!(!rig.motor.is_jumping());
}

#[test]
fn sanitize_clamps_out_of_range_tuning() {
    let mut tuning = MovementTuning {
        jump_cancel_strength: 1.4,
        ground_damping: -0.2,
        max_falling_speed: -500.0,
        jump_lenience_time: -1.0,
        ..default_tuning()
    };

    let errors = tuning.sanitize();

    assert_eq!(errors.len(), 4);
    assert_eq!(tuning.jump_cancel_strength, 1.0);
    assert_eq!(tuning.ground_damping, 0.0);
    assert_eq!(tuning.max_falling_speed, 500.0);
    assert_eq!(tuning.jump_lenience_time, 0.1);
}

fn default_tuning() -> MovementTuning {
    MovementTuning::default()
}
