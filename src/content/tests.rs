//! Content domain: unit tests for tuning parsing.

use bevy::math::Vec2;

use super::data::MovementTuningDef;
use super::loader::parse_movement_tuning;
use crate::controller::MovementTuning;

#[test]
fn parses_a_full_tuning_file() {
    let tuning = parse_movement_tuning(
        r#"(
            jump_velocity: -400.0,
            gravity: 1000.0,
            jumping_gravity: 600.0,
            max_falling_speed: 650.0,
            jump_cancel_strength: 0.5,
            grounded_acceleration: 2000.0,
            air_acceleration: 1200.0,
            ground_damping: 0.3,
            grounded_stop_damping: 0.5,
            air_damping: 0.1,
            dive_up_velocity: (250.0, -500.0),
            dive_horizontal_velocity: (420.0, -150.0),
            jump_lenience_time: 0.1,
        )"#,
    )
    .expect("full file should parse");

    assert_eq!(tuning.jump_velocity, -400.0);
    assert_eq!(tuning.dive_up_velocity, Vec2::new(250.0, -500.0));
    assert_eq!(tuning.dive_horizontal_velocity, Vec2::new(420.0, -150.0));
}

#[test]
fn omitted_fields_fall_back_to_defaults() {
    let tuning = parse_movement_tuning("(jump_velocity: -999.0)").expect("partial file");
    let defaults = MovementTuning::default();

    assert_eq!(tuning.jump_velocity, -999.0);
    assert_eq!(tuning.gravity, defaults.gravity);
    assert_eq!(tuning.jump_lenience_time, defaults.jump_lenience_time);
}

#[test]
fn malformed_files_are_rejected() {
    assert!(parse_movement_tuning("(jump_velocity: \"fast\")").is_err());
}

#[test]
fn def_round_trips_through_runtime_tuning() {
    let def = MovementTuningDef::default();
    let tuning: MovementTuning = def.clone().into();
    let back: MovementTuningDef = tuning.into();

    assert_eq!(back.dive_up_velocity, def.dive_up_velocity);
    assert_eq!(back.jump_velocity, def.jump_velocity);
}
