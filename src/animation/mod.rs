//! Animation domain: blend-tree parameter store and sprite presentation.
//!
//! The motor writes opaque parameters (`Grounded/current`,
//! `FallSpeed/blend_position`, ...) into an [`AnimTree`]; a presentation
//! system reads them back out and drives the placeholder sprite: state
//! selection, run stretch, landing squash, dive-ready glow.


use std::collections::HashMap;

use bevy::prelude::*;

use crate::controller::{Animator, ParamValue, anim_paths};
use crate::movement::Player;

/// Animation states derived from the blend-tree parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    Fall,
}

/// Parameter store the motor writes into, keyed by blend-tree path.
#[derive(Component, Debug, Default)]
pub struct AnimTree {
    params: HashMap<String, ParamValue>,
}

impl AnimTree {
    pub fn flag(&self, path: &str) -> bool {
        matches!(self.params.get(path), Some(ParamValue::Flag(true)))
    }

    pub fn index(&self, path: &str) -> i32 {
        match self.params.get(path) {
            Some(ParamValue::Index(index)) => *index,
            _ => 0,
        }
    }

    pub fn scalar(&self, path: &str) -> f32 {
        match self.params.get(path) {
            Some(ParamValue::Scalar(scalar)) => *scalar,
            _ => 0.0,
        }
    }

    /// Current state by the same selection the blend tree would make.
    pub fn state(&self) -> AnimationState {
        if self.index(anim_paths::GROUNDED) == 0 {
            return AnimationState::Fall;
        }
        if self.index(anim_paths::GROUNDED_STATE) == 1 {
            AnimationState::Run
        } else {
            AnimationState::Idle
        }
    }
}

impl Animator for AnimTree {
    fn set_param(&mut self, path: &str, value: ParamValue) {
        self.params.insert(path.to_string(), value);
    }
}

/// Short squash played when the landing flag flips on.
#[derive(Component, Debug, Default)]
pub struct LandSquash {
    seen: bool,
    timer: f32,
}

const SQUASH_TIME: f32 = 0.12;
const BASE_SIZE: Vec2 = Vec2::new(24.0, 48.0);

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, drive_player_sprite);
    }
}

fn drive_player_sprite(
    time: Res<Time>,
    mut query: Query<(&AnimTree, &mut LandSquash, &mut Sprite), With<Player>>,
) {
    let dt = time.delta_secs();

    for (tree, mut squash, mut sprite) in &mut query {
        let landing = tree.flag(anim_paths::LAND_ACTIVE);
        if landing && !squash.seen {
            squash.timer = SQUASH_TIME;
        }
        squash.seen = landing;
        if squash.timer > 0.0 {
            squash.timer -= dt;
        }

        let size = if squash.timer > 0.0 {
            Vec2::new(BASE_SIZE.x + 6.0, BASE_SIZE.y - 8.0)
        } else {
            match tree.state() {
                AnimationState::Idle => BASE_SIZE,
                AnimationState::Run => {
                    // Lean into the run with the playback scale.
                    let lean = 3.0 * tree.scalar(anim_paths::RUN_SPEED);
                    Vec2::new(BASE_SIZE.x + lean, BASE_SIZE.y - lean)
                }
                AnimationState::Fall => {
                    // Stretch with fall speed, capped well before it looks silly.
                    let stretch = (tree.scalar(anim_paths::FALL_SPEED).abs() * 0.01).min(6.0);
                    Vec2::new(BASE_SIZE.x - stretch * 0.5, BASE_SIZE.y + stretch)
                }
            }
        };
        sprite.custom_size = Some(size);

        sprite.color = if tree.flag(anim_paths::DIVE_READY) {
            Color::srgb(0.75, 0.9, 1.0)
        } else {
            Color::srgb(0.9, 0.9, 0.9)
        };
    }
}
