//! Movement domain: the fixed-step motor update.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::animation::AnimTree;
use crate::controller::{EffectKind, EffectsSink};
use crate::effects::EffectTriggered;
use crate::movement::sweep::SweepAndSlide;
use crate::movement::{CharacterMotor, ControllerInput, DiveRequested, JumpReleased, Player};

/// Effects fired during one motor step, flushed to messages afterwards so
/// the burst spawns at the post-motion position.
#[derive(Default)]
struct CollectedEffects(Vec<EffectKind>);

impl EffectsSink for CollectedEffects {
    fn restart(&mut self, effect: EffectKind) {
        self.0.push(effect);
    }
}

/// Drives every [`CharacterMotor`] one physics tick: edge events first
/// (synchronously, so they mutate state before integration), then the
/// controller update against the avian sweep resolver.
pub(crate) fn step_motor(
    time: Res<Time>,
    mut input: ResMut<ControllerInput>,
    mut jump_released: MessageReader<JumpReleased>,
    mut dive_requested: MessageReader<DiveRequested>,
    spatial_query: SpatialQuery,
    mut effects: MessageWriter<EffectTriggered>,
    mut query: Query<
        (
            &mut Transform,
            &Collider,
            &mut CharacterMotor,
            &mut AnimTree,
            &mut Sprite,
        ),
        With<Player>,
    >,
) {
    let delta = time.delta_secs();
    let cancel_requested = jump_released.read().count() > 0;
    let dives: Vec<_> = dive_requested.read().map(|m| m.0).collect();

    for (mut transform, collider, mut motor, mut anim, mut sprite) in &mut query {
        let horizontal = input.axis.x;
        let mut fx = CollectedEffects::default();

        if cancel_requested {
            motor.controller.cancel_jump();
        }
        for direction in &dives {
            motor
                .controller
                .dive(*direction, horizontal, &mut *anim, &mut fx);
        }

        let was_grounded = motor.controller.is_grounded();

        {
            let mut resolver =
                SweepAndSlide::new(&spatial_query, &mut transform, collider, delta);
            motor.controller.update(
                delta,
                horizontal,
                &mut *input,
                &mut resolver,
                &mut *anim,
                &mut fx,
            );
        }

        // Dive policy: each airborne phase carries one dive. The core only
        // consumes and clears; granting is ours.
        if was_grounded && !motor.controller.is_grounded() {
            motor.controller.grant_dive(&mut *anim);
            debug!("Left ground: dive granted");
        } else if !was_grounded && motor.controller.is_grounded() {
            debug!("Landed: velocity={:?}", motor.controller.velocity());
        }

        sprite.flip_x = motor.controller.facing_left();

        let at = transform.translation.truncate();
        for kind in fx.0 {
            effects.write(EffectTriggered { kind, at });
        }
    }
}
