//! Effects domain: particle bursts for jump, land, and dive.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;
use rand::Rng;

use crate::controller::EffectKind;

/// Fired by the motor step when the controller requests an effect
#[derive(Debug)]
pub struct EffectTriggered {
    pub kind: EffectKind,
    pub at: Vec2,
}

impl Message for EffectTriggered {}

/// A single burst particle, integrated until its lifetime runs out.
#[derive(Component, Debug)]
struct Particle {
    velocity: Vec2,
    lifetime: f32,
    max_lifetime: f32,
}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<EffectTriggered>()
            .add_systems(Update, (spawn_bursts, integrate_particles).chain());
    }
}

struct BurstSpec {
    count: u32,
    color: Color,
    speed: f32,
    lifetime: f32,
    /// Center of the emission arc, radians, 0 = +x.
    arc_center: f32,
    arc_width: f32,
}

fn burst_spec(kind: EffectKind) -> BurstSpec {
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    match kind {
        // Kicked-up dust pushed downward out of the feet.
        EffectKind::Jump => BurstSpec {
            count: 8,
            color: Color::srgb(0.85, 0.85, 0.8),
            speed: 120.0,
            lifetime: 0.35,
            arc_center: -FRAC_PI_2,
            arc_width: PI * 0.6,
        },
        // Flat puff spreading sideways along the ground.
        EffectKind::Land => BurstSpec {
            count: 12,
            color: Color::srgb(0.7, 0.68, 0.6),
            speed: 90.0,
            lifetime: 0.4,
            arc_center: 0.0,
            arc_width: TAU,
        },
        EffectKind::Dive => BurstSpec {
            count: 16,
            color: Color::srgb(0.6, 0.85, 1.0),
            speed: 160.0,
            lifetime: 0.5,
            arc_center: 0.0,
            arc_width: TAU,
        },
    }
}

fn spawn_bursts(mut commands: Commands, mut triggers: MessageReader<EffectTriggered>) {
    let mut rng = rand::rng();

    for trigger in triggers.read() {
        let spec = burst_spec(trigger.kind);

        for _ in 0..spec.count {
            let angle =
                spec.arc_center + rng.random_range(-spec.arc_width / 2.0..=spec.arc_width / 2.0);
            let speed = spec.speed * rng.random_range(0.5..=1.0);
            let lifetime = spec.lifetime * rng.random_range(0.7..=1.0);

            commands.spawn((
                Particle {
                    velocity: Vec2::from_angle(angle) * speed,
                    lifetime,
                    max_lifetime: lifetime,
                },
                Sprite {
                    color: spec.color,
                    custom_size: Some(Vec2::splat(3.0)),
                    ..default()
                },
                Transform::from_translation(trigger.at.extend(5.0)),
            ));
        }
    }
}

fn integrate_particles(
    time: Res<Time>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut Particle, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut particle, mut transform, mut sprite) in &mut query {
        particle.lifetime -= dt;
        if particle.lifetime <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }

        let step = particle.velocity * dt;
        transform.translation.x += step.x;
        transform.translation.y += step.y;
        particle.velocity *= 0.9_f32.powf(dt * 60.0);

        let alpha = particle.lifetime / particle.max_lifetime;
        sprite.color = sprite.color.with_alpha(alpha);
    }
}
