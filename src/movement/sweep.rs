//! Movement domain: kinematic sweep-and-slide over avian2d shape casts.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::controller::{DEFAULT_MAX_SLIDES, MotionResolver};
use crate::movement::GameLayer;

/// Gap kept from surfaces to avoid re-penetrating them next step.
const SKIN: f32 = 0.1;

/// Motion below this length is considered consumed.
const MOTION_EPSILON: f32 = 1e-4;

/// Hits whose normal is inside this cone around up count as floor.
/// cos(45°), matching the walkable slope limit.
const FLOOR_MIN_DOT: f32 = 0.7;

/// Reach of the post-sweep resting contact check. Must exceed the skin,
/// which is how far above a surface the character is held while resting.
const GROUND_TOLERANCE: f32 = SKIN * 2.0;

/// Sweeps a character collider through the level, sliding along whatever
/// it hits, and remembers whether any hit counted as floor contact.
///
/// The controller core hands velocities in screen coordinates (+y down);
/// this adapter converts to world coordinates (+y up) at the boundary and
/// applies the resolved motion to the entity's `Transform`.
pub(crate) struct SweepAndSlide<'w, 's, 'a> {
    spatial: &'a SpatialQuery<'w, 's>,
    transform: &'a mut Transform,
    collider: &'a Collider,
    delta: f32,
    on_floor: bool,
}

impl<'w, 's, 'a> SweepAndSlide<'w, 's, 'a> {
    pub(crate) fn new(
        spatial: &'a SpatialQuery<'w, 's>,
        transform: &'a mut Transform,
        collider: &'a Collider,
        delta: f32,
    ) -> Self {
        Self {
            spatial,
            transform,
            collider,
            delta,
            on_floor: false,
        }
    }
}

/// Remove the motion component pointing into the surface.
fn slide(motion: Vec2, normal: Vec2) -> Vec2 {
    motion - normal * motion.dot(normal)
}

impl MotionResolver for SweepAndSlide<'_, '_, '_> {
    fn resolve_motion(&mut self, velocity: Vec2, up: Vec2, max_slides: Option<u32>) -> Vec2 {
        let max_slides = max_slides.unwrap_or(DEFAULT_MAX_SLIDES);
        let world_up = Vec2::new(up.x, -up.y);
        let mut world_velocity = Vec2::new(velocity.x, -velocity.y);

        let filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
        let mut position = self.transform.translation.truncate();
        let mut remaining = world_velocity * self.delta;
        self.on_floor = false;

        for _ in 0..max_slides {
            let distance = remaining.length();
            if distance <= MOTION_EPSILON {
                break;
            }
            let Ok(direction) = Dir2::new(remaining / distance) else {
                break;
            };

            // Cast one skin past the requested motion: a surface we are
            // resting against (held a skin away) must still register as
            // contact even when the step's motion is shorter than the skin.
            let config = ShapeCastConfig::from_max_distance(distance + SKIN);
            // Characters are rotation-locked, so the cast shape stays upright.
            let hit =
                self.spatial
                    .cast_shape(self.collider, position, 0.0, direction, &config, &filter);

            match hit {
                None => {
                    position += remaining;
                    break;
                }
                Some(hit) => {
                    let travel = (hit.distance - SKIN).max(0.0).min(distance);
                    position += *direction * travel;

                    // normal1 is the surface normal pointing out of the hit
                    // collider.
                    let normal = hit.normal1;
                    if normal.dot(world_up) > FLOOR_MIN_DOT {
                        self.on_floor = true;
                    }

                    remaining = slide(remaining - *direction * travel, normal);
                    world_velocity = slide(world_velocity, normal);
                }
            }
        }

        // Resting contact check: the character is held a skin above any
        // surface it stands on, and a mostly-horizontal sweep never closes
        // that gap, so slide hits alone cannot report sustained contact.
        if !self.on_floor {
            if let Ok(down) = Dir2::new(-world_up) {
                let config = ShapeCastConfig::from_max_distance(GROUND_TOLERANCE);
                if let Some(hit) =
                    self.spatial
                        .cast_shape(self.collider, position, 0.0, down, &config, &filter)
                    && hit.normal1.dot(world_up) > FLOOR_MIN_DOT
                {
                    self.on_floor = true;
                }
            }
        }

        self.transform.translation.x = position.x;
        self.transform.translation.y = position.y;

        Vec2::new(world_velocity.x, -world_velocity.y)
    }

    fn is_on_floor(&self) -> bool {
        self.on_floor
    }
}

#[cfg(test)]
mod tests {
    use avian2d::prelude::*;
    use bevy::asset::AssetPlugin;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::prelude::*;
    use bevy::scene::ScenePlugin;
    use bevy::transform::TransformPlugin;

    use super::{SKIN, SweepAndSlide, slide};
    use crate::controller::{MotionResolver, UP};
    use crate::movement::GameLayer;

    #[test]
    fn slide_removes_the_normal_component() {
        let motion = Vec2::new(3.0, -2.0);
        let floor_normal = Vec2::Y;

        let slid = slide(motion, floor_normal);

        assert_eq!(slid, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn slide_keeps_motion_parallel_to_surface() {
        let motion = Vec2::new(1.0, 0.0);
        let floor_normal = Vec2::Y;

        assert_eq!(slide(motion, floor_normal), motion);
    }

    const FLOOR_TOP: f32 = -180.0;
    const PLAYER_HALF_HEIGHT: f32 = 24.0;
    /// Center height of a character standing on the floor.
    const REST_Y: f32 = FLOOR_TOP + PLAYER_HALF_HEIGHT + SKIN;

    /// Headless app with one static floor, its top edge at `FLOOR_TOP`.
    fn floor_app() -> App {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            TransformPlugin,
            AssetPlugin::default(),
            ScenePlugin,
            PhysicsPlugins::default(),
        ));

        app.world_mut().spawn((
            RigidBody::Static,
            Collider::rectangle(800.0, 40.0),
            Transform::from_xyz(0.0, -200.0, 0.0),
            Position::from_xy(0.0, -200.0),
            CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
        ));
        app.update();
        app
    }

    /// Run one resolve from `start` with the given screen-space velocity.
    /// Returns (final position, floor contact, corrected velocity).
    fn resolve_from(app: &mut App, start: Vec2, velocity: Vec2, delta: f32) -> (Vec2, bool, Vec2) {
        app.world_mut()
            .run_system_once(move |mut spatial: SpatialQuery| {
                spatial.update_pipeline();

                let mut transform = Transform::from_xyz(start.x, start.y, 0.0);
                let collider = Collider::rectangle(24.0, 48.0);
                let mut resolver = SweepAndSlide::new(&spatial, &mut transform, &collider, delta);

                let corrected = resolver.resolve_motion(velocity, UP, None);
                let on_floor = resolver.is_on_floor();
                (transform.translation.truncate(), on_floor, corrected)
            })
            .expect("resolve system should run")
    }

    #[test]
    fn landing_on_a_floor_reports_contact() {
        let mut app = floor_app();

        // A hard fall: 140 px of motion from 56 px above rest height.
        let start = Vec2::new(0.0, REST_Y + 56.0 - SKIN);
        let (position, on_floor, velocity) =
            resolve_from(&mut app, start, Vec2::new(0.0, 700.0), 0.2);

        assert!(on_floor, "a floor hit must count as floor contact");
        assert!(
            (position.y - REST_Y).abs() < 0.01,
            "landing stops a skin above the floor, got y={}",
            position.y
        );
        assert_eq!(velocity.y, 0.0, "downward motion slides out at the floor");
    }

    #[test]
    fn grounded_bias_keeps_floor_contact_while_resting() {
        let mut app = floor_app();

        // Resting position, stepped with only the small downward bias
        // whose motion is far shorter than the skin gap.
        let start = Vec2::new(0.0, REST_Y);
        let (position, on_floor, _velocity) =
            resolve_from(&mut app, start, Vec2::new(0.0, 1.0), 1.0 / 60.0);

        assert!(on_floor, "resting contact must persist under the bias");
        assert!(
            (position.y - REST_Y).abs() < 0.01,
            "the bias must not sink the character, got y={}",
            position.y
        );
    }

    #[test]
    fn running_along_the_floor_keeps_contact_and_speed() {
        let mut app = floor_app();

        let start = Vec2::new(0.0, REST_Y);
        let (position, on_floor, velocity) =
            resolve_from(&mut app, start, Vec2::new(300.0, 1.0), 1.0 / 60.0);

        assert!(on_floor);
        assert!(position.x > 0.0, "horizontal motion must not be eaten");
        assert_eq!(velocity.x, 300.0);
    }
}
