//! Scene wiring for the first-person controller.
//!
//! Hosts (the windowed demo, the headless runner, integration tests) build
//! their world through these helpers so they share one tick order:
//!
//! 1. [`propagate_transforms`]: refresh world-space poses after mouse-look
//! 2. [`sample_fps_input`]: input to [`MoveIntent`], jump impulse, cursor toggle
//! 3. [`integrate_fps_velocity`]: gravity, acceleration, slide-move
//! 4. [`propagate_transforms`]: publish the moved body and camera to the host
//!
//! Pointer motion is not part of the schedule. Hosts trigger
//! [`PointerMotion`](crate::events::pointermotion::PointerMotion) between
//! ticks and the observer registered by [`register_fps_observers`] applies it.

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::{EulerRot, Vec3};
use serde::Serialize;

use crate::components::characterbody::CharacterBody;
use crate::components::fpscontroller::{ControllerTuning, FpsController, LookPitch, MoveIntent};
use crate::components::globaltransform3d::GlobalTransform3d;
use crate::components::transform3d::Transform3d;
use crate::events::cursormode::toggle_cursor_observer;
use crate::events::pointermotion::mouse_look_observer;
use crate::resources::collision::{CollisionWorld, SlideMover};
use crate::resources::cursormode::CursorMode;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::systems::fpsinput::sample_fps_input;
use crate::systems::fpsmovement::integrate_fps_velocity;
use crate::systems::propagate_transforms::propagate_transforms;

/// Height of the camera pivot above the body origin.
pub const EYE_HEIGHT: f32 = 0.6;

/// Insert every resource the controller schedule reads.
///
/// `GameConfig` is inserted as-is; the collision collaborator is wrapped in a
/// [`CollisionWorld`].
pub fn insert_fps_resources(world: &mut World, config: GameConfig, mover: impl SlideMover + 'static) {
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(CursorMode::default());
    world.insert_resource(config);
    world.insert_resource(CollisionWorld::new(mover));
}

/// Register the mouse-look and cursor-toggle observers.
pub fn register_fps_observers(world: &mut World) {
    world.spawn(Observer::new(mouse_look_observer));
    world.spawn(Observer::new(toggle_cursor_observer));
    // Observers must exist before the first tick triggers anything.
    world.flush();
}

/// Build the per-tick controller schedule.
pub fn build_fps_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            propagate_transforms,
            sample_fps_input,
            integrate_fps_velocity,
            propagate_transforms,
        )
            .chain(),
    );
    schedule
}

/// Spawn a controller body at `position` with its pitch pivot child.
///
/// Returns the body entity; the [`LookPitch`] child sits [`EYE_HEIGHT`] above
/// it and carries the camera.
pub fn spawn_fps_controller(world: &mut World, position: Vec3, tuning: ControllerTuning) -> Entity {
    let body = world
        .spawn((
            FpsController::new(tuning),
            CharacterBody::new(),
            MoveIntent::default(),
            Transform3d::from_translation(position),
            GlobalTransform3d {
                translation: position,
                ..Default::default()
            },
        ))
        .id();

    world.spawn((
        LookPitch,
        Transform3d::from_xyz(0.0, EYE_HEIGHT, 0.0),
        GlobalTransform3d {
            translation: position + Vec3::Y * EYE_HEIGHT,
            ..Default::default()
        },
        ChildOf(body),
    ));
    world.flush();

    body
}

/// The [`LookPitch`] child of a controller body, if it has one.
pub fn find_look_pivot(world: &World, body: Entity) -> Option<Entity> {
    let children = world.get::<Children>(body)?;
    children
        .iter()
        .find(|&child| world.get::<LookPitch>(child).is_some())
}

/// Serializable view of one controller, printed by the headless runner.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerSnapshot {
    pub tick: u64,
    pub position: Vec3,
    pub velocity: Vec3,
    pub on_floor: bool,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub cursor: CursorMode,
}

impl ControllerSnapshot {
    /// Capture the current state of `body`. `None` if it is not a controller.
    pub fn capture(world: &World, body: Entity) -> Option<Self> {
        let transform = world.get::<Transform3d>(body)?;
        let character = world.get::<CharacterBody>(body)?;
        let pitch_degrees = find_look_pivot(world, body)
            .and_then(|look| world.get::<Transform3d>(look))
            .map(|t| t.rotation_degrees().x)
            .unwrap_or(0.0);
        let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);

        Some(Self {
            tick: world
                .get_resource::<WorldTime>()
                .map(|t| t.frame_count)
                .unwrap_or(0),
            position: transform.translation,
            velocity: character.velocity,
            on_floor: character.on_floor,
            yaw_degrees: yaw.to_degrees(),
            pitch_degrees,
            cursor: world
                .get_resource::<CursorMode>()
                .copied()
                .unwrap_or_default(),
        })
    }
}
