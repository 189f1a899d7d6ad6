//! Controller tick integration tests: input sampling, integration, and the
//! slide-move hand-off run through the real schedule.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test controller_tick_integration
//! ```

use bevy_ecs::prelude::*;
use glam::Vec3;

use firstperson::components::characterbody::CharacterBody;
use firstperson::components::fpscontroller::{ControllerTuning, MoveIntent};
use firstperson::components::transform3d::Transform3d;
use firstperson::events::pointermotion::PointerMotion;
use firstperson::game::{
    ControllerSnapshot, build_fps_schedule, insert_fps_resources, register_fps_observers,
    spawn_fps_controller,
};
use firstperson::resources::collision::{CollisionWorld, OpenSpace};
use firstperson::resources::cursormode::CursorMode;
use firstperson::resources::gameconfig::GameConfig;
use firstperson::resources::input::{InputAction, InputState};
use firstperson::resources::staticlevel::StaticLevel;
use firstperson::systems::time::update_world_time;

const EPSILON: f32 = 1e-4;
const DT: f32 = 1.0 / 60.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(mover_level: Option<StaticLevel>) -> World {
    let mut world = World::new();
    match mover_level {
        Some(level) => insert_fps_resources(&mut world, GameConfig::new(), level),
        None => insert_fps_resources(&mut world, GameConfig::new(), OpenSpace),
    }
    register_fps_observers(&mut world);
    world
}

fn hold(world: &mut World, held: &[InputAction]) {
    let mut input = world.resource_mut::<InputState>();
    for action in InputAction::ALL {
        input.set(action, held.contains(&action));
    }
}

fn run_ticks(world: &mut World, schedule: &mut Schedule, held: &[InputAction], dt: f32, n: u32) {
    for _ in 0..n {
        hold(world, held);
        update_world_time(world, dt);
        schedule.run(world);
        world.clear_trackers();
    }
}

fn weightless() -> ControllerTuning {
    ControllerTuning {
        gravity: 0.0,
        ..Default::default()
    }
}

// =============================================================================
// Input sampling
// =============================================================================

#[test]
fn no_keys_gives_zero_intent() {
    let mut world = make_world(None);
    let body = spawn_fps_controller(&mut world, Vec3::ZERO, weightless());
    let mut schedule = build_fps_schedule();

    run_ticks(&mut world, &mut schedule, &[], DT, 1);

    let intent = world.get::<MoveIntent>(body).unwrap();
    assert_eq!(intent.direction, Vec3::ZERO);
    let body = world.get::<CharacterBody>(body).unwrap();
    assert!(!body.velocity.is_nan());
    assert_eq!(body.horizontal_velocity(), Vec3::ZERO);
}

#[test]
fn opposing_keys_cancel() {
    let mut world = make_world(None);
    let body = spawn_fps_controller(&mut world, Vec3::ZERO, weightless());
    let mut schedule = build_fps_schedule();

    run_ticks(
        &mut world,
        &mut schedule,
        &[InputAction::Forward, InputAction::Backward, InputAction::Left, InputAction::Right],
        DT,
        1,
    );

    assert_eq!(world.get::<MoveIntent>(body).unwrap().direction, Vec3::ZERO);
}

#[test]
fn cardinal_keys_map_to_world_axes() {
    let cases = [
        (InputAction::Forward, Vec3::NEG_Z),
        (InputAction::Backward, Vec3::Z),
        (InputAction::Left, Vec3::NEG_X),
        (InputAction::Right, Vec3::X),
    ];
    for (action, expected) in cases {
        let mut world = make_world(None);
        let body = spawn_fps_controller(&mut world, Vec3::ZERO, weightless());
        let mut schedule = build_fps_schedule();

        run_ticks(&mut world, &mut schedule, &[action], DT, 1);

        let dir = world.get::<MoveIntent>(body).unwrap().direction;
        assert!(dir.abs_diff_eq(expected, EPSILON), "{action:?} gave {dir:?}");
    }
}

#[test]
fn forward_follows_body_yaw() {
    let mut world = make_world(None);
    let tuning = weightless();
    let body = spawn_fps_controller(&mut world, Vec3::ZERO, tuning);
    let mut schedule = build_fps_schedule();

    // Moving the pointer left by 90° worth of device units turns the body left.
    world.trigger(PointerMotion {
        dx: -90.0 / tuning.mouse_sensitivity,
        dy: 0.0,
    });
    run_ticks(&mut world, &mut schedule, &[InputAction::Forward], DT, 1);

    let dir = world.get::<MoveIntent>(body).unwrap().direction;
    assert!(dir.abs_diff_eq(Vec3::NEG_X, 1e-3), "got {dir:?}");
    let v = world.get::<CharacterBody>(body).unwrap().velocity;
    assert!(v.x < 0.0);
    assert!(v.z.abs() < 1e-3);
}

#[test]
fn looking_down_does_not_slow_walking() {
    let level_speed = {
        let mut world = make_world(None);
        let body = spawn_fps_controller(&mut world, Vec3::ZERO, weightless());
        let mut schedule = build_fps_schedule();
        run_ticks(&mut world, &mut schedule, &[InputAction::Forward], DT, 1);
        world.get::<CharacterBody>(body).unwrap().horizontal_speed()
    };

    let mut world = make_world(None);
    let tuning = weightless();
    let body = spawn_fps_controller(&mut world, Vec3::ZERO, tuning);
    let mut schedule = build_fps_schedule();
    world.trigger(PointerMotion {
        dx: 0.0,
        dy: 60.0 / tuning.mouse_sensitivity,
    });
    run_ticks(&mut world, &mut schedule, &[InputAction::Forward], DT, 1);

    let body = world.get::<CharacterBody>(body).unwrap();
    assert!(approx_eq(body.horizontal_speed(), level_speed));
    assert!(approx_eq(body.velocity.y, 0.0));
    // 20 * 4.5 / 60
    assert!(approx_eq(level_speed, 1.5));
}

// =============================================================================
// Integration
// =============================================================================

#[test]
fn full_step_reaches_target_velocity() {
    let mut world = make_world(None);
    let tuning = ControllerTuning {
        max_speed: 10.0,
        accel: 5.0,
        gravity: 0.0,
        ..Default::default()
    };
    let body = spawn_fps_controller(&mut world, Vec3::ZERO, tuning);
    let mut schedule = build_fps_schedule();

    run_ticks(&mut world, &mut schedule, &[InputAction::Right], 1.0, 1);

    let v = world.get::<CharacterBody>(body).unwrap().velocity;
    assert!(v.abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), EPSILON), "got {v:?}");
    let pos = world.get::<Transform3d>(body).unwrap().translation;
    assert!(pos.abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), EPSILON));
}

#[test]
fn partial_step_closes_half_the_gap() {
    let mut world = make_world(None);
    let tuning = ControllerTuning {
        max_speed: 10.0,
        accel: 5.0,
        gravity: 0.0,
        ..Default::default()
    };
    let body = spawn_fps_controller(&mut world, Vec3::ZERO, tuning);
    let mut schedule = build_fps_schedule();

    run_ticks(&mut world, &mut schedule, &[InputAction::Right], 0.1, 1);

    let v = world.get::<CharacterBody>(body).unwrap().velocity;
    assert!(v.abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), EPSILON), "got {v:?}");
}

#[test]
fn gravity_applies_in_open_space() {
    let mut world = make_world(None);
    let body = spawn_fps_controller(&mut world, Vec3::ZERO, ControllerTuning::default());
    let mut schedule = build_fps_schedule();

    run_ticks(&mut world, &mut schedule, &[], 1.0, 1);

    let body = world.get::<CharacterBody>(body).unwrap();
    assert!(approx_eq(body.velocity.y, -50.8));
    assert!(!body.on_floor);
}

#[test]
fn missing_collision_resource_falls_back_to_open_space() {
    let mut world = make_world(None);
    world.remove_resource::<CollisionWorld>();
    let body = spawn_fps_controller(&mut world, Vec3::ZERO, weightless());
    let mut schedule = build_fps_schedule();

    run_ticks(&mut world, &mut schedule, &[InputAction::Forward], DT, 10);

    let pos = world.get::<Transform3d>(body).unwrap().translation;
    assert!(pos.z < 0.0);
}

// =============================================================================
// Slide-move against the static level
// =============================================================================

#[test]
fn body_rests_on_floor() {
    let mut world = make_world(Some(StaticLevel::new(0.5).with_floor(0.0)));
    let body = spawn_fps_controller(&mut world, Vec3::new(0.0, 0.5, 0.0), ControllerTuning::default());
    let mut schedule = build_fps_schedule();

    run_ticks(&mut world, &mut schedule, &[], DT, 120);

    let state = world.get::<CharacterBody>(body).unwrap();
    assert!(state.on_floor);
    assert!(approx_eq(state.velocity.y, 0.0));
    let pos = world.get::<Transform3d>(body).unwrap().translation;
    assert!((pos.y - 0.5).abs() < 1e-3, "sank to {}", pos.y);
}

#[test]
fn falling_body_lands() {
    let mut world = make_world(Some(StaticLevel::new(0.5).with_floor(0.0)));
    let body = spawn_fps_controller(&mut world, Vec3::new(0.0, 5.0, 0.0), ControllerTuning::default());
    let mut schedule = build_fps_schedule();

    run_ticks(&mut world, &mut schedule, &[], DT, 1);
    assert!(!world.get::<CharacterBody>(body).unwrap().on_floor);

    run_ticks(&mut world, &mut schedule, &[], DT, 120);
    let state = world.get::<CharacterBody>(body).unwrap();
    assert!(state.on_floor);
    assert!(state.velocity.y.abs() < 1e-3);
}

#[test]
fn jump_only_from_the_floor() {
    let mut world = make_world(Some(StaticLevel::new(0.5).with_floor(0.0)));
    let tuning = ControllerTuning::default();
    let body = spawn_fps_controller(&mut world, Vec3::new(0.0, 0.5, 0.0), tuning);
    let mut schedule = build_fps_schedule();

    // Settle so the floor flag is set.
    run_ticks(&mut world, &mut schedule, &[], DT, 2);
    run_ticks(&mut world, &mut schedule, &[InputAction::Jump], DT, 1);

    let state = *world.get::<CharacterBody>(body).unwrap();
    assert!(!state.on_floor);
    assert!(approx_eq(state.velocity.y, tuning.jump_speed + tuning.gravity * DT));

    // Still airborne: holding jump does not add another impulse.
    run_ticks(&mut world, &mut schedule, &[InputAction::Jump], DT, 1);
    let next = world.get::<CharacterBody>(body).unwrap().velocity.y;
    assert!(approx_eq(next, state.velocity.y + tuning.gravity * DT));
}

#[test]
fn no_jump_while_airborne() {
    let mut world = make_world(None);
    let tuning = ControllerTuning::default();
    let body = spawn_fps_controller(&mut world, Vec3::new(0.0, 10.0, 0.0), tuning);
    let mut schedule = build_fps_schedule();

    run_ticks(&mut world, &mut schedule, &[InputAction::Jump], DT, 1);

    let v = world.get::<CharacterBody>(body).unwrap().velocity;
    assert!(approx_eq(v.y, tuning.gravity * DT));
}

#[test]
fn wall_stops_motion_into_it() {
    let level = StaticLevel::new(0.5)
        .with_floor(0.0)
        .with_box(Vec3::new(3.0, 2.0, 0.0), Vec3::new(0.5, 2.0, 10.0));
    let mut world = make_world(Some(level));
    let body = spawn_fps_controller(&mut world, Vec3::new(0.0, 0.5, 0.0), ControllerTuning::default());
    let mut schedule = build_fps_schedule();

    run_ticks(&mut world, &mut schedule, &[InputAction::Right], DT, 180);

    let pos = world.get::<Transform3d>(body).unwrap().translation;
    // Wall face at x = 2.5, body radius 0.5
    assert!(pos.x <= 2.0 + 1e-3, "passed the wall: {pos:?}");
    assert!(pos.x > 1.9);
    let v = world.get::<CharacterBody>(body).unwrap().velocity;
    assert!(v.x.abs() < 1e-3);
    assert!(world.get::<CharacterBody>(body).unwrap().on_floor);
}

#[test]
fn wall_holds_at_low_tick_rate() {
    let level = StaticLevel::new(0.5)
        .with_floor(0.0)
        .with_box(Vec3::new(3.0, 2.0, 0.0), Vec3::new(0.5, 2.0, 10.0));
    let mut world = make_world(Some(level));
    let tuning = ControllerTuning {
        accel: 100.0,
        ..Default::default()
    };
    let body = spawn_fps_controller(&mut world, Vec3::new(0.0, 0.5, 0.0), tuning);
    let mut schedule = build_fps_schedule();

    // 10 Hz: full speed covers 2 units per tick, more than the wall is thick.
    run_ticks(&mut world, &mut schedule, &[InputAction::Right], 0.1, 20);

    let pos = world.get::<Transform3d>(body).unwrap().translation;
    assert!(pos.x <= 2.0 + 1e-3, "passed the wall: {pos:?}");
    assert!(pos.x > 1.9);
    let state = world.get::<CharacterBody>(body).unwrap();
    assert!(state.velocity.x.abs() < 1e-3);
    assert!(state.on_floor);
}

#[test]
fn wall_keeps_tangential_motion() {
    let level = StaticLevel::new(0.5)
        .with_floor(0.0)
        .with_box(Vec3::new(3.0, 2.0, 0.0), Vec3::new(0.5, 2.0, 50.0));
    let mut world = make_world(Some(level));
    let body = spawn_fps_controller(&mut world, Vec3::new(1.9, 0.5, 0.0), ControllerTuning::default());
    let mut schedule = build_fps_schedule();

    run_ticks(
        &mut world,
        &mut schedule,
        &[InputAction::Right, InputAction::Forward],
        DT,
        60,
    );

    let pos = world.get::<Transform3d>(body).unwrap().translation;
    assert!(pos.x <= 2.0 + 1e-3);
    assert!(pos.z < -1.0, "should slide along the wall: {pos:?}");
}

// =============================================================================
// Cursor capture
// =============================================================================

#[test]
fn cursor_toggle_is_edge_triggered() {
    let mut world = make_world(None);
    spawn_fps_controller(&mut world, Vec3::ZERO, weightless());
    let mut schedule = build_fps_schedule();
    assert_eq!(*world.resource::<CursorMode>(), CursorMode::Captured);

    run_ticks(&mut world, &mut schedule, &[InputAction::ToggleCursor], DT, 1);
    assert_eq!(*world.resource::<CursorMode>(), CursorMode::Visible);

    // Held: no further toggles
    run_ticks(&mut world, &mut schedule, &[InputAction::ToggleCursor], DT, 5);
    assert_eq!(*world.resource::<CursorMode>(), CursorMode::Visible);

    run_ticks(&mut world, &mut schedule, &[], DT, 1);
    run_ticks(&mut world, &mut schedule, &[InputAction::ToggleCursor], DT, 1);
    assert_eq!(*world.resource::<CursorMode>(), CursorMode::Captured);
}

#[test]
fn cursor_toggle_fires_once_for_many_controllers() {
    let mut world = make_world(None);
    for i in 0..3 {
        spawn_fps_controller(&mut world, Vec3::new(i as f32 * 5.0, 0.0, 0.0), weightless());
    }
    let mut schedule = build_fps_schedule();

    run_ticks(&mut world, &mut schedule, &[InputAction::ToggleCursor], DT, 1);
    assert_eq!(*world.resource::<CursorMode>(), CursorMode::Visible);
}

#[test]
fn look_ignored_while_cursor_visible() {
    let mut world = make_world(None);
    let body = spawn_fps_controller(&mut world, Vec3::ZERO, weightless());
    let mut schedule = build_fps_schedule();

    run_ticks(&mut world, &mut schedule, &[InputAction::ToggleCursor], DT, 1);
    let before = world.get::<Transform3d>(body).unwrap().rotation;

    world.trigger(PointerMotion { dx: 250.0, dy: -80.0 });

    let after = world.get::<Transform3d>(body).unwrap().rotation;
    assert_eq!(before, after);
    let snapshot = ControllerSnapshot::capture(&world, body).unwrap();
    assert!(approx_eq(snapshot.pitch_degrees, 0.0));
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn snapshot_serializes_to_json() {
    let mut world = make_world(Some(StaticLevel::demo()));
    let body = spawn_fps_controller(&mut world, Vec3::new(0.0, 0.5, 0.0), ControllerTuning::default());
    let mut schedule = build_fps_schedule();
    run_ticks(&mut world, &mut schedule, &[InputAction::Forward], DT, 3);

    let snapshot = ControllerSnapshot::capture(&world, body).unwrap();
    assert_eq!(snapshot.tick, 3);
    assert!(snapshot.on_floor);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["on_floor"], serde_json::Value::Bool(true));
    assert_eq!(json["cursor"], serde_json::Value::String("Captured".into()));
    assert!(json["position"].is_array());
}
