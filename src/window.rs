//! Raylib host for the controller demo.
//!
//! Owns the window and bridges device input into the ECS world:
//! keys are polled once per frame and written into
//! [`InputState`] once per fixed tick; the frame's mouse delta is triggered as
//! a single [`PointerMotion`]. The OS pointer follows [`CursorModeChanged`].

use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;
use glam::Vec3;
use raylib::prelude::{
    Camera3D, Color, KeyboardKey, RaylibDraw, RaylibDraw3D, RaylibHandle, RaylibMode3DExt,
    Vector2, Vector3,
};

use firstperson::components::globaltransform3d::GlobalTransform3d;
use firstperson::events::cursormode::CursorModeChanged;
use firstperson::events::pointermotion::PointerMotion;
use firstperson::game::{
    ControllerSnapshot, build_fps_schedule, find_look_pivot, insert_fps_resources,
    register_fps_observers, spawn_fps_controller,
};
use firstperson::resources::cursormode::CursorMode;
use firstperson::resources::gameconfig::GameConfig;
use firstperson::resources::input::{InputAction, InputState};
use firstperson::resources::staticlevel::StaticLevel;
use firstperson::resources::worldtime::FixedStep;
use firstperson::systems::time::update_world_time;

const KEY_BINDINGS: [(InputAction, KeyboardKey); 6] = [
    (InputAction::Forward, KeyboardKey::KEY_W),
    (InputAction::Backward, KeyboardKey::KEY_S),
    (InputAction::Left, KeyboardKey::KEY_A),
    (InputAction::Right, KeyboardKey::KEY_D),
    (InputAction::Jump, KeyboardKey::KEY_SPACE),
    (InputAction::ToggleCursor, KeyboardKey::KEY_ESCAPE),
];

fn v3(v: Vec3) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

/// Show or hide the OS pointer to match the new capture mode.
fn apply_cursor_mode_observer(
    trigger: On<CursorModeChanged>,
    mut rl: NonSendMut<RaylibHandle>,
) {
    match trigger.event().mode {
        CursorMode::Captured => rl.disable_cursor(),
        CursorMode::Visible => rl.enable_cursor(),
    }
}

pub fn run(config: GameConfig, spawn_point: Vec3) {
    let (window_width, window_height) = config.window_size();
    let step_hz = config.physics_fps;
    let tuning = config.tuning;

    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("First Person")
        .build();
    rl.set_target_fps(120);
    // Escape is the cursor toggle, not quit
    rl.set_exit_key(None);
    rl.disable_cursor();

    let level = StaticLevel::demo();

    let mut world = World::new();
    insert_fps_resources(&mut world, config, level.clone());
    world.insert_non_send_resource(rl);
    register_fps_observers(&mut world);
    world.spawn(Observer::new(apply_cursor_mode_observer));
    world.flush();

    let player = spawn_fps_controller(&mut world, spawn_point, tuning);
    let mut schedule = build_fps_schedule();
    let mut fixed = FixedStep::from_hz(step_hz);

    log::info!("Window {}x{}, simulation at {} Hz", window_width, window_height, step_hz);

    while !world.non_send_resource::<RaylibHandle>().window_should_close() {
        let (frame_dt, keys, mouse) = {
            let rl = world.non_send_resource::<RaylibHandle>();
            let keys = KEY_BINDINGS.map(|(action, key)| (action, rl.is_key_down(key)));
            (rl.get_frame_time(), keys, rl.get_mouse_delta())
        };

        if mouse.x != 0.0 || mouse.y != 0.0 {
            world.trigger(PointerMotion {
                dx: mouse.x,
                dy: mouse.y,
            });
        }

        for _ in 0..fixed.advance(frame_dt) {
            {
                let mut input = world.resource_mut::<InputState>();
                for (action, down) in keys {
                    input.set(action, down);
                }
            }
            update_world_time(&mut world, fixed.step);
            schedule.run(&mut world);
            world.clear_trackers();
        }

        draw_frame(&mut world, &thread, &level, player);
    }
}

fn draw_frame(
    world: &mut World,
    thread: &raylib::RaylibThread,
    level: &StaticLevel,
    player: Entity,
) {
    let eye = find_look_pivot(world, player)
        .and_then(|look| world.get::<GlobalTransform3d>(look))
        .copied()
        .unwrap_or_default();
    let target = eye.translation + eye.forward();
    let camera = Camera3D::perspective(
        v3(eye.translation),
        v3(target),
        Vector3::new(0.0, 1.0, 0.0),
        70.0,
    );
    let hud = ControllerSnapshot::capture(world, player).map(|s| {
        format!(
            "speed {:5.2}  y {:5.2}  floor {}  pitch {:5.1}  {:?}",
            Vec3::new(s.velocity.x, 0.0, s.velocity.z).length(),
            s.position.y,
            s.on_floor,
            s.pitch_degrees,
            s.cursor
        )
    });

    let mut rl = world.non_send_resource_mut::<RaylibHandle>();
    let mut d = rl.begin_drawing(thread);
    d.clear_background(Color::SKYBLUE);
    {
        let mut d3 = d.begin_mode3D(camera);
        d3.draw_plane(Vector3::zero(), Vector2::new(60.0, 60.0), Color::DARKGREEN);
        for aabb in level.boxes() {
            let center = aabb.center();
            let size = aabb.size();
            d3.draw_cube(v3(center), size.x, size.y, size.z, Color::BEIGE);
            d3.draw_cube_wires(v3(center), size.x, size.y, size.z, Color::DARKBROWN);
        }
    }
    d.draw_fps(10, 10);
    if let Some(text) = hud {
        d.draw_text(&text, 10, 34, 20, Color::BLACK);
    }
}
