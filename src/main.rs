//! First-person controller demo entry point.
//!
//! Built on:
//! - **bevy_ecs** for the entity-component-system world and schedule
//! - **glam** for vector and rotation math
//! - **raylib** (optional `raylib` feature) for the window, input, and 3D view
//!
//! # Modes
//!
//! - Windowed (needs `--features raylib`): walk around a small walled level
//!   with WASD, Space to jump, mouse to look, Escape to free the pointer.
//! - `--headless TICKS`: run a scripted walk with seeded pointer jitter and
//!   print JSON snapshots of the controller to stdout.
//! - `--write-config [PATH]`: write the effective INI configuration and exit.
//!
//! # Running
//!
//! ```sh
//! cargo run --release --features raylib
//! cargo run --release -- --headless 600 --seed 7
//! ```

#[cfg(feature = "raylib")]
mod window;

use bevy_ecs::prelude::*;
use clap::Parser;
use firstperson::events::pointermotion::PointerMotion;
use firstperson::game::{
    ControllerSnapshot, build_fps_schedule, insert_fps_resources, register_fps_observers,
    spawn_fps_controller,
};
use firstperson::resources::gameconfig::GameConfig;
use firstperson::resources::input::{InputAction, InputState};
use firstperson::resources::staticlevel::StaticLevel;
use firstperson::systems::time::update_world_time;
use glam::Vec3;
use std::path::PathBuf;

/// Where the demo player starts: standing on the floor of the demo level.
const SPAWN_POINT: Vec3 = Vec3::new(0.0, 0.5, 0.0);

/// First-person character controller demo
#[derive(Parser)]
#[command(version, about = "First-person character controller on an ECS tick")]
struct Cli {
    /// INI configuration file to load (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective configuration as INI and exit.
    /// Optionally provide a path (default: the --config path).
    #[arg(long, value_name = "PATH")]
    write_config: Option<Option<PathBuf>>,

    /// Run this many fixed ticks without a window and print snapshots.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u32>,

    /// Seed for the headless pointer jitter.
    #[arg(long, value_name = "N", default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }

    // Early-exit: write the configuration and quit (no window needed)
    if let Some(maybe_path) = cli.write_config {
        if let Some(path) = maybe_path {
            config.config_path = path;
        }
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Configuration written to {}", config.config_path.display());
        return;
    }

    if let Some(ticks) = cli.headless {
        run_headless(config, ticks, cli.seed);
        return;
    }

    run_windowed(config);
}

/// Held actions for one tick of the headless walk.
///
/// The run is split in quarters: forward, strafe right, forward-right
/// diagonal, then backward. Jump is tapped every 90 ticks and the pointer
/// capture is toggled off and back on during the last quarter.
fn scripted_actions(tick: u32, total: u32) -> [(InputAction, bool); 6] {
    let (tick, total) = (u64::from(tick), u64::from(total));
    let quarter = (tick * 4 / total.max(1)).min(3);
    [
        (InputAction::Forward, quarter == 0 || quarter == 2),
        (InputAction::Backward, quarter == 3),
        (InputAction::Left, false),
        (InputAction::Right, quarter == 1 || quarter == 2),
        (InputAction::Jump, tick % 90 == 30),
        (
            InputAction::ToggleCursor,
            tick == total * 3 / 4 || tick == total * 7 / 8,
        ),
    ]
}

fn run_headless(config: GameConfig, ticks: u32, seed: u64) {
    log::info!("Headless run: {} ticks at {} Hz, seed {}", ticks, config.physics_fps, seed);

    let dt = 1.0 / config.physics_fps.max(1) as f32;
    let log_every = (config.physics_fps / 4).max(1);
    let tuning = config.tuning;

    let mut world = World::new();
    insert_fps_resources(&mut world, config, StaticLevel::demo());
    register_fps_observers(&mut world);
    let player = spawn_fps_controller(&mut world, SPAWN_POINT, tuning);

    let mut schedule = build_fps_schedule();
    let mut rng = fastrand::Rng::with_seed(seed);

    for tick in 0..ticks {
        world.trigger(PointerMotion {
            dx: (rng.f32() * 2.0 - 1.0) * 8.0,
            dy: (rng.f32() * 2.0 - 1.0) * 4.0,
        });

        {
            let mut input = world.resource_mut::<InputState>();
            for (action, down) in scripted_actions(tick, ticks) {
                input.set(action, down);
            }
        }

        update_world_time(&mut world, dt);
        schedule.run(&mut world);
        world.clear_trackers();

        if tick % log_every == 0 || tick + 1 == ticks {
            print_snapshot(&world, player);
        }
    }
}

fn print_snapshot(world: &World, player: Entity) {
    let Some(snapshot) = ControllerSnapshot::capture(world, player) else {
        log::error!("Controller {:?} is gone", player);
        return;
    };
    match serde_json::to_string(&snapshot) {
        Ok(line) => println!("{line}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(feature = "raylib")]
fn run_windowed(config: GameConfig) {
    window::run(config, SPAWN_POINT);
}

#[cfg(not(feature = "raylib"))]
fn run_windowed(_config: GameConfig) {
    eprintln!("Error: built without the `raylib` feature; use --headless TICKS");
    std::process::exit(1);
}
