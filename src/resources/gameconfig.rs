//! Game configuration resource.
//!
//! Manages controller tuning and host window settings loaded from an INI
//! configuration file. Provides defaults for safe startup and methods to
//! load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [movement]
//! gravity = -50.8
//! max_speed = 20
//! jump_speed = 18
//! accel = 4.5
//! deaccel = 16
//! max_slope_angle = 40
//!
//! [look]
//! mouse_sensitivity = 0.15
//!
//! [window]
//! width = 1280
//! height = 720
//! physics_fps = 60
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::fpscontroller::ControllerTuning;
use crate::resources::worldtime::DEFAULT_PHYSICS_FPS;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores the controller tuning handed to newly spawned controllers plus the
/// window and simulation-rate settings the host reads at startup.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Tuning for controllers spawned from this configuration.
    pub tuning: ControllerTuning,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Fixed simulation ticks per second.
    pub physics_fps: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tuning: ControllerTuning::default(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            physics_fps: DEFAULT_PHYSICS_FPS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [movement] section
        let mut tuning = self.tuning;
        read_tuning(config, "movement", "gravity", &mut tuning, |t, v| t.gravity = v);
        read_tuning(config, "movement", "max_speed", &mut tuning, |t, v| t.max_speed = v);
        read_tuning(config, "movement", "jump_speed", &mut tuning, |t, v| t.jump_speed = v);
        read_tuning(config, "movement", "accel", &mut tuning, |t, v| t.accel = v);
        read_tuning(config, "movement", "deaccel", &mut tuning, |t, v| t.deaccel = v);
        read_tuning(config, "movement", "max_slope_angle", &mut tuning, |t, v| {
            t.max_slope_angle_deg = v
        });

        // [look] section
        read_tuning(config, "look", "mouse_sensitivity", &mut tuning, |t, v| {
            t.mouse_sensitivity = v
        });
        self.tuning = tuning;

        // [window] section
        if let Some(width) = read_u32(config, "window", "width") {
            self.window_width = width;
        }
        if let Some(height) = read_u32(config, "window", "height") {
            self.window_height = height;
        }
        match read_u32(config, "window", "physics_fps") {
            Some(0) => warn!("Ignoring window.physics_fps = 0"),
            Some(fps) => self.physics_fps = fps,
            None => {}
        }

        info!(
            "Loaded config: gravity={}, max_speed={}, jump_speed={}, accel={}, deaccel={}, max_slope={}, sensitivity={}, {}x{} window, physics_fps={}",
            self.tuning.gravity,
            self.tuning.max_speed,
            self.tuning.jump_speed,
            self.tuning.accel,
            self.tuning.deaccel,
            self.tuning.max_slope_angle_deg,
            self.tuning.mouse_sensitivity,
            self.window_width,
            self.window_height,
            self.physics_fps
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Render the configuration as INI text.
    pub fn to_ini_string(&self) -> String {
        self.to_ini().writes()
    }

    fn to_ini(&self) -> Ini {
        let mut config = Ini::new();
        let t = &self.tuning;

        // [movement] section
        config.set("movement", "gravity", Some(t.gravity.to_string()));
        config.set("movement", "max_speed", Some(t.max_speed.to_string()));
        config.set("movement", "jump_speed", Some(t.jump_speed.to_string()));
        config.set("movement", "accel", Some(t.accel.to_string()));
        config.set("movement", "deaccel", Some(t.deaccel.to_string()));
        config.set(
            "movement",
            "max_slope_angle",
            Some(t.max_slope_angle_deg.to_string()),
        );

        // [look] section
        config.set("look", "mouse_sensitivity", Some(t.mouse_sensitivity.to_string()));

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "physics_fps", Some(self.physics_fps.to_string()));

        config
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

/// Read one unsigned key that must fit in a `u32`.
fn read_u32(config: &Ini, section: &str, key: &str) -> Option<u32> {
    let value = match config.getuint(section, key) {
        Ok(Some(v)) => v,
        Ok(None) => return None,
        Err(e) => {
            warn!("Ignoring {}.{}: {}", section, key, e);
            return None;
        }
    };
    match u32::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring {}.{} = {}: out of range", section, key, value);
            None
        }
    }
}

/// Read one float key into `tuning`, keeping the previous value when the key is
/// missing, unparsable, or produces an invalid tuning.
fn read_tuning(
    config: &Ini,
    section: &str,
    key: &str,
    tuning: &mut ControllerTuning,
    apply: impl Fn(&mut ControllerTuning, f32),
) {
    let value = match config.getfloat(section, key) {
        Ok(Some(v)) => v as f32,
        Ok(None) => return,
        Err(e) => {
            warn!("Ignoring {}.{}: {}", section, key, e);
            return;
        }
    };
    let mut candidate = *tuning;
    apply(&mut candidate, value);
    match candidate.validate() {
        Ok(()) => *tuning = candidate,
        Err(e) => warn!("Ignoring {}.{}: {}", section, key, e),
    }
}
