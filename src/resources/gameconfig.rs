//! Game configuration resource.
//!
//! Tuning for locomotion and the follow camera loaded from an INI file.
//! Defaults are the component defaults, so a missing file or key is never
//! fatal.
//!
//! # Configuration File Format
//!
//! ```ini
//! [locomotion]
//! walk_speed = 5.0
//! run_speed = 8.0
//! jump_height = 5.0
//! gravity = -9.81
//! rotation_speed = 10.0
//! ground_distance = 0.2
//! mapping = camera
//! mouse_sensitivity = 2.0
//! max_pitch = 80.0
//!
//! [camera]
//! normal_distance = 5.0
//! min_distance = 0.5
//! sensitivity = 2.0
//! min_vertical_angle = -40.0
//! max_vertical_angle = 80.0
//! position_smoothing = 10.0
//! rotation_smoothing = 8.0
//! radius = 0.3
//! enable_zoom = true
//! zoom_speed = 2.0
//! min_zoom = 2.0
//! max_zoom = 10.0
//!
//! [prefs]
//! path = ./prefs.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::followcamera::*;
use crate::components::locomotion::*;
use crate::resources::prefs::DEFAULT_PREFS_PATH;

pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    // [locomotion]
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_height: f32,
    pub gravity: f32,
    pub rotation_speed: f32,
    pub ground_distance: f32,
    pub mapping: InputMapping,
    pub mouse_sensitivity: f32,
    pub max_pitch: f32,
    // [camera]
    pub camera_distance: f32,
    pub camera_min_distance: f32,
    pub camera_sensitivity: f32,
    pub camera_min_vertical_angle: f32,
    pub camera_max_vertical_angle: f32,
    pub camera_position_smoothing: f32,
    pub camera_rotation_smoothing: f32,
    pub camera_radius: f32,
    pub camera_enable_zoom: bool,
    pub camera_zoom_speed: f32,
    pub camera_min_zoom: f32,
    pub camera_max_zoom: f32,
    // [prefs]
    pub prefs_path: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, target: &mut f32) {
    match config.getfloat(section, key) {
        Ok(Some(value)) => *target = value as f32,
        Ok(None) => {}
        Err(e) => warn!("Ignoring [{}] {}: {}", section, key, e),
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            walk_speed: DEFAULT_WALK_SPEED,
            run_speed: DEFAULT_RUN_SPEED,
            jump_height: DEFAULT_JUMP_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            ground_distance: DEFAULT_GROUND_DISTANCE,
            mapping: InputMapping::default(),
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            max_pitch: DEFAULT_MAX_PITCH,
            camera_distance: DEFAULT_NORMAL_DISTANCE,
            camera_min_distance: DEFAULT_MIN_DISTANCE,
            camera_sensitivity: DEFAULT_CAMERA_SENSITIVITY,
            camera_min_vertical_angle: DEFAULT_MIN_VERTICAL_ANGLE,
            camera_max_vertical_angle: DEFAULT_MAX_VERTICAL_ANGLE,
            camera_position_smoothing: DEFAULT_POSITION_SMOOTHING,
            camera_rotation_smoothing: DEFAULT_ROTATION_SMOOTHING,
            camera_radius: DEFAULT_CAMERA_RADIUS,
            camera_enable_zoom: true,
            camera_zoom_speed: DEFAULT_ZOOM_SPEED,
            camera_min_zoom: DEFAULT_MIN_ZOOM_DISTANCE,
            camera_max_zoom: DEFAULT_MAX_ZOOM_DISTANCE,
            prefs_path: PathBuf::from(DEFAULT_PREFS_PATH),
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

        info!(
            "Loaded config: walk={} run={} jump={} gravity={} mapping={:?}, camera distance={} zoom={}..{}",
            self.walk_speed,
            self.run_speed,
            self.jump_height,
            self.gravity,
            self.mapping,
            self.camera_distance,
            self.camera_min_zoom,
            self.camera_max_zoom
        );
        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [locomotion] section
        read_f32(config, "locomotion", "walk_speed", &mut self.walk_speed);
        read_f32(config, "locomotion", "run_speed", &mut self.run_speed);
        read_f32(config, "locomotion", "jump_height", &mut self.jump_height);
        let mut gravity = self.gravity;
        read_f32(config, "locomotion", "gravity", &mut gravity);
        if gravity < 0.0 {
            self.gravity = gravity;
        } else {
            warn!("Gravity must be negative, got {}; keeping {}", gravity, self.gravity);
        }
        read_f32(config, "locomotion", "rotation_speed", &mut self.rotation_speed);
        read_f32(config, "locomotion", "ground_distance", &mut self.ground_distance);
        read_f32(config, "locomotion", "mouse_sensitivity", &mut self.mouse_sensitivity);
        read_f32(config, "locomotion", "max_pitch", &mut self.max_pitch);
        if let Some(mapping) = config.get("locomotion", "mapping") {
            match InputMapping::parse(&mapping) {
                Some(m) => self.mapping = m,
                None => warn!("Unknown input mapping '{}', keeping {:?}", mapping, self.mapping),
            }
        }

        // [camera] section
        read_f32(config, "camera", "normal_distance", &mut self.camera_distance);
        read_f32(config, "camera", "min_distance", &mut self.camera_min_distance);
        read_f32(config, "camera", "sensitivity", &mut self.camera_sensitivity);
        read_f32(config, "camera", "min_vertical_angle", &mut self.camera_min_vertical_angle);
        read_f32(config, "camera", "max_vertical_angle", &mut self.camera_max_vertical_angle);
        read_f32(config, "camera", "position_smoothing", &mut self.camera_position_smoothing);
        read_f32(config, "camera", "rotation_smoothing", &mut self.camera_rotation_smoothing);
        read_f32(config, "camera", "radius", &mut self.camera_radius);
        read_f32(config, "camera", "zoom_speed", &mut self.camera_zoom_speed);
        read_f32(config, "camera", "min_zoom", &mut self.camera_min_zoom);
        read_f32(config, "camera", "max_zoom", &mut self.camera_max_zoom);
        if let Some(enable) = config.getbool("camera", "enable_zoom").ok().flatten() {
            self.camera_enable_zoom = enable;
        }

        // [prefs] section
        if let Some(path) = config.get("prefs", "path") {
            self.prefs_path = PathBuf::from(path);
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [locomotion] section
        config.set("locomotion", "walk_speed", Some(self.walk_speed.to_string()));
        config.set("locomotion", "run_speed", Some(self.run_speed.to_string()));
        config.set("locomotion", "jump_height", Some(self.jump_height.to_string()));
        config.set("locomotion", "gravity", Some(self.gravity.to_string()));
        config.set("locomotion", "rotation_speed", Some(self.rotation_speed.to_string()));
        config.set("locomotion", "ground_distance", Some(self.ground_distance.to_string()));
        let mapping = match self.mapping {
            InputMapping::CameraRelative => "camera",
            InputMapping::LocalRelative => "local",
        };
        config.set("locomotion", "mapping", Some(mapping.to_string()));
        config.set("locomotion", "mouse_sensitivity", Some(self.mouse_sensitivity.to_string()));
        config.set("locomotion", "max_pitch", Some(self.max_pitch.to_string()));

        // [camera] section
        config.set("camera", "normal_distance", Some(self.camera_distance.to_string()));
        config.set("camera", "min_distance", Some(self.camera_min_distance.to_string()));
        config.set("camera", "sensitivity", Some(self.camera_sensitivity.to_string()));
        config.set("camera", "min_vertical_angle", Some(self.camera_min_vertical_angle.to_string()));
        config.set("camera", "max_vertical_angle", Some(self.camera_max_vertical_angle.to_string()));
        config.set("camera", "position_smoothing", Some(self.camera_position_smoothing.to_string()));
        config.set("camera", "rotation_smoothing", Some(self.camera_rotation_smoothing.to_string()));
        config.set("camera", "radius", Some(self.camera_radius.to_string()));
        config.set("camera", "enable_zoom", Some(self.camera_enable_zoom.to_string()));
        config.set("camera", "zoom_speed", Some(self.camera_zoom_speed.to_string()));
        config.set("camera", "min_zoom", Some(self.camera_min_zoom.to_string()));
        config.set("camera", "max_zoom", Some(self.camera_max_zoom.to_string()));

        // [prefs] section
        config.set("prefs", "path", Some(self.prefs_path.display().to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Locomotion controller built from the `[locomotion]` values.
    pub fn locomotion(&self) -> LocomotionController {
        LocomotionController {
            walk_speed: self.walk_speed,
            run_speed: self.run_speed,
            jump_height: self.jump_height,
            gravity: self.gravity,
            rotation_speed: self.rotation_speed,
            ground_distance: self.ground_distance,
            ..LocomotionController::new(self.mapping)
        }
    }

    pub fn mouse_look(&self) -> MouseLook {
        MouseLook {
            sensitivity: self.mouse_sensitivity,
            max_pitch: self.max_pitch,
            pitch: 0.0,
        }
    }

    /// Follow camera built from the `[camera]` values.
    pub fn follow_camera(&self, target: Option<bevy_ecs::entity::Entity>) -> FollowCamera {
        let mut camera = FollowCamera {
            normal_distance: self.camera_distance,
            min_distance: self.camera_min_distance,
            mouse_sensitivity: self.camera_sensitivity,
            min_vertical_angle: self.camera_min_vertical_angle,
            max_vertical_angle: self.camera_max_vertical_angle,
            position_smoothing: self.camera_position_smoothing,
            rotation_smoothing: self.camera_rotation_smoothing,
            camera_radius: self.camera_radius,
            enable_zoom: self.camera_enable_zoom,
            zoom_speed: self.camera_zoom_speed,
            min_zoom_distance: self.camera_min_zoom,
            max_zoom_distance: self.camera_max_zoom,
            ..FollowCamera::new(target)
        };
        camera.current_distance = self.camera_distance;
        camera.desired_distance = self
            .camera_distance
            .max(self.camera_min_zoom)
            .min(self.camera_max_zoom);
        camera
    }
}
