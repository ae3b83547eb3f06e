//! Locomotion components for player characters.
//!
//! - [`LocomotionController`] – movement settings plus the per-character
//!   vertical velocity and ground flag
//! - [`InputMapping`] – how movement axes map onto world directions
//! - [`MouseLook`] – first-person yaw/pitch from mouse motion
//! - [`GroundProbe`] – anchor of the downward ground ray
//!
//! The per-frame logic lives in [`crate::systems::locomotion`].

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;

use crate::components::tag::GROUND_TAG;

pub const DEFAULT_WALK_SPEED: f32 = 5.0;
pub const DEFAULT_RUN_SPEED: f32 = 8.0;
pub const DEFAULT_JUMP_HEIGHT: f32 = 5.0;
pub const DEFAULT_GRAVITY: f32 = -9.81;
pub const DEFAULT_ROTATION_SPEED: f32 = 10.0;
pub const DEFAULT_GROUND_DISTANCE: f32 = 0.2;
pub const DEFAULT_GROUNDED_VELOCITY: f32 = -2.0;
pub const DEFAULT_MOVE_DEADZONE: f32 = 0.1;
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 2.0;
pub const DEFAULT_MAX_PITCH: f32 = 80.0;
/// Local offset of an auto-created ground probe, just below the feet.
pub const DEFAULT_GROUND_PROBE_OFFSET: Vec3 = Vec3::new(0.0, -0.05, 0.0);

/// How movement axes are projected into world space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InputMapping {
    /// Axes follow the camera's horizontal forward/right; the character turns
    /// toward its movement direction (third person).
    #[default]
    CameraRelative,
    /// Axes follow the character's own forward/right (first person).
    LocalRelative,
}

impl InputMapping {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "camera" | "camera_relative" | "third_person" => Some(Self::CameraRelative),
            "local" | "local_relative" | "first_person" => Some(Self::LocalRelative),
            _ => None,
        }
    }
}

/// Walk/run/jump character controller.
///
/// Settings are public and may be tuned at runtime. `vertical_velocity` and
/// `grounded` are simulation state written by
/// [`locomotion_system`](crate::systems::locomotion::locomotion_system).
#[derive(Component, Clone, Debug)]
pub struct LocomotionController {
    pub walk_speed: f32,
    /// Speed while the run modifier is held. Never below `walk_speed`.
    pub run_speed: f32,
    /// Apex height of a jump in world units.
    pub jump_height: f32,
    /// Vertical acceleration, negative pulls down.
    pub gravity: f32,
    /// Turn rate toward the movement direction (camera-relative only).
    pub rotation_speed: f32,
    /// Maximum length of the ground ray.
    pub ground_distance: f32,
    /// Tag a collider must carry to count as ground.
    pub ground_tag: String,
    /// Resting vertical velocity while grounded.
    pub grounded_velocity: f32,
    /// Horizontal move magnitude below which the character does not turn.
    pub move_deadzone: f32,
    pub mapping: InputMapping,
    /// Camera whose orientation drives camera-relative input.
    pub camera: Option<Entity>,
    pub vertical_velocity: f32,
    pub grounded: bool,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(InputMapping::default())
    }
}

impl LocomotionController {
    pub fn new(mapping: InputMapping) -> Self {
        Self {
            walk_speed: DEFAULT_WALK_SPEED,
            run_speed: DEFAULT_RUN_SPEED,
            jump_height: DEFAULT_JUMP_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            ground_distance: DEFAULT_GROUND_DISTANCE,
            ground_tag: GROUND_TAG.to_string(),
            grounded_velocity: DEFAULT_GROUNDED_VELOCITY,
            move_deadzone: DEFAULT_MOVE_DEADZONE,
            mapping,
            camera: None,
            vertical_velocity: 0.0,
            grounded: false,
        }
    }

    pub fn with_camera(mut self, camera: Entity) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Movement speed for the current run modifier state.
    pub fn speed(&self, running: bool) -> f32 {
        if running {
            self.run_speed.max(self.walk_speed)
        } else {
            self.walk_speed
        }
    }

    /// Launch velocity that reaches `jump_height` under `gravity`.
    ///
    /// Zero when gravity does not pull down.
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).max(0.0).sqrt()
    }

    /// Accumulate gravity for one frame, then settle onto the ground.
    ///
    /// A grounded character that is not rising ends the step exactly at
    /// `grounded_velocity`, whatever `dt` was.
    pub fn apply_gravity(&mut self, dt: f32) {
        self.vertical_velocity += self.gravity * dt;
        if self.grounded && self.vertical_velocity <= 0.0 {
            self.vertical_velocity = self.grounded_velocity;
        }
    }

    /// Start a jump if `pressed` this frame while grounded.
    ///
    /// Returns true when the jump was taken.
    pub fn try_jump(&mut self, pressed: bool) -> bool {
        if pressed && self.grounded {
            self.vertical_velocity = self.jump_velocity();
            true
        } else {
            false
        }
    }
}

/// First-person look: mouse X turns the character, mouse Y tilts the view.
///
/// `pitch` is read by the host to orient the camera child.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MouseLook {
    pub sensitivity: f32,
    /// Symmetric pitch limit in degrees.
    pub max_pitch: f32,
    pub pitch: f32,
}

impl Default for MouseLook {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            max_pitch: DEFAULT_MAX_PITCH,
            pitch: 0.0,
        }
    }
}

impl MouseLook {
    /// Apply one frame of mouse motion. Returns the yaw delta in degrees for
    /// the character body.
    pub fn look(&mut self, mouse_x: f32, mouse_y: f32) -> f32 {
        self.pitch -= mouse_y * self.sensitivity;
        let limit = self.max_pitch.abs();
        self.pitch = self.pitch.clamp(-limit, limit);
        mouse_x * self.sensitivity
    }
}

/// Anchor of the ground ray, relative to the character origin.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct GroundProbe {
    pub offset: Vec3,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self {
            offset: DEFAULT_GROUND_PROBE_OFFSET,
        }
    }
}
