//! Third-person follow camera component.
//!
//! [`FollowCamera`] holds both the tuning values and the orbit state (angles
//! and distances) of a camera that trails a target entity. Orbit and zoom
//! updates are plain methods so they can be exercised without a world; the
//! per-frame system in [`crate::systems::followcamera`] adds the occlusion
//! sweep and smoothing.

use bevy_ecs::prelude::{Component, Entity};
use glam::{EulerRot, Quat, Vec2, Vec3};

pub const DEFAULT_TARGET_OFFSET: Vec3 = Vec3::new(0.0, 1.5, 0.0);
pub const DEFAULT_NORMAL_DISTANCE: f32 = 5.0;
pub const DEFAULT_MIN_DISTANCE: f32 = 0.5;
pub const DEFAULT_CAMERA_SENSITIVITY: f32 = 2.0;
pub const DEFAULT_MIN_VERTICAL_ANGLE: f32 = -40.0;
pub const DEFAULT_MAX_VERTICAL_ANGLE: f32 = 80.0;
pub const DEFAULT_POSITION_SMOOTHING: f32 = 10.0;
pub const DEFAULT_ROTATION_SMOOTHING: f32 = 8.0;
pub const DEFAULT_CAMERA_RADIUS: f32 = 0.3;
pub const DEFAULT_ZOOM_SPEED: f32 = 2.0;
pub const DEFAULT_MIN_ZOOM_DISTANCE: f32 = 2.0;
pub const DEFAULT_MAX_ZOOM_DISTANCE: f32 = 10.0;

/// Orbiting camera that follows `target` and avoids clipping into geometry.
///
/// # Fields
/// - tuning: offsets, distances, angle limits, smoothing rates, zoom range
/// - orbit state: `horizontal_angle`, `vertical_angle` (degrees),
///   `current_distance` (smoothed) and `desired_distance` (zoom)
/// - `enabled` - cleared when no target can be found
#[derive(Component, Clone, Debug)]
pub struct FollowCamera {
    pub target: Option<Entity>,
    /// Look-at point relative to the target position (eye/shoulder height).
    pub target_offset: Vec3,
    /// Distance used on (re)initialization and when zoom is disabled.
    pub normal_distance: f32,
    /// Closest the camera may be pulled in by an obstruction.
    pub min_distance: f32,
    pub mouse_sensitivity: f32,
    pub min_vertical_angle: f32,
    pub max_vertical_angle: f32,
    pub position_smoothing: f32,
    pub rotation_smoothing: f32,
    /// Layers the occlusion sweep collides with.
    pub collision_mask: u32,
    /// Radius of the occlusion sphere.
    pub camera_radius: f32,
    pub enable_zoom: bool,
    pub zoom_speed: f32,
    pub min_zoom_distance: f32,
    pub max_zoom_distance: f32,
    pub enabled: bool,

    pub horizontal_angle: f32,
    pub vertical_angle: f32,
    pub current_distance: f32,
    pub desired_distance: f32,
    /// Set when the next update must skip smoothing.
    pub(crate) snap_pending: bool,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            target: None,
            target_offset: DEFAULT_TARGET_OFFSET,
            normal_distance: DEFAULT_NORMAL_DISTANCE,
            min_distance: DEFAULT_MIN_DISTANCE,
            mouse_sensitivity: DEFAULT_CAMERA_SENSITIVITY,
            min_vertical_angle: DEFAULT_MIN_VERTICAL_ANGLE,
            max_vertical_angle: DEFAULT_MAX_VERTICAL_ANGLE,
            position_smoothing: DEFAULT_POSITION_SMOOTHING,
            rotation_smoothing: DEFAULT_ROTATION_SMOOTHING,
            collision_mask: u32::MAX,
            camera_radius: DEFAULT_CAMERA_RADIUS,
            enable_zoom: true,
            zoom_speed: DEFAULT_ZOOM_SPEED,
            min_zoom_distance: DEFAULT_MIN_ZOOM_DISTANCE,
            max_zoom_distance: DEFAULT_MAX_ZOOM_DISTANCE,
            enabled: true,
            horizontal_angle: 0.0,
            vertical_angle: 0.0,
            current_distance: DEFAULT_NORMAL_DISTANCE,
            desired_distance: DEFAULT_NORMAL_DISTANCE,
            snap_pending: true,
        }
    }
}

impl FollowCamera {
    pub fn new(target: Option<Entity>) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Swap the followed entity. The next update snaps instead of smoothing.
    pub fn set_target(&mut self, target: Entity) {
        self.target = Some(target);
        self.snap_pending = true;
    }

    /// Skip smoothing on the next update.
    pub fn request_snap(&mut self) {
        self.snap_pending = true;
    }

    pub fn is_snap_pending(&self) -> bool {
        self.snap_pending
    }

    /// Apply one frame of mouse motion to the orbit angles.
    pub fn orbit(&mut self, mouse_delta: Vec2) {
        self.horizontal_angle += mouse_delta.x * self.mouse_sensitivity;
        self.vertical_angle -= mouse_delta.y * self.mouse_sensitivity;
        self.vertical_angle = self
            .vertical_angle
            .max(self.min_vertical_angle)
            .min(self.max_vertical_angle);
    }

    /// Apply one frame of scroll to the desired distance. No-op when zoom is disabled.
    pub fn zoom(&mut self, scroll: f32) {
        if !self.enable_zoom {
            return;
        }
        self.desired_distance -= scroll * self.zoom_speed;
        self.desired_distance = self
            .desired_distance
            .max(self.min_zoom_distance)
            .min(self.max_zoom_distance);
    }

    /// Length of the occlusion sweep: the zoom distance, or the fixed
    /// distance when zoom is off.
    pub fn sweep_distance(&self) -> f32 {
        if self.enable_zoom {
            self.desired_distance
        } else {
            self.normal_distance
        }
    }

    /// Rotation built from the orbit angles (yaw, then pitch, no roll).
    pub fn orbit_rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.horizontal_angle.to_radians(),
            self.vertical_angle.to_radians(),
            0.0,
        )
    }

    /// Distance the camera should sit at given the occlusion sweep result.
    ///
    /// `hit_distance` is how far the sphere center travelled before touching
    /// an obstruction. The result never drops below `min_distance`.
    pub fn resolve_distance(&self, hit_distance: Option<f32>) -> f32 {
        match hit_distance {
            Some(hit) => (hit - self.camera_radius).max(self.min_distance),
            None => self.sweep_distance(),
        }
    }
}
