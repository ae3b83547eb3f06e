//! World-space pose of an entity.
//!
//! [`Pose`] stores a position and an orientation. Axis conventions follow the
//! usual game layout: `+Y` is up, `+Z` is forward and `+X` is right for an
//! identity rotation. Yaw rotates about `+Y` and positive pitch looks down.

use bevy_ecs::prelude::Component;
use glam::{EulerRot, Quat, Vec3};

/// Position and rotation of an entity in world space.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Pose at `position` rotated by `yaw_degrees` about the up axis.
    pub fn from_position_yaw(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            rotation: Quat::from_rotation_y(yaw_degrees.to_radians()),
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Yaw component of the rotation, in degrees.
    pub fn yaw_degrees(&self) -> f32 {
        let (yaw, _, _) = self.rotation.to_euler(EulerRot::YXZ);
        yaw.to_degrees()
    }

    /// Transform a point given in this pose's local space into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_identity_axes() {
        let pose = Pose::default();
        assert!(vec_approx_eq(pose.forward(), Vec3::Z));
        assert!(vec_approx_eq(pose.right(), Vec3::X));
    }

    #[test]
    fn test_yaw_90_faces_positive_x() {
        let pose = Pose::from_position_yaw(Vec3::ZERO, 90.0);
        assert!(vec_approx_eq(pose.forward(), Vec3::X));
        assert!(vec_approx_eq(pose.right(), Vec3::NEG_Z));
        assert!((pose.yaw_degrees() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_transform_point_applies_rotation_then_translation() {
        let pose = Pose::from_position_yaw(Vec3::new(1.0, 2.0, 3.0), 180.0);
        let world = pose.transform_point(Vec3::new(0.0, -1.0, 1.0));
        assert!(vec_approx_eq(world, Vec3::new(1.0, 1.0, 2.0)));
    }
}
