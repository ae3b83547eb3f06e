//! Collision volume of a locomotion-driven character.
//!
//! The capsule is approximated by its bounding box for collision queries.
//! While `enabled` is false the character ignores collision; teleports flip it
//! off around the direct pose write.

use bevy_ecs::prelude::Component;
use glam::Vec3;

pub const DEFAULT_CAPSULE_HEIGHT: f32 = 2.0;
pub const DEFAULT_CAPSULE_RADIUS: f32 = 0.5;
pub const DEFAULT_CAPSULE_CENTER: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Character collision capsule relative to the entity origin (the feet).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct CharacterCapsule {
    pub height: f32,
    pub radius: f32,
    pub center: Vec3,
    pub enabled: bool,
}

impl Default for CharacterCapsule {
    fn default() -> Self {
        Self {
            height: DEFAULT_CAPSULE_HEIGHT,
            radius: DEFAULT_CAPSULE_RADIUS,
            center: DEFAULT_CAPSULE_CENTER,
            enabled: true,
        }
    }
}

impl CharacterCapsule {
    pub fn new(height: f32, radius: f32, center: Vec3) -> Self {
        Self {
            height,
            radius,
            center,
            enabled: true,
        }
    }

    /// Bounding box (min, max) of the capsule for a character at `position`.
    pub fn aabb(&self, position: Vec3) -> (Vec3, Vec3) {
        let center = position + self.center;
        let half = Vec3::new(self.radius, self.height.max(self.radius * 2.0) * 0.5, self.radius);
        (center - half, center + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capsule_sits_on_origin() {
        let capsule = CharacterCapsule::default();
        let (min, max) = capsule.aabb(Vec3::ZERO);
        assert_eq!(min, Vec3::new(-0.5, 0.0, -0.5));
        assert_eq!(max, Vec3::new(0.5, 2.0, 0.5));
    }

    #[test]
    fn test_short_capsule_is_at_least_a_sphere() {
        let capsule = CharacterCapsule::new(0.5, 0.5, Vec3::new(0.0, 0.5, 0.0));
        let (min, max) = capsule.aabb(Vec3::ZERO);
        assert_eq!(min.y, 0.0);
        assert_eq!(max.y, 1.0);
    }
}
