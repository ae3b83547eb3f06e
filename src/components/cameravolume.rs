//! Physical volume around a follow camera.
//!
//! After smoothing, [`camera_volume_pushout`](crate::systems::followcamera::camera_volume_pushout)
//! pushes the camera out of any world collider its volume overlaps. Colliders
//! belonging to the followed target are recorded once, when the camera is
//! initialized, and never push the camera.

use bevy_ecs::prelude::{Component, Entity};
use glam::Vec3;
use smallvec::SmallVec;

pub const DEFAULT_VOLUME_SIZE: Vec3 = Vec3::new(0.5, 0.5, 0.5);

#[derive(Component, Clone, Debug)]
pub struct CameraVolume {
    pub half_extents: Vec3,
    pub enabled: bool,
    /// Colliders that never push the camera (the followed target's own).
    pub ignored: SmallVec<[Entity; 4]>,
}

impl Default for CameraVolume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME_SIZE)
    }
}

impl CameraVolume {
    /// Volume with the given full size.
    pub fn new(size: Vec3) -> Self {
        Self {
            half_extents: size.abs() * 0.5,
            enabled: true,
            ignored: SmallVec::new(),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Record `entity` as a collider to ignore. Duplicates are skipped.
    pub fn ignore(&mut self, entity: Entity) {
        if !self.ignored.contains(&entity) {
            self.ignored.push(entity);
        }
    }

    pub fn ignores(&self, entity: Entity) -> bool {
        self.ignored.contains(&entity)
    }

    pub fn aabb(&self, position: Vec3) -> (Vec3, Vec3) {
        (position - self.half_extents, position + self.half_extents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn test_ignore_skips_duplicates() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let mut volume = CameraVolume::default();
        volume.ignore(a);
        volume.ignore(a);
        assert_eq!(volume.ignored.len(), 1);
        assert!(volume.ignores(a));
        assert!(!volume.ignores(b));
    }

    #[test]
    fn test_default_size() {
        let volume = CameraVolume::default();
        let (min, max) = volume.aabb(Vec3::ZERO);
        assert_eq!(min, Vec3::splat(-0.25));
        assert_eq!(max, Vec3::splat(0.25));
        assert!(volume.enabled);
    }
}
