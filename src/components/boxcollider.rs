use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Layer bit used by colliders that do not pick a layer explicitly.
pub const DEFAULT_LAYER: u32 = 1;

/// Axis-aligned box of static world geometry.
///
/// The box is centered on the entity's [`Pose`](super::pose::Pose) position
/// plus `offset`; rotation is ignored. `layer` is a bit mask matched against
/// query masks such as the follow camera's `collision_mask`. Trigger boxes
/// are only used for contact tests; movement and ray queries pass through them.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub half_extents: Vec3,
    pub offset: Vec3,
    pub layer: u32,
    pub enabled: bool,
    pub is_trigger: bool,
}

impl BoxCollider {
    /// Create a BoxCollider with the given full size.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            half_extents: Vec3::new(width, height, depth).abs() * 0.5,
            offset: Vec3::ZERO,
            layer: DEFAULT_LAYER,
            enabled: true,
            is_trigger: false,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Whether movement and ray queries collide with this box.
    pub fn is_solid(&self) -> bool {
        self.enabled && !self.is_trigger
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    pub fn aabb(&self, position: Vec3) -> (Vec3, Vec3) {
        let center = position + self.offset;
        (center - self.half_extents, center + self.half_extents)
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vec3, other: &Self, other_position: Vec3) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        aabb_overlap(min_a, max_a, min_b, max_b)
    }

    /// Point containment in world space.
    pub fn contains_point(&self, position: Vec3, point: Vec3) -> bool {
        let (min, max) = self.aabb(position);
        point.cmpge(min).all() && point.cmple(max).all()
    }
}

/// Strict overlap of two boxes; boxes that only share a face do not overlap.
pub fn aabb_overlap(min_a: Vec3, max_a: Vec3, min_b: Vec3, max_b: Vec3) -> bool {
    min_a.cmplt(max_b).all() && max_a.cmpgt(min_b).all()
}
