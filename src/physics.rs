//! Geometric queries against static box colliders.
//!
//! There is no simulation here, only the queries gameplay needs:
//!
//! - [`raycast`] – nearest box hit along a ray (slab method)
//! - [`sphere_cast`] – a sphere swept along a ray, filtered by layer mask
//! - [`move_and_collide`] – clamp a box's motion so it stops at geometry
//! - [`pushout`] – minimal displacement separating two overlapping boxes
//!
//! Queries run over a [`ColliderSet`] snapshot gathered once per system run
//! from `(Entity, &Pose, &BoxCollider)` tuples.

use bevy_ecs::prelude::Entity;
use glam::Vec3;

use crate::components::boxcollider::{BoxCollider, aabb_overlap};
use crate::components::pose::Pose;

/// Gap kept between two boxes for the purpose of side-by-side tests.
///
/// Boxes closer than this along an axis count as touching, not overlapping,
/// so a character resting on a floor slides over it freely.
pub const CONTACT_EPSILON: f32 = 1e-4;

const PARALLEL_EPSILON: f32 = 1e-8;

/// A world-space box taking part in queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBox {
    pub entity: Entity,
    pub min: Vec3,
    pub max: Vec3,
    pub layer: u32,
}

/// Result of a ray or sphere query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    /// Travel along the (normalized) direction before contact. Zero when the
    /// query starts inside the box.
    pub distance: f32,
    pub point: Vec3,
}

/// Solid colliders of the world at one instant.
#[derive(Debug, Clone, Default)]
pub struct ColliderSet {
    boxes: Vec<WorldBox>,
}

impl ColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every solid collider. Triggers and disabled boxes are skipped.
    pub fn gather<'a>(items: impl IntoIterator<Item = (Entity, &'a Pose, &'a BoxCollider)>) -> Self {
        let boxes = items
            .into_iter()
            .filter(|(_, _, collider)| collider.is_solid())
            .map(|(entity, pose, collider)| {
                let (min, max) = collider.aabb(pose.position);
                WorldBox {
                    entity,
                    min,
                    max,
                    layer: collider.layer,
                }
            })
            .collect();
        Self { boxes }
    }

    pub fn push(&mut self, entity: Entity, min: Vec3, max: Vec3, layer: u32) {
        self.boxes.push(WorldBox {
            entity,
            min,
            max,
            layer,
        });
    }

    pub fn boxes(&self) -> &[WorldBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Ray vs AABB by the slab method.
///
/// `dir` does not need to be normalized; the returned `t` is in units of
/// `dir`. A ray starting inside the box returns `Some(0.0)`.
pub fn ray_aabb(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        if d.abs() < PARALLEL_EPSILON {
            // Parallel to this slab: inside it or never.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let t1 = (min[axis] - o) * inv;
        let t2 = (max[axis] - o) * inv;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(t_min.max(0.0))
}

/// Nearest solid box hit by the ray within `max_distance`.
///
/// Returns `None` for a zero direction.
pub fn raycast(colliders: &ColliderSet, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }
    nearest_hit(colliders.boxes.iter(), origin, dir, max_distance, Vec3::ZERO)
}

/// Sweep a sphere of `radius` from `origin` along `direction`.
///
/// Boxes are inflated by the radius, so `distance` is how far the center
/// travelled before touching. Only boxes whose layer shares a bit with
/// `mask` and whose entity is not in `ignore` are considered.
pub fn sphere_cast(
    colliders: &ColliderSet,
    origin: Vec3,
    radius: f32,
    direction: Vec3,
    max_distance: f32,
    mask: u32,
    ignore: &[Entity],
) -> Option<RayHit> {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }
    let inflate = Vec3::splat(radius.max(0.0));
    let candidates = colliders
        .boxes
        .iter()
        .filter(|b| b.layer & mask != 0 && !ignore.contains(&b.entity));
    nearest_hit(candidates, origin, dir, max_distance, inflate)
}

fn nearest_hit<'a>(
    boxes: impl Iterator<Item = &'a WorldBox>,
    origin: Vec3,
    dir: Vec3,
    max_distance: f32,
    inflate: Vec3,
) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    for b in boxes {
        let Some(t) = ray_aabb(origin, dir, b.min - inflate, b.max + inflate) else {
            continue;
        };
        if t > max_distance {
            continue;
        }
        if best.is_none_or(|hit| t < hit.distance) {
            best = Some(RayHit {
                entity: b.entity,
                distance: t,
                point: origin + dir * t,
            });
        }
    }
    best
}

/// Move the box `(min, max)` by `delta`, stopping at solid geometry.
///
/// Axes are resolved one at a time in X, Z, Y order. A box already
/// overlapping a collider on the moving axis is free to leave it. Returns the
/// displacement actually applied.
pub fn move_and_collide(min: Vec3, max: Vec3, delta: Vec3, colliders: &ColliderSet) -> Vec3 {
    let mut applied = Vec3::ZERO;
    let mut cur_min = min;
    let mut cur_max = max;

    for axis in [0usize, 2, 1] {
        let amount = delta[axis];
        if amount == 0.0 {
            continue;
        }
        let allowed = sweep_axis(cur_min, cur_max, axis, amount, &colliders.boxes);
        cur_min[axis] += allowed;
        cur_max[axis] += allowed;
        applied[axis] = allowed;
    }
    applied
}

/// Smallest displacement that moves box A out of box B.
///
/// Returns zero when the boxes do not overlap. The push is along the single
/// axis of least penetration.
pub fn pushout(min_a: Vec3, max_a: Vec3, min_b: Vec3, max_b: Vec3) -> Vec3 {
    if !aabb_overlap(min_a, max_a, min_b, max_b) {
        return Vec3::ZERO;
    }
    let mut best = Vec3::ZERO;
    let mut best_len = f32::INFINITY;
    for axis in 0..3 {
        for amount in [max_b[axis] - min_a[axis], min_b[axis] - max_a[axis]] {
            if amount.abs() < best_len {
                best_len = amount.abs();
                best = Vec3::ZERO;
                best[axis] = amount;
            }
        }
    }
    best
}

fn sweep_axis(min: Vec3, max: Vec3, axis: usize, amount: f32, boxes: &[WorldBox]) -> f32 {
    let mut allowed = amount;
    for b in boxes {
        let blocks_across = (0..3).filter(|&a| a != axis).all(|a| {
            min[a] + CONTACT_EPSILON < b.max[a] && max[a] - CONTACT_EPSILON > b.min[a]
        });
        if !blocks_across {
            continue;
        }
        if amount > 0.0 && max[axis] <= b.min[axis] + CONTACT_EPSILON {
            let gap = (b.min[axis] - max[axis]).max(0.0);
            allowed = allowed.min(gap);
        } else if amount < 0.0 && min[axis] >= b.max[axis] - CONTACT_EPSILON {
            let gap = (b.max[axis] - min[axis]).min(0.0);
            allowed = allowed.max(gap);
        }
    }
    allowed
}
