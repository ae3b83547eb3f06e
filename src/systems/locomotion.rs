//! Character locomotion systems.
//!
//! - [`init_locomotion`] – fills in missing collision/probe components for newly
//!   added controllers, locks the cursor and applies a pending spawn record
//! - [`mouse_look_system`] – first-person yaw and pitch from mouse motion
//! - [`locomotion_system`] – ground test, horizontal move, turn, gravity and
//!   jump for every character
//!
//! Per frame and per character, [`locomotion_system`] runs:
//!
//! 1. ground ray from the probe anchor, straight down for `ground_distance`
//! 2. horizontal move from the input axes, projected on the camera or the
//!    character's own axes
//! 3. turn toward the move direction (camera-relative mapping only)
//! 4. gravity step, then a second, vertical-only move
//! 5. jump, if grounded and jump was just pressed
//!
//! The vertical move is a separate call from the horizontal one, so a wall
//! hit horizontally never eats the vertical motion of the same frame.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};
use log::{debug, info};

use crate::components::boxcollider::BoxCollider;
use crate::components::charactercapsule::CharacterCapsule;
use crate::components::locomotion::{GroundProbe, InputMapping, LocomotionController, MouseLook};
use crate::components::pose::Pose;
use crate::components::tag::{MAIN_CAMERA_TAG, Tag};
use crate::physics::{ColliderSet, move_and_collide, raycast};
use crate::resources::cursor::CursorState;
use crate::resources::input::InputState;
use crate::resources::prefs::Prefs;
use crate::resources::spawnrecord::SpawnRecord;
use crate::resources::worldtime::WorldTime;

/// World entities a character interacts with: cameras, ground and walls.
type SceneryQuery<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static Pose, Option<&'static BoxCollider>, Option<&'static Tag>),
    Without<LocomotionController>,
>;

/// Horizontal forward and right of a camera, flattened onto the ground plane.
pub fn camera_relative_basis(camera_rotation: Quat) -> (Vec3, Vec3) {
    let mut forward = camera_rotation * Vec3::Z;
    let mut right = camera_rotation * Vec3::X;
    forward.y = 0.0;
    right.y = 0.0;
    (forward.normalize_or_zero(), right.normalize_or_zero())
}

/// Yaw-only rotation facing `direction` (its vertical part is ignored).
pub fn look_rotation(direction: Vec3) -> Quat {
    Quat::from_rotation_y(direction.x.atan2(direction.z))
}

/// Place a character at `record` without sweeping through geometry.
///
/// Collision is switched off around the pose write.
pub fn teleport(pose: &mut Pose, capsule: Option<&mut CharacterCapsule>, record: &SpawnRecord) {
    let target = Pose::from_position_yaw(record.position, record.yaw);
    match capsule {
        Some(capsule) => {
            let was_enabled = capsule.enabled;
            capsule.enabled = false;
            *pose = target;
            capsule.enabled = was_enabled;
        }
        None => *pose = target,
    }
}

/// Prepare newly added controllers.
///
/// - inserts a default [`CharacterCapsule`] and [`GroundProbe`] when missing
/// - resolves an unset camera through the `"MainCamera"` tag
/// - locks and hides the cursor
/// - consumes a pending [`SpawnRecord`]
pub fn init_locomotion(
    mut commands: Commands,
    mut added: Query<
        (
            Entity,
            &mut Pose,
            &mut LocomotionController,
            Option<&mut CharacterCapsule>,
            Has<GroundProbe>,
        ),
        Added<LocomotionController>,
    >,
    tags: Query<(Entity, &Tag)>,
    mut prefs: ResMut<Prefs>,
    cursor: Option<ResMut<CursorState>>,
) {
    let mut any = false;
    for (entity, mut pose, mut controller, capsule, has_probe) in added.iter_mut() {
        any = true;
        let mut capsule = capsule;
        if capsule.is_none() {
            debug!("Adding default CharacterCapsule to {:?}", entity);
            commands.entity(entity).insert(CharacterCapsule::default());
        }
        if !has_probe {
            debug!("Adding default GroundProbe to {:?}", entity);
            commands.entity(entity).insert(GroundProbe::default());
        }

        if controller.camera.is_none() && controller.mapping == InputMapping::CameraRelative {
            controller.camera = tags
                .iter()
                .find(|(_, tag)| tag.is(MAIN_CAMERA_TAG))
                .map(|(camera, _)| camera);
            match controller.camera {
                Some(camera) => debug!("{:?} uses camera {:?}", entity, camera),
                None => debug!("{:?} has no camera, moving on local axes", entity),
            }
        }

        if let Some(record) = SpawnRecord::take(&mut prefs) {
            teleport(&mut pose, capsule.as_deref_mut(), &record);
            info!(
                "Spawned {:?} at {:?} yaw {}",
                entity, record.position, record.yaw
            );
        }
    }

    if any && let Some(mut cursor) = cursor {
        cursor.lock();
    }
}

/// Apply mouse motion to first-person characters.
pub fn mouse_look_system(
    input: Res<InputState>,
    mut query: Query<(&mut Pose, &mut MouseLook), With<LocomotionController>>,
) {
    let delta = input.mouse_delta;
    for (mut pose, mut look) in query.iter_mut() {
        let yaw = look.look(delta.x, delta.y);
        if yaw != 0.0 {
            pose.rotation = Quat::from_rotation_y(yaw.to_radians()) * pose.rotation;
        }
    }
}

fn resolve_camera(controller: &mut LocomotionController, scenery: &SceneryQuery) -> Option<Quat> {
    if let Some(camera) = controller.camera
        && let Ok((_, pose, _, _)) = scenery.get(camera)
    {
        return Some(pose.rotation);
    }
    // Stale or unset: the camera may have been rebuilt by a scene change.
    let found = scenery
        .iter()
        .find(|(_, _, _, tag)| tag.is_some_and(|t| t.is(MAIN_CAMERA_TAG)));
    match found {
        Some((camera, pose, _, _)) => {
            if controller.camera != Some(camera) {
                debug!("Locomotion camera resolved to {:?}", camera);
            }
            controller.camera = Some(camera);
            Some(pose.rotation)
        }
        None => {
            controller.camera = None;
            None
        }
    }
}

fn move_character(pose: &mut Pose, capsule: &CharacterCapsule, delta: Vec3, colliders: &ColliderSet) {
    if delta == Vec3::ZERO {
        return;
    }
    if !capsule.enabled {
        pose.position += delta;
        return;
    }
    let (min, max) = capsule.aabb(pose.position);
    pose.position += move_and_collide(min, max, delta, colliders);
}

/// Move every character for one frame.
pub fn locomotion_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    mut characters: Query<(
        &mut Pose,
        &mut LocomotionController,
        &CharacterCapsule,
        &GroundProbe,
    )>,
    scenery: SceneryQuery,
) {
    let dt = time.delta;
    let colliders = ColliderSet::gather(
        scenery
            .iter()
            .filter_map(|(entity, pose, collider, _)| collider.map(|c| (entity, pose, c))),
    );

    for (mut pose, mut controller, capsule, probe) in characters.iter_mut() {
        // 1. Ground
        let origin = pose.transform_point(probe.offset);
        let grounded = raycast(&colliders, origin, Vec3::NEG_Y, controller.ground_distance)
            .and_then(|hit| scenery.get(hit.entity).ok())
            .and_then(|(_, _, _, tag)| tag)
            .is_some_and(|tag| tag.is(&controller.ground_tag));
        controller.grounded = grounded;

        // 2. Horizontal
        let (forward, right) = match controller.mapping {
            InputMapping::LocalRelative => (pose.forward(), pose.right()),
            InputMapping::CameraRelative => match resolve_camera(&mut controller, &scenery) {
                Some(rotation) => camera_relative_basis(rotation),
                None => (pose.forward(), pose.right()),
            },
        };
        let axes = input.move_axes;
        let direction = right * axes.x + forward * axes.y;

        // 3. Turn
        if controller.mapping == InputMapping::CameraRelative
            && direction.length() > controller.move_deadzone
        {
            let t = (controller.rotation_speed * dt).clamp(0.0, 1.0);
            pose.rotation = pose.rotation.slerp(look_rotation(direction), t);
        }

        let speed = controller.speed(input.run.active);
        move_character(&mut pose, capsule, direction * speed * dt, &colliders);

        // 4. Gravity
        controller.apply_gravity(dt);
        let vertical = Vec3::Y * controller.vertical_velocity * dt;
        move_character(&mut pose, capsule, vertical, &colliders);

        // 5. Jump
        if controller.try_jump(input.jump.just_pressed) {
            debug!("Jump v={}", controller.vertical_velocity);
        }
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
    fn test_camera_basis_identity() {
        let (forward, right) = camera_relative_basis(Quat::IDENTITY);
        assert!(vec_approx_eq(forward, Vec3::Z));
        assert!(vec_approx_eq(right, Vec3::X));
    }

    #[test]
    fn test_camera_basis_ignores_pitch() {
        let rotation = Quat::from_euler(glam::EulerRot::YXZ, 0.0, 0.6, 0.0);
        let (forward, right) = camera_relative_basis(rotation);
        assert!(vec_approx_eq(forward, Vec3::Z));
        assert!(vec_approx_eq(right, Vec3::X));
    }

    #[test]
    fn test_look_rotation_faces_direction() {
        let rotation = look_rotation(Vec3::new(1.0, 0.5, 0.0));
        assert!(vec_approx_eq(rotation * Vec3::Z, Vec3::X));
    }

    #[test]
    fn test_teleport_restores_capsule_state() {
        let mut pose = Pose::new(Vec3::new(9.0, 9.0, 9.0));
        let mut capsule = CharacterCapsule::default();
        let record = SpawnRecord::new(Vec3::new(1.0, 2.0, 3.0), 90.0);
        teleport(&mut pose, Some(&mut capsule), &record);
        assert!(capsule.enabled);
        assert!(vec_approx_eq(pose.position, record.position));
        assert!(vec_approx_eq(pose.forward(), Vec3::X));
    }
}
