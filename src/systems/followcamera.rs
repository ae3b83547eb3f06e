//! Follow camera systems.
//!
//! These run after the locomotion systems so the camera reads the pose the
//! character ends the frame with.
//!
//! - [`init_follow_camera`] – acquire a target, seed the orbit angles and the
//!   [`CameraVolume`] ignore list
//! - [`follow_camera_system`] – orbit, zoom, occlusion sweep and smoothing
//! - [`camera_volume_pushout`] – push the camera out of world geometry
use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use glam::{EulerRot, Vec3};
use log::{debug, error, info};
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::cameravolume::CameraVolume;
use crate::components::followcamera::FollowCamera;
use crate::components::pose::Pose;
use crate::components::tag::{PLAYER_TAG, Tag};
use crate::physics::{ColliderSet, pushout, sphere_cast};
use crate::resources::cursor::CursorState;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

/// Prepare newly added follow cameras.
///
/// A camera without a live target looks for the entity tagged `"Player"`;
/// when there is none the camera is disabled. The orbit angles start from the
/// camera's current orientation and the first update snaps into place.
pub fn init_follow_camera(
    mut cameras: Query<
        (Entity, &mut FollowCamera, &Pose, Option<&mut CameraVolume>),
        Added<FollowCamera>,
    >,
    tags: Query<(Entity, &Tag)>,
    all: Query<Entity>,
    child_colliders: Query<(Entity, &ChildOf), With<BoxCollider>>,
    cursor: Option<ResMut<CursorState>>,
) {
    let mut any = false;
    for (entity, mut camera, pose, volume) in cameras.iter_mut() {
        let live_target = camera.target.filter(|t| all.contains(*t));
        let target = match live_target {
            Some(target) => target,
            None => match tags.iter().find(|(_, tag)| tag.is(PLAYER_TAG)) {
                Some((player, _)) => {
                    debug!("Camera {:?} follows player {:?}", entity, player);
                    player
                }
                None => {
                    error!(
                        "Camera {:?}: no target and no entity tagged '{}', disabling",
                        entity, PLAYER_TAG
                    );
                    camera.enabled = false;
                    continue;
                }
            },
        };
        camera.set_target(target);

        let (yaw, pitch, _) = pose.rotation.to_euler(EulerRot::YXZ);
        camera.horizontal_angle = yaw.to_degrees();
        camera.vertical_angle = pitch
            .to_degrees()
            .max(camera.min_vertical_angle)
            .min(camera.max_vertical_angle);
        camera.current_distance = camera.normal_distance;
        camera.desired_distance = camera
            .normal_distance
            .max(camera.min_zoom_distance)
            .min(camera.max_zoom_distance);

        if let Some(mut volume) = volume {
            volume.ignore(target);
            for (child, child_of) in child_colliders.iter() {
                if child_of.parent() == target {
                    volume.ignore(child);
                }
            }
            info!(
                "Camera volume on {:?} ignores {} target collider(s)",
                entity,
                volume.ignored.len()
            );
        }
        any = true;
    }

    if any && let Some(mut cursor) = cursor {
        cursor.lock();
    }
}

/// Orbit, zoom and place every enabled follow camera.
pub fn follow_camera_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    mut cameras: Query<(Entity, &mut FollowCamera, Option<&CameraVolume>)>,
    mut poses: Query<(Entity, &mut Pose, Option<&BoxCollider>)>,
) {
    let dt = time.delta;
    let colliders = ColliderSet::gather(
        poses
            .iter()
            .filter_map(|(entity, pose, collider)| collider.map(|c| (entity, pose, c))),
    );

    for (entity, mut camera, volume) in cameras.iter_mut() {
        if !camera.enabled {
            continue;
        }
        let Some(target) = camera.target else {
            continue;
        };
        let Ok((_, target_pose, _)) = poses.get(target) else {
            debug!("Camera {:?}: target {:?} is gone", entity, target);
            continue;
        };
        let target_position = target_pose.position;

        camera.orbit(input.mouse_delta);
        camera.zoom(input.scroll);

        let rotation = camera.orbit_rotation();
        let anchor = target_position + camera.target_offset;
        let back = rotation * Vec3::NEG_Z;

        let mut ignore: SmallVec<[Entity; 8]> = SmallVec::new();
        ignore.push(target);
        if let Some(volume) = volume {
            ignore.extend(volume.ignored.iter().copied());
        }
        let hit = sphere_cast(
            &colliders,
            anchor,
            camera.camera_radius,
            back,
            camera.sweep_distance(),
            camera.collision_mask,
            &ignore,
        );
        let resolved = camera.resolve_distance(hit.map(|h| h.distance));

        let Ok((_, mut pose, _)) = poses.get_mut(entity) else {
            continue;
        };
        if camera.snap_pending {
            camera.current_distance = resolved;
            pose.position = anchor + back * resolved;
            pose.rotation = rotation;
            camera.snap_pending = false;
            continue;
        }

        let t_pos = (dt * camera.position_smoothing).clamp(0.0, 1.0);
        let t_rot = (dt * camera.rotation_smoothing).clamp(0.0, 1.0);
        camera.current_distance += (resolved - camera.current_distance) * t_pos;
        let desired = anchor + back * camera.current_distance;
        pose.position = pose.position.lerp(desired, t_pos);
        pose.rotation = pose.rotation.slerp(rotation, t_rot);
    }
}

/// Push cameras out of solid colliders their volume overlaps.
pub fn camera_volume_pushout(
    mut cameras: Query<(&mut Pose, &CameraVolume)>,
    colliders: Query<(Entity, &Pose, &BoxCollider), Without<CameraVolume>>,
) {
    for (mut pose, volume) in cameras.iter_mut() {
        if !volume.enabled {
            continue;
        }
        for (entity, collider_pose, collider) in colliders.iter() {
            if !collider.is_solid() || volume.ignores(entity) {
                continue;
            }
            let (min_a, max_a) = volume.aabb(pose.position);
            let (min_b, max_b) = collider.aabb(collider_pose.position);
            let push = pushout(min_a, max_a, min_b, max_b);
            if push != Vec3::ZERO {
                pose.position += push;
            }
        }
    }
}
