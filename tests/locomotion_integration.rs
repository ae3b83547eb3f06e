//! Locomotion integration tests: ground detection, gravity, jumping, walls,
//! camera-relative input, mouse look and spawn consumption.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec2, Vec3};

use waypoint::components::boxcollider::BoxCollider;
use waypoint::components::charactercapsule::CharacterCapsule;
use waypoint::components::locomotion::{
    GroundProbe, InputMapping, LocomotionController, MouseLook,
};
use waypoint::components::pose::Pose;
use waypoint::components::tag::{GROUND_TAG, MAIN_CAMERA_TAG, Tag};
use waypoint::resources::cursor::CursorState;
use waypoint::resources::input::InputState;
use waypoint::resources::prefs::Prefs;
use waypoint::resources::spawnrecord::SpawnRecord;
use waypoint::resources::worldtime::WorldTime;
use waypoint::systems::locomotion::{init_locomotion, locomotion_system, mouse_look_system};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    world.insert_resource(InputState::default());
    world.insert_resource(Prefs::new());
    world.insert_resource(CursorState::default());
    world
}

fn locomotion_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((init_locomotion, mouse_look_system, locomotion_system).chain());
    schedule
}

fn tick_locomotion(world: &mut World, schedule: &mut Schedule) {
    schedule.run(world);
}

/// Floor whose top face is at y = 0.
fn spawn_floor(world: &mut World, tag: &str) -> Entity {
    world
        .spawn((
            Tag::new(tag),
            Pose::new(Vec3::new(0.0, -0.5, 0.0)),
            BoxCollider::new(20.0, 1.0, 20.0),
        ))
        .id()
}

fn spawn_character(world: &mut World, position: Vec3, mapping: InputMapping) -> Entity {
    world
        .spawn((
            Pose::new(position),
            LocomotionController::new(mapping),
            CharacterCapsule::default(),
            GroundProbe::default(),
        ))
        .id()
}

fn controller(world: &World, entity: Entity) -> &LocomotionController {
    world.get::<LocomotionController>(entity).unwrap()
}

// =============================================================================
// Ground and gravity
// =============================================================================

#[test]
fn grounded_gravity_settles_to_floor_velocity_for_any_dt() {
    for dt in [0.001, 1.0 / 60.0, 0.1, 0.5] {
        let mut world = make_world(dt);
        spawn_floor(&mut world, GROUND_TAG);
        let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::LocalRelative);
        let mut schedule = locomotion_schedule();

        tick_locomotion(&mut world, &mut schedule);

        let c = controller(&world, player);
        assert!(c.grounded, "dt {}", dt);
        assert!(approx_eq(c.vertical_velocity, c.grounded_velocity), "dt {}", dt);
        assert!(approx_eq(world.get::<Pose>(player).unwrap().position.y, 0.0));
    }
}

#[test]
fn untagged_floor_does_not_ground() {
    let mut world = make_world(0.1);
    spawn_floor(&mut world, "Untagged");
    let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::LocalRelative);
    let mut schedule = locomotion_schedule();

    tick_locomotion(&mut world, &mut schedule);

    let c = controller(&world, player);
    assert!(!c.grounded);
    assert!(approx_eq(c.vertical_velocity, c.gravity * 0.1));
}

#[test]
fn airborne_character_falls_onto_floor() {
    let mut world = make_world(1.0 / 60.0);
    spawn_floor(&mut world, GROUND_TAG);
    let player = spawn_character(&mut world, Vec3::new(0.0, 2.0, 0.0), InputMapping::LocalRelative);
    let mut schedule = locomotion_schedule();

    for _ in 0..120 {
        tick_locomotion(&mut world, &mut schedule);
    }

    let pose = world.get::<Pose>(player).unwrap();
    assert!(approx_eq(pose.position.y, 0.0));
    assert!(controller(&world, player).grounded);
}

#[test]
fn jump_when_grounded_sets_launch_velocity() {
    let mut world = make_world(1.0 / 60.0);
    spawn_floor(&mut world, GROUND_TAG);
    let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::LocalRelative);
    let mut schedule = locomotion_schedule();
    tick_locomotion(&mut world, &mut schedule);

    world.resource_mut::<InputState>().jump.update(true);
    tick_locomotion(&mut world, &mut schedule);

    let c = controller(&world, player);
    let expected = (c.jump_height * -2.0 * c.gravity).sqrt();
    assert!(expected > 0.0);
    assert!(approx_eq(c.vertical_velocity, expected));
}

#[test]
fn jump_in_the_air_is_ignored() {
    let mut world = make_world(1.0 / 60.0);
    let player = spawn_character(&mut world, Vec3::new(0.0, 5.0, 0.0), InputMapping::LocalRelative);
    let mut schedule = locomotion_schedule();

    world.resource_mut::<InputState>().jump.update(true);
    tick_locomotion(&mut world, &mut schedule);

    assert!(controller(&world, player).vertical_velocity < 0.0);
}

// =============================================================================
// Horizontal movement
// =============================================================================

#[test]
fn camera_relative_strafe_moves_along_world_x() {
    let dt = 0.1;
    let mut world = make_world(dt);
    world.spawn((Tag::new(MAIN_CAMERA_TAG), Pose::new(Vec3::new(0.0, 2.0, -5.0))));
    let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::CameraRelative);
    let mut schedule = locomotion_schedule();

    world.resource_mut::<InputState>().move_axes = Vec2::new(1.0, 0.0);
    tick_locomotion(&mut world, &mut schedule);

    let walk = controller(&world, player).walk_speed;
    let pose = world.get::<Pose>(player).unwrap();
    assert!(approx_eq(pose.position.x, walk * dt));
    assert!(approx_eq(pose.position.z, 0.0));
    // Turned toward +X, at most fully.
    assert!(pose.forward().x > 0.0);
}

#[test]
fn camera_relative_follows_camera_yaw() {
    let dt = 0.1;
    let mut world = make_world(dt);
    world.spawn((
        Tag::new(MAIN_CAMERA_TAG),
        Pose::from_position_yaw(Vec3::ZERO, 90.0),
    ));
    let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::CameraRelative);
    let mut schedule = locomotion_schedule();

    world.resource_mut::<InputState>().move_axes = Vec2::new(0.0, 1.0);
    tick_locomotion(&mut world, &mut schedule);

    let walk = controller(&world, player).walk_speed;
    let pose = world.get::<Pose>(player).unwrap();
    assert!(approx_eq(pose.position.x, walk * dt));
    assert!(approx_eq(pose.position.z, 0.0));
}

#[test]
fn camera_relative_without_camera_uses_local_axes() {
    let dt = 0.1;
    let mut world = make_world(dt);
    let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::CameraRelative);
    let mut schedule = locomotion_schedule();

    world.resource_mut::<InputState>().move_axes = Vec2::new(0.0, 1.0);
    tick_locomotion(&mut world, &mut schedule);

    let c = controller(&world, player);
    assert!(c.camera.is_none());
    let pose = world.get::<Pose>(player).unwrap();
    assert!(approx_eq(pose.position.z, c.walk_speed * dt));
}

#[test]
fn run_modifier_uses_run_speed() {
    let dt = 0.1;
    let mut world = make_world(dt);
    let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::LocalRelative);
    let mut schedule = locomotion_schedule();

    {
        let mut input = world.resource_mut::<InputState>();
        input.move_axes = Vec2::new(0.0, 1.0);
        input.run.update(true);
    }
    tick_locomotion(&mut world, &mut schedule);

    let run = controller(&world, player).run_speed;
    assert!(approx_eq(world.get::<Pose>(player).unwrap().position.z, run * dt));
}

#[test]
fn wall_stops_horizontal_movement() {
    let mut world = make_world(1.0);
    // Wall spans x in [2, 3].
    world.spawn((
        Pose::new(Vec3::new(2.5, 1.0, 0.0)),
        BoxCollider::new(1.0, 4.0, 4.0),
    ));
    let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::LocalRelative);
    let mut schedule = locomotion_schedule();

    world.resource_mut::<InputState>().move_axes = Vec2::new(1.0, 0.0);
    tick_locomotion(&mut world, &mut schedule);

    // Capsule radius 0.5: the right face stops at the wall.
    let pose = world.get::<Pose>(player).unwrap();
    assert!(approx_eq(pose.position.x, 1.5));
}

#[test]
fn trigger_boxes_do_not_block() {
    let mut world = make_world(1.0);
    world.spawn((
        Pose::new(Vec3::new(2.5, 1.0, 0.0)),
        BoxCollider::new(1.0, 4.0, 4.0).as_trigger(),
    ));
    let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::LocalRelative);
    let mut schedule = locomotion_schedule();

    world.resource_mut::<InputState>().move_axes = Vec2::new(1.0, 0.0);
    tick_locomotion(&mut world, &mut schedule);

    let walk = controller(&world, player).walk_speed;
    assert!(approx_eq(world.get::<Pose>(player).unwrap().position.x, walk));
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn init_inserts_defaults_and_locks_cursor() {
    let mut world = make_world(0.0);
    let camera = world
        .spawn((Tag::new(MAIN_CAMERA_TAG), Pose::new(Vec3::ZERO)))
        .id();
    let player = world
        .spawn((Pose::new(Vec3::ZERO), LocomotionController::default()))
        .id();
    let mut schedule = locomotion_schedule();

    tick_locomotion(&mut world, &mut schedule);

    assert_eq!(
        world.get::<CharacterCapsule>(player),
        Some(&CharacterCapsule::default())
    );
    assert_eq!(world.get::<GroundProbe>(player), Some(&GroundProbe::default()));
    assert_eq!(controller(&world, player).camera, Some(camera));
    let cursor = world.resource::<CursorState>();
    assert!(cursor.locked);
    assert!(!cursor.visible);
}

#[test]
fn init_consumes_pending_spawn_record() {
    let mut world = make_world(0.0);
    let record = SpawnRecord::new(Vec3::new(3.0, 1.0, 4.0), 90.0);
    record.store(&mut world.resource_mut::<Prefs>()).unwrap();
    let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::LocalRelative);
    let mut schedule = locomotion_schedule();

    tick_locomotion(&mut world, &mut schedule);

    let pose = world.get::<Pose>(player).unwrap();
    assert!(approx_eq(pose.position.x, 3.0));
    assert!(approx_eq(pose.position.y, 1.0));
    assert!(approx_eq(pose.position.z, 4.0));
    assert!(approx_eq(pose.yaw_degrees(), 90.0));
    assert!(world.get::<CharacterCapsule>(player).unwrap().enabled);
    assert!(!SpawnRecord::is_pending(world.resource::<Prefs>()));
}

#[test]
fn stale_camera_is_resolved_again_by_tag() {
    let mut world = make_world(0.1);
    let old_camera = world
        .spawn((Tag::new(MAIN_CAMERA_TAG), Pose::new(Vec3::ZERO)))
        .id();
    let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::CameraRelative);
    let mut schedule = locomotion_schedule();
    tick_locomotion(&mut world, &mut schedule);
    assert_eq!(controller(&world, player).camera, Some(old_camera));

    world.despawn(old_camera);
    let new_camera = world
        .spawn((
            Tag::new(MAIN_CAMERA_TAG),
            Pose {
                position: Vec3::ZERO,
                rotation: Quat::from_rotation_y(std::f32::consts::PI),
            },
        ))
        .id();
    tick_locomotion(&mut world, &mut schedule);

    assert_eq!(controller(&world, player).camera, Some(new_camera));
}

// =============================================================================
// Mouse look
// =============================================================================

#[test]
fn mouse_look_turns_body_and_tilts_pitch() {
    let mut world = make_world(0.0);
    let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::LocalRelative);
    world.entity_mut(player).insert(MouseLook::default());
    let mut schedule = locomotion_schedule();

    world.resource_mut::<InputState>().mouse_delta = Vec2::new(10.0, 5.0);
    tick_locomotion(&mut world, &mut schedule);

    let look = world.get::<MouseLook>(player).unwrap();
    assert!(approx_eq(look.pitch, -5.0 * look.sensitivity));
    let yaw = world.get::<Pose>(player).unwrap().yaw_degrees();
    assert!(approx_eq(yaw, 10.0 * look.sensitivity));
}

#[test]
fn mouse_look_pitch_stays_clamped_under_random_input() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    let mut world = make_world(1.0 / 60.0);
    let player = spawn_character(&mut world, Vec3::ZERO, InputMapping::LocalRelative);
    world.entity_mut(player).insert(MouseLook::default());
    let mut schedule = locomotion_schedule();

    for _ in 0..500 {
        let delta = Vec2::new(rng.f32() * 100.0 - 50.0, rng.f32() * 100.0 - 50.0);
        world.resource_mut::<InputState>().mouse_delta = delta;
        tick_locomotion(&mut world, &mut schedule);
        let look = world.get::<MouseLook>(player).unwrap();
        assert!(look.pitch >= -look.max_pitch && look.pitch <= look.max_pitch);
    }
}
