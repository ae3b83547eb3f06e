//! World setup, scene builders and the per-frame schedule.
//!
//! Three scenes are registered:
//!
//! - `"Menu"` – two menu buttons, the cursor is released
//! - `"Hallway"` – a corridor with an interact door leading to the courtyard
//! - `"Courtyard"` – an open yard with a pillar and a contact door back
//!
//! The player is created by the first scene that needs one and is
//! [`Persistent`], so it survives every scene change. Each scene builds its
//! own main camera.
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemId;
use crossbeam_channel::Receiver;
use glam::{EulerRot, Quat, Vec3};
use log::info;

use crate::components::boxcollider::BoxCollider;
use crate::components::cameravolume::CameraVolume;
use crate::components::doortrigger::{DoorActivation, DoorTrigger};
use crate::components::locomotion::{InputMapping, LocomotionController};
use crate::components::menu::{MenuAction, MenuButton};
use crate::components::persistent::Persistent;
use crate::components::pose::Pose;
use crate::components::tag::{GROUND_TAG, MAIN_CAMERA_TAG, PLAYER_TAG, Tag};
use crate::events::audio::AudioCmd;
use crate::events::menu::observe_menu_button;
use crate::events::scene::{observe_scene_change, observe_scene_loaded};
use crate::resources::audio::setup_audio;
use crate::resources::cursor::CursorState;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::prefs::Prefs;
use crate::resources::prompt::PromptText;
use crate::resources::scene::{CurrentScene, NextScene, SceneRegistry, SceneTarget};
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::{forward_audio_cmds, update_audio_cmds};
use crate::systems::doortrigger::door_trigger_system;
use crate::systems::followcamera::{
    camera_volume_pushout, follow_camera_system, init_follow_camera,
};
use crate::systems::locomotion::{init_locomotion, locomotion_system, mouse_look_system};
use crate::systems::scene::check_pending_scene;

pub const MENU_SCENE: &str = "Menu";
pub const HALLWAY_SCENE: &str = "Hallway";
pub const COURTYARD_SCENE: &str = "Courtyard";

pub const HALLWAY_START: Vec3 = Vec3::new(0.0, 0.1, -15.0);
pub const HALLWAY_DOOR: Vec3 = Vec3::new(0.0, 1.5, 18.0);
pub const COURTYARD_SPAWN: Vec3 = Vec3::new(0.0, 0.1, -6.0);
pub const COURTYARD_DOOR: Vec3 = Vec3::new(0.0, 1.5, -12.0);
pub const HALLWAY_RETURN_SPAWN: Vec3 = Vec3::new(0.0, 0.1, 14.0);

pub const DOOR_HOVER_FX: &str = "door_hover";
pub const DOOR_CLICK_FX: &str = "door_click";

fn camera_bundle(config: &GameConfig, position: Vec3, yaw_degrees: f32) -> impl Bundle {
    let rotation = Quat::from_euler(
        EulerRot::YXZ,
        yaw_degrees.to_radians(),
        15f32.to_radians(),
        0.0,
    );
    (
        Tag::new(MAIN_CAMERA_TAG),
        Pose {
            position,
            rotation,
        },
        config.follow_camera(None),
        CameraVolume::default(),
    )
}

fn ground_bundle(position: Vec3, width: f32, depth: f32) -> impl Bundle {
    (
        Tag::new(GROUND_TAG),
        Pose::new(position),
        BoxCollider::new(width, 1.0, depth),
    )
}

fn wall_bundle(position: Vec3, width: f32, height: f32, depth: f32) -> impl Bundle {
    (Pose::new(position), BoxCollider::new(width, height, depth))
}

/// Spawn the persistent player at `position` unless one already exists.
fn ensure_player(
    commands: &mut Commands,
    config: &GameConfig,
    players: &Query<(), With<LocomotionController>>,
    position: Vec3,
) {
    if !players.is_empty() {
        return;
    }
    let mut player = commands.spawn((
        Tag::new(PLAYER_TAG),
        Pose::new(position),
        config.locomotion(),
        Persistent,
    ));
    if config.mapping == InputMapping::LocalRelative {
        player.insert(config.mouse_look());
    }
    info!("Player spawned at {:?}", position);
}

pub fn build_menu(mut commands: Commands, cursor: Option<ResMut<CursorState>>) {
    commands.spawn(MenuButton::new(
        "Play",
        MenuAction::PlayGame(HALLWAY_SCENE.to_string()),
    ));
    commands.spawn(MenuButton::new("Quit", MenuAction::ExitGame));
    if let Some(mut cursor) = cursor {
        cursor.release();
    }
}

pub fn build_hallway(
    mut commands: Commands,
    config: Res<GameConfig>,
    players: Query<(), With<LocomotionController>>,
) {
    commands.spawn(ground_bundle(Vec3::new(0.0, -0.5, 0.0), 8.0, 40.0));
    commands.spawn(wall_bundle(Vec3::new(-4.5, 2.0, 0.0), 1.0, 4.0, 40.0));
    commands.spawn(wall_bundle(Vec3::new(4.5, 2.0, 0.0), 1.0, 4.0, 40.0));
    commands.spawn(wall_bundle(Vec3::new(0.0, 2.0, 20.5), 8.0, 4.0, 1.0));

    commands.spawn((
        Pose::new(HALLWAY_DOOR),
        BoxCollider::new(2.0, 3.0, 0.5).as_trigger(),
        DoorTrigger::new(SceneTarget::by_name(COURTYARD_SCENE))
            .with_spawn(COURTYARD_SPAWN, 0.0)
            .with_sounds(Some(DOOR_HOVER_FX), Some(DOOR_CLICK_FX)),
    ));

    commands.spawn(camera_bundle(
        &config,
        HALLWAY_START + Vec3::new(0.0, 3.0, -5.0),
        0.0,
    ));
    ensure_player(&mut commands, &config, &players, HALLWAY_START);
}

pub fn build_courtyard(
    mut commands: Commands,
    config: Res<GameConfig>,
    registry: Res<SceneRegistry>,
    players: Query<(), With<LocomotionController>>,
) {
    commands.spawn(ground_bundle(Vec3::new(0.0, -0.5, 0.0), 30.0, 30.0));
    commands.spawn(wall_bundle(Vec3::new(4.0, 1.5, 4.0), 1.0, 3.0, 1.0));

    let back = match registry.index_of(HALLWAY_SCENE) {
        Some(index) => SceneTarget::by_index(index),
        None => SceneTarget::by_name(HALLWAY_SCENE),
    };
    commands.spawn((
        Pose::new(COURTYARD_DOOR),
        BoxCollider::new(2.0, 3.0, 0.5).as_trigger(),
        DoorTrigger::new(back)
            .with_activation(DoorActivation::Contact)
            .with_spawn(HALLWAY_RETURN_SPAWN, 180.0)
            .with_sounds(None, Some(DOOR_CLICK_FX)),
    ));

    commands.spawn(camera_bundle(
        &config,
        COURTYARD_SPAWN + Vec3::new(0.0, 3.0, -5.0),
        0.0,
    ));
    ensure_player(&mut commands, &config, &players, COURTYARD_SPAWN);
}

/// Register `builder` under `name` as a persistent one-shot system.
pub fn register_scene<M>(
    world: &mut World,
    name: &str,
    builder: impl IntoSystem<(), (), M> + 'static,
) -> SystemId {
    let id = world.register_system(builder);
    world.entity_mut(id.entity()).insert(Persistent);
    world
        .get_resource_or_insert_with(SceneRegistry::new)
        .register(name, id);
    id
}

/// Insert every resource, observer and scene the simulation needs.
///
/// Returns the receiving end of the audio command channel.
pub fn setup_world(world: &mut World, config: GameConfig, prefs: Prefs) -> Receiver<AudioCmd> {
    world.insert_resource(WorldTime::default());
    world.insert_resource(WorldSignals::default());
    world.insert_resource(InputState::default());
    world.insert_resource(CursorState::default());
    world.insert_resource(PromptText::default());
    world.insert_resource(CurrentScene::default());
    world.insert_resource(NextScene::new());
    world.insert_resource(SceneRegistry::new());
    world.insert_resource(config);
    world.insert_resource(prefs);
    let rx = setup_audio(world);

    world.spawn((Observer::new(observe_scene_change), Persistent));
    world.spawn((Observer::new(observe_scene_loaded), Persistent));
    world.spawn((Observer::new(observe_menu_button), Persistent));

    register_scene(world, MENU_SCENE, build_menu);
    register_scene(world, HALLWAY_SCENE, build_hallway);
    register_scene(world, COURTYARD_SCENE, build_courtyard);

    world.flush();
    rx
}

/// Per-frame schedule.
///
/// Scene changes land first, then the characters move, then doors and
/// cameras react to where the characters ended up.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(check_pending_scene);
    update.add_systems(
        (init_locomotion, mouse_look_system, locomotion_system)
            .chain()
            .after(check_pending_scene),
    );
    update.add_systems(door_trigger_system.after(locomotion_system));
    update.add_systems(
        (init_follow_camera, follow_camera_system, camera_volume_pushout)
            .chain()
            .after(locomotion_system),
    );
    update.add_systems(
        (update_audio_cmds, forward_audio_cmds)
            .chain()
            .after(door_trigger_system),
    );
    update
}
