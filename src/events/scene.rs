//! Scene transition events and observers.
//!
//! Systems request a scene by writing [`NextScene`]. The
//! [`check_pending_scene`](crate::systems::scene::check_pending_scene) system
//! then triggers [`SceneChangeEvent`], handled by [`observe_scene_change`]:
//!
//! 1. every entity without [`Persistent`] is despawned
//! 2. [`CurrentScene`] is updated
//! 3. the scene's builder system from [`SceneRegistry`] runs
//! 4. [`SceneLoadedEvent`] is triggered
//!
//! [`observe_scene_loaded`] consumes a pending
//! [`SpawnRecord`](crate::resources::spawnrecord::SpawnRecord) and moves the
//! characters to it.
//!
//! Observers and registered builder systems live on entities; they must carry
//! [`Persistent`] to survive step 1.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, error, info};

use crate::components::charactercapsule::CharacterCapsule;
use crate::components::followcamera::FollowCamera;
use crate::components::locomotion::LocomotionController;
use crate::components::persistent::Persistent;
use crate::components::pose::Pose;
use crate::resources::prefs::Prefs;
use crate::resources::scene::{CurrentScene, SceneRegistry};
use crate::resources::spawnrecord::SpawnRecord;
use crate::systems::locomotion::teleport;

/// Switch to `scene`.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneChangeEvent {
    pub scene: String,
}

/// Emitted once the builder of `scene` has run.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneLoadedEvent {
    pub scene: String,
}

/// Observer that tears down the current scene and builds the requested one.
///
/// An unregistered scene name is logged and leaves the world untouched.
pub fn observe_scene_change(
    trigger: On<SceneChangeEvent>,
    mut commands: Commands,
    transient: Query<Entity, Without<Persistent>>,
    registry: Res<SceneRegistry>,
    mut current: ResMut<CurrentScene>,
) {
    let scene = trigger.event().scene.clone();
    let Some(builder) = registry.builder(&scene).copied() else {
        error!("Cannot load scene '{}': it is not registered", scene);
        return;
    };

    info!(
        "Switching scene {:?} -> '{}'",
        current.get().unwrap_or("<none>"),
        scene
    );

    let mut despawned = 0usize;
    for entity in transient.iter() {
        commands.entity(entity).try_despawn();
        despawned += 1;
    }
    debug!("Despawned {} scene entities", despawned);

    current.set(scene.clone());
    commands.run_system(builder);
    commands.trigger(SceneLoadedEvent { scene });
}

/// Observer that places the characters at a pending spawn record.
///
/// Scenes without a character leave the record pending for a later scene.
pub fn observe_scene_loaded(
    trigger: On<SceneLoadedEvent>,
    mut prefs: ResMut<Prefs>,
    mut characters: Query<(Entity, &mut Pose, Option<&mut CharacterCapsule>), With<LocomotionController>>,
    mut cameras: Query<&mut FollowCamera>,
) {
    debug!("Scene '{}' loaded", trigger.event().scene);
    if characters.is_empty() {
        return;
    }
    let Some(record) = SpawnRecord::take(&mut prefs) else {
        return;
    };

    for (entity, mut pose, capsule) in characters.iter_mut() {
        teleport(&mut pose, capsule.map(|c| c.into_inner()), &record);
        info!(
            "Spawned {:?} at {:?} yaw {} in '{}'",
            entity,
            record.position,
            record.yaw,
            trigger.event().scene
        );
        for mut camera in cameras.iter_mut() {
            if camera.target == Some(entity) {
                camera.request_snap();
            }
        }
    }
}
