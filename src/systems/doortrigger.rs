//! Door trigger system.
//!
//! Each frame, for every [`DoorTrigger`]:
//!
//! 1. a pending delayed load counts down and fires when it reaches zero
//! 2. proximity to the player is tested (distance or collider contact)
//! 3. entering plays the hover cue once; leaving re-arms it
//! 4. activation stores the spawn record, plays the click cue and requests
//!    the destination scene (after `click_delay` when a click cue is set)
//!
//! The [`PromptText`] resource is rewritten from the doors' prompt state.
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{debug, error, info, warn};

use crate::components::boxcollider::{BoxCollider, aabb_overlap};
use crate::components::charactercapsule::CharacterCapsule;
use crate::components::doortrigger::{DoorActivation, DoorTrigger};
use crate::components::pose::Pose;
use crate::components::tag::{PLAYER_TAG, Tag};
use crate::events::audio::AudioCmd;
use crate::resources::input::InputState;
use crate::resources::prefs::Prefs;
use crate::resources::prompt::PromptText;
use crate::resources::scene::{NextScene, SceneRegistry};
use crate::resources::spawnrecord::SpawnRecord;
use crate::resources::worldtime::WorldTime;

/// Extra reach around a character's box when testing contact with a door.
pub const CONTACT_SKIN: f32 = 0.05;

/// Whether the player standing at `player` counts as near `door`.
pub fn player_is_near(
    door: &DoorTrigger,
    door_pose: &Pose,
    door_collider: Option<&BoxCollider>,
    player: &Pose,
    player_capsule: Option<&CharacterCapsule>,
) -> bool {
    match (door.activation, door_collider) {
        (DoorActivation::Contact, Some(collider)) if collider.enabled => {
            let (min_d, max_d) = collider.aabb(door_pose.position);
            let (min_p, max_p) = match player_capsule {
                Some(capsule) => capsule.aabb(player.position),
                None => (player.position, player.position),
            };
            let skin = Vec3::splat(CONTACT_SKIN);
            aabb_overlap(min_p - skin, max_p + skin, min_d, max_d)
        }
        _ => player.position.distance(door_pose.position) <= door.interaction_distance,
    }
}

fn request_destination(
    entity: Entity,
    door: &mut DoorTrigger,
    registry: &SceneRegistry,
    next_scene: &mut NextScene,
    prefs: &mut Prefs,
) {
    match door.destination.resolve(registry) {
        Ok(scene) => {
            info!("Door {:?}: loading scene '{}'", entity, scene);
            next_scene.set(scene);
        }
        Err(e) => {
            error!("Door {:?}: cannot change scene: {}", entity, e);
            door.transitioning = false;
            // The stored record belongs to a transition that never happened.
            SpawnRecord::take(prefs);
        }
    }
}

fn play_fx(audio: &mut MessageWriter<AudioCmd>, id: &Option<String>, volume: f32) -> bool {
    match id {
        Some(id) => {
            audio.write(AudioCmd::PlayFx {
                id: id.clone(),
                volume: volume.clamp(0.0, 1.0),
            });
            true
        }
        None => false,
    }
}

/// Run proximity, activation and delayed loads for every door.
#[allow(clippy::too_many_arguments)]
pub fn door_trigger_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    registry: Res<SceneRegistry>,
    mut next_scene: ResMut<NextScene>,
    mut prefs: ResMut<Prefs>,
    mut prompt: ResMut<PromptText>,
    mut audio: MessageWriter<AudioCmd>,
    mut doors: Query<(Entity, &mut DoorTrigger, &Pose, Option<&BoxCollider>)>,
    players: Query<(&Pose, Option<&CharacterCapsule>, &Tag), Without<DoorTrigger>>,
) {
    let dt = time.delta;
    let player = players.iter().find(|(_, _, tag)| tag.is(PLAYER_TAG));
    let mut prompt_text: Option<String> = None;

    for (entity, mut door, door_pose, collider) in doors.iter_mut() {
        // 1. Delayed load
        if let Some(remaining) = door.pending_load {
            let remaining = remaining - dt;
            if remaining > 0.0 {
                door.pending_load = Some(remaining);
            } else {
                door.pending_load = None;
                request_destination(entity, &mut door, &registry, &mut next_scene, &mut prefs);
            }
            continue;
        }

        // 2. Proximity
        let near = player.is_some_and(|(pose, capsule, _)| {
            player_is_near(&door, door_pose, collider, pose, capsule)
        });
        let entered = near && !door.player_nearby;
        let left = !near && door.player_nearby;
        door.player_nearby = near;

        // 3. Hover cue
        if entered {
            debug!("Player reached door {:?}", entity);
            if !door.hover_played {
                let volume = door.sound_volume;
                door.hover_played = play_fx(&mut audio, &door.hover_sound, volume);
            }
        }
        if left {
            debug!("Player left door {:?}", entity);
            door.hover_played = false;
        }

        // 4. Activation
        let activate = !door.transitioning
            && match door.activation {
                DoorActivation::Interact => near && input.interact.just_pressed,
                DoorActivation::Contact => entered,
            };
        if activate {
            door.transitioning = true;
            info!("Opening door {:?}", entity);
            let record = SpawnRecord::new(door.spawn_position, door.spawn_yaw);
            if let Err(e) = record.store(&mut prefs) {
                warn!("Door {:?}: spawn record not flushed: {}", entity, e);
            }
            let volume = door.sound_volume;
            if play_fx(&mut audio, &door.click_sound, volume) {
                door.pending_load = Some(door.click_delay.max(0.0));
            } else {
                request_destination(entity, &mut door, &registry, &mut next_scene, &mut prefs);
            }
        }

        if prompt_text.is_none() && door.prompt_visible() {
            prompt_text = Some(door.prompt_text.clone());
        }
    }

    if prompt.0 != prompt_text {
        prompt.0 = prompt_text;
    }
}
