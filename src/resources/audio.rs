//! ECS resources that bridge the world with the host's audio backend.
//!
//! Use [`setup_audio`] once during initialization. It inserts the
//! [`AudioBridge`] and `Messages<AudioCmd>` resources and hands back the
//! receiving end of the channel; the host drains it and plays the cues.

use crate::events::audio::AudioCmd;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Shared bridge between the ECS world and the audio backend.
///
/// Systems write [`AudioCmd`] messages; `forward_audio_cmds` pushes them
/// through [`AudioBridge::tx_cmd`].
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio backend).
    pub tx_cmd: Sender<AudioCmd>,
}

/// Create the command channel and register the bridge resources.
///
/// Returns the receiver the host reads commands from.
pub fn setup_audio(world: &mut World) -> Receiver<AudioCmd> {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    world.insert_resource(AudioBridge { tx_cmd });
    world.insert_resource(Messages::<AudioCmd>::default());
    rx_cmd
}

/// Remove the bridge, closing the channel for the host.
pub fn shutdown_audio(world: &mut World) {
    world.remove_resource::<AudioBridge>();
}
