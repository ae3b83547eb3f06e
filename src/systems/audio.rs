//! Systems bridging sound cue messages with the host's audio backend.
//!
//! Gameplay systems write [`AudioCmd`] messages. Each frame
//! [`update_audio_cmds`] advances the message queue and
//! [`forward_audio_cmds`] sends the readable messages through the
//! [`AudioBridge`] channel created by
//! [`crate::resources::audio::setup_audio`].
use crate::events::audio::AudioCmd;
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::{MessageReader, Messages, Res, ResMut};
use log::debug;

/// Forward ECS AudioCmd messages to the audio backend via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        debug!("audio: {:?}", cmd);
        // The host may have dropped the receiver; cues are fire-and-forget.
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd so same-frame readers can observe writes.
pub fn update_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}
