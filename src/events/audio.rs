use bevy_ecs::message::Message;

/// Commands sent *to* the audio backend.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Play a one-shot sound effect at `volume` (0..1).
    PlayFx { id: String, volume: f32 },
}
