//! Scene-transition door.
//!
//! A [`DoorTrigger`] sits on an entity with a [`Pose`](super::pose::Pose)
//! (and a [`BoxCollider`](super::boxcollider::BoxCollider) for contact doors).
//! When the player activates it, the door writes a spawn record for the next
//! scene, optionally plays a cue and then requests the scene change. See
//! [`crate::systems::doortrigger`].

use bevy_ecs::prelude::Component;
use glam::Vec3;

use crate::resources::scene::SceneTarget;

pub const DEFAULT_INTERACTION_DISTANCE: f32 = 3.0;
pub const DEFAULT_PROMPT_TEXT: &str = "Press E to open the door";
pub const DEFAULT_CLICK_DELAY: f32 = 0.2;

/// What opens the door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DoorActivation {
    /// Player within `interaction_distance` presses the interact key.
    #[default]
    Interact,
    /// Player touches the door's collider.
    Contact,
}

#[derive(Component, Clone, Debug)]
pub struct DoorTrigger {
    pub destination: SceneTarget,
    /// Where the player appears in the destination scene.
    pub spawn_position: Vec3,
    /// Yaw of the player in the destination scene, in degrees.
    pub spawn_yaw: f32,
    pub activation: DoorActivation,
    pub interaction_distance: f32,
    pub show_prompt: bool,
    pub prompt_text: String,
    /// Cue played once when the player comes near.
    pub hover_sound: Option<String>,
    /// Cue played when the door opens; delays the scene change by `click_delay`.
    pub click_sound: Option<String>,
    pub sound_volume: f32,
    pub click_delay: f32,

    pub player_nearby: bool,
    pub hover_played: bool,
    pub transitioning: bool,
    /// Seconds left before the scene request is issued.
    pub pending_load: Option<f32>,
}

impl Default for DoorTrigger {
    fn default() -> Self {
        Self::new(SceneTarget::default())
    }
}

impl DoorTrigger {
    pub fn new(destination: SceneTarget) -> Self {
        Self {
            destination,
            spawn_position: Vec3::new(0.0, 1.0, 0.0),
            spawn_yaw: 0.0,
            activation: DoorActivation::Interact,
            interaction_distance: DEFAULT_INTERACTION_DISTANCE,
            show_prompt: true,
            prompt_text: DEFAULT_PROMPT_TEXT.to_string(),
            hover_sound: None,
            click_sound: None,
            sound_volume: 1.0,
            click_delay: DEFAULT_CLICK_DELAY,
            player_nearby: false,
            hover_played: false,
            transitioning: false,
            pending_load: None,
        }
    }

    pub fn with_spawn(mut self, position: Vec3, yaw_degrees: f32) -> Self {
        self.spawn_position = position;
        self.spawn_yaw = yaw_degrees;
        self
    }

    pub fn with_activation(mut self, activation: DoorActivation) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_sounds(mut self, hover: Option<&str>, click: Option<&str>) -> Self {
        self.hover_sound = hover.map(str::to_string);
        self.click_sound = click.map(str::to_string);
        self
    }

    /// Whether the prompt should be shown this frame.
    pub fn prompt_visible(&self) -> bool {
        self.player_nearby && self.show_prompt && !self.transitioning
    }
}
