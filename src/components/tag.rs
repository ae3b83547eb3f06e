use bevy_ecs::prelude::Component;

/// Tag carried by the player character.
pub const PLAYER_TAG: &str = "Player";
/// Tag carried by the scene's main camera.
pub const MAIN_CAMERA_TAG: &str = "MainCamera";
/// Default tag for walkable surfaces.
pub const GROUND_TAG: &str = "Ground";

/// Classification label used for lookups ("Player") and surface tests ("Ground").
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Tag(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}
