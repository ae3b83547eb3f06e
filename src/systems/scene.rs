use crate::events::scene::SceneChangeEvent;
use crate::resources::scene::NextScene;
use bevy_ecs::prelude::*;

/// Trigger a [`SceneChangeEvent`] for a pending [`NextScene`] request.
pub fn check_pending_scene(mut commands: Commands, mut next_scene: ResMut<NextScene>) {
    if let Some(scene) = next_scene.take() {
        commands.trigger(SceneChangeEvent { scene });
    }
}
