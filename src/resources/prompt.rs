use bevy_ecs::prelude::Resource;

/// Interaction prompt the host should display, if any.
///
/// Rewritten every frame by
/// [`door_trigger_system`](crate::systems::doortrigger::door_trigger_system).
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptText(pub Option<String>);

impl PromptText {
    pub fn text(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.0.is_some()
    }
}
