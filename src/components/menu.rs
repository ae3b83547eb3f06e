//! Menu button component.
//!
//! The host renders and hit-tests buttons; when one is clicked it triggers
//! [`MenuButtonPressed`](crate::events::menu::MenuButtonPressed) with the
//! button entity and [`observe_menu_button`](crate::events::menu::observe_menu_button)
//! carries out the [`MenuAction`].

use bevy_ecs::prelude::Component;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    /// Load the named scene.
    PlayGame(String),
    /// Ask the host to quit.
    ExitGame,
}

#[derive(Component, Clone, Debug)]
pub struct MenuButton {
    pub label: String,
    pub action: MenuAction,
}

impl MenuButton {
    pub fn new(label: impl Into<String>, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}
