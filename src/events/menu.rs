//! Menu button press event and observer.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::menu::{MenuAction, MenuButton};
use crate::resources::scene::NextScene;
use crate::resources::worldsignals::{QUIT_GAME_FLAG, WorldSignals};

/// Triggered by the host when a [`MenuButton`] entity is clicked.
#[derive(Event, Debug, Clone, Copy)]
pub struct MenuButtonPressed {
    pub button: Entity,
}

/// Executes the action of the pressed button.
///
/// - [`MenuAction::PlayGame`] requests the named scene through [`NextScene`]
/// - [`MenuAction::ExitGame`] raises [`QUIT_GAME_FLAG`] for the host
pub fn observe_menu_button(
    trigger: On<MenuButtonPressed>,
    buttons: Query<&MenuButton>,
    mut next_scene: ResMut<NextScene>,
    mut world_signals: ResMut<WorldSignals>,
) {
    let event = trigger.event();
    let Ok(button) = buttons.get(event.button) else {
        warn!(
            "observe_menu_button: entity {:?} has no MenuButton",
            event.button
        );
        return;
    };
    match &button.action {
        MenuAction::PlayGame(scene) => {
            info!("Menu '{}': loading scene '{}'", button.label, scene);
            next_scene.set(scene.clone());
        }
        MenuAction::ExitGame => {
            info!("Menu '{}': quit requested", button.label);
            world_signals.set_flag(QUIT_GAME_FLAG);
        }
    }
}
