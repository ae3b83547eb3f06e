//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component survive scene switches. The
//! player character carries it so that its pose and vertical velocity carry
//! over when a door loads the next scene.

use bevy_ecs::prelude::Component;

/// Tag component used to mark entities that should persist across scene changes.
///
/// Every entity without this component is despawned by
/// [`observe_scene_change`](crate::events::scene::observe_scene_change).
#[derive(Component, Clone, Debug)]
pub struct Persistent;
