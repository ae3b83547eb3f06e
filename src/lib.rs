//! Waypoint library.
//!
//! Third-person and first-person character locomotion, an orbiting follow
//! camera with occlusion, and door-driven scene transitions, all running on
//! a `bevy_ecs` world. The host feeds input and time, runs the schedule from
//! [`game::build_update_schedule`] and presents the resulting poses.
//!
//! The modules are public for integration tests and for hosts embedding the
//! simulation.

pub mod components;
pub mod events;
pub mod game;
pub mod physics;
pub mod resources;
pub mod systems;
