//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the world: poses, colliders, the locomotion controller, the follow camera,
//! doors and menu buttons.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned box of static world geometry
//! - [`cameravolume`] – push-out volume around a follow camera
//! - [`charactercapsule`] – collision capsule of a character
//! - [`doortrigger`] – scene-transition door with spawn pose and cues
//! - [`followcamera`] – orbiting third-person camera with zoom and occlusion settings
//! - [`locomotion`] – walk/run/jump controller, mouse look and ground probe
//! - [`menu`] – menu buttons and their actions
//! - [`persistent`] – marker for entities that persist across scene changes
//! - [`pose`] – world-space position and rotation
//! - [`tag`] – classification labels ("Player", "Ground", "MainCamera")

pub mod boxcollider;
pub mod cameravolume;
pub mod charactercapsule;
pub mod doortrigger;
pub mod followcamera;
pub mod locomotion;
pub mod menu;
pub mod persistent;
pub mod pose;
pub mod tag;
