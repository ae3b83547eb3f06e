//! Engine systems.
//!
//! This module groups all ECS systems that advance the simulation each frame.
//!
//! Submodules overview
//! - [`audio`] – forward sound cue messages to the host's audio backend
//! - [`doortrigger`] – door proximity, cues, spawn records and scene requests
//! - [`followcamera`] – third-person camera orbit, zoom, occlusion and push-out
//! - [`input`] – fold raw host input into [`crate::resources::input::InputState`]
//! - [`locomotion`] – character setup, mouse look, walking, gravity and jumping
//! - [`scene`] – check for a pending scene request and trigger the change
//! - [`time`] – update simulation time and delta

pub mod audio;
pub mod doortrigger;
pub mod followcamera;
pub mod input;
pub mod locomotion;
pub mod scene;
pub mod time;
