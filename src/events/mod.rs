//! Event types and observers.
//!
//! Submodules:
//! - [`audio`] – sound cue commands forwarded to the host's audio backend
//! - [`menu`] – menu button presses and the observer that runs their action
//! - [`scene`] – scene change/loaded notifications and their observers
pub mod audio;
pub mod menu;
pub mod scene;
