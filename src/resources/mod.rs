//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, scene
//! bookkeeping, preferences and host-facing state. Each submodule documents
//! the semantics and intended usage of its resource(s).
//!
//! Overview
//! - `audio` – bridge and channel toward the host's audio backend
//! - `cursor` – requested cursor lock/visibility
//! - `gameconfig` – INI-backed tuning for locomotion and camera
//! - `input` – per-frame state of the actions relevant to the game
//! - `prefs` – persistent key/value preference store
//! - `prompt` – interaction prompt text shown by the host
//! - `scene` – scene registry, current scene and pending scene request
//! - `spawnrecord` – where the player appears after a scene change
//! - `worldsignals` – global flags and strings shared with the host
//! - `worldtime` – simulation time and delta
pub mod audio;
pub mod cursor;
pub mod gameconfig;
pub mod input;
pub mod prefs;
pub mod prompt;
pub mod scene;
pub mod spawnrecord;
pub mod worldsignals;
pub mod worldtime;
