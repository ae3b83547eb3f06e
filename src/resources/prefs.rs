//! Process-wide key-value preference store.
//!
//! [`Prefs`] keeps scalar values under string keys and writes them to a JSON
//! file only when [`Prefs::save`] is called. It is the single cross-session
//! store; [`SpawnRecord`](super::spawnrecord::SpawnRecord) is built on top
//! of it.
//!
//! # File format
//!
//! ```json
//! {
//!   "SpawnX": { "Float": 4.0 },
//!   "ShouldSpawn": { "Int": 1 }
//! }
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PREFS_PATH: &str = "./prefs.json";

/// A stored preference value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrefValue {
    Float(f32),
    Int(i32),
    Text(String),
}

/// Key-value store with explicit flush.
///
/// Without a backing path the store is in-memory only and `save` succeeds
/// without touching the disk.
#[derive(Resource, Debug, Clone, Default)]
pub struct Prefs {
    values: FxHashMap<String, PrefValue>,
    path: Option<PathBuf>,
    dirty: bool,
}

impl Prefs {
    /// In-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store that saves to `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Load the store backed by `path`.
    ///
    /// A missing file yields an empty store bound to `path`; an unreadable or
    /// malformed file is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        if !path.exists() {
            debug!("No prefs file at {:?}, starting empty", path);
            return Ok(Self::with_path(path));
        }
        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read prefs file: {}", e))?;
        let values: FxHashMap<String, PrefValue> = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse prefs file: {}", e))?;
        info!("Loaded {} prefs from {:?}", values.len(), path);
        Ok(Self {
            values,
            path: Some(path),
            dirty: false,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// True when there are changes not yet flushed by [`Prefs::save`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_float(&mut self, key: impl Into<String>, value: f32) {
        self.values.insert(key.into(), PrefValue::Float(value));
        self.dirty = true;
    }

    pub fn get_float(&self, key: &str) -> Option<f32> {
        match self.values.get(key) {
            Some(PrefValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn set_int(&mut self, key: impl Into<String>, value: i32) {
        self.values.insert(key.into(), PrefValue::Int(value));
        self.dirty = true;
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.values.get(key) {
            Some(PrefValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), PrefValue::Text(value.into()));
        self.dirty = true;
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(PrefValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove a key. Returns the removed value if it existed.
    pub fn delete_key(&mut self, key: &str) -> Option<PrefValue> {
        let removed = self.values.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flush the store to its backing file.
    pub fn save(&mut self) -> Result<(), String> {
        let Some(path) = self.path.as_ref() else {
            self.dirty = false;
            return Ok(());
        };
        let text = serde_json::to_string_pretty(&self.values)
            .map_err(|e| format!("Failed to serialize prefs: {}", e))?;
        std::fs::write(path, text).map_err(|e| format!("Failed to save prefs file: {}", e))?;
        debug!("Saved {} prefs to {:?}", self.values.len(), path);
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "waypoint-prefs-{}-{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_typed_get_set() {
        let mut prefs = Prefs::new();
        prefs.set_float("x", 1.5);
        prefs.set_int("n", 3);
        prefs.set_string("s", "hello");
        assert_eq!(prefs.get_float("x"), Some(1.5));
        assert_eq!(prefs.get_int("n"), Some(3));
        assert_eq!(prefs.get_string("s"), Some("hello"));
        // Wrong type reads as absent.
        assert_eq!(prefs.get_int("x"), None);
        assert_eq!(prefs.len(), 3);
    }

    #[test]
    fn test_delete_key() {
        let mut prefs = Prefs::new();
        prefs.set_float("x", 1.0);
        assert!(prefs.has_key("x"));
        assert_eq!(prefs.delete_key("x"), Some(PrefValue::Float(1.0)));
        assert!(!prefs.has_key("x"));
        assert_eq!(prefs.delete_key("x"), None);
    }

    #[test]
    fn test_in_memory_save_clears_dirty() {
        let mut prefs = Prefs::new();
        prefs.set_int("n", 1);
        assert!(prefs.is_dirty());
        assert!(prefs.save().is_ok());
        assert!(!prefs.is_dirty());
    }

    #[test]
    fn test_save_then_load_from_disk() {
        let path = temp_path("roundtrip");
        let mut prefs = Prefs::with_path(&path);
        prefs.set_float("SpawnX", 4.0);
        prefs.set_int("ShouldSpawn", 1);
        prefs.save().unwrap();

        let loaded = Prefs::load(&path).unwrap();
        assert_eq!(loaded.get_float("SpawnX"), Some(4.0));
        assert_eq!(loaded.get_int("ShouldSpawn"), Some(1));
        assert_eq!(loaded.path(), Some(path.as_path()));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        let prefs = Prefs::load(&path).unwrap();
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let path = temp_path("malformed");
        std::fs::write(&path, "not json").unwrap();
        assert!(Prefs::load(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
