//! One-shot spawn pose handed from a door to the next scene.
//!
//! A door stores a [`SpawnRecord`] in [`Prefs`] right before it requests a
//! scene change; the character takes it once when the next scene has loaded.
//! The record is encoded as four floats plus a pending flag. Taking it deletes
//! every key, so a second take finds nothing.

use glam::Vec3;
use log::warn;

use crate::resources::prefs::Prefs;

pub const KEY_SPAWN_X: &str = "SpawnX";
pub const KEY_SPAWN_Y: &str = "SpawnY";
pub const KEY_SPAWN_Z: &str = "SpawnZ";
pub const KEY_SPAWN_YAW: &str = "SpawnRotY";
pub const KEY_SHOULD_SPAWN: &str = "ShouldSpawn";

/// Pose a character should appear at after a scene change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRecord {
    pub position: Vec3,
    /// Degrees about the up axis.
    pub yaw: f32,
}

impl SpawnRecord {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    /// Write this record as the pending spawn and flush the store.
    ///
    /// A previously pending record is replaced.
    pub fn store(&self, prefs: &mut Prefs) -> Result<(), String> {
        prefs.set_float(KEY_SPAWN_X, self.position.x);
        prefs.set_float(KEY_SPAWN_Y, self.position.y);
        prefs.set_float(KEY_SPAWN_Z, self.position.z);
        prefs.set_float(KEY_SPAWN_YAW, self.yaw);
        prefs.set_int(KEY_SHOULD_SPAWN, 1);
        prefs.save()
    }

    /// The pending record, if any, without consuming it.
    pub fn peek(prefs: &Prefs) -> Option<SpawnRecord> {
        if prefs.get_int(KEY_SHOULD_SPAWN) != Some(1) {
            return None;
        }
        let x = prefs.get_float(KEY_SPAWN_X)?;
        let y = prefs.get_float(KEY_SPAWN_Y)?;
        let z = prefs.get_float(KEY_SPAWN_Z)?;
        let yaw = prefs.get_float(KEY_SPAWN_YAW).unwrap_or(0.0);
        Some(SpawnRecord::new(Vec3::new(x, y, z), yaw))
    }

    /// Consume the pending record.
    ///
    /// All spawn keys are deleted and the store is flushed. A save failure
    /// is logged; the record is still returned and cleared in memory.
    pub fn take(prefs: &mut Prefs) -> Option<SpawnRecord> {
        let record = Self::peek(prefs);
        if record.is_none() && !prefs.has_key(KEY_SHOULD_SPAWN) {
            return None;
        }
        for key in [
            KEY_SPAWN_X,
            KEY_SPAWN_Y,
            KEY_SPAWN_Z,
            KEY_SPAWN_YAW,
            KEY_SHOULD_SPAWN,
        ] {
            prefs.delete_key(key);
        }
        if let Err(e) = prefs.save() {
            warn!("Spawn record consumed but prefs flush failed: {}", e);
        }
        record
    }

    pub fn is_pending(prefs: &Prefs) -> bool {
        Self::peek(prefs).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_then_take_yields_exact_pose() {
        let mut prefs = Prefs::new();
        let record = SpawnRecord::new(Vec3::new(1.25, 3.0, -7.5), 135.0);
        record.store(&mut prefs).unwrap();
        assert!(SpawnRecord::is_pending(&prefs));

        let taken = SpawnRecord::take(&mut prefs);
        assert_eq!(taken, Some(record));
        assert!(!SpawnRecord::is_pending(&prefs));
        assert!(!prefs.has_key(KEY_SHOULD_SPAWN));
        assert!(!prefs.has_key(KEY_SPAWN_X));
    }

    #[test]
    fn test_second_take_is_noop() {
        let mut prefs = Prefs::new();
        SpawnRecord::new(Vec3::ONE, 0.0).store(&mut prefs).unwrap();
        assert!(SpawnRecord::take(&mut prefs).is_some());
        assert!(SpawnRecord::take(&mut prefs).is_none());
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_store_replaces_pending_record() {
        let mut prefs = Prefs::new();
        SpawnRecord::new(Vec3::ONE, 10.0).store(&mut prefs).unwrap();
        let second = SpawnRecord::new(Vec3::new(2.0, 0.0, 2.0), 20.0);
        second.store(&mut prefs).unwrap();
        assert_eq!(SpawnRecord::take(&mut prefs), Some(second));
        assert!(SpawnRecord::take(&mut prefs).is_none());
    }

    #[test]
    fn test_flag_without_coordinates_is_cleared() {
        let mut prefs = Prefs::new();
        prefs.set_int(KEY_SHOULD_SPAWN, 1);
        assert!(SpawnRecord::take(&mut prefs).is_none());
        assert!(!prefs.has_key(KEY_SHOULD_SPAWN));
    }

    #[test]
    fn test_unrelated_keys_survive() {
        let mut prefs = Prefs::new();
        prefs.set_string("LastScene", "Hall");
        SpawnRecord::new(Vec3::ZERO, 0.0).store(&mut prefs).unwrap();
        SpawnRecord::take(&mut prefs);
        assert_eq!(prefs.get_string("LastScene"), Some("Hall"));
        assert_eq!(prefs.len(), 1);
    }
}
