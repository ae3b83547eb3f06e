//! Global signal storage resource.
//!
//! The [`WorldSignals`] resource provides world-wide flags for cross-system
//! communication and for telling the host about requests it must carry out,
//! such as quitting.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashSet;

/// Flag set when a menu button asks the host to quit.
pub const QUIT_GAME_FLAG: &str = "quit_game";

/// Global signal storage for cross-system communication.
#[derive(Debug, Clone, Default, Resource)]
pub struct WorldSignals {
    /// Presence-only boolean flags; a key being present means "true".
    pub flags: FxHashSet<String>,
}

impl WorldSignals {
    /// Mark a flag as present/true.
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }
    /// Remove a flag (make it false/absent).
    pub fn clear_flag(&mut self, key: &str) {
        self.flags.remove(key);
    }
    /// Check whether a flag is present/true.
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut signals = WorldSignals::default();
        assert!(!signals.has_flag(QUIT_GAME_FLAG));
        signals.set_flag(QUIT_GAME_FLAG);
        assert!(signals.has_flag(QUIT_GAME_FLAG));
        signals.clear_flag(QUIT_GAME_FLAG);
        assert!(!signals.has_flag(QUIT_GAME_FLAG));
    }
}
