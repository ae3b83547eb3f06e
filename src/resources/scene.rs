//! Scene registry and transition requests.
//!
//! Scenes are named, ordered (for index lookup) and built by a registered
//! system, in the same spirit as the system store used for state hooks.
//! Systems request a change through [`NextScene`]; the
//! [`check_pending_scene`](crate::systems::scene::check_pending_scene) system
//! turns a pending request into a
//! [`SceneChangeEvent`](crate::events::scene::SceneChangeEvent).

use std::fmt;

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

/// Why a scene destination could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Neither a name nor an index was given.
    NoDestination,
    UnknownName(String),
    UnknownIndex(usize),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::NoDestination => write!(f, "no scene name or index given"),
            SceneError::UnknownName(name) => write!(f, "scene '{}' is not registered", name),
            SceneError::UnknownIndex(index) => write!(f, "no scene at index {}", index),
        }
    }
}

impl std::error::Error for SceneError {}

/// Destination of a scene transition, by name or by registry index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneTarget {
    pub name: Option<String>,
    pub index: Option<usize>,
}

impl SceneTarget {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            index: None,
        }
    }

    pub fn by_index(index: usize) -> Self {
        Self {
            name: None,
            index: Some(index),
        }
    }

    /// Resolve to a registered scene name.
    ///
    /// A non-empty name takes precedence over the index.
    pub fn resolve(&self, registry: &SceneRegistry) -> Result<String, SceneError> {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return if registry.contains(name) {
                Ok(name.to_string())
            } else {
                Err(SceneError::UnknownName(name.to_string()))
            };
        }
        match self.index {
            Some(index) => registry
                .name_at(index)
                .map(str::to_string)
                .ok_or(SceneError::UnknownIndex(index)),
            None => Err(SceneError::NoDestination),
        }
    }
}

/// Ordered scene names and the systems that build each scene.
#[derive(Resource, Default)]
pub struct SceneRegistry {
    names: Vec<String>,
    builders: FxHashMap<String, SystemId>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene and its builder. Re-registering a name replaces the
    /// builder and keeps the original index.
    pub fn register(&mut self, name: impl Into<String>, builder: SystemId) {
        let name = name.into();
        if !self.names.contains(&name) {
            self.names.push(name.clone());
        }
        self.builders.insert(name, builder);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn builder(&self, name: &str) -> Option<&SystemId> {
        self.builders.get(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Name of the scene currently loaded, if any.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentScene {
    name: Option<String>,
    loads: u32,
}

impl CurrentScene {
    pub fn get(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
        self.loads += 1;
    }

    /// How many scene loads happened so far.
    pub fn load_count(&self) -> u32 {
        self.loads
    }
}

/// Intent to switch to another scene.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct NextScene {
    next: Option<String>,
}

impl NextScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a switch to `name`. A later request in the same frame wins.
    pub fn set(&mut self, name: impl Into<String>) {
        self.next = Some(name.into());
    }

    pub fn get(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.next.is_some()
    }

    pub fn take(&mut self) -> Option<String> {
        self.next.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    fn registry(world: &mut World, names: &[&str]) -> SceneRegistry {
        let mut registry = SceneRegistry::new();
        for name in names {
            let id = world.register_system(|| {});
            registry.register(*name, id);
        }
        registry
    }

    #[test]
    fn test_register_keeps_order() {
        let mut world = World::new();
        let reg = registry(&mut world, &["Menu", "Hall", "Yard"]);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.index_of("Hall"), Some(1));
        assert_eq!(reg.name_at(2), Some("Yard"));
        assert!(reg.builder("Menu").is_some());
        assert!(reg.builder("Attic").is_none());
    }

    #[test]
    fn test_reregister_keeps_index() {
        let mut world = World::new();
        let mut reg = registry(&mut world, &["Menu", "Hall"]);
        let id = world.register_system(|| {});
        reg.register("Menu", id);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.index_of("Menu"), Some(0));
        assert_eq!(reg.builder("Menu"), Some(&id));
    }

    #[test]
    fn test_resolve_by_name_and_index() {
        let mut world = World::new();
        let reg = registry(&mut world, &["Menu", "Hall"]);
        assert_eq!(SceneTarget::by_name("Hall").resolve(&reg), Ok("Hall".to_string()));
        assert_eq!(SceneTarget::by_index(0).resolve(&reg), Ok("Menu".to_string()));
    }

    #[test]
    fn test_resolve_name_wins_over_index() {
        let mut world = World::new();
        let reg = registry(&mut world, &["Menu", "Hall"]);
        let target = SceneTarget {
            name: Some("Hall".to_string()),
            index: Some(0),
        };
        assert_eq!(target.resolve(&reg), Ok("Hall".to_string()));

        // An empty name falls through to the index.
        let target = SceneTarget {
            name: Some(String::new()),
            index: Some(0),
        };
        assert_eq!(target.resolve(&reg), Ok("Menu".to_string()));
    }

    #[test]
    fn test_resolve_errors() {
        let mut world = World::new();
        let reg = registry(&mut world, &["Menu"]);
        assert_eq!(
            SceneTarget::default().resolve(&reg),
            Err(SceneError::NoDestination)
        );
        assert_eq!(
            SceneTarget::by_name("Attic").resolve(&reg),
            Err(SceneError::UnknownName("Attic".to_string()))
        );
        assert_eq!(
            SceneTarget::by_index(4).resolve(&reg),
            Err(SceneError::UnknownIndex(4))
        );
    }

    #[test]
    fn test_next_scene_take() {
        let mut next = NextScene::new();
        assert!(!next.is_pending());
        next.set("Hall");
        next.set("Yard");
        assert_eq!(next.get(), Some("Yard"));
        assert_eq!(next.take(), Some("Yard".to_string()));
        assert!(!next.is_pending());
    }

    #[test]
    fn test_current_scene_counts_loads() {
        let mut current = CurrentScene::default();
        assert_eq!(current.get(), None);
        current.set("Hall");
        current.set("Hall");
        assert_eq!(current.get(), Some("Hall"));
        assert_eq!(current.load_count(), 2);
    }
}
