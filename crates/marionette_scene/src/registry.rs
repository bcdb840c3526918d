use std::sync::Arc;

use marionette_core::{MarionetteError, Result};
use slotmap::{SlotMap, new_key_type};

use crate::model::Model;

new_key_type! {
    pub struct ModelHandle;
}

/// Owns imported models and hands out opaque handles.
///
/// Models are stored behind `Arc` so animation managers can hold on to the
/// immutable data without borrowing the registry every frame. Removing a
/// model invalidates its handle; managers already bound keep their `Arc`.
#[derive(Default)]
pub struct ModelRegistry {
    models: SlotMap<ModelHandle, Arc<Model>>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            models: SlotMap::with_key(),
        }
    }

    /// Registers a model, returning its handle.
    pub fn insert(&mut self, model: Model) -> ModelHandle {
        log::info!(
            "Registered model '{}' ({} nodes, {} clips)",
            model.name(),
            model.node_count(),
            model.animation_count()
        );
        self.models.insert(Arc::new(model))
    }

    /// Removes a model. Returns it if this was the last reference.
    pub fn remove(&mut self, handle: ModelHandle) -> Option<Model> {
        let Some(model) = self.models.remove(handle) else {
            log::warn!("Attempted to remove an unknown ModelHandle.");
            return None;
        };
        Arc::try_unwrap(model).ok()
    }

    #[must_use]
    pub fn get(&self, handle: ModelHandle) -> Option<&Model> {
        self.models.get(handle).map(AsRef::as_ref)
    }

    /// Shared reference for binding an animation manager.
    #[must_use]
    pub fn get_shared(&self, handle: ModelHandle) -> Option<Arc<Model>> {
        self.models.get(handle).cloned()
    }

    /// Like [`get_shared`](Self::get_shared), but a stale handle is an error.
    pub fn require(&self, handle: ModelHandle) -> Result<Arc<Model>> {
        self.get_shared(handle).ok_or(MarionetteError::ModelNotFound)
    }

    #[must_use]
    pub fn contains(&self, handle: ModelHandle) -> bool {
        self.models.contains_key(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModelHandle, &Model)> {
        self.models.iter().map(|(h, m)| (h, m.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::NodeHierarchy;
    use crate::node::Node;

    fn model(name: &str) -> Model {
        let mut h = NodeHierarchy::new();
        h.add_child(None, Node::new("root")).unwrap();
        Model::new(name, h, Vec::new()).unwrap()
    }

    #[test]
    fn handles_go_stale_after_removal() {
        let mut registry = ModelRegistry::new();
        let a = registry.insert(model("a"));
        let b = registry.insert(model("b"));
        assert_eq!(registry.len(), 2);

        assert!(registry.remove(a).is_some());
        assert!(!registry.contains(a));
        assert!(registry.get(a).is_none());
        assert_eq!(registry.get(b).map(Model::name), Some("b"));

        // The freed slot is reused without reviving the old handle.
        let c = registry.insert(model("c"));
        assert_ne!(a, c);
        assert!(registry.get(a).is_none());
    }

    #[test]
    fn shared_reference_outlives_removal() {
        let mut registry = ModelRegistry::new();
        let h = registry.insert(model("shared"));
        let held = registry.get_shared(h).unwrap();
        assert!(registry.remove(h).is_none());
        assert_eq!(held.name(), "shared");
        assert_eq!(registry.require(h).err(), Some(MarionetteError::ModelNotFound));
    }
}
