//! # Marionette
//!
//! Skeletal animation and scene-graph transform pipeline. Import a model's
//! node hierarchy and animation clips, bind a per-instance
//! [`AnimationManager`] to it, toggle clips from gameplay code, call
//! [`AnimationManager::update`] once per frame, and hand
//! [`AnimationManager::skin_matrices`] to the renderer.
//!
//! ```rust,ignore
//! use marionette::prelude::*;
//!
//! let mut registry = ModelRegistry::new();
//! let handle = registry.insert(Model::new("hero", hierarchy, clips)?);
//!
//! let mut manager = AnimationManager::bind(&registry, handle);
//! let walk = manager.clip_index("walk").unwrap_or_default();
//! manager.set_active(walk, true);
//!
//! manager.update(dt);
//! upload(manager.skin_matrices());
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub use marionette_animation as animation;
pub use marionette_scene as scene;

pub mod errors {
    pub use marionette_core::errors::*;
}

pub mod settings {
    pub use marionette_core::settings::*;
}

pub use marionette_animation::{
    AnimationClip, AnimationFlags, AnimationState, Channel, InterpolationMode, KeyframeTrack,
    MeshChannel, MorphChannel, MorphWeights, NodeChannel,
};
pub use marionette_core::{
    AnimationSettings, BlendPolicy, MarionetteError, NodeIndex, Result, Transform,
};
pub use marionette_scene::{
    AnimationManager, Model, ModelHandle, ModelRegistry, Node, NodeHierarchy,
};

pub mod prelude {
    pub use crate::{
        AnimationClip, AnimationFlags, AnimationManager, AnimationSettings, BlendPolicy, Channel,
        KeyframeTrack, Model, ModelHandle, ModelRegistry, Node, NodeChannel, NodeHierarchy,
        NodeIndex, Transform,
    };
    pub use glam::{Mat4, Quat, Vec3};
}
