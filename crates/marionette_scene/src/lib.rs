//! Marionette Scene
//!
//! Model-side data and per-instance playback:
//! - [`Node`] / [`NodeHierarchy`]: the bone tree of one model
//! - [`Model`]: validated hierarchy plus animation table
//! - [`ModelRegistry`]: handle-based ownership of imported models
//! - [`transform_system`]: hierarchy composition into skin matrices
//! - [`AnimationManager`]: per-instance clip control and frame update

pub mod hierarchy;
pub mod manager;
pub mod model;
pub mod node;
pub mod registry;
pub mod transform_system;

pub use hierarchy::NodeHierarchy;
pub use manager::AnimationManager;
pub use model::Model;
pub use node::Node;
pub use registry::{ModelHandle, ModelRegistry};
