//! Marionette Core
//!
//! Foundational types shared by every crate in the pipeline:
//!
//! - [`NodeIndex`]: stable handle of a node inside one model's hierarchy
//! - [`MarionetteError`]: data-integrity errors raised while building models
//! - [`AnimationSettings`]: tunables for playback and blending
//! - [`Transform`]: decomposed translation/rotation/scale triple

pub mod errors;
pub mod index;
pub mod settings;
pub mod transform;

pub use errors::{MarionetteError, Result};
pub use index::NodeIndex;
pub use settings::{AnimationSettings, BlendPolicy};
pub use transform::Transform;
