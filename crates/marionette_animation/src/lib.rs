//! Marionette Animation
//!
//! Keyframe data and playback building blocks:
//!
//! - [`KeyframeTrack`]: sparse, time-sorted keys with linear/step sampling
//! - [`Channel`]: node, mesh or morph channel of a clip
//! - [`AnimationClip`]: named set of channels with duration and rate
//! - [`ClipBinding`]: validated per-node channel lookup for one clip
//! - [`AnimationState`]: per-instance clock, speed and flags of one clip
//! - [`ActiveSet`]: bitset of currently active clips
//! - [`mixer`]: pose evaluation and cross-clip blending

pub mod active_set;
pub mod binding;
pub mod channel;
pub mod clip;
pub mod mixer;
pub mod state;
pub mod tracks;
pub mod values;

pub use active_set::ActiveSet;
pub use binding::ClipBinding;
pub use channel::{Channel, MeshChannel, MorphChannel, NodeChannel};
pub use clip::AnimationClip;
pub use state::{Advance, AnimationFlags, AnimationState};
pub use tracks::{InterpolationMode, KeyframeTrack};
pub use values::{Interpolatable, MorphWeights};
