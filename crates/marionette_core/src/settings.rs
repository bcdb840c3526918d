//! Animation Settings
//!
//! Tunables consumed by the animation manager.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use marionette_core::{AnimationSettings, BlendPolicy};
//!
//! // Default: pairwise 50/50 blending in clip index order
//! let settings = AnimationSettings::default();
//!
//! // Equal-weight running average across all active clips
//! let settings = AnimationSettings {
//!     blend_policy: BlendPolicy::Normalized,
//!     ..Default::default()
//! };
//! ```

// ---------------------------------------------------------------------------
// BlendPolicy
// ---------------------------------------------------------------------------

/// How the poses of several concurrently active clips are combined.
///
/// Clips are always visited in ascending clip index. The first active clip
/// seeds the accumulator; the policy decides the weight every following
/// clip gets when mixed into it.
///
/// | Policy       | Weight of k-th clip (k ≥ 1) | Order dependent |
/// |--------------|-----------------------------|-----------------|
/// | `Pairwise`   | 1/2                         | yes             |
/// | `Normalized` | 1/(k+1)                     | only for rotation |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendPolicy {
    /// Each subsequent clip is mixed 50/50 with the running result.
    ///
    /// For more than two clips this weights later clips more heavily than
    /// earlier ones.
    #[default]
    Pairwise,

    /// Each subsequent clip is mixed with weight `1/(k+1)`, producing an
    /// equal-weight average of positions and scales.
    Normalized,
}

impl BlendPolicy {
    /// Mix factor applied when folding the clip at `position` (0-based among
    /// the active clips) into the accumulator.
    #[inline]
    #[must_use]
    pub fn factor(self, position: usize) -> f32 {
        match self {
            BlendPolicy::Pairwise => 0.5,
            BlendPolicy::Normalized => 1.0 / (position as f32 + 1.0),
        }
    }
}

// ---------------------------------------------------------------------------
// AnimationSettings
// ---------------------------------------------------------------------------

/// Configuration for an animation manager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    /// Cross-clip blending policy.
    pub blend_policy: BlendPolicy,

    /// Keyframe intervals shorter than this are treated as zero-length and
    /// sample their left key instead of dividing.
    pub interval_epsilon: f32,

    /// Playback rate used for clips whose authored `ticks_per_second` is zero
    /// or negative. Many exporters leave the field unset.
    pub fallback_ticks_per_second: f32,
}

impl AnimationSettings {
    pub const DEFAULT_INTERVAL_EPSILON: f32 = 1e-6;
    pub const DEFAULT_TICKS_PER_SECOND: f32 = 25.0;

    /// Resolves the effective playback rate for a clip.
    #[inline]
    #[must_use]
    pub fn ticks_per_second(&self, authored: f32) -> f32 {
        if authored > 0.0 {
            authored
        } else {
            self.fallback_ticks_per_second
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            blend_policy: BlendPolicy::default(),
            interval_epsilon: Self::DEFAULT_INTERVAL_EPSILON,
            fallback_ticks_per_second: Self::DEFAULT_TICKS_PER_SECOND,
        }
    }
}
