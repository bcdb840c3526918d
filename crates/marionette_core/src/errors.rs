//! Error Types
//!
//! This module defines the error types used throughout the pipeline.
//!
//! # Overview
//!
//! Every error here is a data-integrity fault detected while a model is
//! assembled from imported data:
//! - Malformed node hierarchies (missing or duplicate roots, cycles, orphans)
//! - Animation channels pointing outside the hierarchy
//! - Keyframe tracks that are unsorted or structurally inconsistent
//! - Lookups by name or handle that do not resolve
//!
//! Nothing in the per-frame path returns an error. Once a model has been
//! accepted its data is trusted, and edge cases such as zero-length
//! keyframe intervals are guarded in place.
//!
//! # Usage
//!
//! ```rust,ignore
//! use marionette_core::{MarionetteError, Result};
//!
//! fn build() -> Result<()> {
//!     Err(MarionetteError::MissingRoot)
//! }
//! ```

use thiserror::Error;

use crate::index::NodeIndex;

/// The main error type for the Marionette pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarionetteError {
    // ========================================================================
    // Hierarchy Errors
    // ========================================================================
    /// No node in the hierarchy is parentless.
    #[error("Node hierarchy has no root node")]
    MissingRoot,

    /// More than one node claims to be the root.
    #[error("Node hierarchy has multiple roots: {first} and {second}")]
    MultipleRoots {
        /// The first parentless node found
        first: NodeIndex,
        /// Another parentless node
        second: NodeIndex,
    },

    /// A node refers to a parent that does not exist or does not list it as a child.
    #[error("Node {node} has an invalid parent link")]
    InvalidParent {
        /// The node carrying the broken link
        node: NodeIndex,
    },

    /// A node was reached more than once while walking down from the root.
    #[error("Cycle detected in node hierarchy at node {node}")]
    CycleDetected {
        /// The node visited twice
        node: NodeIndex,
    },

    /// A node cannot be reached from the root.
    #[error("Node {node} is not reachable from the root")]
    UnreachableNode {
        /// The orphaned node
        node: NodeIndex,
    },

    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// A channel targets a node index outside the hierarchy.
    #[error("Clip '{clip}' channel {channel} targets node {node}, but the model has {node_count} nodes")]
    ChannelNodeOutOfRange {
        /// Name of the offending clip
        clip: String,
        /// Channel position within the clip
        channel: usize,
        /// The invalid node index
        node: NodeIndex,
        /// Number of nodes in the model
        node_count: usize,
    },

    /// Keyframe times are not in ascending order.
    #[error("Clip '{clip}' channel {channel} has keyframes out of order")]
    UnsortedKeyframes {
        /// Name of the offending clip
        clip: String,
        /// Channel position within the clip
        channel: usize,
    },

    /// A track's time and value arrays disagree in length.
    #[error("Keyframe track has {times} times but {values} values")]
    MismatchedKeyframes {
        /// Number of key times
        times: usize,
        /// Number of key values
        values: usize,
    },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// No clip with the given name exists on the model.
    #[error("Animation clip not found: {0}")]
    ClipNotFound(String),

    /// The model handle does not resolve in the registry.
    #[error("Model not found in registry")]
    ModelNotFound,
}

/// Alias for `Result<T, MarionetteError>`.
pub type Result<T> = std::result::Result<T, MarionetteError>;
