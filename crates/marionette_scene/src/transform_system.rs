//! Transform System
//!
//! Resolves a hierarchy's local transforms into world and skin matrices in
//! a single recursive pass from the root. The recursion itself guarantees a
//! node is composed only after its parent; no topological sort is needed.
//!
//! For every node:
//!
//! ```text
//! local  = T * R * S            (or the bind matrix verbatim)
//! world  = parent_world * local
//! skin   = world * offset_matrix
//! ```

use glam::Mat4;
use marionette_core::{NodeIndex, Transform};

use crate::hierarchy::NodeHierarchy;

/// Where each node's local transform comes from.
#[derive(Debug, Clone, Copy)]
pub enum LocalPose<'a> {
    /// Use every node's `default_transform` matrix as is, skipping the
    /// decompose/recompose round trip.
    Bind,
    /// Recompose from a per-node TRS array.
    Animated(&'a [Transform]),
}

impl LocalPose<'_> {
    #[inline]
    fn local_matrix(&self, hierarchy: &NodeHierarchy, index: NodeIndex) -> Mat4 {
        match self {
            LocalPose::Bind => hierarchy.nodes()[index.index()].default_transform,
            LocalPose::Animated(pose) => pose[index.index()].to_matrix(),
        }
    }
}

/// Output buffers of a composition pass, both indexed like the node array.
pub struct ComposeTargets<'a> {
    pub world: &'a mut [Mat4],
    pub skin: &'a mut [Mat4],
}

/// Composes the whole hierarchy starting at `root` with an identity parent.
pub fn compose_hierarchy(
    hierarchy: &NodeHierarchy,
    root: NodeIndex,
    locals: LocalPose<'_>,
    targets: &mut ComposeTargets<'_>,
) {
    compose_recursive(hierarchy, root, Mat4::IDENTITY, locals, targets);
}

fn compose_recursive(
    hierarchy: &NodeHierarchy,
    index: NodeIndex,
    parent_world: Mat4,
    locals: LocalPose<'_>,
    targets: &mut ComposeTargets<'_>,
) {
    let Some(node) = hierarchy.get(index) else {
        return;
    };

    let world = parent_world * locals.local_matrix(hierarchy, index);
    targets.world[index.index()] = world;
    targets.skin[index.index()] = world * node.offset_matrix;

    for &child in node.children() {
        compose_recursive(hierarchy, child, world, locals, targets);
    }
}
