use glam::Mat4;
use marionette_core::NodeIndex;
use smallvec::SmallVec;

/// Inline child capacity; bones rarely have more than a handful of children.
pub(crate) type ChildList = SmallVec<[NodeIndex; 4]>;

/// A single transform in a model's hierarchy (a bone or pivot).
///
/// # Hierarchy
///
/// Nodes form a tree through parent/child links:
/// - `parent`: `None` only for the model's single root
/// - `children`: ordered child indices; new children are appended
///
/// # Transforms
///
/// - `default_transform`: local bind pose, used whenever no animation drives the node
/// - `offset_matrix`: inverse bind matrix, maps model space into the bone's space
///
/// Both are fixed at import time.
#[derive(Debug, Clone)]
pub struct Node {
    /// Import-time lookup name; never consulted per frame.
    pub name: String,

    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: ChildList,

    pub default_transform: Mat4,
    pub offset_matrix: Mat4,
}

impl Node {
    /// Creates a detached node with identity transforms.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: SmallVec::new(),
            default_transform: Mat4::IDENTITY,
            offset_matrix: Mat4::IDENTITY,
        }
    }

    #[must_use]
    pub fn with_default_transform(mut self, transform: Mat4) -> Self {
        self.default_transform = transform;
        self
    }

    #[must_use]
    pub fn with_offset_matrix(mut self, offset: Mat4) -> Self {
        self.offset_matrix = offset;
        self
    }

    /// Records the parent link only. Used with
    /// [`NodeHierarchy::from_nodes`](crate::NodeHierarchy::from_nodes),
    /// which rebuilds child lists from these links.
    #[must_use]
    pub fn with_parent(mut self, parent: Option<NodeIndex>) -> Self {
        self.parent = parent;
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
