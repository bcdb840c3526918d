//! Node hierarchy
//!
//! An arena of [`Node`]s addressed by dense [`NodeIndex`] handles. Each node
//! stores its parent and an ordered child list, so traversal never chases
//! sibling links.

use marionette_core::{MarionetteError, NodeIndex, Result};

use crate::node::Node;

#[derive(Debug, Clone, Default)]
pub struct NodeHierarchy {
    nodes: Vec<Node>,
}

impl NodeHierarchy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a hierarchy from nodes whose parent links are already set
    /// (see [`Node::with_parent`]).
    ///
    /// Child lists are rebuilt from the parent links in index order, and the
    /// result is validated.
    pub fn from_nodes(mut nodes: Vec<Node>) -> Result<Self> {
        for node in &mut nodes {
            node.children.clear();
        }

        for i in 0..nodes.len() {
            if let Some(parent) = nodes[i].parent {
                let child = NodeIndex::from_usize(i);
                match nodes.get_mut(parent.index()) {
                    Some(p) => p.children.push(child),
                    None => return Err(MarionetteError::InvalidParent { node: child }),
                }
            }
        }

        let hierarchy = Self { nodes };
        hierarchy.validate()?;
        Ok(hierarchy)
    }

    /// Appends `node` under `parent` (or as a parentless node) and returns
    /// its index. The new node goes after any existing siblings.
    pub fn add_child(&mut self, parent: Option<NodeIndex>, mut node: Node) -> Result<NodeIndex> {
        let index = NodeIndex::from_usize(self.nodes.len());

        if let Some(parent) = parent {
            let Some(p) = self.nodes.get_mut(parent.index()) else {
                return Err(MarionetteError::InvalidParent { node: index });
            };
            p.children.push(index);
        }

        node.parent = parent;
        node.children.clear();
        self.nodes.push(node);
        Ok(index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.index())
    }

    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIndex::from_usize(i), n))
    }

    /// The first parentless node.
    #[must_use]
    pub fn find_root(&self) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .position(Node::is_root)
            .map(NodeIndex::from_usize)
    }

    /// Linear scan by name. Meant for load-time resolution only.
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(NodeIndex::from_usize)
    }

    /// Depth-first, parent-before-child walk from the root.
    ///
    /// Siblings are visited in child-list order. Yields nothing when the
    /// hierarchy has no root.
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse {
            hierarchy: self,
            stack: self.find_root().into_iter().collect(),
        }
    }

    /// Checks the tree invariants: exactly one root, consistent parent and
    /// child links, no cycles, and every node reachable from the root.
    pub fn validate(&self) -> Result<()> {
        let mut roots = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_root())
            .map(|(i, _)| NodeIndex::from_usize(i));

        let root = roots.next().ok_or(MarionetteError::MissingRoot)?;
        if let Some(second) = roots.next() {
            return Err(MarionetteError::MultipleRoots {
                first: root,
                second,
            });
        }

        for (i, node) in self.nodes.iter().enumerate() {
            let index = NodeIndex::from_usize(i);

            if let Some(parent) = node.parent {
                let listed = self
                    .get(parent)
                    .is_some_and(|p| p.children.contains(&index));
                if !listed {
                    return Err(MarionetteError::InvalidParent { node: index });
                }
            }

            for &child in &node.children {
                if self.get(child).and_then(Node::parent) != Some(index) {
                    return Err(MarionetteError::InvalidParent { node: child });
                }
            }
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            let seen = &mut visited[index.index()];
            if *seen {
                return Err(MarionetteError::CycleDetected { node: index });
            }
            *seen = true;
            stack.extend(self.nodes[index.index()].children.iter().copied());
        }

        if let Some(orphan) = visited.iter().position(|v| !v) {
            return Err(MarionetteError::UnreachableNode {
                node: NodeIndex::from_usize(orphan),
            });
        }

        Ok(())
    }
}

/// Iterator returned by [`NodeHierarchy::traverse`].
pub struct Traverse<'a> {
    hierarchy: &'a NodeHierarchy,
    stack: Vec<NodeIndex>,
}

impl Iterator for Traverse<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        if let Some(node) = self.hierarchy.get(index) {
            // Reverse so the first child is popped first.
            self.stack.extend(node.children.iter().rev().copied());
        }
        Some(index)
    }
}
