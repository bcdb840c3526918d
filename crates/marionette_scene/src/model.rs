use marionette_animation::{AnimationClip, ClipBinding};
use marionette_core::{MarionetteError, NodeIndex, Result, Transform};
use rustc_hash::FxHashMap;

use crate::hierarchy::NodeHierarchy;

/// An imported model: node hierarchy plus animation table.
///
/// Construction validates everything the per-frame path relies on. A model
/// that fails validation is rejected outright; there is no partially valid
/// model. Once built it is immutable and can be shared across any number of
/// animated instances.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    hierarchy: NodeHierarchy,
    root: NodeIndex,
    bind_pose: Vec<Transform>,
    clips: Vec<AnimationClip>,
    bindings: Vec<ClipBinding>,
    clip_lookup: FxHashMap<String, usize>,
}

impl Model {
    pub fn new(
        name: impl Into<String>,
        hierarchy: NodeHierarchy,
        clips: Vec<AnimationClip>,
    ) -> Result<Self> {
        let name = name.into();

        hierarchy.validate()?;
        let root = hierarchy.find_root().ok_or(MarionetteError::MissingRoot)?;

        let bind_pose = hierarchy
            .nodes()
            .iter()
            .map(|n| Transform::from_matrix(&n.default_transform))
            .collect();

        let bindings = clips
            .iter()
            .map(|clip| ClipBinding::bind(clip, hierarchy.len()))
            .collect::<Result<Vec<_>>>()?;

        let mut clip_lookup = FxHashMap::default();
        for (i, clip) in clips.iter().enumerate() {
            if clip_lookup.contains_key(&clip.name) {
                log::warn!(
                    "Model '{name}': duplicate clip name '{}', keeping the first",
                    clip.name
                );
            } else {
                clip_lookup.insert(clip.name.clone(), i);
            }
        }

        log::debug!(
            "Model '{name}' built: {} nodes, {} clips",
            hierarchy.len(),
            clips.len()
        );

        Ok(Self {
            name,
            hierarchy,
            root,
            bind_pose,
            clips,
            bindings,
            clip_lookup,
        })
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn hierarchy(&self) -> &NodeHierarchy {
        &self.hierarchy
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.hierarchy.len()
    }

    #[inline]
    #[must_use]
    pub fn animation_count(&self) -> usize {
        self.clips.len()
    }

    #[inline]
    #[must_use]
    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }

    #[inline]
    #[must_use]
    pub fn clip(&self, index: usize) -> Option<&AnimationClip> {
        self.clips.get(index)
    }

    #[inline]
    pub(crate) fn binding(&self, index: usize) -> &ClipBinding {
        &self.bindings[index]
    }

    /// Decomposed bind pose, one entry per node.
    #[inline]
    #[must_use]
    pub fn bind_pose(&self) -> &[Transform] {
        &self.bind_pose
    }

    /// Resolves a clip name to its index. Intended for load time; callers
    /// keep the index for per-frame control.
    #[must_use]
    pub fn clip_index(&self, name: &str) -> Option<usize> {
        self.clip_lookup.get(name).copied()
    }

    /// Like [`Model::clip_index`], but reports a missing clip as an error.
    pub fn require_clip(&self, name: &str) -> Result<usize> {
        self.clip_index(name)
            .ok_or_else(|| MarionetteError::ClipNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use marionette_animation::NodeChannel;

    fn two_nodes() -> NodeHierarchy {
        let mut h = NodeHierarchy::new();
        let root = h.add_child(None, Node::new("root")).unwrap();
        h.add_child(Some(root), Node::new("child")).unwrap();
        h
    }

    #[test]
    fn rejects_channel_outside_hierarchy() {
        let channel = NodeChannel::new(NodeIndex::new(9));
        let clip = AnimationClip::new("bad", 1.0, 1.0, vec![channel.into()]);
        let err = Model::new("m", two_nodes(), vec![clip]).unwrap_err();
        assert!(matches!(err, MarionetteError::ChannelNodeOutOfRange { .. }));
    }

    #[test]
    fn clip_lookup_keeps_first_duplicate() {
        let clips = vec![
            AnimationClip::new("idle", 1.0, 1.0, Vec::new()),
            AnimationClip::new("idle", 2.0, 1.0, Vec::new()),
        ];
        let model = Model::new("m", two_nodes(), clips).unwrap();
        assert_eq!(model.clip_index("idle"), Some(0));
        assert_eq!(
            model.require_clip("run"),
            Err(MarionetteError::ClipNotFound("run".into()))
        );
    }
}
