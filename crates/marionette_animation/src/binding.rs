use marionette_core::{MarionetteError, NodeIndex, Result};

use crate::channel::{Channel, MeshChannel, MorphChannel, NodeChannel};
use crate::clip::AnimationClip;

/// Per-node channel lookup for one clip, resolved and validated against a
/// model's node count at load time.
///
/// Evaluation then finds "the channel targeting node `n`" in O(1) instead
/// of scanning the clip's channel list for every node every frame. When
/// several channels of the same kind target one node, the first one wins.
#[derive(Debug, Clone, Default)]
pub struct ClipBinding {
    node_channels: Vec<Option<u32>>,
    mesh_channels: Vec<Option<u32>>,
    morph_channels: Vec<Option<u32>>,
}

impl ClipBinding {
    /// Validates `clip` against a hierarchy of `node_count` nodes and builds
    /// the lookup tables.
    pub fn bind(clip: &AnimationClip, node_count: usize) -> Result<Self> {
        let mut binding = Self {
            node_channels: vec![None; node_count],
            mesh_channels: vec![None; node_count],
            morph_channels: vec![None; node_count],
        };

        for (channel_index, channel) in clip.channels.iter().enumerate() {
            let node = channel.node();
            if node.index() >= node_count {
                return Err(MarionetteError::ChannelNodeOutOfRange {
                    clip: clip.name.clone(),
                    channel: channel_index,
                    node,
                    node_count,
                });
            }

            if !channel.check()? {
                return Err(MarionetteError::UnsortedKeyframes {
                    clip: clip.name.clone(),
                    channel: channel_index,
                });
            }

            let table = match channel {
                Channel::Node(_) => &mut binding.node_channels,
                Channel::Mesh(_) => &mut binding.mesh_channels,
                Channel::Morph(_) => &mut binding.morph_channels,
            };
            let slot = &mut table[node.index()];
            if slot.is_some() {
                log::debug!(
                    "Clip '{}': channel {channel_index} on node {node} is shadowed",
                    clip.name
                );
            } else {
                *slot = Some(channel_index as u32);
            }
        }

        Ok(binding)
    }

    #[must_use]
    pub fn node_channel<'a>(
        &self,
        clip: &'a AnimationClip,
        node: NodeIndex,
    ) -> Option<&'a NodeChannel> {
        let index = (*self.node_channels.get(node.index())?)?;
        match clip.channels.get(index as usize)? {
            Channel::Node(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn mesh_channel<'a>(
        &self,
        clip: &'a AnimationClip,
        node: NodeIndex,
    ) -> Option<&'a MeshChannel> {
        let index = (*self.mesh_channels.get(node.index())?)?;
        match clip.channels.get(index as usize)? {
            Channel::Mesh(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn morph_channel<'a>(
        &self,
        clip: &'a AnimationClip,
        node: NodeIndex,
    ) -> Option<&'a MorphChannel> {
        let index = (*self.morph_channels.get(node.index())?)?;
        match clip.channels.get(index as usize)? {
            Channel::Morph(c) => Some(c),
            _ => None,
        }
    }

    /// Whether the clip carries any mesh or morph channel at all.
    #[must_use]
    pub fn has_mesh_or_morph(&self) -> bool {
        self.mesh_channels.iter().chain(&self.morph_channels).any(Option::is_some)
    }
}
