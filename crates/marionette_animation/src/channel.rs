use glam::{Quat, Vec3};
use marionette_core::{NodeIndex, Result, Transform};

use crate::tracks::{InterpolationMode, KeyframeTrack};
use crate::values::MorphWeights;

/// Drives one node's translation, rotation and scale.
#[derive(Debug, Clone)]
pub struct NodeChannel {
    pub node: NodeIndex,
    pub position: KeyframeTrack<Vec3>,
    pub rotation: KeyframeTrack<Quat>,
    pub scale: KeyframeTrack<Vec3>,
}

impl NodeChannel {
    /// A channel with all three tracks empty.
    #[must_use]
    pub fn new(node: NodeIndex) -> Self {
        Self {
            node,
            position: KeyframeTrack::empty(),
            rotation: KeyframeTrack::empty(),
            scale: KeyframeTrack::empty(),
        }
    }

    #[must_use]
    pub fn with_position(mut self, track: KeyframeTrack<Vec3>) -> Self {
        self.position = track;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, track: KeyframeTrack<Quat>) -> Self {
        self.rotation = track;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, track: KeyframeTrack<Vec3>) -> Self {
        self.scale = track;
        self
    }

    /// Evaluates the channel at `time`. Components without keys keep the
    /// value from `bind`.
    #[must_use]
    pub fn sample(&self, time: f32, duration: f32, epsilon: f32, bind: &Transform) -> Transform {
        Transform {
            position: self
                .position
                .sample(time, duration, epsilon)
                .unwrap_or(bind.position),
            rotation: self
                .rotation
                .sample(time, duration, epsilon)
                .unwrap_or(bind.rotation),
            scale: self
                .scale
                .sample(time, duration, epsilon)
                .unwrap_or(bind.scale),
        }
    }

    fn check(&self) -> Result<bool> {
        Ok(self.position.check()? && self.rotation.check()? && self.scale.check()?)
    }

    fn end_time(&self) -> f32 {
        self.position
            .end_time()
            .max(self.rotation.end_time())
            .max(self.scale.end_time())
    }
}

/// Switches which mesh variant a node displays.
#[derive(Debug, Clone)]
pub struct MeshChannel {
    pub node: NodeIndex,
    pub slots: KeyframeTrack<u32>,
}

impl MeshChannel {
    #[must_use]
    pub fn new(node: NodeIndex, times: Vec<f32>, slots: Vec<u32>) -> Self {
        Self {
            node,
            slots: KeyframeTrack::new(times, slots, InterpolationMode::Step),
        }
    }
}

/// Drives the morph target weights of the mesh attached to a node.
#[derive(Debug, Clone)]
pub struct MorphChannel {
    pub node: NodeIndex,
    pub weights: KeyframeTrack<MorphWeights>,
}

impl MorphChannel {
    #[must_use]
    pub fn new(node: NodeIndex, weights: KeyframeTrack<MorphWeights>) -> Self {
        Self { node, weights }
    }
}

/// One channel of an animation clip.
#[derive(Debug, Clone)]
pub enum Channel {
    Node(NodeChannel),
    Mesh(MeshChannel),
    Morph(MorphChannel),
}

impl Channel {
    /// The node this channel targets.
    #[must_use]
    pub fn node(&self) -> NodeIndex {
        match self {
            Channel::Node(c) => c.node,
            Channel::Mesh(c) => c.node,
            Channel::Morph(c) => c.node,
        }
    }

    /// Validates every track; `Ok(false)` means some track is unsorted.
    pub fn check(&self) -> Result<bool> {
        match self {
            Channel::Node(c) => c.check(),
            Channel::Mesh(c) => c.slots.check(),
            Channel::Morph(c) => c.weights.check(),
        }
    }

    /// Time of the latest key across all tracks.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match self {
            Channel::Node(c) => c.end_time(),
            Channel::Mesh(c) => c.slots.end_time(),
            Channel::Morph(c) => c.weights.end_time(),
        }
    }
}

impl From<NodeChannel> for Channel {
    fn from(channel: NodeChannel) -> Self {
        Channel::Node(channel)
    }
}

impl From<MeshChannel> for Channel {
    fn from(channel: MeshChannel) -> Self {
        Channel::Mesh(channel)
    }
}

impl From<MorphChannel> for Channel {
    fn from(channel: MorphChannel) -> Self {
        Channel::Morph(channel)
    }
}
