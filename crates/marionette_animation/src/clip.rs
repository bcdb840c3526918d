use crate::channel::Channel;

/// A named animation: channels plus timing metadata.
///
/// `duration` is measured in ticks and `ticks_per_second` converts frame
/// time into ticks. Clips are immutable once imported and shared by every
/// instance of their model.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub ticks_per_second: f32,
    pub channels: Vec<Channel>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        duration: f32,
        ticks_per_second: f32,
        channels: Vec<Channel>,
    ) -> Self {
        Self {
            name: name.into(),
            duration,
            ticks_per_second,
            channels,
        }
    }

    /// Builds a clip whose duration is the time of its latest key.
    #[must_use]
    pub fn from_channels(
        name: impl Into<String>,
        ticks_per_second: f32,
        channels: Vec<Channel>,
    ) -> Self {
        let duration = channels
            .iter()
            .map(Channel::end_time)
            .fold(0.0_f32, f32::max);

        Self::new(name, duration, ticks_per_second, channels)
    }

    /// Duration in seconds under the given effective rate.
    #[must_use]
    pub fn duration_seconds(&self, ticks_per_second: f32) -> f32 {
        if ticks_per_second > 0.0 {
            self.duration / ticks_per_second
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::NodeChannel;
    use crate::tracks::KeyframeTrack;
    use glam::{Quat, Vec3};
    use marionette_core::NodeIndex;

    #[test]
    fn duration_from_latest_key() {
        let channels = vec![
            NodeChannel::new(NodeIndex::new(0))
                .with_position(KeyframeTrack::linear(vec![0.0, 2.0], vec![Vec3::ZERO, Vec3::X]))
                .into(),
            NodeChannel::new(NodeIndex::new(1))
                .with_rotation(KeyframeTrack::linear(
                    vec![0.0, 7.5],
                    vec![Quat::IDENTITY, Quat::from_rotation_z(1.0)],
                ))
                .into(),
        ];
        let clip = AnimationClip::from_channels("wave", 30.0, channels);
        assert_eq!(clip.duration, 7.5);
        assert!((clip.duration_seconds(30.0) - 0.25).abs() < 1e-6);
    }
}
