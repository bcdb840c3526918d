use bitflags::bitflags;
use marionette_core::Transform;

bitflags! {
    /// Playback flags of one clip on one instance.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct AnimationFlags: u8 {
        /// Wrap around at the end instead of finishing.
        const LOOPING = 1 << 0;
        /// Keep contributing to the blend but stop the clock.
        const PAUSED  = 1 << 1;
    }
}

impl Default for AnimationFlags {
    fn default() -> Self {
        AnimationFlags::LOOPING
    }
}

/// Outcome of advancing a clip's clock by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Playing,
    /// A one-shot clip ran off either end; its time has been reset to 0.
    Finished,
}

/// Mutable playback state of one clip on one model instance.
///
/// Whether the clip is active lives in the owning manager's active set, not
/// here. `pose` caches the clip's evaluated local transform per node and is
/// only meaningful while the clip is active.
#[derive(Debug, Clone)]
pub struct AnimationState {
    pub(crate) time: f32,
    pub speed: f32,
    pub flags: AnimationFlags,
    pub(crate) pose: Vec<Transform>,
}

impl AnimationState {
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            time: 0.0,
            speed: 1.0,
            flags: AnimationFlags::default(),
            pose: vec![Transform::IDENTITY; node_count],
        }
    }

    /// Current playback position in ticks.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.flags.contains(AnimationFlags::LOOPING)
    }

    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.flags.contains(AnimationFlags::PAUSED)
    }

    /// Rewinds to the start of playback: time 0, or the end of the clip for
    /// a one-shot clip playing in reverse.
    #[inline]
    pub fn rewind(&mut self, duration: f32) {
        self.time = if self.plays_backwards_once() {
            duration.max(0.0)
        } else {
            0.0
        };
    }

    #[inline]
    fn plays_backwards_once(&self) -> bool {
        !self.is_looping() && self.speed < 0.0
    }

    /// Cached per-node pose from the last evaluation.
    #[inline]
    #[must_use]
    pub fn pose(&self) -> &[Transform] {
        &self.pose
    }

    /// Moves the clock to `time`, wrapped (looping) or clamped (one-shot)
    /// into `[0, duration)`.
    pub fn seek(&mut self, time: f32, duration: f32) {
        self.time = if self.is_looping() {
            wrap(time, duration)
        } else if duration > 0.0 && time > 0.0 && time < duration {
            time
        } else {
            0.0
        };
    }

    /// Core logic: advance the clock by `delta_time` seconds at
    /// `ticks_per_second`, scaled by this state's speed.
    pub fn advance(&mut self, ticks_per_second: f32, delta_time: f32, duration: f32) -> Advance {
        if self.is_paused() {
            return Advance::Playing;
        }

        self.time += ticks_per_second * self.speed * delta_time;

        if self.is_looping() {
            self.time = wrap(self.time, duration);
            Advance::Playing
        } else if self.time >= duration || self.time < 0.0 {
            self.time = 0.0;
            Advance::Finished
        } else {
            Advance::Playing
        }
    }
}

/// Euclidean wrap into `[0, duration)`; a non-positive duration pins to 0.
fn wrap(time: f32, duration: f32) -> f32 {
    if duration <= 0.0 || !time.is_finite() {
        return 0.0;
    }
    let wrapped = time.rem_euclid(duration);
    // rem_euclid can round up to exactly `duration` for tiny negative inputs.
    if wrapped >= duration { 0.0 } else { wrapped }
}
