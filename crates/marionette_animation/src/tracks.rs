use marionette_core::{MarionetteError, Result};

use crate::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
}

/// A sparse, time-sorted list of keyed values for one component.
///
/// A track with no keys leaves its component at the bind pose, a track with
/// one key is a constant override, and anything longer is interpolated.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    #[must_use]
    pub fn linear(times: Vec<f32>, values: Vec<T>) -> Self {
        Self::new(times, values, InterpolationMode::Linear)
    }

    #[must_use]
    pub fn constant(value: T) -> Self {
        Self::new(vec![0.0], vec![value], InterpolationMode::Linear)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), InterpolationMode::Linear)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last key, or 0 for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Checks the structural invariants: one value per key time and key
    /// times in ascending order.
    ///
    /// Returns `Ok(false)` when the keys are unsorted so the caller can
    /// report which channel is at fault.
    pub fn check(&self) -> Result<bool> {
        if self.times.len() != self.values.len() {
            return Err(MarionetteError::MismatchedKeyframes {
                times: self.times.len(),
                values: self.values.len(),
            });
        }
        Ok(self.times.windows(2).all(|w| w[0] <= w[1]))
    }

    /// Samples the track at `time` (in ticks).
    ///
    /// The interval is the last key at or before `time`. The interval after
    /// the last key wraps around to key 0 and spans the remainder of the
    /// clip (`duration`) plus the lead-in before the first key, so a time
    /// earlier than the first key samples the tail of that same interval.
    /// Intervals no longer than `epsilon` yield their left key.
    #[must_use]
    pub fn sample(&self, time: f32, duration: f32, epsilon: f32) -> Option<T> {
        let len = self.times.len();
        match len {
            0 => None,
            1 => self.values.first().cloned(),
            _ => {
                let last = len - 1;
                let (index, elapsed) = if time < self.times[0] {
                    (last, time + duration - self.times[last])
                } else {
                    let index = self.times.partition_point(|&t| t <= time).saturating_sub(1);
                    (index, time - self.times[index])
                };
                let next = (index + 1) % len;

                if self.interpolation == InterpolationMode::Step {
                    return Some(self.values[index].clone());
                }

                let mut dt = self.times[next] - self.times[index];
                if next == 0 {
                    dt += duration;
                }

                let factor = if dt > epsilon {
                    (elapsed / dt).clamp(0.0, 1.0)
                } else {
                    0.0
                };

                Some(T::interpolate_linear(
                    &self.values[index],
                    &self.values[next],
                    factor,
                ))
            }
        }
    }
}
