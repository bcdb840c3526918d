use glam::{Quat, Vec3};
use smallvec::SmallVec;

/// Inline capacity for morph weight vectors; larger target counts spill to the heap.
pub const INLINE_MORPH_TARGETS: usize = 8;

/// A value a keyframe track can blend between two keys.
pub trait Interpolatable: Clone {
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        start.lerp(*end, t)
    }
}

impl Interpolatable for Quat {
    /// Spherical linear interpolation, renormalized to counter drift.
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        start.slerp(*end, t).normalize()
    }
}

/// Discrete slot indices hold until the next key.
impl Interpolatable for u32 {
    fn interpolate_linear(start: &Self, _end: &Self, _t: f32) -> Self {
        *start
    }
}

/// Morph target weights for one mesh, one entry per target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MorphWeights(pub SmallVec<[f32; INLINE_MORPH_TARGETS]>);

impl MorphWeights {
    #[must_use]
    pub fn from_slice(weights: &[f32]) -> Self {
        Self(SmallVec::from_slice(weights))
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl Interpolatable for MorphWeights {
    /// Keys with differing target counts blend over the shorter prefix and
    /// keep the tail of the longer one.
    fn interpolate_linear(start: &Self, end: &Self, t: f32) -> Self {
        let len = start.0.len().max(end.0.len());
        let weights = (0..len)
            .map(|i| match (start.0.get(i), end.0.get(i)) {
                (Some(a), Some(b)) => a + (b - a) * t,
                (Some(v), None) | (None, Some(v)) => *v,
                (None, None) => 0.0,
            })
            .collect();
        Self(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quat_interpolation_stays_unit_length() {
        let a = Quat::from_rotation_x(0.3);
        let b = Quat::from_rotation_y(2.5);
        for i in 0..=10 {
            let q = Quat::interpolate_linear(&a, &b, i as f32 / 10.0);
            assert!((q.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn slot_indices_hold() {
        assert_eq!(u32::interpolate_linear(&3, &7, 0.99), 3);
    }

    #[test]
    fn morph_weights_blend_prefix_and_keep_tail() {
        let a = MorphWeights::from_slice(&[0.0, 1.0]);
        let b = MorphWeights::from_slice(&[1.0, 0.0, 0.5]);
        let m = MorphWeights::interpolate_linear(&a, &b, 0.5);
        assert_eq!(m.as_slice(), &[0.5, 0.5, 0.5]);
    }
}
