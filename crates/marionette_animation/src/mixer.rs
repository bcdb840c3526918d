//! Pose evaluation and cross-clip blending.
//!
//! Both steps work on flat per-node arrays of [`Transform`]s indexed by
//! [`NodeIndex`]. They know nothing about the hierarchy; composition into
//! world space happens afterwards in the scene crate.

use marionette_core::{BlendPolicy, NodeIndex, Transform};

use crate::binding::ClipBinding;
use crate::clip::AnimationClip;
use crate::state::AnimationState;

/// Evaluates every node of `clip` at the state's current time and caches
/// the result in the state's pose.
///
/// Nodes the clip does not drive, and components a channel leaves empty,
/// take their value from `bind_pose`.
pub fn evaluate_clip(
    clip: &AnimationClip,
    binding: &ClipBinding,
    state: &mut AnimationState,
    bind_pose: &[Transform],
    epsilon: f32,
) {
    let time = state.time;
    for (i, (slot, bind)) in state.pose.iter_mut().zip(bind_pose).enumerate() {
        *slot = match binding.node_channel(clip, NodeIndex::from_usize(i)) {
            Some(channel) => channel.sample(time, clip.duration, epsilon, bind),
            None => *bind,
        };
    }
}

/// Folds the given poses, in order, into `out`.
///
/// The first pose seeds the accumulator; each following pose is mixed in
/// with the weight `policy` assigns to its position. Returns how many poses
/// contributed. When none did, `out` is left untouched.
pub fn blend_poses<'a, I>(poses: I, policy: BlendPolicy, out: &mut [Transform]) -> usize
where
    I: IntoIterator<Item = &'a [Transform]>,
{
    let mut contributed = 0;
    for pose in poses {
        if contributed == 0 {
            out.copy_from_slice(&pose[..out.len()]);
        } else {
            let factor = policy.factor(contributed);
            for (acc, sample) in out.iter_mut().zip(pose) {
                *acc = acc.mix(sample, factor);
            }
        }
        contributed += 1;
    }
    contributed
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn at(x: f32) -> Transform {
        Transform::new(Vec3::new(x, 0.0, 0.0), Quat::IDENTITY, Vec3::ONE)
    }

    #[test]
    fn no_poses_leave_output_alone() {
        let mut out = [at(7.0)];
        let n = blend_poses(std::iter::empty(), BlendPolicy::Pairwise, &mut out);
        assert_eq!(n, 0);
        assert_eq!(out[0], at(7.0));
    }

    #[test]
    fn pairwise_weights_later_clips_more() {
        let a = [at(0.0)];
        let b = [at(4.0)];
        let c = [at(8.0)];
        let mut out = [Transform::IDENTITY];
        let n = blend_poses(
            [&a[..], &b[..], &c[..]],
            BlendPolicy::Pairwise,
            &mut out,
        );
        assert_eq!(n, 3);
        // ((0 + 4) / 2 + 8) / 2
        assert!((out[0].position.x - 5.0).abs() < 1e-6);
    }

    #[test]
    fn normalized_is_an_equal_average() {
        let a = [at(0.0)];
        let b = [at(4.0)];
        let c = [at(8.0)];
        let mut out = [Transform::IDENTITY];
        blend_poses([&a[..], &b[..], &c[..]], BlendPolicy::Normalized, &mut out);
        assert!((out[0].position.x - 4.0).abs() < 1e-5);
    }
}
