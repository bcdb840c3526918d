//! Animation Data Tests
//!
//! Tests for:
//! - KeyframeTrack sampling: single-key override, interpolation, wraparound
//! - Interpolatable implementations (Vec3 lerp, Quat slerp)
//! - NodeChannel bind-pose fallback
//! - AnimationClip duration computation

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use marionette::animation::tracks::{InterpolationMode, KeyframeTrack};
use marionette::animation::values::Interpolatable;
use marionette::{AnimationClip, Channel, MeshChannel, NodeChannel, NodeIndex, Transform};

const EPSILON: f32 = 1e-5;
const INTERVAL_EPS: f32 = 1e-6;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

// ============================================================================
// Single-key tracks
// ============================================================================

#[test]
fn single_key_is_constant_at_any_time() {
    let track = KeyframeTrack::linear(vec![3.0], vec![Vec3::new(1.0, 2.0, 3.0)]);
    for t in [0.0, 2.9, 3.0, 3.1, 100.0, -5.0] {
        assert_eq!(track.sample(t, 10.0, INTERVAL_EPS), Some(Vec3::new(1.0, 2.0, 3.0)));
    }
}

#[test]
fn single_key_rotation_is_returned_verbatim() {
    let q = Quat::from_rotation_x(0.7);
    let track = KeyframeTrack::constant(q);
    assert_eq!(track.sample(0.42, 1.0, INTERVAL_EPS), Some(q));
}

// ============================================================================
// Multi-key tracks
// ============================================================================

#[test]
fn linear_position_midpoint() {
    let track = KeyframeTrack::linear(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)],
    );
    let v = track.sample(0.5, 2.0, INTERVAL_EPS).unwrap();
    assert!(vec3_approx(v, Vec3::new(5.0, 10.0, 15.0)), "got {v}");
}

#[test]
fn exact_key_times_hit_key_values() {
    let track = KeyframeTrack::linear(vec![0.0, 1.0, 2.0], vec![0.0_f32, 10.0, 20.0]);
    assert!(approx(track.sample(0.0, 3.0, INTERVAL_EPS).unwrap(), 0.0));
    assert!(approx(track.sample(1.0, 3.0, INTERVAL_EPS).unwrap(), 10.0));
    assert!(approx(track.sample(2.0, 3.0, INTERVAL_EPS).unwrap(), 20.0));
}

#[test]
fn before_first_key_blends_in_from_last_key() {
    // Keys at 1 and 2, duration 3: the wrap interval 2 -> 4 passes t=0 halfway.
    let track = KeyframeTrack::linear(vec![1.0, 2.0], vec![10.0_f32, 20.0]);
    assert!(approx(track.sample(0.0, 3.0, INTERVAL_EPS).unwrap(), 15.0));
    assert!(approx(track.sample(0.5, 3.0, INTERVAL_EPS).unwrap(), 12.5));
    assert!(approx(track.sample(1.0, 3.0, INTERVAL_EPS).unwrap(), 10.0));
}

#[test]
fn value_is_continuous_across_loop_boundary() {
    let duration = 4.0;
    let track = KeyframeTrack::linear(vec![1.0, 3.0], vec![0.0_f32, 10.0]);

    let end = track.sample(duration - 1e-4, duration, INTERVAL_EPS).unwrap();
    let start = track.sample(0.0, duration, INTERVAL_EPS).unwrap();
    assert!((end - start).abs() < 1e-3, "jump from {end} to {start}");
    assert!(approx(start, 5.0));

    // Steepest slope is 5 per tick, so a 0.05 tick step moves at most 0.25.
    let mut prev = track.sample(0.0, duration, INTERVAL_EPS).unwrap();
    for i in 1..=200 {
        let t = (i as f32 * 0.05).rem_euclid(duration);
        let v = track.sample(t, duration, INTERVAL_EPS).unwrap();
        assert!((v - prev).abs() <= 0.25 + 1e-3, "jump at t={t}: {prev} -> {v}");
        prev = v;
    }
}

#[test]
fn past_last_key_interpolates_back_to_first() {
    // Keys at 0 and 2, clip length 4: the last interval spans 2..4 and ends on key 0.
    let track = KeyframeTrack::linear(vec![0.0, 2.0], vec![0.0_f32, 8.0]);
    assert!(approx(track.sample(2.0, 4.0, INTERVAL_EPS).unwrap(), 8.0));
    assert!(approx(track.sample(3.0, 4.0, INTERVAL_EPS).unwrap(), 4.0));
    assert!(approx(track.sample(3.5, 4.0, INTERVAL_EPS).unwrap(), 2.0));
}

#[test]
fn last_key_at_duration_holds_its_value() {
    // The wrap interval has zero length when the last key sits on the duration.
    let track = KeyframeTrack::linear(vec![0.0, 4.0], vec![0.0_f32, 8.0]);
    let v = track.sample(4.0, 4.0, INTERVAL_EPS).unwrap();
    assert!(v.is_finite());
    assert!(approx(v, 8.0), "got {v}");
}

#[test]
fn coincident_keys_never_produce_nan() {
    let track = KeyframeTrack::linear(vec![0.0, 1.0, 1.0, 2.0], vec![0.0_f32, 1.0, 5.0, 6.0]);
    for i in 0..=30 {
        let v = track.sample(i as f32 * 0.1, 2.0, INTERVAL_EPS).unwrap();
        assert!(v.is_finite(), "NaN at t={}", i as f32 * 0.1);
    }
    assert!(approx(track.sample(1.0, 2.0, INTERVAL_EPS).unwrap(), 5.0));
}

#[test]
fn step_mode_holds_until_next_key() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 100.0, 200.0],
        InterpolationMode::Step,
    );
    assert!(approx(track.sample(0.99, 3.0, INTERVAL_EPS).unwrap(), 0.0));
    assert!(approx(track.sample(1.5, 3.0, INTERVAL_EPS).unwrap(), 100.0));
    assert!(approx(track.sample(2.5, 3.0, INTERVAL_EPS).unwrap(), 200.0));
}

// ============================================================================
// Rotation: slerp
// ============================================================================

#[test]
fn slerp_between_identical_quats_is_identity_op() {
    let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), 1.1);
    for i in 0..=10 {
        let r = Quat::interpolate_linear(&q, &q, i as f32 / 10.0);
        assert!(r.angle_between(q) < 1e-3);
        assert!(approx(r.length(), 1.0));
    }
}

#[test]
fn slerp_halfway_rotation() {
    let track = KeyframeTrack::linear(
        vec![0.0, 1.0],
        vec![Quat::IDENTITY, Quat::from_rotation_y(FRAC_PI_2 * 1.5)],
    );
    let q = track.sample(0.5, 2.0, INTERVAL_EPS).unwrap();
    assert!(q.angle_between(Quat::from_rotation_y(FRAC_PI_2 * 0.75)) < 1e-3);
    assert!(approx(q.length(), 1.0));
}

#[test]
fn slerp_results_are_unit_length() {
    let track = KeyframeTrack::linear(
        vec![0.0, 1.0, 2.0],
        vec![
            Quat::from_rotation_x(0.2),
            Quat::from_rotation_z(2.9),
            Quat::from_rotation_y(-1.3),
        ],
    );
    for i in 0..=40 {
        let q = track.sample(i as f32 * 0.075, 3.0, INTERVAL_EPS).unwrap();
        assert!(approx(q.length(), 1.0));
    }
}

// ============================================================================
// Channels & clips
// ============================================================================

#[test]
fn node_channel_uses_bind_pose_for_empty_tracks() {
    let bind = Transform::new(
        Vec3::new(0.0, 5.0, 0.0),
        Quat::from_rotation_z(0.3),
        Vec3::splat(2.0),
    );
    let channel = NodeChannel::new(NodeIndex::new(0)).with_rotation(KeyframeTrack::linear(
        vec![0.0, 1.0],
        vec![Quat::IDENTITY, Quat::from_rotation_x(1.0)],
    ));

    let pose = channel.sample(0.5, 1.0, INTERVAL_EPS, &bind);
    assert_eq!(pose.position, bind.position);
    assert_eq!(pose.scale, bind.scale);
    assert!(pose.rotation.angle_between(Quat::from_rotation_x(0.5)) < 1e-3);
}

#[test]
fn clip_duration_from_all_channel_kinds() {
    let clip = AnimationClip::from_channels(
        "mixed",
        24.0,
        vec![
            NodeChannel::new(NodeIndex::new(0))
                .with_scale(KeyframeTrack::linear(vec![0.0, 12.0], vec![Vec3::ONE, Vec3::ONE]))
                .into(),
            MeshChannel::new(NodeIndex::new(1), vec![0.0, 30.0], vec![0, 1]).into(),
        ],
    );
    assert!(approx(clip.duration, 30.0));
    assert!(approx(clip.duration_seconds(24.0), 1.25));
    assert!(matches!(clip.channels[1], Channel::Mesh(_)));
}
