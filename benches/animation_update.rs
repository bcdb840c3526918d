use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::{Mat4, Quat, Vec3};
use marionette::{
    AnimationClip, AnimationManager, Channel, KeyframeTrack, Model, Node, NodeChannel,
    NodeHierarchy, NodeIndex,
};

/// A single chain of `bones` nodes, each offset one unit along +Y.
fn build_chain(bones: usize) -> NodeHierarchy {
    let mut hierarchy = NodeHierarchy::new();
    let mut parent = None;
    for i in 0..bones {
        let node = Node::new(format!("bone_{i}"))
            .with_default_transform(Mat4::from_translation(Vec3::Y));
        parent = Some(hierarchy.add_child(parent, node).expect("valid parent"));
    }
    hierarchy
}

/// A clip with a 30-key rotation sweep on every bone.
fn build_clip(name: &str, bones: usize, axis: Vec3) -> AnimationClip {
    let keys = 30;
    let times: Vec<f32> = (0..keys).map(|k| k as f32).collect();
    let channels: Vec<Channel> = (0..bones)
        .map(|i| {
            let rotations = (0..keys)
                .map(|k| Quat::from_axis_angle(axis, (k as f32 * 0.2 + i as f32 * 0.05).sin()))
                .collect();
            NodeChannel::new(NodeIndex::from_usize(i))
                .with_rotation(KeyframeTrack::linear(times.clone(), rotations))
                .into()
        })
        .collect();
    AnimationClip::new(name, keys as f32, 30.0, channels)
}

fn build_model(bones: usize) -> Arc<Model> {
    let clips = vec![
        build_clip("sway", bones, Vec3::X),
        build_clip("twist", bones, Vec3::Y),
        build_clip("lean", bones, Vec3::Z),
    ];
    Arc::new(Model::new("bench", build_chain(bones), clips).expect("valid model"))
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("animation_update");

    for bones in [16, 64, 128] {
        let model = build_model(bones);

        group.bench_with_input(BenchmarkId::new("bind_pose", bones), &model, |b, model| {
            let mut manager = AnimationManager::new(model.clone());
            b.iter(|| {
                manager.update(black_box(1.0 / 60.0));
                black_box(manager.skin_matrices());
            });
        });

        group.bench_with_input(BenchmarkId::new("one_clip", bones), &model, |b, model| {
            let mut manager = AnimationManager::new(model.clone());
            manager.set_active(0, true);
            b.iter(|| {
                manager.update(black_box(1.0 / 60.0));
                black_box(manager.skin_matrices());
            });
        });

        group.bench_with_input(BenchmarkId::new("three_clips", bones), &model, |b, model| {
            let mut manager = AnimationManager::new(model.clone());
            for clip in 0..3 {
                manager.set_active(clip, true);
            }
            b.iter(|| {
                manager.update(black_box(1.0 / 60.0));
                black_box(manager.skin_matrices());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
