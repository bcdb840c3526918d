//! Blend Walk
//!
//! Builds a tiny three-bone leg, plays a looping "walk" clip, layers a
//! one-shot "kick" on top of it and prints the foot position each frame.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example blend_walk
//! ```

use anyhow::Context;
use marionette::prelude::*;

fn build_leg() -> anyhow::Result<NodeHierarchy> {
    let mut leg = NodeHierarchy::new();
    let hip = leg.add_child(None, Node::new("hip"))?;
    let knee = leg.add_child(
        Some(hip),
        Node::new("knee").with_default_transform(Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0))),
    )?;
    leg.add_child(
        Some(knee),
        Node::new("foot").with_default_transform(Mat4::from_translation(Vec3::new(0.0, -1.0, 0.0))),
    )?;
    Ok(leg)
}

fn swing(node: NodeIndex, angles: &[f32]) -> Channel {
    let times = (0..angles.len()).map(|k| k as f32).collect();
    let rotations = angles.iter().map(|&a| Quat::from_rotation_x(a)).collect();
    NodeChannel::new(node)
        .with_rotation(KeyframeTrack::linear(times, rotations))
        .into()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let leg = build_leg()?;
    let hip = leg.find_node_by_name("hip").context("hip bone")?;
    let knee = leg.find_node_by_name("knee").context("knee bone")?;
    let foot = leg.find_node_by_name("foot").context("foot bone")?;

    let walk = AnimationClip::new(
        "walk",
        4.0,
        4.0,
        vec![
            swing(hip, &[0.4, 0.0, -0.4, 0.0]),
            swing(knee, &[0.0, 0.6, 0.0, 0.2]),
        ],
    );
    let kick = AnimationClip::from_channels("kick", 8.0, vec![swing(hip, &[0.0, 1.2, 0.3])]);

    let mut registry = ModelRegistry::new();
    let handle = registry.insert(Model::new("leg", leg, vec![walk, kick])?);

    let mut manager = AnimationManager::bind(&registry, handle);
    let walk = manager.clip_index("walk").context("walk clip")?;
    let kick = manager.clip_index("kick").context("kick clip")?;

    manager.set_active(walk, true);

    let dt = 1.0 / 10.0;
    for frame in 0..20 {
        if frame == 5 {
            manager.set_looping(kick, false);
            manager.set_active(kick, true);
        }

        manager.update(dt);

        let foot_pos = manager.world_matrix(foot).w_axis.truncate();
        log::info!(
            "frame {frame:2}: {} clip(s), foot at ({:+.3}, {:+.3}, {:+.3})",
            manager.active_animation_count(),
            foot_pos.x,
            foot_pos.y,
            foot_pos.z,
        );
    }

    Ok(())
}
