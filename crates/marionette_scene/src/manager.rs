//! Animation Manager
//!
//! Per-instance playback for one bound [`Model`]. The manager owns one
//! [`AnimationState`] per clip, the set of active clips, and the matrices
//! handed to the renderer.
//!
//! # Frame pipeline
//!
//! [`AnimationManager::update`] runs four steps to completion:
//!
//! 1. Advance the clock of every active, unpaused clip. One-shot clips that
//!    run past their end are reset and deactivated.
//! 2. Evaluate each active clip's channels into its per-node pose cache.
//! 3. Blend the cached poses across active clips in ascending clip index.
//! 4. Compose the hierarchy into world and skin matrices.
//!
//! With no active clip, step 4 uses the bind matrices directly.
//!
//! # Degraded managers
//!
//! Binding to a handle that does not resolve yields a manager with no
//! model. Every control call is ignored, every query returns a safe default
//! (`false`, `0`, identity), and `update` does nothing.

use std::sync::Arc;

use glam::Mat4;
use marionette_animation::mixer::{blend_poses, evaluate_clip};
use marionette_animation::{ActiveSet, Advance, AnimationFlags, AnimationState, MorphWeights};
use marionette_core::{AnimationSettings, NodeIndex, Result, Transform};
use smallvec::SmallVec;

use crate::model::Model;
use crate::registry::{ModelHandle, ModelRegistry};
use crate::transform_system::{ComposeTargets, LocalPose, compose_hierarchy};

pub struct AnimationManager {
    model: Option<Arc<Model>>,
    settings: AnimationSettings,

    states: Vec<AnimationState>,
    active: ActiveSet,

    // === Per-frame output ===
    local_pose: Vec<Transform>,
    world_matrices: Vec<Mat4>,
    skin_matrices: Vec<Mat4>,
    mesh_slots: Vec<Option<u32>>,
    morph_weights: Vec<Option<MorphWeights>>,
}

impl AnimationManager {
    /// Creates a manager for `model` with default settings.
    ///
    /// Skin matrices are initialised to the bind pose, so the renderer has
    /// valid data before the first update.
    #[must_use]
    pub fn new(model: Arc<Model>) -> Self {
        Self::with_settings(model, AnimationSettings::default())
    }

    #[must_use]
    pub fn with_settings(model: Arc<Model>, settings: AnimationSettings) -> Self {
        let node_count = model.node_count();
        let clip_count = model.animation_count();

        let mut manager = Self {
            states: (0..clip_count).map(|_| AnimationState::new(node_count)).collect(),
            active: ActiveSet::with_capacity(clip_count),
            local_pose: model.bind_pose().to_vec(),
            world_matrices: vec![Mat4::IDENTITY; node_count],
            skin_matrices: vec![Mat4::IDENTITY; node_count],
            mesh_slots: vec![None; node_count],
            morph_weights: vec![None; node_count],
            settings,
            model: Some(model),
        };
        manager.compose();
        manager
    }

    /// Binds to a registered model. Falls back to a degraded no-op manager
    /// when the handle does not resolve.
    #[must_use]
    pub fn bind(registry: &ModelRegistry, handle: ModelHandle) -> Self {
        Self::bind_with_settings(registry, handle, AnimationSettings::default())
    }

    #[must_use]
    pub fn bind_with_settings(
        registry: &ModelRegistry,
        handle: ModelHandle,
        settings: AnimationSettings,
    ) -> Self {
        match registry.get_shared(handle) {
            Some(model) => Self::with_settings(model, settings),
            None => {
                log::warn!("AnimationManager bound to an unknown model; running as a no-op.");
                Self::degraded(settings)
            }
        }
    }

    /// Binds to a registered model, failing instead of degrading when the
    /// handle does not resolve.
    pub fn try_bind(registry: &ModelRegistry, handle: ModelHandle) -> Result<Self> {
        Ok(Self::new(registry.require(handle)?))
    }

    fn degraded(settings: AnimationSettings) -> Self {
        Self {
            model: None,
            settings,
            states: Vec::new(),
            active: ActiveSet::default(),
            local_pose: Vec::new(),
            world_matrices: Vec::new(),
            skin_matrices: Vec::new(),
            mesh_slots: Vec::new(),
            morph_weights: Vec::new(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.model.is_none()
    }

    #[inline]
    #[must_use]
    pub fn model(&self) -> Option<&Arc<Model>> {
        self.model.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.skin_matrices.len()
    }

    #[inline]
    #[must_use]
    pub fn animation_count(&self) -> usize {
        self.states.len()
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self, clip: usize) -> bool {
        self.active.contains(clip)
    }

    #[inline]
    #[must_use]
    pub fn active_animation_count(&self) -> usize {
        self.active.count()
    }

    /// Indices of the active clips, ascending.
    pub fn active_clips(&self) -> impl Iterator<Item = usize> + '_ {
        self.active.iter()
    }

    #[must_use]
    pub fn clip_index(&self, name: &str) -> Option<usize> {
        self.model.as_ref()?.clip_index(name)
    }

    #[must_use]
    pub fn state(&self, clip: usize) -> Option<&AnimationState> {
        self.states.get(clip)
    }

    /// Playback position in ticks; 0 for unknown clips.
    #[must_use]
    pub fn time(&self, clip: usize) -> f32 {
        self.states.get(clip).map_or(0.0, AnimationState::time)
    }

    #[must_use]
    pub fn speed(&self, clip: usize) -> f32 {
        self.states.get(clip).map_or(1.0, |s| s.speed)
    }

    #[must_use]
    pub fn flags(&self, clip: usize) -> AnimationFlags {
        self.states.get(clip).map_or(AnimationFlags::default(), |s| s.flags)
    }

    /// Skin matrices for the renderer, indexed like the model's nodes.
    /// Empty for a degraded manager.
    #[inline]
    #[must_use]
    pub fn skin_matrices(&self) -> &[Mat4] {
        &self.skin_matrices
    }

    #[must_use]
    pub fn skin_matrix(&self, node: NodeIndex) -> Mat4 {
        self.skin_matrices
            .get(node.index())
            .copied()
            .unwrap_or(Mat4::IDENTITY)
    }

    #[inline]
    #[must_use]
    pub fn world_matrices(&self) -> &[Mat4] {
        &self.world_matrices
    }

    #[must_use]
    pub fn world_matrix(&self, node: NodeIndex) -> Mat4 {
        self.world_matrices
            .get(node.index())
            .copied()
            .unwrap_or(Mat4::IDENTITY)
    }

    /// Local transform used for `node` in the last composition.
    #[must_use]
    pub fn local_pose(&self, node: NodeIndex) -> Option<Transform> {
        self.local_pose.get(node.index()).copied()
    }

    /// Mesh slot selected by a mesh channel, if any active clip drives one.
    #[must_use]
    pub fn mesh_slot(&self, node: NodeIndex) -> Option<u32> {
        self.mesh_slots.get(node.index()).copied().flatten()
    }

    /// Morph weights set by a morph channel, if any active clip drives one.
    #[must_use]
    pub fn morph_weights(&self, node: NodeIndex) -> Option<&[f32]> {
        self.morph_weights
            .get(node.index())?
            .as_ref()
            .map(MorphWeights::as_slice)
    }

    // ========================================================================
    // Control
    // ========================================================================

    fn state_mut(&mut self, clip: usize) -> Option<&mut AnimationState> {
        let clip_count = self.states.len();
        if clip >= clip_count && self.model.is_some() {
            log::warn!("Ignoring control call for clip {clip}: manager has {clip_count} clips");
        }
        self.states.get_mut(clip)
    }

    /// Starts or stops a clip. Starting always rewinds, even if the clip was
    /// already playing: to time 0, or to the end for a one-shot clip with
    /// negative speed. The active count only changes on a real transition.
    pub fn set_active(&mut self, clip: usize, active: bool) {
        let duration = self
            .model
            .as_ref()
            .and_then(|m| m.clip(clip))
            .map_or(0.0, |c| c.duration);
        let Some(state) = self.state_mut(clip) else {
            return;
        };

        if active {
            state.rewind(duration);
            if self.active.insert(clip) {
                log::debug!("Clip {clip} activated");
            } else {
                log::debug!("Clip {clip} restarted");
            }
        } else if self.active.remove(clip) {
            log::debug!("Clip {clip} deactivated");
        } else {
            log::debug!("Clip {clip} already inactive");
        }
    }

    /// Stops every clip. The next update composes the bind pose.
    pub fn deactivate_all(&mut self) {
        if !self.active.is_empty() {
            log::debug!("Deactivating {} clip(s)", self.active.count());
        }
        self.active.clear();
    }

    pub fn set_flags(&mut self, clip: usize, flags: AnimationFlags) {
        if let Some(state) = self.state_mut(clip) {
            state.flags = flags;
        }
    }

    pub fn set_looping(&mut self, clip: usize, looping: bool) {
        if let Some(state) = self.state_mut(clip) {
            state.flags.set(AnimationFlags::LOOPING, looping);
        }
    }

    pub fn set_paused(&mut self, clip: usize, paused: bool) {
        if let Some(state) = self.state_mut(clip) {
            state.flags.set(AnimationFlags::PAUSED, paused);
        }
    }

    /// Playback rate multiplier. 0 freezes the clip while it stays active.
    pub fn set_speed(&mut self, clip: usize, speed: f32) {
        if let Some(state) = self.state_mut(clip) {
            state.speed = speed;
        }
    }

    /// Seeks to `time` ticks, wrapped or clamped into the clip's range.
    pub fn set_time(&mut self, clip: usize, time: f32) {
        let Some(duration) = self
            .model
            .as_ref()
            .and_then(|m| m.clip(clip))
            .map(|c| c.duration)
        else {
            return;
        };
        if let Some(state) = self.state_mut(clip) {
            state.seek(time, duration);
        }
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    /// Runs one frame. `delta_time` is in seconds and is scaled by each
    /// clip's ticks-per-second and speed.
    pub fn update(&mut self, delta_time: f32) {
        let Some(model) = self.model.as_ref() else {
            return;
        };

        // 1. Clocks
        let mut finished: SmallVec<[usize; 4]> = SmallVec::new();
        for clip_index in self.active.iter() {
            let clip = &model.clips()[clip_index];
            let rate = self.settings.ticks_per_second(clip.ticks_per_second);
            let state = &mut self.states[clip_index];
            if state.advance(rate, delta_time, clip.duration) == Advance::Finished {
                finished.push(clip_index);
            }
        }
        for clip_index in finished {
            if self.active.remove(clip_index) {
                log::debug!("Clip {clip_index} finished");
            }
        }

        // 2. Per-clip poses
        for clip_index in self.active.iter() {
            evaluate_clip(
                &model.clips()[clip_index],
                model.binding(clip_index),
                &mut self.states[clip_index],
                model.bind_pose(),
                self.settings.interval_epsilon,
            );
        }

        // 3. Blend
        let states = &self.states;
        let contributed = blend_poses(
            self.active.iter().map(|i| states[i].pose()),
            self.settings.blend_policy,
            &mut self.local_pose,
        );
        if contributed == 0 {
            self.local_pose.copy_from_slice(model.bind_pose());
        }

        self.update_mesh_and_morph();

        log::trace!(
            "Animation update: dt={delta_time}, {} active clip(s)",
            self.active.count()
        );

        // 4. Compose
        self.compose();
    }

    /// Mesh and morph channels are not blended: the lowest active clip that
    /// drives a node decides its value.
    fn update_mesh_and_morph(&mut self) {
        let Some(model) = self.model.as_ref() else {
            return;
        };

        self.mesh_slots.iter_mut().for_each(|s| *s = None);
        self.morph_weights.iter_mut().for_each(|w| *w = None);

        let epsilon = self.settings.interval_epsilon;
        for clip_index in self.active.iter() {
            let binding = model.binding(clip_index);
            if !binding.has_mesh_or_morph() {
                continue;
            }
            let clip = &model.clips()[clip_index];
            let time = self.states[clip_index].time();

            for i in 0..self.mesh_slots.len() {
                let node = NodeIndex::from_usize(i);
                if self.mesh_slots[i].is_none() {
                    self.mesh_slots[i] = binding
                        .mesh_channel(clip, node)
                        .and_then(|c| c.slots.sample(time, clip.duration, epsilon));
                }
                if self.morph_weights[i].is_none() {
                    self.morph_weights[i] = binding
                        .morph_channel(clip, node)
                        .and_then(|c| c.weights.sample(time, clip.duration, epsilon));
                }
            }
        }
    }

    fn compose(&mut self) {
        let Some(model) = self.model.as_ref() else {
            return;
        };

        let locals = if self.active.is_empty() {
            LocalPose::Bind
        } else {
            LocalPose::Animated(&self.local_pose)
        };

        compose_hierarchy(
            model.hierarchy(),
            model.root(),
            locals,
            &mut ComposeTargets {
                world: &mut self.world_matrices,
                skin: &mut self.skin_matrices,
            },
        );
    }
}
