//! Skeletal animation playback.
//!
//! An [`AnimationSampler`] pairs the tracks of one [`Animation`] with the
//! bones of one [`Skeleton`] and, on every evaluation, writes each bound
//! bone's live transform.
//!
//! # Blending
//!
//! For every channel the sampled value is turned into a target according to
//! the curve's [`TransformType`]:
//!
//! | Type       | Position          | Rotation            | Scale          |
//! |------------|-------------------|---------------------|----------------|
//! | `Absolute` | `value`           | `value`             | `value`        |
//! | `Additive` | `live + value`    | `live * value`      | `live + value` |
//! | `Relative` | `base + value`    | `base * value`      | `base + value` |
//!
//! The live pose then moves towards the target by the sampler weight (lerp
//! for vectors, slerp for rotations). Positions and rotations are read and
//! written in the curve's [`TransformSpace`]; scale is local only.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut sampler = AnimationSampler::new("walk", &walk, &skeleton);
//! sampler.update(&mut skeleton, 12.0, 1.0)?;
//! let hand = skeleton.find_bone("hand").unwrap();
//! let world = skeleton.scene_mut().live_world_position(hand)?;
//! ```

use glam::{Quat, Vec3};
use uuid::Uuid;

use crate::animation::binder::Binder;
use crate::animation::binding::BoneBinding;
use crate::animation::clip::Animation;
use crate::animation::curve::{TransformSpace, TransformType};
use crate::animation::track::AnimationTrack;
use crate::errors::{BoneworkError, Channel, Result};
use crate::scene::{NodeHandle, Scene, Skeleton};
use crate::settings::{LoopMode, SamplerSettings};

#[derive(Debug, Clone)]
pub struct AnimationSampler<'a> {
    pub name: String,

    animation: &'a Animation,
    skeleton_id: Uuid,
    bindings: Vec<BoneBinding>,
    settings: SamplerSettings,
    transform_type_override: Option<TransformType>,

    time: f32,
    weight: f32,
}

impl<'a> AnimationSampler<'a> {
    #[must_use]
    pub fn new(name: &str, animation: &'a Animation, skeleton: &Skeleton) -> Self {
        Self::with_settings(name, animation, skeleton, SamplerSettings::default())
    }

    #[must_use]
    pub fn with_settings(
        name: &str,
        animation: &'a Animation,
        skeleton: &Skeleton,
        settings: SamplerSettings,
    ) -> Self {
        Self {
            name: name.to_string(),
            animation,
            skeleton_id: skeleton.id,
            bindings: Binder::bind(skeleton, animation),
            settings,
            transform_type_override: None,
            time: settings.start_frame,
            weight: 1.0,
        }
    }

    // ========================================================================
    // State
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn animation(&self) -> &'a Animation {
        self.animation
    }

    #[inline]
    #[must_use]
    pub fn bindings(&self) -> &[BoneBinding] {
        &self.bindings
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &SamplerSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    #[must_use]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    #[inline]
    #[must_use]
    pub fn start_frame(&self) -> f32 {
        self.settings.start_frame
    }

    pub fn set_start_frame(&mut self, start_frame: f32) {
        self.settings.start_frame = start_frame;
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    /// Sets the blend weight, clamped to `[0, 1]`. NaN counts as zero.
    pub fn set_weight(&mut self, weight: f32) {
        self.weight = if weight.is_nan() {
            0.0
        } else {
            weight.clamp(0.0, 1.0)
        };
    }

    /// Forces every curve to be applied with `transform_type`, ignoring its
    /// own tag. `None` restores the per-curve tags.
    pub fn set_transform_type_override(&mut self, transform_type: Option<TransformType>) {
        self.transform_type_override = transform_type;
    }

    /// Whether a bone named `name` is driven by this sampler.
    #[must_use]
    pub fn is_object_animated(&self, name: &str) -> bool {
        self.bindings
            .iter()
            .any(|b| self.animation.tracks[b.track_index].name == name)
    }

    /// Rewinds to the start frame and forgets cached keyframe positions.
    pub fn reset(&mut self) {
        self.time = self.settings.start_frame;
        for binding in &mut self.bindings {
            binding.reset_cursors();
        }
    }

    /// Moves the time cursor by `delta * time_scale` frames, applying the
    /// loop mode at the ends of the animation's frame range.
    pub fn advance(&mut self, delta: f32) {
        self.time += delta * self.settings.time_scale;

        let (min, max) = self.animation.frame_range();
        if min > max {
            return;
        }
        let start = self.settings.start_frame;
        let (lo, hi) = (start + min, start + max);
        let span = hi - lo;

        match self.settings.loop_mode {
            LoopMode::Once => {
                self.time = self.time.clamp(lo, hi);
            }
            LoopMode::Loop => {
                if span > 0.0 && (self.time < lo || self.time >= hi) {
                    self.time = lo + (self.time - lo).rem_euclid(span);
                } else if span <= 0.0 {
                    self.time = lo;
                }
            }
            LoopMode::PingPong => {
                if span <= 0.0 {
                    self.time = lo;
                } else {
                    let t = (self.time - lo).rem_euclid(span * 2.0);
                    self.time = lo + if t > span { span * 2.0 - t } else { t };
                }
            }
        }
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Sets time and weight, then writes the live pose of every bound bone.
    pub fn update(&mut self, skeleton: &mut Skeleton, time: f32, weight: f32) -> Result<()> {
        self.set_time(time);
        self.set_weight(weight);
        self.evaluate(skeleton)
    }

    /// Writes the live pose of every bound bone at the current time and
    /// weight.
    ///
    /// Every bound bone and every curve's tags are checked before the first
    /// write, so a removed bone or an unsupported combination leaves the
    /// skeleton untouched.
    pub fn evaluate(&mut self, skeleton: &mut Skeleton) -> Result<()> {
        if skeleton.id != self.skeleton_id {
            return Err(BoneworkError::SkeletonMismatch {
                sampler: self.name.clone(),
            });
        }

        let scene = skeleton.scene_mut();
        for binding in &self.bindings {
            if !scene.contains(binding.bone) {
                return Err(BoneworkError::NodeNotFound(binding.bone));
            }
            let track = &self.animation.tracks[binding.track_index];
            self.check_track(scene, binding.bone, track)?;
        }

        if self.weight <= 0.0 {
            return Ok(());
        }

        let animation = self.animation;
        let local_time = self.time - self.settings.start_frame;
        let weight = self.weight;
        let override_type = self.transform_type_override;

        for binding in &mut self.bindings {
            let track = &animation.tracks[binding.track_index];
            let bone = binding.bone;

            if let Some(curve) = &track.translation {
                let value = curve.sample_with_cursor(local_time, binding.cursor_mut(Channel::Translation));
                let ty = override_type.unwrap_or(curve.transform_type);
                apply_translation(scene, bone, curve.space, ty, value, weight)?;
            }

            if let Some(curve) = &track.rotation {
                let value = curve.sample_with_cursor(local_time, binding.cursor_mut(Channel::Rotation));
                let ty = override_type.unwrap_or(curve.transform_type);
                apply_rotation(scene, bone, curve.space, ty, value, weight)?;
            }

            if let Some(curve) = &track.scale {
                let value = curve.sample_with_cursor(local_time, binding.cursor_mut(Channel::Scale));
                let ty = override_type.unwrap_or(curve.transform_type);
                apply_scale(scene, bone, ty, value, weight)?;
            }
        }

        log::trace!(
            "Sampler '{}' evaluated {} bindings at frame {}",
            self.name,
            self.bindings.len(),
            self.time
        );

        Ok(())
    }

    fn check_track(&self, scene: &Scene, bone: NodeHandle, track: &AnimationTrack) -> Result<()> {
        let ty = |curve_type: TransformType| self.transform_type_override.unwrap_or(curve_type);
        if let Some(c) = &track.translation {
            check_curve(scene, bone, Channel::Translation, c.space, ty(c.transform_type))?;
        }
        if let Some(c) = &track.rotation {
            check_curve(scene, bone, Channel::Rotation, c.space, ty(c.transform_type))?;
        }
        if let Some(c) = &track.scale {
            check_curve(scene, bone, Channel::Scale, c.space, ty(c.transform_type))?;
        }
        Ok(())
    }
}

fn unsupported(
    scene: &Scene,
    bone: NodeHandle,
    channel: Channel,
    space: TransformSpace,
    transform_type: TransformType,
) -> BoneworkError {
    let bone = scene
        .get_node(bone)
        .map_or_else(String::new, |n| n.name.clone());
    BoneworkError::UnsupportedTransform {
        bone,
        channel,
        space,
        transform_type,
    }
}

fn check_curve(
    scene: &Scene,
    bone: NodeHandle,
    channel: Channel,
    space: TransformSpace,
    transform_type: TransformType,
) -> Result<()> {
    let type_ok = matches!(
        transform_type,
        TransformType::Absolute | TransformType::Additive | TransformType::Relative
    );
    let space_ok = channel != Channel::Scale || space == TransformSpace::Local;
    if type_ok && space_ok {
        Ok(())
    } else {
        Err(unsupported(scene, bone, channel, space, transform_type))
    }
}

fn apply_translation(
    scene: &mut Scene,
    bone: NodeHandle,
    space: TransformSpace,
    transform_type: TransformType,
    value: Vec3,
    weight: f32,
) -> Result<()> {
    let current = scene.live_position_in(bone, space)?;
    let target = match transform_type {
        TransformType::Absolute => value,
        TransformType::Additive => current + value,
        TransformType::Relative => scene.base_position_in(bone, space)? + value,
        TransformType::Parent | TransformType::Unknown => {
            return Err(unsupported(scene, bone, Channel::Translation, space, transform_type));
        }
    };

    let blended = if weight >= 1.0 { target } else { current.lerp(target, weight) };
    scene.write_live_position(bone, space, blended)
}

fn apply_rotation(
    scene: &mut Scene,
    bone: NodeHandle,
    space: TransformSpace,
    transform_type: TransformType,
    value: Quat,
    weight: f32,
) -> Result<()> {
    let current = scene.live_rotation_in(bone, space)?;
    let target = match transform_type {
        TransformType::Absolute => value,
        TransformType::Additive => current * value,
        TransformType::Relative => scene.base_rotation_in(bone, space)? * value,
        TransformType::Parent | TransformType::Unknown => {
            return Err(unsupported(scene, bone, Channel::Rotation, space, transform_type));
        }
    }
    .normalize();

    let blended = if weight >= 1.0 { target } else { current.slerp(target, weight) };
    scene.write_live_rotation(bone, space, blended)
}

fn apply_scale(
    scene: &mut Scene,
    bone: NodeHandle,
    transform_type: TransformType,
    value: Vec3,
    weight: f32,
) -> Result<()> {
    let current = scene.live_scale(bone)?;
    let target = match transform_type {
        TransformType::Absolute => value,
        TransformType::Additive => current + value,
        TransformType::Relative => scene.base_scale(bone)? + value,
        TransformType::Parent | TransformType::Unknown => {
            return Err(unsupported(
                scene,
                bone,
                Channel::Scale,
                TransformSpace::Local,
                transform_type,
            ));
        }
    };

    let blended = if weight >= 1.0 { target } else { current.lerp(target, weight) };
    scene.set_live_scale(bone, blended)
}
