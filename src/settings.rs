//! Scene & Sampler Settings
//!
//! Plain configuration structs consumed by [`Scene`](crate::scene::Scene) and
//! [`AnimationSampler`](crate::animation::AnimationSampler).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bonework::settings::{InvalidationPolicy, SamplerSettings, SceneSettings, LoopMode};
//!
//! // Default: every descendant is invalidated when a node moves.
//! let scene = SceneSettings::default();
//!
//! // Reproduce the one-level invalidation some exporters rely on.
//! let scene = SceneSettings {
//!     invalidation: InvalidationPolicy::DirectChildren,
//! };
//!
//! // Sampler that starts at frame 10 and loops.
//! let sampler = SamplerSettings {
//!     start_frame: 10.0,
//!     loop_mode: LoopMode::Loop,
//!     ..Default::default()
//! };
//! ```

// ---------------------------------------------------------------------------
// InvalidationPolicy
// ---------------------------------------------------------------------------

/// How far a change to a node's transform propagates into cached world
/// values of the nodes below it.
///
/// | Policy            | Children | Grandchildren and below |
/// |-------------------|----------|-------------------------|
/// | `DirectChildren`  | ✅       | ❌ (may keep stale)     |
/// | `Subtree`         | ✅       | ✅                      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidationPolicy {
    /// Only the direct children lose their cached world transform.
    ///
    /// Cheaper, but grandchildren that already resolved a world transform keep
    /// the old value until something else clears it.
    DirectChildren,
    /// Every descendant loses its cached world transform.
    #[default]
    Subtree,
}

/// Settings for a [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneSettings {
    pub invalidation: InvalidationPolicy,
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

/// Behaviour of [`AnimationSampler::advance`](crate::animation::AnimationSampler::advance)
/// when the cursor leaves the animation's frame range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Stop at the first or last frame.
    #[default]
    Once,
    /// Wrap around to the other end.
    Loop,
    /// Bounce back and forth.
    PingPong,
}

/// Settings for an [`AnimationSampler`](crate::animation::AnimationSampler).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerSettings {
    /// Frame at which the animation starts on the sampler's timeline.
    /// Curves are sampled at `time - start_frame`.
    pub start_frame: f32,
    /// Multiplier applied to the delta passed to `advance`.
    pub time_scale: f32,
    pub loop_mode: LoopMode,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            start_frame: 0.0,
            time_scale: 1.0,
            loop_mode: LoopMode::Once,
        }
    }
}
