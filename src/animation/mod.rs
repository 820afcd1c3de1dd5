//! Keyframe animation and skeletal playback.
//!
//! - `AnimationCurve`: keyframes for one channel, tagged with space and type
//! - `AnimationTrack`: translation/rotation/scale curves for one bone
//! - Animation: tracks plus action markers
//! - Binder: name matching between tracks and bones
//! - `AnimationSampler`: writes sampled values onto a skeleton's live pose

mod values;
pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod curve;
pub mod sampler;
pub mod track;

pub use action::{ActionPayload, AnimationAction};
pub use binder::Binder;
pub use binding::BoneBinding;
pub use clip::Animation;
pub use curve::{AnimationCurve, Keyframe, KeyframeCursor, TransformSpace, TransformType};
pub use sampler::AnimationSampler;
pub use track::AnimationTrack;
pub use values::Interpolatable;
