#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod assets;
pub mod errors;
pub mod resources;
pub mod scene;
pub mod settings;

pub use animation::{
    Animation, AnimationAction, AnimationCurve, AnimationSampler, AnimationTrack, Binder,
    Keyframe, KeyframeCursor, TransformSpace, TransformType,
};
pub use assets::{BoneAsset, SkeletonAsset};
pub use errors::{BoneworkError, Channel, Result};
pub use resources::{BoneInfluence, Mesh};
pub use scene::{Node, NodeHandle, Scene, SceneNode, Skeleton, Transform};
pub use settings::{InvalidationPolicy, LoopMode, SamplerSettings, SceneSettings};
