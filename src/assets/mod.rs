//! Codec-facing construction data.
//!
//! Format readers fill these plain structs and hand them to
//! [`Skeleton::from_asset`](crate::scene::Skeleton::from_asset); nothing here
//! knows about any particular file layout.

pub mod skeleton_asset;

pub use skeleton_asset::{BoneAsset, SkeletonAsset};
