//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`BoneworkError`] covers every failure the core can
//! surface:
//! - Animation curves tagged with a space/type combination the sampler cannot apply
//! - Hierarchy edits that would break the forest invariant
//! - Malformed data handed over by a format codec
//!
//! Tracks without a matching bone (and bones without a matching track) are
//! **not** errors; the binder simply skips them.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, BoneworkError>`.
//!
//! ```rust,ignore
//! use bonework::errors::Result;
//!
//! fn play(sampler: &mut AnimationSampler, skeleton: &mut Skeleton) -> Result<()> {
//!     sampler.update(skeleton, 12.0, 1.0)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::animation::{TransformSpace, TransformType};
use crate::scene::NodeHandle;

/// The transform channel a curve drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Translation,
    Rotation,
    Scale,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::Translation => "translation",
            Channel::Rotation => "rotation",
            Channel::Scale => "scale",
        };
        f.write_str(name)
    }
}

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum BoneworkError {
    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// A curve declares a space/type combination that cannot be applied.
    #[error("Unsupported {channel} curve on '{bone}': {transform_type:?} in {space:?} space")]
    UnsupportedTransform {
        /// Name of the bone the track is bound to
        bone: String,
        /// Channel the curve drives
        channel: Channel,
        /// Space declared by the curve
        space: TransformSpace,
        /// Type declared by the curve
        transform_type: TransformType,
    },

    /// A sampler was evaluated against a skeleton it was not bound to.
    #[error("Sampler '{sampler}' is bound to a different skeleton")]
    SkeletonMismatch {
        /// Name of the sampler
        sampler: String,
    },

    // ========================================================================
    // Hierarchy Errors
    // ========================================================================
    /// The handle does not refer to a live node.
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeHandle),

    /// Attaching would make a node its own ancestor.
    #[error("Cannot attach {node:?} under {parent:?}: the parent is part of its subtree")]
    CyclicHierarchy {
        /// The node being moved
        node: NodeHandle,
        /// The requested parent
        parent: NodeHandle,
    },

    // ========================================================================
    // Asset Errors
    // ========================================================================
    /// Asset index out of bounds.
    #[error("Asset index out of bounds: {context} (index: {index})")]
    AssetIndexOutOfBounds {
        /// Description of what was being accessed
        context: String,
        /// The invalid index
        index: i64,
    },

    /// A per-vertex attribute does not match the vertex count.
    #[error("Mesh attribute '{attribute}' has {actual} entries, expected {expected}")]
    AttributeLengthMismatch {
        /// Attribute name
        attribute: String,
        /// Vertex count of the mesh
        expected: usize,
        /// Entries found in the attribute
        actual: usize,
    },
}

/// Alias for `Result<T, BoneworkError>`.
pub type Result<T> = std::result::Result<T, BoneworkError>;
