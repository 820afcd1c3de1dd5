//! Geometry data carried alongside skeletons.
//!
//! - Mesh: per-vertex attribute collections and faces
//! - `BoneInfluence`: one skin weight referencing a skeleton bone

pub mod mesh;

pub use mesh::{BoneInfluence, Mesh};
