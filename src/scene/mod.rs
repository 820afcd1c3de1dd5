//! Scene graph module
//!
//! Owns the bone hierarchy and its poses:
//! - Node: a named node with parent/child links and two transforms
//! - Transform: lazily resolved position, rotation and scale
//! - Scene: node arena and hierarchy operations
//! - Skeleton: ordered bone set built on a scene
//! - `TransformSystem`: resolution and invalidation over the arena

pub mod node;
pub mod scene;
pub mod skeleton;
pub mod transform;
pub mod transform_system;
pub mod wrapper;

pub use node::Node;
pub use scene::Scene;
pub use skeleton::Skeleton;
pub use transform::{CacheState, Transform};
pub use wrapper::SceneNode;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
