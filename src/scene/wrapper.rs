//! Chainable node operation wrapper.
//!
//! [`SceneNode`] borrows a [`Scene`] mutably and provides a fluent API
//! for posing nodes without threading `Result`s through every call.
//!
//! All setters silently no-op when the handle is stale, and getters return
//! `None`, so users never encounter panics from dangling handles.
//!
//! # Example
//!
//! ```rust,ignore
//! let hand = scene.node(hand)
//!     .set_live_local_position(Vec3::new(0.0, 0.4, 0.0))
//!     .set_live_local_rotation(Quat::from_rotation_z(0.3))
//!     .live_world_position();
//! ```
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::must_use_candidate)]
use glam::{Quat, Vec3};

use crate::scene::NodeHandle;
use crate::scene::scene::Scene;
use crate::scene::transform::Transform;

/// Temporary mutable borrow of a scene node for chainable operations.
pub struct SceneNode<'a> {
    scene: &'a mut Scene,
    handle: NodeHandle,
}

impl<'a> SceneNode<'a> {
    #[inline]
    pub fn new(scene: &'a mut Scene, handle: NodeHandle) -> Self {
        Self { scene, handle }
    }

    /// Returns the underlying handle.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    /// Returns the node's name.
    pub fn name(&self) -> Option<&str> {
        self.scene.get_node(self.handle).map(|n| n.name.as_str())
    }

    // -- Bind pose --

    /// Replaces the bind pose and clears the live pose.
    pub fn set_base(self, base: Transform) -> Self {
        if let Some(node) = self.scene.get_node_mut(self.handle) {
            node.base = base;
            node.live.invalidate();
        }
        self
    }

    // -- Live setters (chainable) --

    pub fn set_live_local_position(self, value: Vec3) -> Self {
        let _ = self.scene.set_live_local_position(self.handle, value);
        self
    }

    pub fn set_live_local_rotation(self, value: Quat) -> Self {
        let _ = self.scene.set_live_local_rotation(self.handle, value);
        self
    }

    pub fn set_live_world_position(self, value: Vec3) -> Self {
        let _ = self.scene.set_live_world_position(self.handle, value);
        self
    }

    pub fn set_live_world_rotation(self, value: Quat) -> Self {
        let _ = self.scene.set_live_world_rotation(self.handle, value);
        self
    }

    pub fn set_live_scale(self, value: Vec3) -> Self {
        let _ = self.scene.set_live_scale(self.handle, value);
        self
    }

    // -- Resolved getters --

    pub fn live_local_position(&mut self) -> Option<Vec3> {
        self.scene.live_local_position(self.handle).ok()
    }

    pub fn live_world_position(&mut self) -> Option<Vec3> {
        self.scene.live_world_position(self.handle).ok()
    }

    pub fn live_local_rotation(&mut self) -> Option<Quat> {
        self.scene.live_local_rotation(self.handle).ok()
    }

    pub fn live_world_rotation(&mut self) -> Option<Quat> {
        self.scene.live_world_rotation(self.handle).ok()
    }

    pub fn base_world_position(&mut self) -> Option<Vec3> {
        self.scene.base_world_position(self.handle).ok()
    }

    pub fn base_world_rotation(&mut self) -> Option<Quat> {
        self.scene.base_world_rotation(self.handle).ok()
    }
}
