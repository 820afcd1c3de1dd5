use glam::{Quat, Vec3};
use slotmap::SlotMap;

use crate::animation::TransformSpace;
use crate::errors::{BoneworkError, Result};
use crate::scene::NodeHandle;
use crate::scene::node::Node;
use crate::scene::transform_system;
use crate::scene::wrapper::SceneNode;
use crate::settings::SceneSettings;

/// Scene graph
///
/// Owns every node in an arena and keeps the parent/children links
/// consistent. A node's children are its only ownership edge; parents are
/// plain handles, so removing a node never touches its ancestors.
///
/// All transform accessors go through the scene because resolving one space
/// from the other walks the parent chain.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub(crate) nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,
    pub settings: SceneSettings,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(settings: SceneSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    // ========================================================================
    // Node lifecycle
    // ========================================================================

    /// Creates an empty root node.
    pub fn create_node(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::new(name))
    }

    /// Adds a node to the scene as a root. Any hierarchy links the node
    /// carries are discarded.
    pub fn add_node(&mut self, mut node: Node) -> NodeHandle {
        node.parent = None;
        node.children.clear();
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node directly under `parent`.
    pub fn add_to_parent(&mut self, node: Node, parent: NodeHandle) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(BoneworkError::NodeNotFound(parent));
        }
        let handle = self.add_node(node);
        self.attach(handle, parent)?;
        Ok(handle)
    }

    /// Removes a node and its whole subtree.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let children = if let Some(node) = self.nodes.get(handle) {
            node.children.clone()
        } else {
            return;
        };

        for child in children {
            self.remove_node(child);
        }

        self.unlink(handle);
        self.nodes.remove(handle);
    }

    /// Detaches `handle` from its parent (or from the root list).
    fn unlink(&mut self, handle: NodeHandle) {
        let parent = self.nodes.get(handle).and_then(|n| n.parent);
        if let Some(p) = parent {
            if let Some(parent_node) = self.nodes.get_mut(p)
                && let Some(i) = parent_node.children.iter().position(|&x| x == handle)
            {
                parent_node.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(i);
        }
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Moves `child` under `parent`.
    ///
    /// The child's base and live world caches are cleared; its dependents
    /// (per [`InvalidationPolicy`](crate::settings::InvalidationPolicy)) keep
    /// their pose relative to it.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) -> Result<()> {
        self.move_to(child, Some(parent))
    }

    /// Makes `child` a root node.
    pub fn detach(&mut self, child: NodeHandle) -> Result<()> {
        self.move_to(child, None)
    }

    /// Moves `child` under `new_parent`, or to the root list for `None`.
    pub fn move_to(&mut self, child: NodeHandle, new_parent: Option<NodeHandle>) -> Result<()> {
        let current = self.node_ref(child)?.parent;

        if let Some(p) = new_parent {
            self.node_ref(p)?;
            if p == child || self.is_descendant_of(p, child) {
                log::warn!("Cannot attach node to itself or to one of its descendants!");
                return Err(BoneworkError::CyclicHierarchy { node: child, parent: p });
            }
        }

        if current == new_parent {
            return Ok(());
        }

        let dependents =
            transform_system::collect_dependents(&self.nodes, child, self.settings.invalidation);
        transform_system::pin_base_locals(&mut self.nodes, &dependents);
        transform_system::pin_live_locals(&mut self.nodes, &dependents);

        self.unlink(child);
        match new_parent {
            Some(p) => self.nodes[p].children.push(child),
            None => self.root_nodes.push(child),
        }

        let node = &mut self.nodes[child];
        node.parent = new_parent;
        node.base.invalidate_world();
        node.live.invalidate_world();

        transform_system::clear_base_world(&mut self.nodes, &dependents);
        transform_system::clear_live_world(&mut self.nodes, &dependents);
        Ok(())
    }

    /// Returns `true` if `ancestor` appears on the parent chain of `handle`.
    #[must_use]
    pub fn is_descendant_of(&self, handle: NodeHandle, ancestor: NodeHandle) -> bool {
        let mut current = self.nodes.get(handle).and_then(|n| n.parent);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.nodes.get(p).and_then(|n| n.parent);
        }
        false
    }

    /// Returns `true` if a node named `name` appears on the parent chain of
    /// `handle`.
    #[must_use]
    pub fn is_descendant_of_name(&self, handle: NodeHandle, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        let mut current = self.nodes.get(handle).and_then(|n| n.parent);
        while let Some(p) = current {
            let Some(node) = self.nodes.get(p) else {
                return false;
            };
            if node.name == name {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// Every node, parents before their descendants, roots in insertion order.
    #[must_use]
    pub fn iter_hierarchy(&self) -> Vec<NodeHandle> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeHandle> = self.root_nodes.iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            out.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// First node named `name`, in hierarchy order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.iter_hierarchy()
            .into_iter()
            .find(|&h| self.nodes[h].name == name)
    }

    // ========================================================================
    // Access
    // ========================================================================

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Chainable wrapper around one node.
    pub fn node(&mut self, handle: NodeHandle) -> SceneNode<'_> {
        SceneNode::new(self, handle)
    }

    fn node_ref(&self, handle: NodeHandle) -> Result<&Node> {
        self.nodes
            .get(handle)
            .ok_or(BoneworkError::NodeNotFound(handle))
    }

    // ========================================================================
    // Resolution (base pose)
    // ========================================================================

    pub fn base_local_position(&mut self, handle: NodeHandle) -> Result<Vec3> {
        self.node_ref(handle)?;
        Ok(transform_system::base_local_position(&mut self.nodes, handle))
    }

    pub fn base_world_position(&mut self, handle: NodeHandle) -> Result<Vec3> {
        self.node_ref(handle)?;
        Ok(transform_system::base_world_position(&mut self.nodes, handle))
    }

    pub fn base_local_rotation(&mut self, handle: NodeHandle) -> Result<Quat> {
        self.node_ref(handle)?;
        Ok(transform_system::base_local_rotation(&mut self.nodes, handle))
    }

    pub fn base_world_rotation(&mut self, handle: NodeHandle) -> Result<Quat> {
        self.node_ref(handle)?;
        Ok(transform_system::base_world_rotation(&mut self.nodes, handle))
    }

    pub fn base_scale(&self, handle: NodeHandle) -> Result<Vec3> {
        self.node_ref(handle)?;
        Ok(transform_system::base_scale(&self.nodes, handle))
    }

    // ========================================================================
    // Resolution (live pose)
    // ========================================================================

    pub fn live_local_position(&mut self, handle: NodeHandle) -> Result<Vec3> {
        self.node_ref(handle)?;
        Ok(transform_system::live_local_position(&mut self.nodes, handle))
    }

    pub fn live_world_position(&mut self, handle: NodeHandle) -> Result<Vec3> {
        self.node_ref(handle)?;
        Ok(transform_system::live_world_position(&mut self.nodes, handle))
    }

    pub fn live_local_rotation(&mut self, handle: NodeHandle) -> Result<Quat> {
        self.node_ref(handle)?;
        Ok(transform_system::live_local_rotation(&mut self.nodes, handle))
    }

    pub fn live_world_rotation(&mut self, handle: NodeHandle) -> Result<Quat> {
        self.node_ref(handle)?;
        Ok(transform_system::live_world_rotation(&mut self.nodes, handle))
    }

    pub fn live_scale(&self, handle: NodeHandle) -> Result<Vec3> {
        self.node_ref(handle)?;
        Ok(transform_system::live_scale(&self.nodes, handle))
    }

    /// Live position in `space`.
    pub fn live_position_in(&mut self, handle: NodeHandle, space: TransformSpace) -> Result<Vec3> {
        match space {
            TransformSpace::Local => self.live_local_position(handle),
            TransformSpace::World => self.live_world_position(handle),
        }
    }

    /// Live rotation in `space`.
    pub fn live_rotation_in(&mut self, handle: NodeHandle, space: TransformSpace) -> Result<Quat> {
        match space {
            TransformSpace::Local => self.live_local_rotation(handle),
            TransformSpace::World => self.live_world_rotation(handle),
        }
    }

    /// Base position in `space`.
    pub fn base_position_in(&mut self, handle: NodeHandle, space: TransformSpace) -> Result<Vec3> {
        match space {
            TransformSpace::Local => self.base_local_position(handle),
            TransformSpace::World => self.base_world_position(handle),
        }
    }

    /// Base rotation in `space`.
    pub fn base_rotation_in(&mut self, handle: NodeHandle, space: TransformSpace) -> Result<Quat> {
        match space {
            TransformSpace::Local => self.base_local_rotation(handle),
            TransformSpace::World => self.base_world_rotation(handle),
        }
    }

    // ========================================================================
    // Live mutation
    // ========================================================================

    pub fn set_live_world_position(&mut self, handle: NodeHandle, value: Vec3) -> Result<()> {
        self.node_ref(handle)?;
        let policy = self.settings.invalidation;
        transform_system::set_live_world_position(&mut self.nodes, handle, value, policy);
        Ok(())
    }

    pub fn set_live_world_rotation(&mut self, handle: NodeHandle, value: Quat) -> Result<()> {
        self.node_ref(handle)?;
        let policy = self.settings.invalidation;
        transform_system::set_live_world_rotation(&mut self.nodes, handle, value, policy);
        Ok(())
    }

    pub fn set_live_local_position(&mut self, handle: NodeHandle, value: Vec3) -> Result<()> {
        self.node_ref(handle)?;
        let policy = self.settings.invalidation;
        transform_system::set_live_local_position(&mut self.nodes, handle, value, policy);
        Ok(())
    }

    /// Sets the live local rotation and recomputes the world transform of the
    /// node and its direct children immediately.
    pub fn set_live_local_rotation(&mut self, handle: NodeHandle, value: Quat) -> Result<()> {
        self.node_ref(handle)?;
        let policy = self.settings.invalidation;
        transform_system::set_live_local_rotation(&mut self.nodes, handle, value, policy);
        Ok(())
    }

    pub fn set_live_scale(&mut self, handle: NodeHandle, value: Vec3) -> Result<()> {
        self.nodes
            .get_mut(handle)
            .ok_or(BoneworkError::NodeNotFound(handle))?
            .live
            .set_scale(value);
        Ok(())
    }

    /// Writes the live position in `space` without eager recomputation; the
    /// other space is re-derived on the next read.
    pub fn write_live_position(
        &mut self,
        handle: NodeHandle,
        space: TransformSpace,
        value: Vec3,
    ) -> Result<()> {
        self.node_ref(handle)?;
        let policy = self.settings.invalidation;
        transform_system::write_live_position(&mut self.nodes, handle, space, value, policy);
        Ok(())
    }

    /// Rotation counterpart of [`Scene::write_live_position`].
    pub fn write_live_rotation(
        &mut self,
        handle: NodeHandle,
        space: TransformSpace,
        value: Quat,
    ) -> Result<()> {
        self.node_ref(handle)?;
        let policy = self.settings.invalidation;
        transform_system::write_live_rotation(&mut self.nodes, handle, space, value, policy);
        Ok(())
    }

    pub fn calculate_local_transform(&mut self, handle: NodeHandle) -> Result<()> {
        self.node_ref(handle)?;
        transform_system::calculate_local_transform(&mut self.nodes, handle);
        Ok(())
    }

    pub fn calculate_world_transform(&mut self, handle: NodeHandle) -> Result<()> {
        self.node_ref(handle)?;
        transform_system::calculate_world_transform(&mut self.nodes, handle);
        Ok(())
    }

    /// Clears every live transform, returning all nodes to their bind pose.
    pub fn reset_live_pose(&mut self) {
        for (_, node) in &mut self.nodes {
            node.live.invalidate();
        }
    }
}
