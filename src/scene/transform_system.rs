//! Transform System
//!
//! Lazy local <-> world resolution over the node arena, decoupled from
//! [`Scene`](crate::scene::Scene) so it only borrows the node storage.
//!
//! # Resolution
//!
//! Every accessor follows the same shape, shown for the live world position:
//!
//! 1. If the slot is cached, return it.
//! 2. Otherwise resolve the node's local position (deriving it from its own
//!    world value, or falling back to the bind pose) and the parent's world
//!    position/rotation (recursively, identity for roots).
//! 3. Compose, store into the slot and return.
//!
//! Each call fills at most the slots it had to derive, so after one full
//! resolve every further read of the chain is O(1).
//!
//! # Propagation
//!
//! Writers change one node and then clear the world caches of the nodes below
//! it, as far as the [`InvalidationPolicy`] says. Before clearing, the local
//! slots of those nodes are resolved against the still-unchanged parent
//! ("pinned") so they keep their pose relative to it.

use glam::{Quat, Vec3};
use slotmap::SlotMap;

use crate::animation::TransformSpace;
use crate::scene::NodeHandle;
use crate::scene::node::Node;
use crate::scene::transform::CacheState;
use crate::settings::InvalidationPolicy;

pub type NodeArena = SlotMap<NodeHandle, Node>;

#[inline]
fn compose_position(parent_position: Vec3, parent_rotation: Quat, local: Vec3) -> Vec3 {
    parent_rotation * local + parent_position
}

#[inline]
fn compose_rotation(parent_rotation: Quat, local: Quat) -> Quat {
    (parent_rotation * local).normalize()
}

#[inline]
fn relative_position(parent_position: Vec3, parent_rotation: Quat, world: Vec3) -> Vec3 {
    parent_rotation.conjugate() * (world - parent_position)
}

#[inline]
fn relative_rotation(parent_rotation: Quat, world: Quat) -> Quat {
    (parent_rotation.conjugate() * world).normalize()
}

// ============================================================================
// Base (bind) pose
// ============================================================================

pub fn base_local_position(nodes: &mut NodeArena, handle: NodeHandle) -> Vec3 {
    let node = &nodes[handle];
    if let Some(value) = node.base.local_position.get() {
        return value;
    }

    let parent = node.parent;
    let value = match (node.base.world_position.get(), parent) {
        (None, _) => Vec3::ZERO,
        (Some(world), None) => world,
        (Some(world), Some(p)) => {
            let parent_rotation = base_world_rotation(nodes, p);
            let parent_position = base_world_position(nodes, p);
            relative_position(parent_position, parent_rotation, world)
        }
    };

    nodes[handle].base.local_position = CacheState::Cached(value);
    value
}

pub fn base_world_position(nodes: &mut NodeArena, handle: NodeHandle) -> Vec3 {
    let node = &nodes[handle];
    if let Some(value) = node.base.world_position.get() {
        return value;
    }

    let parent = node.parent;
    let local = base_local_position(nodes, handle);
    let value = match parent {
        Some(p) => {
            let parent_rotation = base_world_rotation(nodes, p);
            let parent_position = base_world_position(nodes, p);
            compose_position(parent_position, parent_rotation, local)
        }
        None => local,
    };

    nodes[handle].base.world_position = CacheState::Cached(value);
    value
}

pub fn base_local_rotation(nodes: &mut NodeArena, handle: NodeHandle) -> Quat {
    let node = &nodes[handle];
    if let Some(value) = node.base.local_rotation.get() {
        return value;
    }

    let parent = node.parent;
    let value = match (node.base.world_rotation.get(), parent) {
        (None, _) => Quat::IDENTITY,
        (Some(world), None) => world,
        (Some(world), Some(p)) => relative_rotation(base_world_rotation(nodes, p), world),
    };

    nodes[handle].base.local_rotation = CacheState::Cached(value);
    value
}

pub fn base_world_rotation(nodes: &mut NodeArena, handle: NodeHandle) -> Quat {
    let node = &nodes[handle];
    if let Some(value) = node.base.world_rotation.get() {
        return value;
    }

    let parent = node.parent;
    let local = base_local_rotation(nodes, handle);
    let value = match parent {
        Some(p) => compose_rotation(base_world_rotation(nodes, p), local),
        None => local,
    };

    nodes[handle].base.world_rotation = CacheState::Cached(value);
    value
}

#[must_use]
pub fn base_scale(nodes: &NodeArena, handle: NodeHandle) -> Vec3 {
    nodes[handle].base.scale.get().unwrap_or(Vec3::ONE)
}

// ============================================================================
// Live (animated) pose
// ============================================================================

/// Live parent world transform, identity for roots.
fn live_parent_world(nodes: &mut NodeArena, parent: Option<NodeHandle>) -> (Vec3, Quat) {
    match parent {
        Some(p) => (live_world_position(nodes, p), live_world_rotation(nodes, p)),
        None => (Vec3::ZERO, Quat::IDENTITY),
    }
}

pub fn live_local_position(nodes: &mut NodeArena, handle: NodeHandle) -> Vec3 {
    let node = &nodes[handle];
    if let Some(value) = node.live.local_position.get() {
        return value;
    }

    let parent = node.parent;
    let value = match (node.live.world_position.get(), parent) {
        (None, _) => base_local_position(nodes, handle),
        (Some(world), None) => world,
        (Some(world), Some(p)) => {
            let parent_rotation = live_world_rotation(nodes, p);
            let parent_position = live_world_position(nodes, p);
            relative_position(parent_position, parent_rotation, world)
        }
    };

    nodes[handle].live.local_position = CacheState::Cached(value);
    value
}

pub fn live_world_position(nodes: &mut NodeArena, handle: NodeHandle) -> Vec3 {
    let node = &nodes[handle];
    if let Some(value) = node.live.world_position.get() {
        return value;
    }

    let parent = node.parent;
    let local = live_local_position(nodes, handle);
    let value = match parent {
        Some(p) => {
            let parent_rotation = live_world_rotation(nodes, p);
            let parent_position = live_world_position(nodes, p);
            compose_position(parent_position, parent_rotation, local)
        }
        None => local,
    };

    nodes[handle].live.world_position = CacheState::Cached(value);
    value
}

pub fn live_local_rotation(nodes: &mut NodeArena, handle: NodeHandle) -> Quat {
    let node = &nodes[handle];
    if let Some(value) = node.live.local_rotation.get() {
        return value;
    }

    let parent = node.parent;
    let value = match (node.live.world_rotation.get(), parent) {
        (None, _) => base_local_rotation(nodes, handle),
        (Some(world), None) => world,
        (Some(world), Some(p)) => relative_rotation(live_world_rotation(nodes, p), world),
    };

    nodes[handle].live.local_rotation = CacheState::Cached(value);
    value
}

pub fn live_world_rotation(nodes: &mut NodeArena, handle: NodeHandle) -> Quat {
    let node = &nodes[handle];
    if let Some(value) = node.live.world_rotation.get() {
        return value;
    }

    let parent = node.parent;
    let local = live_local_rotation(nodes, handle);
    let value = match parent {
        Some(p) => compose_rotation(live_world_rotation(nodes, p), local),
        None => local,
    };

    nodes[handle].live.world_rotation = CacheState::Cached(value);
    value
}

/// Live scale, falling back to the bind scale and then to one.
#[must_use]
pub fn live_scale(nodes: &NodeArena, handle: NodeHandle) -> Vec3 {
    let node = &nodes[handle];
    node.live
        .scale
        .get()
        .or_else(|| node.base.scale.get())
        .unwrap_or(Vec3::ONE)
}

// ============================================================================
// Eager recompute
// ============================================================================

/// Rewrites the live local position and rotation from the live world values.
pub fn calculate_local_transform(nodes: &mut NodeArena, handle: NodeHandle) {
    let world_position = live_world_position(nodes, handle);
    let world_rotation = live_world_rotation(nodes, handle);
    let parent = nodes[handle].parent;

    let (local_position, local_rotation) = if parent.is_some() {
        let (parent_position, parent_rotation) = live_parent_world(nodes, parent);
        (
            relative_position(parent_position, parent_rotation, world_position),
            relative_rotation(parent_rotation, world_rotation),
        )
    } else {
        (world_position, world_rotation.normalize())
    };

    let live = &mut nodes[handle].live;
    live.local_position = CacheState::Cached(local_position);
    live.local_rotation = CacheState::Cached(local_rotation);
}

/// Rewrites the live world position and rotation from the live local values.
pub fn calculate_world_transform(nodes: &mut NodeArena, handle: NodeHandle) {
    let local_position = live_local_position(nodes, handle);
    let local_rotation = live_local_rotation(nodes, handle);
    let parent = nodes[handle].parent;

    let (world_position, world_rotation) = if parent.is_some() {
        let (parent_position, parent_rotation) = live_parent_world(nodes, parent);
        (
            compose_position(parent_position, parent_rotation, local_position),
            compose_rotation(parent_rotation, local_rotation),
        )
    } else {
        (local_position, local_rotation.normalize())
    };

    let live = &mut nodes[handle].live;
    live.world_position = CacheState::Cached(world_position);
    live.world_rotation = CacheState::Cached(world_rotation);
}

// ============================================================================
// Invalidation
// ============================================================================

/// Collects the nodes below `handle` reached by `policy`, parents before
/// their children.
#[must_use]
pub fn collect_dependents(
    nodes: &NodeArena,
    handle: NodeHandle,
    policy: InvalidationPolicy,
) -> Vec<NodeHandle> {
    let Some(node) = nodes.get(handle) else {
        return Vec::new();
    };

    match policy {
        InvalidationPolicy::DirectChildren => node.children.to_vec(),
        InvalidationPolicy::Subtree => {
            let mut out = Vec::new();
            let mut stack: Vec<NodeHandle> = node.children.iter().rev().copied().collect();
            while let Some(current) = stack.pop() {
                out.push(current);
                if let Some(n) = nodes.get(current) {
                    stack.extend(n.children.iter().rev().copied());
                }
            }
            out
        }
    }
}

/// Resolves the live local slots of `handles` so they survive a world
/// invalidation.
pub fn pin_live_locals(nodes: &mut NodeArena, handles: &[NodeHandle]) {
    for &h in handles {
        live_local_position(nodes, h);
        live_local_rotation(nodes, h);
    }
}

/// Resolves the base local slots of `handles`.
pub fn pin_base_locals(nodes: &mut NodeArena, handles: &[NodeHandle]) {
    for &h in handles {
        base_local_position(nodes, h);
        base_local_rotation(nodes, h);
    }
}

pub fn clear_live_world(nodes: &mut NodeArena, handles: &[NodeHandle]) {
    for &h in handles {
        nodes[h].live.invalidate_world();
    }
}

pub fn clear_base_world(nodes: &mut NodeArena, handles: &[NodeHandle]) {
    for &h in handles {
        nodes[h].base.invalidate_world();
    }
}

// ============================================================================
// Live setters
// ============================================================================

/// Writes the live world position, derives the local transform from it and
/// invalidates the dependents' world caches.
pub fn set_live_world_position(
    nodes: &mut NodeArena,
    handle: NodeHandle,
    value: Vec3,
    policy: InvalidationPolicy,
) {
    let dependents = collect_dependents(nodes, handle, policy);
    pin_live_locals(nodes, &dependents);

    nodes[handle].live.set_world_position(value);
    calculate_local_transform(nodes, handle);

    clear_live_world(nodes, &dependents);
}

/// Writes the (normalized) live world rotation and derives the local rotation.
pub fn set_live_world_rotation(
    nodes: &mut NodeArena,
    handle: NodeHandle,
    value: Quat,
    policy: InvalidationPolicy,
) {
    let value = value.normalize();
    let dependents = collect_dependents(nodes, handle, policy);
    pin_live_locals(nodes, &dependents);

    let parent = nodes[handle].parent;
    let local = match parent {
        Some(p) => relative_rotation(live_world_rotation(nodes, p), value),
        None => value,
    };

    let live = &mut nodes[handle].live;
    live.world_rotation = CacheState::Cached(value);
    live.local_rotation = CacheState::Cached(local);

    clear_live_world(nodes, &dependents);
}

/// Writes the live local position and eagerly recomputes the world position.
pub fn set_live_local_position(
    nodes: &mut NodeArena,
    handle: NodeHandle,
    value: Vec3,
    policy: InvalidationPolicy,
) {
    let dependents = collect_dependents(nodes, handle, policy);
    pin_live_locals(nodes, &dependents);

    let parent = nodes[handle].parent;
    let world = match parent {
        Some(_) => {
            let (parent_position, parent_rotation) = live_parent_world(nodes, parent);
            compose_position(parent_position, parent_rotation, value)
        }
        None => value,
    };

    let live = &mut nodes[handle].live;
    live.local_position = CacheState::Cached(value);
    live.world_position = CacheState::Cached(world);

    clear_live_world(nodes, &dependents);
}

/// Writes the (normalized) live local rotation and eagerly recomputes the
/// world transform of the node and of its direct children.
pub fn set_live_local_rotation(
    nodes: &mut NodeArena,
    handle: NodeHandle,
    value: Quat,
    policy: InvalidationPolicy,
) {
    let value = value.normalize();
    let dependents = collect_dependents(nodes, handle, policy);
    pin_live_locals(nodes, &dependents);

    nodes[handle].live.local_rotation = CacheState::Cached(value);
    calculate_world_transform(nodes, handle);

    clear_live_world(nodes, &dependents);

    let children = nodes[handle].children.clone();
    for child in children {
        calculate_world_transform(nodes, child);
    }
}

// ============================================================================
// Lazy writes (used by the sampler)
// ============================================================================

/// Writes the live position in `space` and clears the other space's slot,
/// leaving it to be re-derived on the next read.
pub fn write_live_position(
    nodes: &mut NodeArena,
    handle: NodeHandle,
    space: TransformSpace,
    value: Vec3,
    policy: InvalidationPolicy,
) {
    let dependents = collect_dependents(nodes, handle, policy);
    pin_live_locals(nodes, &dependents);

    match space {
        TransformSpace::Local => nodes[handle].live.set_local_position(value),
        TransformSpace::World => nodes[handle].live.set_world_position(value),
    }

    clear_live_world(nodes, &dependents);
}

/// Rotation counterpart of [`write_live_position`]; the value is normalized.
pub fn write_live_rotation(
    nodes: &mut NodeArena,
    handle: NodeHandle,
    space: TransformSpace,
    value: Quat,
    policy: InvalidationPolicy,
) {
    let value = value.normalize();
    let dependents = collect_dependents(nodes, handle, policy);
    pin_live_locals(nodes, &dependents);

    match space {
        TransformSpace::Local => nodes[handle].live.set_local_rotation(value),
        TransformSpace::World => nodes[handle].live.set_world_rotation(value),
    }

    clear_live_world(nodes, &dependents);
}
