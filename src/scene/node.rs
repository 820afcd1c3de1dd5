use smallvec::SmallVec;

use crate::scene::NodeHandle;
use crate::scene::transform::Transform;

/// A scene node: a name, its place in the hierarchy and two transforms.
///
/// # Hierarchy
///
/// Nodes form a forest through parent-child relationships:
/// - `parent`: Optional handle to the parent node (None for root nodes)
/// - `children`: Child node handles, unique by identity
///
/// Both sides are kept in sync by [`Scene::attach`](crate::scene::Scene::attach);
/// a node never owns its parent.
///
/// # Transforms
///
/// - `base`: the bind (rest) pose as loaded from the source data
/// - `live`: the current animated pose, rewritten during playback
///
/// Reading a resolved value (e.g. a world position that was never stored)
/// goes through [`Scene`](crate::scene::Scene) since it needs the parent chain.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: SmallVec<[NodeHandle; 4]>,

    // === Core Spatial Data ===
    pub base: Transform,
    pub live: Transform,
}

impl Node {
    /// Creates a detached node with empty transforms.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: SmallVec::new(),
            base: Transform::new(),
            live: Transform::new(),
        }
    }

    /// Creates a detached node whose bind pose is `base`.
    #[must_use]
    pub fn with_base(name: &str, base: Transform) -> Self {
        Self {
            base,
            ..Self::new(name)
        }
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
