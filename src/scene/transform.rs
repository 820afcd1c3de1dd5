use glam::{Quat, Vec3};

/// State of one cached transform slot.
///
/// A slot is either `Unset` (never written, or cleared because the value it
/// was derived from changed) or holds a value. Readers that find a slot
/// `Unset` re-derive it from the complementary space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CacheState<T> {
    #[default]
    Unset,
    Cached(T),
}

impl<T: Copy> CacheState<T> {
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<T> {
        match *self {
            CacheState::Cached(v) => Some(v),
            CacheState::Unset => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_cached(&self) -> bool {
        matches!(self, CacheState::Cached(_))
    }

    #[inline]
    pub fn clear(&mut self) {
        *self = CacheState::Unset;
    }
}

impl<T> From<Option<T>> for CacheState<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => CacheState::Cached(v),
            None => CacheState::Unset,
        }
    }
}

/// Transform component
///
/// Holds a node's position and rotation in both local (parent-relative) and
/// world space. Only one space needs to be authoritative; the other is a
/// cache that the scene fills lazily through the parent chain.
///
/// The setters here only maintain this component's own consistency (writing
/// one space clears the other). Propagation to children is done by
/// [`Scene`](crate::scene::Scene), which owns the hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transform {
    pub(crate) local_position: CacheState<Vec3>,
    pub(crate) local_rotation: CacheState<Quat>,
    pub(crate) world_position: CacheState<Vec3>,
    pub(crate) world_rotation: CacheState<Quat>,
    pub(crate) scale: CacheState<Vec3>,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Builders (codec construction)
    // ========================================================================

    #[must_use]
    pub fn with_local_position(mut self, value: Vec3) -> Self {
        self.local_position = CacheState::Cached(value);
        self
    }

    #[must_use]
    pub fn with_local_rotation(mut self, value: Quat) -> Self {
        self.local_rotation = CacheState::Cached(value);
        self
    }

    #[must_use]
    pub fn with_world_position(mut self, value: Vec3) -> Self {
        self.world_position = CacheState::Cached(value);
        self
    }

    #[must_use]
    pub fn with_world_rotation(mut self, value: Quat) -> Self {
        self.world_rotation = CacheState::Cached(value);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, value: Vec3) -> Self {
        self.scale = CacheState::Cached(value);
        self
    }

    // ========================================================================
    // Raw slot access
    // ========================================================================

    /// Stored local position, without resolving through the hierarchy.
    #[inline]
    #[must_use]
    pub fn local_position(&self) -> Option<Vec3> {
        self.local_position.get()
    }

    #[inline]
    #[must_use]
    pub fn local_rotation(&self) -> Option<Quat> {
        self.local_rotation.get()
    }

    #[inline]
    #[must_use]
    pub fn world_position(&self) -> Option<Vec3> {
        self.world_position.get()
    }

    #[inline]
    #[must_use]
    pub fn world_rotation(&self) -> Option<Quat> {
        self.world_rotation.get()
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> Option<Vec3> {
        self.scale.get()
    }

    // ========================================================================
    // Setters: write one space, clear the other
    // ========================================================================

    pub fn set_local_position(&mut self, value: Vec3) {
        self.local_position = CacheState::Cached(value);
        self.world_position.clear();
    }

    pub fn set_local_rotation(&mut self, value: Quat) {
        self.local_rotation = CacheState::Cached(value);
        self.world_rotation.clear();
    }

    pub fn set_world_position(&mut self, value: Vec3) {
        self.local_position.clear();
        self.world_position = CacheState::Cached(value);
    }

    pub fn set_world_rotation(&mut self, value: Quat) {
        self.local_rotation.clear();
        self.world_rotation = CacheState::Cached(value);
    }

    pub fn set_scale(&mut self, value: Vec3) {
        self.scale = CacheState::Cached(value);
    }

    // ========================================================================
    // Invalidation
    // ========================================================================

    /// Clears the world-space slots, keeping local values (and scale).
    pub fn invalidate_world(&mut self) {
        self.world_position.clear();
        self.world_rotation.clear();
    }

    /// Clears every slot.
    pub fn invalidate(&mut self) {
        *self = Self::default();
    }

    /// Copies every slot of `other` into `self`.
    pub fn copy_from(&mut self, other: &Transform) {
        self.clone_from(other);
    }

    /// Returns `true` if no slot holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.local_position.is_cached()
            || self.local_rotation.is_cached()
            || self.world_position.is_cached()
            || self.world_rotation.is_cached()
            || self.scale.is_cached())
    }
}
