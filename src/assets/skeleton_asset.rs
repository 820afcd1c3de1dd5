use glam::{Quat, Vec3};

use crate::scene::transform::Transform;

/// One bone as a format codec hands it over.
///
/// Sources store different subsets of the bind pose (some only local, some
/// only world, some both); every field the source lacks stays `None` and is
/// derived on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoneAsset {
    pub name: String,
    /// Index into [`SkeletonAsset::bones`]; any negative value marks a root.
    pub parent_index: i32,
    pub local_position: Option<Vec3>,
    pub local_rotation: Option<Quat>,
    pub world_position: Option<Vec3>,
    pub world_rotation: Option<Quat>,
    pub scale: Option<Vec3>,
}

impl BoneAsset {
    #[must_use]
    pub fn new(name: &str, parent_index: i32) -> Self {
        Self {
            name: name.to_string(),
            parent_index,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_local_position(mut self, value: Vec3) -> Self {
        self.local_position = Some(value);
        self
    }

    #[must_use]
    pub fn with_local_rotation(mut self, value: Quat) -> Self {
        self.local_rotation = Some(value);
        self
    }

    #[must_use]
    pub fn with_world_position(mut self, value: Vec3) -> Self {
        self.world_position = Some(value);
        self
    }

    #[must_use]
    pub fn with_world_rotation(mut self, value: Quat) -> Self {
        self.world_rotation = Some(value);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, value: Vec3) -> Self {
        self.scale = Some(value);
        self
    }

    /// Bind pose holding exactly the fields the source provided.
    #[must_use]
    pub fn base_transform(&self) -> Transform {
        Transform {
            local_position: self.local_position.into(),
            local_rotation: self.local_rotation.into(),
            world_position: self.world_position.into(),
            world_rotation: self.world_rotation.into(),
            scale: self.scale.into(),
        }
    }
}

/// Flat bone list with parent indices, the layout most skeletal formats use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkeletonAsset {
    pub name: String,
    pub bones: Vec<BoneAsset>,
}
