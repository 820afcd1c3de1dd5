use glam::Vec3;
use uuid::Uuid;

use crate::assets::SkeletonAsset;
use crate::errors::{BoneworkError, Result};
use crate::scene::NodeHandle;
use crate::scene::node::Node;
use crate::scene::scene::Scene;
use crate::scene::transform::Transform;
use crate::scene::transform_system;
use crate::settings::SceneSettings;

/// An ordered set of bones forming one or more trees.
///
/// The skeleton owns its bones through its own [`Scene`]; `bones` keeps the
/// order the source data declared them in (the order codecs index into).
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub id: Uuid,
    pub name: String,

    scene: Scene,
    bones: Vec<NodeHandle>,
}

impl Skeleton {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_settings(name, SceneSettings::default())
    }

    #[must_use]
    pub fn with_settings(name: &str, settings: SceneSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            scene: Scene::with_settings(settings),
            bones: Vec::new(),
        }
    }

    /// Builds a skeleton from codec data.
    ///
    /// Parent indices may point forward; every bone is created first, then
    /// parented, and only then receives its bind pose (so reparenting does
    /// not discard the world values the source provided).
    pub fn from_asset(asset: &SkeletonAsset) -> Result<Self> {
        Self::from_asset_with_settings(asset, SceneSettings::default())
    }

    pub fn from_asset_with_settings(asset: &SkeletonAsset, settings: SceneSettings) -> Result<Self> {
        let mut skeleton = Self::with_settings(&asset.name, settings);

        for bone in &asset.bones {
            skeleton.add_bone(&bone.name, None)?;
        }

        for (i, bone) in asset.bones.iter().enumerate() {
            let Ok(parent_index) = usize::try_from(bone.parent_index) else {
                continue;
            };
            let Some(&parent) = skeleton.bones.get(parent_index) else {
                return Err(BoneworkError::AssetIndexOutOfBounds {
                    context: format!("parent of bone '{}'", bone.name),
                    index: i64::from(bone.parent_index),
                });
            };
            skeleton.scene.attach(skeleton.bones[i], parent)?;
        }

        for (i, bone) in asset.bones.iter().enumerate() {
            if let Some(node) = skeleton.scene.get_node_mut(skeleton.bones[i]) {
                node.base = bone.base_transform();
                // Parenting pinned placeholder values into the live pose.
                node.live.invalidate();
            }
        }

        log::debug!(
            "Built skeleton '{}' with {} bones ({} roots)",
            skeleton.name,
            skeleton.bones.len(),
            skeleton.scene.root_nodes.len()
        );

        Ok(skeleton)
    }

    /// Appends a bone with an empty bind pose.
    pub fn add_bone(&mut self, name: &str, parent: Option<NodeHandle>) -> Result<NodeHandle> {
        self.add_bone_with_base(name, parent, Transform::new())
    }

    /// Appends a bone whose bind pose is `base`. The pose is applied after
    /// parenting.
    pub fn add_bone_with_base(
        &mut self,
        name: &str,
        parent: Option<NodeHandle>,
        base: Transform,
    ) -> Result<NodeHandle> {
        let handle = match parent {
            Some(p) => self.scene.add_to_parent(Node::new(name), p)?,
            None => self.scene.add_node(Node::new(name)),
        };
        self.scene.nodes[handle].base = base;
        self.bones.push(handle);
        Ok(handle)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[NodeHandle] {
        &self.bones
    }

    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    #[must_use]
    pub fn bone(&self, handle: NodeHandle) -> Option<&Node> {
        self.scene.get_node(handle)
    }

    pub fn bone_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.scene.get_node_mut(handle)
    }

    /// Position of `handle` in the declared bone order.
    #[must_use]
    pub fn bone_index(&self, handle: NodeHandle) -> Option<usize> {
        self.bones.iter().position(|&b| b == handle)
    }

    /// First bone named `name`, in declared order.
    #[must_use]
    pub fn find_bone(&self, name: &str) -> Option<NodeHandle> {
        self.bones
            .iter()
            .copied()
            .find(|&b| self.scene.get_node(b).is_some_and(|n| n.name == name))
    }

    #[must_use]
    pub fn root_bones(&self) -> Vec<NodeHandle> {
        self.bones
            .iter()
            .copied()
            .filter(|&b| self.scene.get_node(b).is_some_and(Node::is_root))
            .collect()
    }

    /// Every bone, parents before their descendants.
    #[must_use]
    pub fn enumerate_hierarchy(&self) -> Vec<NodeHandle> {
        self.scene.iter_hierarchy()
    }

    #[must_use]
    pub fn is_descendant_of(&self, bone: NodeHandle, ancestor: NodeHandle) -> bool {
        self.scene.is_descendant_of(bone, ancestor)
    }

    #[must_use]
    pub fn is_descendant_of_name(&self, bone: NodeHandle, ancestor: &str) -> bool {
        self.scene.is_descendant_of_name(bone, ancestor)
    }

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    // ========================================================================
    // Pose
    // ========================================================================

    /// Returns every bone to its bind pose.
    pub fn reset_live_pose(&mut self) {
        self.scene.reset_live_pose();
    }

    /// Axis-aligned bounds of the live world positions of every bone.
    ///
    /// Resolves (and caches) world positions as needed. Returns `None` for an
    /// empty skeleton.
    pub fn compute_live_world_bounds(&mut self) -> Option<(Vec3, Vec3)> {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut valid = false;

        for &bone in &self.bones {
            if !self.scene.contains(bone) {
                continue;
            }
            let pos = transform_system::live_world_position(&mut self.scene.nodes, bone);
            min = min.min(pos);
            max = max.max(pos);
            valid = true;
        }

        valid.then_some((min, max))
    }
}
