use rustc_hash::FxHashMap;

use crate::animation::clip::Animation;
use crate::animation::binding::BoneBinding;
use crate::scene::Skeleton;

pub struct Binder;

impl Binder {
    /// Pairs every bone with the first track carrying its exact name.
    ///
    /// Bindings come out in parent-first hierarchy order so that world-space
    /// writes see their parents' already-updated pose. Bones without a track
    /// and tracks without a bone are skipped.
    #[must_use]
    pub fn bind(skeleton: &Skeleton, animation: &Animation) -> Vec<BoneBinding> {
        let mut by_name: FxHashMap<&str, usize> = FxHashMap::default();
        for (index, track) in animation.tracks.iter().enumerate() {
            by_name.entry(track.name.as_str()).or_insert(index);
        }

        let mut bindings = Vec::with_capacity(by_name.len());
        for bone in skeleton.enumerate_hierarchy() {
            let Some(node) = skeleton.bone(bone) else {
                continue;
            };
            if let Some(&track_index) = by_name.get(node.name.as_str()) {
                bindings.push(BoneBinding::new(bone, track_index));
            }
        }

        log::debug!(
            "Bound animation '{}' to skeleton '{}': {} of {} tracks matched",
            animation.name,
            skeleton.name,
            bindings.len(),
            animation.tracks.len()
        );

        bindings
    }
}
