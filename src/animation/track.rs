use glam::{Quat, Vec3};

use crate::animation::curve::{AnimationCurve, TransformSpace, TransformType};

/// Up to three curves driving one named bone.
///
/// `space` and `transform_type` only seed curves created lazily by the
/// `add_*_frame` helpers; each curve carries its own tags once it exists.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTrack {
    pub name: String,
    pub space: TransformSpace,
    pub transform_type: TransformType,

    pub translation: Option<AnimationCurve<Vec3>>,
    pub rotation: Option<AnimationCurve<Quat>>,
    pub scale: Option<AnimationCurve<Vec3>>,
}

impl AnimationTrack {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_tags(name, TransformSpace::default(), TransformType::default())
    }

    #[must_use]
    pub fn with_tags(name: &str, space: TransformSpace, transform_type: TransformType) -> Self {
        Self {
            name: name.to_string(),
            space,
            transform_type,
            translation: None,
            rotation: None,
            scale: None,
        }
    }

    pub fn add_translation_frame(&mut self, frame: f32, value: Vec3) {
        let (space, ty) = (self.space, self.transform_type);
        self.translation
            .get_or_insert_with(|| AnimationCurve::new(space, ty))
            .add(frame, value);
    }

    pub fn add_rotation_frame(&mut self, frame: f32, value: Quat) {
        let (space, ty) = (self.space, self.transform_type);
        self.rotation
            .get_or_insert_with(|| AnimationCurve::new(space, ty))
            .add(frame, value);
    }

    pub fn add_scale_frame(&mut self, frame: f32, value: Vec3) {
        let (space, ty) = (self.space, self.transform_type);
        self.scale
            .get_or_insert_with(|| AnimationCurve::new(space, ty))
            .add(frame, value);
    }

    /// Retags every existing curve (and future lazily created ones).
    pub fn set_transform_type(&mut self, transform_type: TransformType) {
        self.transform_type = transform_type;
        if let Some(c) = &mut self.translation {
            c.transform_type = transform_type;
        }
        if let Some(c) = &mut self.rotation {
            c.transform_type = transform_type;
        }
        if let Some(c) = &mut self.scale {
            c.transform_type = transform_type;
        }
    }

    /// Every keyframe frame across the three curves.
    pub fn frames(&self) -> impl Iterator<Item = f32> + '_ {
        let translation = self.translation.iter().flat_map(|c| c.keyframes.iter().map(|k| k.frame));
        let rotation = self.rotation.iter().flat_map(|c| c.keyframes.iter().map(|k| k.frame));
        let scale = self.scale.iter().flat_map(|c| c.keyframes.iter().map(|k| k.frame));
        translation.chain(rotation).chain(scale)
    }

    /// `(min, max)` over every keyframe, `None` when the track has none.
    #[must_use]
    pub fn frame_range(&self) -> Option<(f32, f32)> {
        self.frames().fold(None, |range, f| match range {
            None => Some((f, f)),
            Some((lo, hi)) => Some((lo.min(f), hi.max(f))),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames().next().is_none()
    }
}
