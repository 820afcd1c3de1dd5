use crate::animation::curve::Keyframe;

/// Opaque payload attached to an action marker (a notetrack string, an
/// event id, ...). `None` for plain markers.
pub type ActionPayload = Option<String>;

/// A named list of discrete event markers on the animation timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationAction {
    pub name: String,
    /// Free-form category; `"Default"` unless a codec says otherwise.
    pub kind: String,
    pub keyframes: Vec<Keyframe<ActionPayload>>,
}

impl AnimationAction {
    pub const DEFAULT_KIND: &'static str = "Default";

    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: Self::DEFAULT_KIND.to_string(),
            keyframes: Vec::new(),
        }
    }

    /// Appends a marker at `frame`.
    pub fn add(&mut self, frame: f32, payload: ActionPayload) {
        self.keyframes.push(Keyframe::new(frame, payload));
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Markers with `from < frame <= to`, the ones crossed when playback
    /// moves forward from `from` to `to`.
    pub fn events_between(&self, from: f32, to: f32) -> impl Iterator<Item = &Keyframe<ActionPayload>> {
        self.keyframes
            .iter()
            .filter(move |k| k.frame > from && k.frame <= to)
    }
}
