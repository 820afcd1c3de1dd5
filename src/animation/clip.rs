use crate::animation::action::{ActionPayload, AnimationAction};
use crate::animation::curve::{Keyframe, TransformSpace, TransformType};
use crate::animation::track::AnimationTrack;

/// A named set of bone tracks plus timeline event markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub name: String,
    /// Frames per second of the source data. Curves are keyed in frames.
    pub framerate: f32,
    pub tracks: Vec<AnimationTrack>,
    pub actions: Vec<AnimationAction>,

    /// Tags given to tracks created through [`Animation::create_track`].
    pub transform_type: TransformType,
    pub space: TransformSpace,
}

impl Animation {
    pub const DEFAULT_FRAMERATE: f32 = 30.0;

    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            framerate: Self::DEFAULT_FRAMERATE,
            tracks: Vec::new(),
            actions: Vec::new(),
            transform_type: TransformType::default(),
            space: TransformSpace::default(),
        }
    }

    #[must_use]
    pub fn with_framerate(mut self, framerate: f32) -> Self {
        self.framerate = framerate;
        self
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    pub fn add_track(&mut self, track: AnimationTrack) -> &mut AnimationTrack {
        let index = self.tracks.len();
        self.tracks.push(track);
        &mut self.tracks[index]
    }

    /// Appends an empty track tagged with the animation's default
    /// space and type.
    pub fn create_track(&mut self, name: &str) -> &mut AnimationTrack {
        self.add_track(AnimationTrack::with_tags(name, self.space, self.transform_type))
    }

    /// First track targeting `name`.
    #[must_use]
    pub fn find_track(&self, name: &str) -> Option<&AnimationTrack> {
        self.tracks.iter().find(|t| t.name == name)
    }

    pub fn find_track_mut(&mut self, name: &str) -> Option<&mut AnimationTrack> {
        self.tracks.iter_mut().find(|t| t.name == name)
    }

    /// Retags every curve of every track.
    pub fn set_transform_type(&mut self, transform_type: TransformType) {
        self.transform_type = transform_type;
        for track in &mut self.tracks {
            track.set_transform_type(transform_type);
        }
    }

    // ========================================================================
    // Frame range
    // ========================================================================

    /// `(min, max)` over every keyframe of every curve of every track.
    ///
    /// Without keyframes the result is `(f32::INFINITY, f32::NEG_INFINITY)`;
    /// callers treat `min > max` as empty.
    #[must_use]
    pub fn frame_range(&self) -> (f32, f32) {
        self.tracks
            .iter()
            .flat_map(|t| t.frames())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), f| {
                (lo.min(f), hi.max(f))
            })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        let (min, max) = self.frame_range();
        min > max
    }

    /// Length of the frame range in frames, zero when empty.
    #[must_use]
    pub fn duration(&self) -> f32 {
        let (min, max) = self.frame_range();
        if min > max { 0.0 } else { max - min }
    }

    /// Length of the frame range in seconds, zero when empty or when the
    /// framerate is not positive.
    #[must_use]
    pub fn duration_seconds(&self) -> f32 {
        if self.framerate > 0.0 {
            self.duration() / self.framerate
        } else {
            0.0
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Total number of markers across every action.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.actions.iter().map(AnimationAction::len).sum()
    }

    #[must_use]
    pub fn find_action(&self, name: &str) -> Option<&AnimationAction> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Returns the action named `name`, creating an empty one if none exists.
    pub fn create_action(&mut self, name: &str) -> &mut AnimationAction {
        let index = match self.actions.iter().position(|a| a.name == name) {
            Some(index) => index,
            None => {
                self.actions.push(AnimationAction::new(name));
                self.actions.len() - 1
            }
        };
        &mut self.actions[index]
    }

    /// Like [`Animation::create_action`], seeding a newly created action with
    /// `keyframes`. An existing action is returned untouched.
    pub fn create_action_with(
        &mut self,
        name: &str,
        keyframes: impl IntoIterator<Item = Keyframe<ActionPayload>>,
    ) -> &mut AnimationAction {
        if let Some(index) = self.actions.iter().position(|a| a.name == name) {
            return &mut self.actions[index];
        }
        let mut action = AnimationAction::new(name);
        action.keyframes.extend(keyframes);
        self.actions.push(action);
        let index = self.actions.len() - 1;
        &mut self.actions[index]
    }
}
