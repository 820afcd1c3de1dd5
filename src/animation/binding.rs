use crate::animation::curve::KeyframeCursor;
use crate::errors::Channel;
use crate::scene::NodeHandle;

/// Binding relationship: track `track_index` of an animation drives `bone`.
///
/// Each binding owns one keyframe cursor per channel so successive samples
/// of the same curve resume where the previous one stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneBinding {
    pub bone: NodeHandle,
    pub track_index: usize,
    pub(crate) cursors: [KeyframeCursor; 3],
}

impl BoneBinding {
    #[must_use]
    pub fn new(bone: NodeHandle, track_index: usize) -> Self {
        Self {
            bone,
            track_index,
            cursors: [KeyframeCursor::default(); 3],
        }
    }

    pub(crate) fn cursor_mut(&mut self, channel: Channel) -> &mut KeyframeCursor {
        let slot = match channel {
            Channel::Translation => 0,
            Channel::Rotation => 1,
            Channel::Scale => 2,
        };
        &mut self.cursors[slot]
    }

    pub(crate) fn reset_cursors(&mut self) {
        self.cursors = [KeyframeCursor::default(); 3];
    }
}
