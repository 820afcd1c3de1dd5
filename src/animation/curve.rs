use crate::animation::values::Interpolatable;

/// Coordinate space a curve's values are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransformSpace {
    /// Relative to the parent bone.
    #[default]
    Local,
    /// Relative to the skeleton root.
    World,
}

/// How a sampled value combines with the pose it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransformType {
    /// Not yet known; codecs are expected to resolve it before playback.
    #[default]
    Unknown,
    /// The value replaces the pose.
    Absolute,
    /// The value is added to (or, for rotations, composed onto) the live pose.
    Additive,
    /// The value is added to (or composed onto) the bind pose.
    Relative,
    /// Reserved for parent-relative data; cannot be sampled.
    Parent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<V> {
    pub frame: f32,
    pub value: V,
}

impl<V> Keyframe<V> {
    #[must_use]
    pub fn new(frame: f32, value: V) -> Self {
        Self { frame, value }
    }
}

/// Remembers where the previous lookup landed so monotonic playback finds
/// the next keyframe pair without rescanning from the start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// Ordered `(frame, value)` keyframes for one channel of one bone.
///
/// Keyframes are expected in ascending frame order; duplicates are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationCurve<V: Interpolatable> {
    pub space: TransformSpace,
    pub transform_type: TransformType,
    pub keyframes: Vec<Keyframe<V>>,
}

impl<V: Interpolatable> AnimationCurve<V> {
    #[must_use]
    pub fn new(space: TransformSpace, transform_type: TransformType) -> Self {
        Self {
            space,
            transform_type,
            keyframes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_keyframes(
        space: TransformSpace,
        transform_type: TransformType,
        keyframes: Vec<Keyframe<V>>,
    ) -> Self {
        Self {
            space,
            transform_type,
            keyframes,
        }
    }

    /// Appends a keyframe. Callers append in frame order.
    pub fn add(&mut self, frame: f32, value: V) {
        self.keyframes.push(Keyframe::new(frame, value));
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

    /// `(first, last)` keyframe frames, `None` when empty.
    #[must_use]
    pub fn frame_range(&self) -> Option<(f32, f32)> {
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;
        Some((first.frame, last.frame))
    }

    /// Indices of the keyframes bracketing `time`, with every keyframe frame
    /// shifted by `start`.
    ///
    /// Returns `None` for an empty curve, `(i, i)` when `time` is clamped to
    /// either end (or the curve has a single keyframe), and `(i, i + 1)` with
    /// `frame[i] <= time < frame[i + 1]` otherwise. The scan resumes at
    /// `cursor`, wraps around to the start once, and stores the hit back into
    /// the cursor.
    pub fn frame_pair_index(
        &self,
        time: f32,
        start: f32,
        cursor: &mut KeyframeCursor,
    ) -> Option<(usize, usize)> {
        let keys = &self.keyframes;
        let first = keys.first()?;
        let last_index = keys.len() - 1;

        if last_index == 0 || time <= start + first.frame {
            cursor.last_index = 0;
            return Some((0, 0));
        }
        if time >= start + keys[last_index].frame {
            cursor.last_index = last_index;
            return Some((last_index, last_index));
        }

        let resume = cursor.last_index.min(last_index);
        let brackets = |i: usize| start + keys[i].frame <= time && time < start + keys[i + 1].frame;

        let found = (resume..last_index)
            .chain(0..resume)
            .find(|&i| brackets(i));

        match found {
            Some(i) => {
                cursor.last_index = i;
                Some((i, i + 1))
            }
            // Only reachable with unsorted keyframes.
            None => Some((last_index, last_index)),
        }
    }

    /// Value at `time`; see [`AnimationCurve::sample_with_cursor`].
    #[must_use]
    pub fn sample(&self, time: f32) -> V {
        self.sample_with_cursor(time, &mut KeyframeCursor::default())
    }

    /// Value at `time`, resuming the keyframe search from `cursor`.
    ///
    /// An empty curve yields `V::default()`. Times outside the keyframe range
    /// clamp to the first or last value. A zero-length interval yields the
    /// second keyframe's value.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> V {
        let Some((i0, i1)) = self.frame_pair_index(time, 0.0, cursor) else {
            return V::default();
        };

        let a = &self.keyframes[i0];
        if i0 == i1 {
            return a.value;
        }

        let b = &self.keyframes[i1];
        let span = b.frame - a.frame;
        if span <= 0.0 {
            return b.value;
        }

        V::interpolate_linear(a.value, b.value, (time - a.frame) / span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn curve(frames: &[f32]) -> AnimationCurve<f32> {
        let mut c = AnimationCurve::new(TransformSpace::Local, TransformType::Absolute);
        for (i, &f) in frames.iter().enumerate() {
            c.add(f, i as f32);
        }
        c
    }

    #[test]
    fn empty_curve_samples_default() {
        let c: AnimationCurve<Vec3> = AnimationCurve::new(TransformSpace::Local, TransformType::Absolute);
        assert_eq!(c.sample(4.0), Vec3::ZERO);
        assert_eq!(c.frame_pair_index(4.0, 0.0, &mut KeyframeCursor::default()), None);
    }

    #[test]
    fn pair_index_resumes_from_cursor_and_wraps() {
        let c = curve(&[0.0, 10.0, 20.0, 30.0]);
        let mut cursor = KeyframeCursor::default();

        assert_eq!(c.frame_pair_index(25.0, 0.0, &mut cursor), Some((2, 3)));
        assert_eq!(cursor.last_index, 2);

        // Behind the cursor: found by the wraparound pass.
        assert_eq!(c.frame_pair_index(5.0, 0.0, &mut cursor), Some((0, 1)));
        assert_eq!(cursor.last_index, 0);
    }

    #[test]
    fn pair_index_honours_start_offset() {
        let c = curve(&[0.0, 10.0]);
        let mut cursor = KeyframeCursor::default();
        assert_eq!(c.frame_pair_index(105.0, 100.0, &mut cursor), Some((0, 1)));
        assert_eq!(c.frame_pair_index(50.0, 100.0, &mut cursor), Some((0, 0)));
        assert_eq!(c.frame_pair_index(500.0, 100.0, &mut cursor), Some((1, 1)));
    }

    #[test]
    fn zero_length_interval_snaps_to_second_keyframe() {
        let c = curve(&[0.0, 5.0, 5.0, 10.0]);
        // [5, 5) never brackets, so 5.0 lands in [5, 10) at its start.
        assert_eq!(c.sample(5.0), 2.0);
        assert_eq!(c.sample(2.5), 0.5);
    }

    #[test]
    fn stale_cursor_is_tolerated() {
        let c = curve(&[0.0, 10.0]);
        let mut cursor = KeyframeCursor { last_index: 42 };
        assert_eq!(c.sample_with_cursor(5.0, &mut cursor), 0.5);
    }
}
