use glam::{Quat, Vec3};

/// A keyframe value type that can be blended between two keyframes.
///
/// Implemented for the closed set of channel types curves carry; sampling is
/// monomorphized per type.
pub trait Interpolatable: Copy + Default + std::fmt::Debug {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    /// Shortest-arc spherical interpolation.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}
