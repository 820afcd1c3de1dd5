//! Animation data tests
//!
//! Tests for:
//! - AnimationCurve sampling (clamping, interpolation, single keyframe)
//! - KeyframeCursor resumption against fresh lookups
//! - AnimationTrack lazy curve creation
//! - Animation frame range, actions and transform-type retagging

use std::f32::consts::FRAC_PI_2;

use bonework::animation::{
    Animation, AnimationCurve, AnimationTrack, Keyframe, KeyframeCursor, TransformSpace,
    TransformType,
};
use glam::{Quat, Vec3};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}

fn vec3_curve(keys: &[(f32, Vec3)]) -> AnimationCurve<Vec3> {
    AnimationCurve::with_keyframes(
        TransformSpace::Local,
        TransformType::Absolute,
        keys.iter().map(|&(f, v)| Keyframe::new(f, v)).collect(),
    )
}

// ============================================================================
// AnimationCurve
// ============================================================================

#[test]
fn curve_interpolates_and_clamps() {
    let v0 = Vec3::new(0.0, 0.0, 0.0);
    let v1 = Vec3::new(10.0, -4.0, 2.0);
    let curve = vec3_curve(&[(0.0, v0), (10.0, v1)]);

    assert!(vec3_approx(curve.sample(5.0), Vec3::new(5.0, -2.0, 1.0)));
    assert_eq!(curve.sample(-1.0), v0);
    assert_eq!(curve.sample(100.0), v1);
    assert_eq!(curve.sample(0.0), v0);
    assert_eq!(curve.sample(10.0), v1);
}

#[test]
fn single_keyframe_is_constant() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    let curve = vec3_curve(&[(3.0, v)]);
    for t in [-50.0, 0.0, 3.0, 3.5, 1e6] {
        assert_eq!(curve.sample(t), v);
    }
}

#[test]
fn sampling_is_idempotent() {
    let curve = vec3_curve(&[(0.0, Vec3::ZERO), (4.0, Vec3::X), (9.0, Vec3::Y)]);
    let first = curve.sample(6.3);
    for _ in 0..10 {
        assert_eq!(curve.sample(6.3), first);
    }
}

#[test]
fn rotation_curve_slerps() {
    let mut curve = AnimationCurve::new(TransformSpace::Local, TransformType::Absolute);
    curve.add(0.0, Quat::IDENTITY);
    curve.add(10.0, Quat::from_rotation_y(FRAC_PI_2));

    let mid = curve.sample(5.0);
    assert!(mid.angle_between(Quat::from_rotation_y(FRAC_PI_2 / 2.0)) < 1e-4);
    assert!(approx(mid.length(), 1.0));
}

#[test]
fn scalar_curve_interpolates() {
    let mut curve = AnimationCurve::new(TransformSpace::Local, TransformType::Absolute);
    curve.add(2.0, 1.0_f32);
    curve.add(4.0, 3.0_f32);
    assert!(approx(curve.sample(3.0), 2.0));
    assert_eq!(curve.frame_range(), Some((2.0, 4.0)));
}

#[test]
fn cursor_matches_fresh_lookup_in_both_directions() {
    let keys: Vec<(f32, Vec3)> = (0..20).map(|i| (i as f32 * 2.0, Vec3::splat(i as f32))).collect();
    let curve = vec3_curve(&keys);
    let mut cursor = KeyframeCursor::default();

    let forward = (0..90).map(|i| i as f32 * 0.5 - 2.0);
    let backward = (0..90).rev().map(|i| i as f32 * 0.5 - 2.0);
    let scrub = [37.0, 1.0, 22.5, 0.5, 38.0];

    for t in forward.chain(backward).chain(scrub) {
        assert_eq!(
            curve.sample_with_cursor(t, &mut cursor),
            curve.sample(t),
            "mismatch at {t}"
        );
    }
}

// ============================================================================
// AnimationTrack / Animation
// ============================================================================

#[test]
fn frame_range_spans_every_curve() {
    let mut anim = Animation::new("range");

    let mut a = AnimationTrack::new("a");
    for f in [2.0, 2.0, 7.0] {
        a.add_translation_frame(f, Vec3::ZERO);
    }
    let mut b = AnimationTrack::new("b");
    b.add_rotation_frame(0.0, Quat::IDENTITY);
    b.add_rotation_frame(9.0, Quat::IDENTITY);

    anim.add_track(a);
    anim.add_track(b);

    assert_eq!(anim.frame_range(), (0.0, 9.0));
    assert!(approx(anim.duration(), 9.0));
    assert!(!anim.is_empty());
}

#[test]
fn empty_animation_reports_sentinel_range() {
    let mut anim = Animation::new("empty");
    anim.add_track(AnimationTrack::new("bone"));

    let (min, max) = anim.frame_range();
    assert!(min > max);
    assert_eq!(min, f32::INFINITY);
    assert_eq!(max, f32::NEG_INFINITY);
    assert!(anim.is_empty());
}

#[test]
fn duration_in_seconds_uses_framerate() {
    let mut anim = Animation::new("walk").with_framerate(24.0);
    anim.create_track("hip").add_translation_frame(0.0, Vec3::ZERO);
    anim.find_track_mut("hip")
        .unwrap()
        .add_translation_frame(48.0, Vec3::X);

    assert!(approx(anim.duration_seconds(), 2.0));
}

#[test]
fn set_transform_type_retags_every_curve() {
    let mut anim = Animation::new("retag");
    let track = anim.create_track("spine");
    track.add_translation_frame(0.0, Vec3::ZERO);
    track.add_rotation_frame(0.0, Quat::IDENTITY);
    track.add_scale_frame(0.0, Vec3::ONE);
    anim.create_track("neck").add_rotation_frame(1.0, Quat::IDENTITY);

    anim.set_transform_type(TransformType::Relative);

    for track in &anim.tracks {
        let types = [
            track.translation.as_ref().map(|c| c.transform_type),
            track.rotation.as_ref().map(|c| c.transform_type),
            track.scale.as_ref().map(|c| c.transform_type),
        ];
        for ty in types.into_iter().flatten() {
            assert_eq!(ty, TransformType::Relative);
        }
    }
}

#[test]
fn actions_count_markers() {
    let mut anim = Animation::new("notes");
    anim.create_action("sound").add(3.0, Some("step".into()));
    anim.create_action_with(
        "fx",
        [Keyframe::new(1.0, None), Keyframe::new(6.0, Some("spark".into()))],
    );

    assert_eq!(anim.action_count(), 3);
    assert_eq!(anim.find_action("fx").unwrap().kind, "Default");
    let crossed: Vec<f32> = anim
        .find_action("fx")
        .unwrap()
        .events_between(0.0, 5.0)
        .map(|k| k.frame)
        .collect();
    assert_eq!(crossed, vec![1.0]);
}
