//! Transform resolution tests
//!
//! Tests for:
//! - Transform slot semantics (setters clear the other space)
//! - Lazy local/world resolution through the parent chain
//! - Live pose falling back to the bind pose
//! - Eager setters and invalidation policies
//! - Reparenting and the chainable `SceneNode` wrapper

use std::f32::consts::FRAC_PI_2;

use bonework::scene::{Node, Scene, Transform};
use bonework::settings::{InvalidationPolicy, SceneSettings};
use bonework::{BoneAsset, BoneworkError, Skeleton, SkeletonAsset};
use glam::{Quat, Vec3};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

fn quat_approx(a: Quat, b: Quat) -> bool {
    a.angle_between(b) < 1e-3
}

/// Three nodes `a -> b -> c`, each one unit along X from its parent.
fn chain(settings: SceneSettings) -> (Scene, [bonework::NodeHandle; 3]) {
    let mut scene = Scene::with_settings(settings);
    let base = Transform::new().with_local_position(Vec3::X);
    let a = scene.add_node(Node::with_base("a", base.clone()));
    let b = scene.add_to_parent(Node::with_base("b", base.clone()), a).unwrap();
    let c = scene.add_to_parent(Node::with_base("c", base), b).unwrap();
    (scene, [a, b, c])
}

// ============================================================================
// Transform slots
// ============================================================================

#[test]
fn setting_local_clears_world_of_same_channel() {
    let mut t = Transform::new()
        .with_world_position(Vec3::Y)
        .with_world_rotation(Quat::from_rotation_x(0.2));

    t.set_local_position(Vec3::X);

    assert_eq!(t.local_position(), Some(Vec3::X));
    assert_eq!(t.world_position(), None);
    assert!(t.world_rotation().is_some());
}

#[test]
fn invalidate_clears_every_slot() {
    let mut t = Transform::new()
        .with_local_position(Vec3::X)
        .with_world_rotation(Quat::IDENTITY)
        .with_scale(Vec3::ONE);
    t.invalidate();
    assert!(t.is_empty());

    let mut copy = Transform::new();
    copy.copy_from(&Transform::new().with_scale(Vec3::splat(2.0)));
    assert_eq!(copy.scale(), Some(Vec3::splat(2.0)));
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn root_world_equals_local() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::with_base(
        "root",
        Transform::new().with_local_position(Vec3::new(1.0, 2.0, 3.0)),
    ));

    assert_eq!(scene.base_world_position(root).unwrap(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(scene.live_world_position(root).unwrap(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn unknown_slots_default_to_identity() {
    let mut scene = Scene::new();
    let root = scene.create_node("root");

    assert_eq!(scene.live_world_position(root).unwrap(), Vec3::ZERO);
    assert_eq!(scene.live_world_rotation(root).unwrap(), Quat::IDENTITY);
    assert_eq!(scene.live_scale(root).unwrap(), Vec3::ONE);
}

#[test]
fn world_position_round_trips_through_local() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::with_base(
        "root",
        Transform::new()
            .with_local_position(Vec3::X)
            .with_local_rotation(Quat::from_rotation_z(FRAC_PI_2)),
    ));
    let child = scene.add_to_parent(Node::new("child"), root).unwrap();
    let probe = scene.add_to_parent(Node::new("probe"), root).unwrap();

    let target = Vec3::new(1.0, 2.0, 0.0);
    scene.set_live_world_position(child, target).unwrap();
    let local = scene.live_local_position(child).unwrap();
    assert!(vec3_approx(local, Vec3::new(2.0, 0.0, 0.0)), "local = {local}");

    scene.set_live_local_position(probe, local).unwrap();
    assert!(vec3_approx(scene.live_world_position(probe).unwrap(), target));
}

#[test]
fn world_only_bind_pose_derives_local() {
    let rotation = Quat::from_rotation_z(FRAC_PI_2);
    let asset = SkeletonAsset {
        name: "rig".into(),
        bones: vec![
            BoneAsset::new("root", -1)
                .with_world_position(Vec3::Z)
                .with_world_rotation(rotation),
            BoneAsset::new("child", 0)
                .with_world_position(Vec3::new(0.0, 1.0, 1.0))
                .with_world_rotation(rotation),
        ],
    };
    let mut skeleton = Skeleton::from_asset(&asset).unwrap();
    let child = skeleton.find_bone("child").unwrap();
    let scene = skeleton.scene_mut();

    assert!(vec3_approx(scene.base_local_position(child).unwrap(), Vec3::X));
    assert!(quat_approx(scene.base_local_rotation(child).unwrap(), Quat::IDENTITY));
    // Live pose has never been written and mirrors the bind pose.
    assert!(vec3_approx(scene.live_world_position(child).unwrap(), Vec3::new(0.0, 1.0, 1.0)));
}

#[test]
fn reset_live_pose_returns_to_bind_pose() {
    let (mut scene, [a, _, c]) = chain(SceneSettings::default());
    scene.set_live_local_position(a, Vec3::new(0.0, 10.0, 0.0)).unwrap();
    assert!(vec3_approx(scene.live_world_position(c).unwrap(), Vec3::new(2.0, 10.0, 0.0)));

    scene.reset_live_pose();
    assert!(vec3_approx(scene.live_world_position(c).unwrap(), Vec3::new(3.0, 0.0, 0.0)));
}

// ============================================================================
// Invalidation
// ============================================================================

#[test]
fn subtree_policy_refreshes_grandchildren() {
    let (mut scene, [a, b, c]) = chain(SceneSettings::default());
    assert!(vec3_approx(scene.live_world_position(c).unwrap(), Vec3::new(3.0, 0.0, 0.0)));

    scene
        .set_live_local_rotation(a, Quat::from_rotation_z(FRAC_PI_2))
        .unwrap();

    assert!(vec3_approx(scene.live_world_position(b).unwrap(), Vec3::new(1.0, 1.0, 0.0)));
    assert!(vec3_approx(scene.live_world_position(c).unwrap(), Vec3::new(1.0, 2.0, 0.0)));
    assert!(vec3_approx(scene.live_local_position(c).unwrap(), Vec3::X));
}

#[test]
fn direct_children_policy_keeps_stale_grandchildren() {
    let settings = SceneSettings {
        invalidation: InvalidationPolicy::DirectChildren,
    };
    let (mut scene, [a, b, c]) = chain(settings);
    assert!(vec3_approx(scene.live_world_position(c).unwrap(), Vec3::new(3.0, 0.0, 0.0)));

    scene
        .set_live_local_rotation(a, Quat::from_rotation_z(FRAC_PI_2))
        .unwrap();

    assert!(vec3_approx(scene.live_world_position(b).unwrap(), Vec3::new(1.0, 1.0, 0.0)));
    assert!(vec3_approx(scene.live_world_position(c).unwrap(), Vec3::new(3.0, 0.0, 0.0)));
}

#[test]
fn world_write_keeps_children_relative() {
    let (mut scene, [a, b, _]) = chain(SceneSettings::default());
    scene.set_live_world_position(a, Vec3::new(0.0, 0.0, 5.0)).unwrap();

    assert!(vec3_approx(scene.live_world_position(b).unwrap(), Vec3::new(1.0, 0.0, 5.0)));
    assert!(vec3_approx(scene.live_local_position(a).unwrap(), Vec3::new(0.0, 0.0, 5.0)));
}

#[test]
fn eager_recompute_fills_both_spaces() {
    let (mut scene, [_, b, _]) = chain(SceneSettings::default());
    scene.calculate_world_transform(b).unwrap();

    let live = &scene.get_node(b).unwrap().live;
    assert!(live.world_position().is_some());
    assert!(live.world_rotation().is_some());
}

#[test]
fn local_rotation_eagerly_fills_children_world() {
    let (mut scene, [a, b, c]) = chain(SceneSettings::default());
    scene
        .set_live_local_rotation(a, Quat::from_rotation_z(FRAC_PI_2))
        .unwrap();

    // Inspect slots before any resolver runs.
    for handle in [a, b] {
        let live = &scene.get_node(handle).unwrap().live;
        assert!(live.world_position().is_some());
        assert!(live.world_rotation().is_some());
    }
    assert!(scene.get_node(c).unwrap().live.world_position().is_none());

    let b_live = &scene.get_node(b).unwrap().live;
    assert!(vec3_approx(b_live.world_position().unwrap(), Vec3::new(1.0, 1.0, 0.0)));
    assert!(quat_approx(
        b_live.world_rotation().unwrap(),
        Quat::from_rotation_z(FRAC_PI_2)
    ));
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn reparenting_keeps_local_pose() {
    let mut scene = Scene::new();
    let a = scene.add_node(Node::with_base(
        "a",
        Transform::new().with_local_position(Vec3::new(5.0, 0.0, 0.0)),
    ));
    let b = scene.add_node(Node::with_base("b", Transform::new().with_local_position(Vec3::X)));
    assert!(vec3_approx(scene.base_world_position(b).unwrap(), Vec3::X));

    scene.attach(b, a).unwrap();

    assert!(vec3_approx(scene.base_world_position(b).unwrap(), Vec3::new(6.0, 0.0, 0.0)));
    assert!(vec3_approx(scene.live_world_position(b).unwrap(), Vec3::new(6.0, 0.0, 0.0)));
    assert_eq!(scene.root_nodes, vec![a]);
    assert_eq!(scene.get_node(a).unwrap().children(), &[b]);
}

#[test]
fn attaching_under_descendant_is_rejected() {
    let (mut scene, [a, _, c]) = chain(SceneSettings::default());
    assert!(matches!(
        scene.attach(a, c),
        Err(BoneworkError::CyclicHierarchy { .. })
    ));
    assert!(scene.get_node(a).unwrap().is_root());
}

#[test]
fn removing_a_node_removes_its_subtree() {
    let (mut scene, [a, b, c]) = chain(SceneSettings::default());
    scene.remove_node(b);

    assert!(!scene.contains(b));
    assert!(!scene.contains(c));
    assert!(scene.get_node(a).unwrap().children().is_empty());
    assert!(matches!(
        scene.live_world_position(c),
        Err(BoneworkError::NodeNotFound(_))
    ));
}

#[test]
fn descendant_queries() {
    let (scene, [a, b, c]) = chain(SceneSettings::default());
    assert!(scene.is_descendant_of(c, a));
    assert!(!scene.is_descendant_of(a, c));
    assert!(scene.is_descendant_of_name(c, "b"));
    assert_eq!(scene.find_by_name("b"), Some(b));
    assert_eq!(scene.iter_hierarchy(), vec![a, b, c]);
}

#[test]
fn scene_node_wrapper_chains() {
    let (mut scene, [a, _, c]) = chain(SceneSettings::default());

    let world = scene
        .node(a)
        .set_live_local_position(Vec3::Y)
        .set_live_scale(Vec3::splat(2.0))
        .live_world_position();
    assert_eq!(world, Some(Vec3::Y));

    assert!(vec3_approx(scene.live_world_position(c).unwrap(), Vec3::new(2.0, 1.0, 0.0)));
    assert_eq!(scene.live_scale(a).unwrap(), Vec3::splat(2.0));
}
