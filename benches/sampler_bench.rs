use std::hint::black_box;

use bonework::animation::{Animation, AnimationSampler, AnimationTrack, TransformSpace, TransformType};
use bonework::{BoneAsset, Skeleton, SkeletonAsset};
use criterion::{Criterion, criterion_group, criterion_main};
use glam::{Quat, Vec3};

const BONES: usize = 64;
const FRAMES: usize = 120;

/// A single chain of `BONES` bones, each one unit up from its parent.
fn chain_skeleton() -> Skeleton {
    let bones = (0..BONES)
        .map(|i| {
            BoneAsset::new(&format!("bone{i}"), i as i32 - 1)
                .with_local_position(Vec3::Y)
                .with_local_rotation(Quat::IDENTITY)
        })
        .collect();
    Skeleton::from_asset(&SkeletonAsset {
        name: "chain".into(),
        bones,
    })
    .expect("valid chain")
}

fn wave_animation(space: TransformSpace, transform_type: TransformType) -> Animation {
    let mut anim = Animation::new("wave");
    for i in 0..BONES {
        let mut track = AnimationTrack::with_tags(&format!("bone{i}"), space, transform_type);
        for f in 0..FRAMES {
            let phase = f as f32 * 0.1 + i as f32 * 0.05;
            track.add_rotation_frame(f as f32, Quat::from_rotation_z(phase.sin() * 0.2));
            track.add_translation_frame(f as f32, Vec3::new(0.0, 1.0 + phase.cos() * 0.1, 0.0));
        }
        anim.add_track(track);
    }
    anim
}

fn bench_sampler(c: &mut Criterion) {
    let local = wave_animation(TransformSpace::Local, TransformType::Absolute);
    let world = wave_animation(TransformSpace::World, TransformType::Relative);

    let mut skeleton = chain_skeleton();
    let mut sampler = AnimationSampler::new("local", &local, &skeleton);
    c.bench_function("update_local_absolute_64", |b| {
        let mut time = 0.0_f32;
        b.iter(|| {
            time = (time + 0.5) % FRAMES as f32;
            sampler
                .update(&mut skeleton, black_box(time), 1.0)
                .expect("supported tags");
        });
    });

    let mut skeleton = chain_skeleton();
    let mut sampler = AnimationSampler::new("world", &world, &skeleton);
    c.bench_function("update_world_relative_64", |b| {
        let mut time = 0.0_f32;
        b.iter(|| {
            time = (time + 0.5) % FRAMES as f32;
            sampler
                .update(&mut skeleton, black_box(time), 0.75)
                .expect("supported tags");
        });
    });

    let mut skeleton = chain_skeleton();
    let tip = skeleton.find_bone(&format!("bone{}", BONES - 1)).expect("tip bone");
    c.bench_function("resolve_tip_world_after_root_edit", |b| {
        let root = skeleton.bones()[0];
        let mut angle = 0.0_f32;
        b.iter(|| {
            angle += 0.01;
            let scene = skeleton.scene_mut();
            scene
                .set_live_local_rotation(root, Quat::from_rotation_x(angle))
                .expect("root exists");
            black_box(scene.live_world_position(tip).expect("tip exists"))
        });
    });
}

criterion_group!(benches, bench_sampler);
criterion_main!(benches);
