//! Host-side cost of the shader contract: skinning, the full vertex stage
//! and skeleton palette updates.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Mat4, Vec4};
use skinview::{
    animation::Animation,
    mesh::primitives::skinned_cylinder,
    shading::{run_vertex, skin_matrix},
    skeleton::Skeleton,
    uniforms::{DrawUniforms, JointMatrices, Material, Settings},
};

fn skin_matrix_benchmark(c: &mut Criterion) {
    let palette: Vec<Mat4> = (0..64)
        .map(|i| Mat4::from_rotation_z(i as f32 * 0.01))
        .collect();
    let mesh = skinned_cylinder(0.25, 2.0, 32, 32, 8);
    c.bench_function("skin_matrix_per_vertex", |b| {
        b.iter(|| {
            for v in &mesh.vertices {
                let _ = black_box(skin_matrix(
                    black_box(v.joints.into()),
                    black_box(v.weights()),
                    &palette,
                ));
            }
        });
    });
}

fn vertex_stage_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("vertex_stage");
    for joints in [1usize, 8, 64] {
        let skeleton = Skeleton::chain(joints, 2.0 / joints as f32).unwrap();
        let mesh = skinned_cylinder(0.25, 2.0, 32, 32, joints as u32);
        let uniforms = DrawUniforms {
            joints: JointMatrices::from_slice(&skeleton.joint_matrices())
                .unwrap(),
            settings: Settings {
                do_skinning: true,
                ..Settings::default()
            },
            material: Material::new(Vec4::ONE),
            ..DrawUniforms::default()
        };
        group.bench_function(format!("{joints}_joints"), |b| {
            b.iter(|| {
                for v in &mesh.vertices {
                    let _ = black_box(run_vertex(black_box(v), &uniforms));
                }
            });
        });
    }
    group.finish();
}

fn palette_update_benchmark(c: &mut Criterion) {
    let mut skeleton = Skeleton::chain(128, 0.05).unwrap();
    let animation = Animation::sway(&skeleton, 0.3, 2.0).unwrap();
    let mut time = 0.0;
    c.bench_function("pose_128_joint_chain", |b| {
        b.iter(|| {
            time = (time + 0.016) % 2.0;
            animation.apply(time, &mut skeleton);
            black_box(skeleton.joint_matrices())
        });
    });
}

criterion_group!(
    benches,
    skin_matrix_benchmark,
    vertex_stage_benchmark,
    palette_update_benchmark
);
criterion_main!(benches);
