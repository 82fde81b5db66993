use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::{Mesh, Topology, Vertex};

/// Unit quad in the XY plane facing +Z, centered at the origin.
#[must_use]
pub fn quad() -> Mesh {
    let corners = [
        (Vec3::new(-0.5, -0.5, 0.0), Vec2::new(0.0, 1.0)),
        (Vec3::new(0.5, -0.5, 0.0), Vec2::new(1.0, 1.0)),
        (Vec3::new(0.5, 0.5, 0.0), Vec2::new(1.0, 0.0)),
        (Vec3::new(-0.5, 0.5, 0.0), Vec2::new(0.0, 0.0)),
    ];
    Mesh {
        name: "quad".to_owned(),
        vertices: corners
            .iter()
            .map(|(p, uv)| Vertex::new(*p, *uv, Vec3::Z))
            .collect(),
        indices: vec![0, 1, 2, 0, 2, 3],
        topology: Topology::Triangles,
    }
}

/// Open cylinder along +Y bound to a chain of `joint_count` joints.
///
/// Joint `i` sits at `y = i * height / joint_count`. Each vertex is weighted
/// linearly between the two joints bracketing its height, so the weights
/// always sum to 1. Matches [`crate::skeleton::Skeleton::chain`] with the same
/// joint count and `height / joint_count` bone length.
#[must_use]
pub fn skinned_cylinder(
    radius: f32,
    height: f32,
    segments: u32,
    rings: u32,
    joint_count: u32,
) -> Mesh {
    let segments = segments.max(3);
    let rings = rings.max(1);
    let joint_count = joint_count.max(1);
    let bone_length = height / joint_count as f32;

    let mut vertices =
        Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let y = v * height;
        let (joints, weights) = chain_weights(y, bone_length, joint_count);
        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let angle = u * TAU;
            let normal = Vec3::new(angle.cos(), 0.0, angle.sin());
            let position = Vec3::new(normal.x * radius, y, normal.z * radius);
            vertices.push(
                Vertex::new(position, Vec2::new(u, 1.0 - v), normal)
                    .with_skin(joints, weights),
            );
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    Mesh {
        name: "skinned_cylinder".to_owned(),
        vertices,
        indices,
        topology: Topology::Triangles,
    }
}

fn chain_weights(
    y: f32,
    bone_length: f32,
    joint_count: u32,
) -> ([u32; 4], [f32; 4]) {
    let t = if bone_length > 0.0 { y / bone_length } else { 0.0 };
    let lower = (t.floor().max(0.0) as u32).min(joint_count - 1);
    let upper = lower + 1;
    if upper >= joint_count {
        return ([lower, 0, 0, 0], [1.0, 0.0, 0.0, 0.0]);
    }
    let frac = (t - lower as f32).clamp(0.0, 1.0);
    ([lower, upper, 0, 0], [1.0 - frac, frac, 0.0, 0.0])
}
