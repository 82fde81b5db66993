//! Joint and bone overlay geometry.
//!
//! Both meshes are in model space, so they are drawn with the same model
//! matrix as the skinned mesh. [`debug_uniforms`] switches the shader to
//! its `drawing_points` path: no skinning, flat base color.

use glam::{Vec2, Vec3, Vec4};

use crate::{
    mesh::{Mesh, Topology, Vertex},
    skeleton::Skeleton,
    uniforms::{DrawUniforms, Material, Settings},
};

fn overlay_vertex(position: Vec3) -> Vertex {
    Vertex::new(position, Vec2::ZERO, Vec3::Z)
}

/// One point per joint at its posed origin.
#[must_use]
pub fn joint_points(skeleton: &Skeleton) -> Mesh {
    let vertices = skeleton
        .joint_positions()
        .into_iter()
        .map(overlay_vertex)
        .collect();
    Mesh::from_vertices("joint_points", vertices, Topology::Points)
}

/// One line segment from every joint to its parent.
#[must_use]
pub fn bone_lines(skeleton: &Skeleton) -> Mesh {
    let vertices = skeleton
        .bone_segments()
        .into_iter()
        .flat_map(|(child, parent)| {
            [overlay_vertex(child), overlay_vertex(parent)]
        })
        .collect();
    Mesh::from_vertices("bone_lines", vertices, Topology::Lines)
}

/// Uniforms for overlay draws: `base`'s transforms and lighting, flat
/// `color`, and the `drawing_points` flag set.
#[must_use]
pub fn debug_uniforms(base: &DrawUniforms, color: Vec4) -> DrawUniforms {
    DrawUniforms {
        transforms: base.transforms,
        joints: base.joints.clone(),
        settings: Settings {
            do_skinning: false,
            drawing_points: true,
            lighting: false,
            show_normals: false,
        },
        material: Material::new(color),
        lighting: base.lighting,
    }
}
