use glam::{Mat4, UVec4, Vec4};

use crate::{mesh::Vertex, uniforms::DrawUniforms};

/// Blended joint matrix `Σ weights[i] * palette[joints[i]]`.
///
/// Indices past the end of the palette use its last matrix. An empty
/// palette yields identity.
#[must_use]
pub fn skin_matrix(joints: UVec4, weights: Vec4, palette: &[Mat4]) -> Mat4 {
    let Some(last) = palette.len().checked_sub(1) else {
        return Mat4::IDENTITY;
    };
    let joints = joints.to_array();
    let weights = weights.to_array();
    joints
        .iter()
        .zip(weights)
        .fold(Mat4::ZERO, |acc, (&joint, weight)| {
            acc + palette[(joint as usize).min(last)] * weight
        })
}

/// Model matrix the vertex stage applies to `vertex`: `model * skin` while
/// skinning is active, the plain model matrix otherwise.
#[must_use]
pub fn effective_model(vertex: &Vertex, uniforms: &DrawUniforms) -> Mat4 {
    let model = uniforms.transforms.model;
    if !uniforms.settings.skinning_active() {
        return model;
    }
    let skin = skin_matrix(
        UVec4::from_array(vertex.joints),
        vertex.weights(),
        &uniforms.joints.matrices,
    );
    model * skin
}
