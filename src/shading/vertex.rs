use glam::{Mat3, Vec2, Vec3, Vec4};

use super::{normal::inverse_transpose3, skinning::effective_model};
use crate::{mesh::Vertex, uniforms::DrawUniforms};

/// What the vertex stage hands to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOutput {
    /// Clip-space position.
    pub clip_position: Vec4,
    /// World-space position, used for the light direction.
    pub world_position: Vec3,
    /// Texture coordinate, passed through unmodified.
    pub texcoord: Vec2,
    /// World-space normal, not normalized.
    pub normal: Vec3,
}

impl VertexOutput {
    /// Barycentric blend of three outputs, as the rasterizer does for a
    /// fragment inside a triangle (without perspective correction).
    #[must_use]
    pub fn blend(corners: [&Self; 3], weights: Vec3) -> Self {
        let [a, b, c] = corners;
        Self {
            clip_position: a.clip_position * weights.x
                + b.clip_position * weights.y
                + c.clip_position * weights.z,
            world_position: a.world_position * weights.x
                + b.world_position * weights.y
                + c.world_position * weights.z,
            texcoord: a.texcoord * weights.x
                + b.texcoord * weights.y
                + c.texcoord * weights.z,
            normal: a.normal * weights.x
                + b.normal * weights.y
                + c.normal * weights.z,
        }
    }

    /// Normalized device coordinates (`clip.xyz / clip.w`).
    #[must_use]
    pub fn ndc(&self) -> Vec3 {
        self.clip_position.truncate() / self.clip_position.w
    }
}

/// Run the vertex stage for one vertex.
#[must_use]
pub fn run_vertex(vertex: &Vertex, uniforms: &DrawUniforms) -> VertexOutput {
    let model = effective_model(vertex, uniforms);
    let world = model * vertex.position().extend(1.0);
    let normal_matrix = inverse_transpose3(Mat3::from_mat4(model));
    VertexOutput {
        clip_position: uniforms.transforms.view_projection() * world,
        world_position: world.truncate(),
        texcoord: vertex.texcoord(),
        normal: normal_matrix * vertex.normal(),
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;
    use crate::uniforms::{JointMatrices, Settings, Transforms};

    fn skinned_vertex() -> Vertex {
        Vertex::new(Vec3::new(0.5, 1.0, -2.0), Vec2::new(0.3, 0.7), Vec3::Y)
            .with_skin([1, 0, 0, 0], [1.0, 0.0, 0.0, 0.0])
    }

    fn uniforms(settings: Settings) -> DrawUniforms {
        DrawUniforms {
            transforms: Transforms::new(
                Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0),
                Mat4::look_at_rh(
                    Vec3::new(0.0, 0.0, 5.0),
                    Vec3::ZERO,
                    Vec3::Y,
                ),
                Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)),
            ),
            joints: JointMatrices::from_slice(&[
                Mat4::IDENTITY,
                Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0)),
            ])
            .unwrap(),
            settings,
            ..Default::default()
        }
    }

    #[test]
    fn origin_with_identity_everything_lands_at_clip_origin() {
        let vertex = Vertex::new(Vec3::ZERO, Vec2::ZERO, Vec3::Z)
            .with_skin([0, 0, 0, 0], [1.0, 0.0, 0.0, 0.0]);
        let uniforms = DrawUniforms {
            settings: Settings {
                do_skinning: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let out = run_vertex(&vertex, &uniforms);
        assert_eq!(out.clip_position, Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn without_skinning_clip_is_pvm_times_position() {
        let vertex = skinned_vertex();
        let u = uniforms(Settings::default());
        let out = run_vertex(&vertex, &u);
        let t = u.transforms;
        let expected =
            t.projection * t.view * t.model * vertex.position().extend(1.0);
        assert!(out.clip_position.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn skinning_applies_joint_before_model() {
        let vertex = skinned_vertex();
        let u = uniforms(Settings {
            do_skinning: true,
            ..Default::default()
        });
        let out = run_vertex(&vertex, &u);
        assert!(out
            .world_position
            .abs_diff_eq(Vec3::new(1.5, 4.0, -2.0), 1e-5));
    }

    #[test]
    fn texcoord_passes_through() {
        let vertex = skinned_vertex();
        for settings in [
            Settings::default(),
            Settings {
                do_skinning: true,
                ..Default::default()
            },
        ] {
            let out = run_vertex(&vertex, &uniforms(settings));
            assert_eq!(out.texcoord, Vec2::new(0.3, 0.7));
        }
    }

    #[test]
    fn normal_follows_inverse_transpose_of_model() {
        let vertex =
            Vertex::new(Vec3::ZERO, Vec2::ZERO, Vec3::new(1.0, 1.0, 0.0));
        let u = DrawUniforms {
            transforms: Transforms::IDENTITY
                .with_model(Mat4::from_scale(Vec3::new(4.0, 1.0, 1.0))),
            ..Default::default()
        };
        let out = run_vertex(&vertex, &u);
        assert!(out.normal.abs_diff_eq(Vec3::new(0.25, 1.0, 0.0), 1e-6));
    }
}
