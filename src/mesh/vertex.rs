//! Interleaved vertex format shared by static and skinned meshes.

use glam::{Vec2, Vec3, Vec4};

/// Attribute location of the vertex position.
pub const POSITION_LOCATION: u32 = 0;
/// Attribute location of the texture coordinate.
pub const TEXCOORD_LOCATION: u32 = 1;
/// Attribute location of the vertex normal.
pub const NORMAL_LOCATION: u32 = 2;
/// Attribute location of the four joint indices.
pub const JOINTS_LOCATION: u32 = 3;
/// Attribute location of the four joint weights.
pub const WEIGHTS_LOCATION: u32 = 4;

/// One vertex as uploaded to the GPU (64 bytes).
///
/// Static vertices carry all-zero weights; the settings block decides
/// whether the joint attributes are read at all.
/// Must match the WGSL `VertexInput` struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Texture coordinate.
    pub texcoord: [f32; 2],
    /// Object-space normal.
    pub normal: [f32; 3],
    /// Indices into the joint matrix palette.
    pub joints: [u32; 4],
    /// Blend weight per joint index. Expected (not required) to sum to 1.
    pub weights: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x2,
        2 => Float32x3,
        3 => Uint32x4,
        4 => Float32x4
    ];

    /// A static (unskinned) vertex.
    #[must_use]
    pub fn new(position: Vec3, texcoord: Vec2, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            texcoord: texcoord.to_array(),
            normal: normal.to_array(),
            joints: [0; 4],
            weights: [0.0; 4],
        }
    }

    /// Attach joint indices and weights to this vertex.
    #[must_use]
    pub fn with_skin(mut self, joints: [u32; 4], weights: [f32; 4]) -> Self {
        self.joints = joints;
        self.weights = weights;
        self
    }

    /// Position as a glam vector.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Texture coordinate as a glam vector.
    #[must_use]
    pub fn texcoord(&self) -> Vec2 {
        Vec2::from_array(self.texcoord)
    }

    /// Normal as a glam vector.
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    /// Joint weights as a glam vector.
    #[must_use]
    pub fn weights(&self) -> Vec4 {
        Vec4::from_array(self.weights)
    }

    /// Sum of the four joint weights.
    #[must_use]
    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// True if any joint weight is non-zero.
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        self.weights.iter().any(|w| *w != 0.0)
    }

    /// Vertex buffer layout with attributes at locations 0-4.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_64_bytes() {
        assert_eq!(size_of::<Vertex>(), 64);
    }

    #[test]
    fn layout_locations_follow_attribute_order() {
        let layout = Vertex::layout();
        let locations: Vec<u32> =
            layout.attributes.iter().map(|a| a.shader_location).collect();
        assert_eq!(
            locations,
            vec![
                POSITION_LOCATION,
                TEXCOORD_LOCATION,
                NORMAL_LOCATION,
                JOINTS_LOCATION,
                WEIGHTS_LOCATION,
            ]
        );
        assert_eq!(layout.attributes[3].format, wgpu::VertexFormat::Uint32x4);
        assert_eq!(layout.attributes[4].offset, 48);
    }

    #[test]
    fn static_vertex_is_not_skinned() {
        let v = Vertex::new(Vec3::ONE, Vec2::ZERO, Vec3::Y);
        assert!(!v.is_skinned());
        let v = v.with_skin([1, 2, 0, 0], [0.25, 0.75, 0.0, 0.0]);
        assert!(v.is_skinned());
        assert!((v.weight_sum() - 1.0).abs() < 1e-6);
    }
}
