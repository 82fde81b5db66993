//! Host-side mesh data.
//!
//! A [`Mesh`] is an interleaved [`Vertex`] array plus `u32` indices and a
//! primitive topology. [`primitives`] builds the procedural meshes used by
//! the binary, the benches and the tests.

/// Procedural mesh builders (quad, skinned cylinder).
pub mod primitives;
/// Interleaved vertex format and attribute locations.
pub mod vertex;

pub use vertex::Vertex;

use crate::error::SkinviewError;

/// How the index list is assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// Every three indices form a triangle.
    #[default]
    Triangles,
    /// Every two indices form a line segment.
    Lines,
    /// Every index is a point.
    Points,
}

impl Topology {
    /// The matching wgpu primitive topology.
    #[must_use]
    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Self::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Self::Lines => wgpu::PrimitiveTopology::LineList,
            Self::Points => wgpu::PrimitiveTopology::PointList,
        }
    }
}

/// A mesh with vertex and index data.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Debug name.
    pub name: String,
    /// Interleaved vertices.
    pub vertices: Vec<Vertex>,
    /// Indices into `vertices`.
    pub indices: Vec<u32>,
    /// Primitive assembly mode.
    pub topology: Topology,
}

impl Mesh {
    /// Empty triangle mesh.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Default::default()
        }
    }

    /// Mesh drawing each vertex once, in order, with the given topology.
    #[must_use]
    pub fn from_vertices(
        name: &str,
        vertices: Vec<Vertex>,
        topology: Topology,
    ) -> Self {
        let indices = (0..vertices.len() as u32).collect();
        Self {
            name: name.to_owned(),
            vertices,
            indices,
            topology,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices.
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// True if any vertex carries a non-zero joint weight.
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        self.vertices.iter().any(Vertex::is_skinned)
    }

    /// Highest joint index referenced with a non-zero weight, if any.
    #[must_use]
    pub fn max_joint_index(&self) -> Option<u32> {
        self.vertices
            .iter()
            .flat_map(|v| {
                v.joints
                    .iter()
                    .zip(v.weights.iter())
                    .filter(|(_, w)| **w != 0.0)
                    .map(|(j, _)| *j)
            })
            .max()
    }

    /// Check every weighted joint index against a palette of `palette_len`
    /// matrices.
    ///
    /// The shaders clamp out-of-range indices instead of failing, so this is
    /// the only place a bad index is reported.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::JointIndexOutOfRange`] for the first vertex
    /// whose weighted joint index is `>= palette_len`.
    pub fn validate_joints(
        &self,
        palette_len: usize,
    ) -> Result<(), SkinviewError> {
        for (vertex, v) in self.vertices.iter().enumerate() {
            for (joint, weight) in v.joints.iter().zip(v.weights.iter()) {
                if *weight != 0.0 && *joint as usize >= palette_len {
                    return Err(SkinviewError::JointIndexOutOfRange {
                        vertex,
                        joint: *joint,
                        palette_len,
                    });
                }
            }
        }
        Ok(())
    }

    /// Vertices whose weights deviate from 1.0 by more than `tolerance`.
    ///
    /// Such vertices render with non-rigid scaling; this is accepted, only
    /// reported.
    #[must_use]
    pub fn unnormalized_weights(&self, tolerance: f32) -> Vec<usize> {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| {
                v.is_skinned() && (v.weight_sum() - 1.0).abs() > tolerance
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Vertex data as bytes.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as bytes.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
