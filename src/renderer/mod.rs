//! Mesh rendering with wgpu.
//!
//! [`Renderer`] owns one pipeline per primitive topology and records every
//! draw of a frame into a single render pass over a color + depth target.
//! Each draw carries its own [`DrawState`] (uniform buffers and bind group),
//! so uniform writes for one draw never leak into another.

mod debug;
mod draw;
mod pipeline;

pub use debug::{bone_lines, debug_uniforms, joint_points};
pub use draw::{DrawCall, DrawState, GpuMesh, Renderer};
pub use pipeline::MeshPipelines;
