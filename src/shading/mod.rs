//! CPU evaluation of the mesh shader.
//!
//! Each function here mirrors a piece of `assets/shaders/mesh.wgsl` or one
//! of its imported modules, operation for operation, so host code can check
//! what the GPU will produce for a vertex or fragment without rendering.

mod fragment;
mod normal;
mod skinning;
mod vertex;

pub use fragment::{lit_color, shade};
pub use normal::{inverse_transpose3, SINGULAR_EPSILON};
pub use skinning::{effective_model, skin_matrix};
pub use vertex::{run_vertex, VertexOutput};
