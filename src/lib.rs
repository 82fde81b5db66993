// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Real-time rendering harness for static and skinned textured meshes,
//! built on wgpu.
//!
//! Skinview owns one shader contract: a vertex stage that optionally blends
//! up to four joint matrices per vertex, and a fragment stage that samples a
//! texture, tints it by a base color factor and optionally applies ambient +
//! Lambertian lighting from a single point light. The contract is
//! implemented twice: in WGSL for the GPU, and in [`shading`] as a CPU
//! reference that evaluates the same math on the host.
//!
//! # Key entry points
//!
//! - [`renderer::Renderer`] - records draws of [`mesh::Mesh`]es into a target
//! - [`uniforms`] - the std140 uniform blocks and their binding points
//! - [`shading`] - CPU evaluation of the vertex and fragment stages
//! - [`skeleton::Skeleton`] / [`animation`] - produce joint matrix palettes
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Bindings
//!
//! All resources live in bind group 0: transforms (1), joint matrices (2),
//! settings (3), material (4), lighting (5), `my_texture` (6) and its
//! sampler (7). Vertex attributes use locations 0-4 for position, texture
//! coordinate, normal, joint indices and joint weights.

pub mod animation;
pub mod camera;
pub mod error;
pub mod gpu;
pub mod mesh;
pub mod options;
pub mod renderer;
pub mod shading;
pub mod skeleton;
pub mod texture;
pub mod uniforms;
pub mod util;

pub use error::SkinviewError;
