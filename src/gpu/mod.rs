//! GPU resource management utilities.
//!
//! Provides wgpu device initialization, uniform and vertex buffer
//! management, textures and render targets, and shader composition.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Bind group layout entries and pipeline creation for meshes.
pub mod pipeline_helpers;
/// Headless wgpu device and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Render targets, sampled textures and read-back.
pub mod texture;
/// Typed std140 uniform buffers.
pub mod uniform_buffer;
