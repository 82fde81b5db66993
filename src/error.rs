//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the skinview crate.
#[derive(Debug)]
pub enum SkinviewError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A uniform block could not be encoded into its std140 layout.
    UniformLayout(String),
    /// More joint matrices than the joint block can hold.
    TooManyJoints {
        /// Number of matrices supplied.
        count: usize,
        /// Capacity of the joint block.
        max: usize,
    },
    /// A joint references a parent that does not precede it.
    InvalidJointParent {
        /// Index of the offending joint.
        joint: usize,
        /// The parent index it referenced.
        parent: usize,
    },
    /// A vertex references a joint outside the palette.
    JointIndexOutOfRange {
        /// Index of the offending vertex.
        vertex: usize,
        /// The joint index it referenced.
        joint: u32,
        /// Size of the joint palette.
        palette_len: usize,
    },
    /// Malformed animation channel (times/values mismatch, unsorted keys).
    InvalidChannel(String),
    /// Pixel data does not match the declared texture dimensions.
    TextureSize {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes.
        actual: usize,
    },
    /// WGSL composition or validation failure.
    Shader(String),
    /// Copying a render target back to the host failed.
    Readback(String),
}

impl fmt::Display for SkinviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::UniformLayout(msg) => {
                write!(f, "uniform layout error: {msg}")
            }
            Self::TooManyJoints { count, max } => write!(
                f,
                "{count} joint matrices exceed the joint block capacity of \
                 {max}"
            ),
            Self::InvalidJointParent { joint, parent } => write!(
                f,
                "joint {joint} references parent {parent}, which does not \
                 precede it"
            ),
            Self::JointIndexOutOfRange {
                vertex,
                joint,
                palette_len,
            } => write!(
                f,
                "vertex {vertex} references joint {joint} but the palette \
                 has {palette_len} entries"
            ),
            Self::InvalidChannel(msg) => {
                write!(f, "invalid animation channel: {msg}")
            }
            Self::TextureSize { expected, actual } => write!(
                f,
                "texture data has {actual} bytes, expected {expected}"
            ),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Readback(msg) => write!(f, "read-back error: {msg}"),
        }
    }
}

impl std::error::Error for SkinviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for SkinviewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for SkinviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
