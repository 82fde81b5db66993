use encase::ShaderType;
use glam::Mat4;

use super::{UniformBlock, TRANSFORMS_BINDING};

/// Projection, view and model matrices supplied once per draw call.
#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct Transforms {
    /// Clip-from-view matrix.
    pub projection: Mat4,
    /// View-from-world matrix.
    pub view: Mat4,
    /// World-from-model matrix.
    pub model: Mat4,
}

impl Transforms {
    /// All three matrices set to identity.
    pub const IDENTITY: Self = Self {
        projection: Mat4::IDENTITY,
        view: Mat4::IDENTITY,
        model: Mat4::IDENTITY,
    };

    /// Transform set from explicit matrices.
    #[must_use]
    pub fn new(projection: Mat4, view: Mat4, model: Mat4) -> Self {
        Self {
            projection,
            view,
            model,
        }
    }

    /// Same projection and view, different model matrix.
    #[must_use]
    pub fn with_model(self, model: Mat4) -> Self {
        Self { model, ..self }
    }

    /// `projection * view`.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

impl Default for Transforms {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl UniformBlock for Transforms {
    const BINDING: u32 = TRANSFORMS_BINDING;
    const LABEL: &'static str = "Transforms";
}
