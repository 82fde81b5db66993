use encase::ShaderType;
use glam::Vec4;

use super::{UniformBlock, MATERIAL_BINDING};

/// Surface parameters of a draw.
///
/// The texture bound next to it is sampled and multiplied by
/// `base_color_factor`; the scalars only matter when lighting is on.
#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct Material {
    /// RGBA tint multiplied with the sampled texture color.
    pub base_color_factor: Vec4,
    /// Ambient fraction of the surface color.
    pub ambient: f32,
    /// Scale of the Lambertian term.
    pub diffuse: f32,
    /// Scale of the Blinn-Phong highlight (0 disables it).
    pub specular: f32,
    /// Blinn-Phong exponent.
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color_factor: Vec4::ONE,
            ambient: 0.1,
            diffuse: 1.0,
            specular: 0.0,
            shininess: 32.0,
        }
    }
}

impl Material {
    /// Default material with the given base color factor.
    #[must_use]
    pub fn new(base_color_factor: Vec4) -> Self {
        Self {
            base_color_factor,
            ..Default::default()
        }
    }

    /// Override the ambient fraction.
    #[must_use]
    pub fn with_ambient(mut self, ambient: f32) -> Self {
        self.ambient = ambient;
        self
    }

    /// Override the diffuse scale.
    #[must_use]
    pub fn with_diffuse(mut self, diffuse: f32) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Enable a specular highlight.
    #[must_use]
    pub fn with_specular(mut self, specular: f32, shininess: f32) -> Self {
        self.specular = specular;
        self.shininess = shininess;
        self
    }
}

impl UniformBlock for Material {
    const BINDING: u32 = MATERIAL_BINDING;
    const LABEL: &'static str = "Material";
}
