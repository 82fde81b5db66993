use glam::{Vec3, Vec4};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::uniforms::{Material, DEFAULT_LIGHT_POSITION};

/// Shader toggles and the default material scalars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Shading", inline)]
#[serde(default)]
pub struct ShadingOptions {
    /// Apply ambient + diffuse lighting.
    #[schemars(title = "Lighting")]
    pub lighting: bool,
    /// Blend joint matrices for skinned meshes.
    #[schemars(title = "Skinning")]
    pub skinning: bool,
    /// Ambient term of the material.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient: f32,
    /// Diffuse scale of the material.
    #[schemars(title = "Diffuse", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub diffuse: f32,
    /// Specular scale of the material; 0 disables highlights.
    #[schemars(title = "Specular", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub specular: f32,
    /// Specular exponent.
    #[schemars(skip)]
    pub shininess: f32,
    /// World-space position of the point light.
    #[schemars(skip)]
    pub light_position: [f32; 3],
    /// Color the target is cleared to before drawing.
    #[schemars(skip)]
    pub clear_color: [f32; 4],
}

impl ShadingOptions {
    /// Material with `base_color_factor` and these shading scalars.
    #[must_use]
    pub fn material(&self, base_color_factor: Vec4) -> Material {
        Material::new(base_color_factor)
            .with_ambient(self.ambient)
            .with_diffuse(self.diffuse)
            .with_specular(self.specular, self.shininess)
    }

    /// Light position as a vector.
    #[must_use]
    pub fn light_position(&self) -> Vec3 {
        Vec3::from_array(self.light_position)
    }
}

impl Default for ShadingOptions {
    fn default() -> Self {
        let material = Material::default();
        Self {
            lighting: true,
            skinning: true,
            ambient: material.ambient,
            diffuse: material.diffuse,
            specular: material.specular,
            shininess: material.shininess,
            light_position: DEFAULT_LIGHT_POSITION.to_array(),
            clear_color: [0.1, 0.1, 0.12, 1.0],
        }
    }
}
