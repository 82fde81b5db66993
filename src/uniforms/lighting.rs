use encase::ShaderType;
use glam::Vec3;

use super::{UniformBlock, LIGHTING_BINDING};

/// World-space position of the single static point light.
pub const DEFAULT_LIGHT_POSITION: Vec3 = Vec3::new(200.0, 100.0, 300.0);

/// Light and eye positions shared by every lit draw.
#[derive(Debug, Clone, Copy, PartialEq, ShaderType)]
pub struct Lighting {
    /// World-space light position.
    pub light_position: Vec3,
    /// World-space camera position, used for the specular half vector.
    pub eye_position: Vec3,
}

impl Lighting {
    /// Lighting with explicit positions.
    #[must_use]
    pub fn new(light_position: Vec3, eye_position: Vec3) -> Self {
        Self {
            light_position,
            eye_position,
        }
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHT_POSITION, Vec3::ZERO)
    }
}

impl UniformBlock for Lighting {
    const BINDING: u32 = LIGHTING_BINDING;
    const LABEL: &'static str = "Lighting";
}
