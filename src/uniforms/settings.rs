use encase::ShaderType;

use super::{UniformBlock, SETTINGS_BINDING};

/// Per-draw rendering switches.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    /// Blend joint matrices into the model matrix.
    pub do_skinning: bool,
    /// Debug point/line path: skip skinning and texturing, output the base
    /// color factor.
    pub drawing_points: bool,
    /// Apply ambient + diffuse lighting.
    pub lighting: bool,
    /// Output the shading normal as a color.
    pub show_normals: bool,
}

impl Settings {
    /// True when the vertex stage should blend joint matrices.
    #[must_use]
    pub fn skinning_active(&self) -> bool {
        self.do_skinning && !self.drawing_points
    }

    /// The GPU representation (booleans as `u32`).
    #[must_use]
    pub fn block(&self) -> SettingsBlock {
        SettingsBlock {
            do_skinning: u32::from(self.do_skinning),
            drawing_points: u32::from(self.drawing_points),
            lighting: u32::from(self.lighting),
            show_normals: u32::from(self.show_normals),
        }
    }
}

/// Settings as laid out in the uniform block. WGSL uniforms cannot hold
/// `bool`, so every flag is a `u32` that is either 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ShaderType)]
pub struct SettingsBlock {
    /// See [`Settings::do_skinning`].
    pub do_skinning: u32,
    /// See [`Settings::drawing_points`].
    pub drawing_points: u32,
    /// See [`Settings::lighting`].
    pub lighting: u32,
    /// See [`Settings::show_normals`].
    pub show_normals: u32,
}

impl UniformBlock for SettingsBlock {
    const BINDING: u32 = SETTINGS_BINDING;
    const LABEL: &'static str = "Settings";
}
