//! std140 uniform blocks and their binding points.
//!
//! Each block is a plain struct deriving [`encase::ShaderType`]; encase
//! inserts the std140 padding (e.g. `vec3` aligned to 16 bytes) when the
//! block is encoded, so the Rust structs carry no manual `_pad` fields.
//! The WGSL declarations in `assets/shaders/mesh.wgsl` must list the same
//! fields in the same order.

mod joints;
mod lighting;
mod material;
mod settings;
mod transforms;

use encase::{internal::WriteInto, ShaderSize, ShaderType};
pub use joints::{JointMatrices, MAX_JOINTS};
pub use lighting::{Lighting, DEFAULT_LIGHT_POSITION};
pub use material::Material;
pub use settings::{Settings, SettingsBlock};
pub use transforms::Transforms;

use crate::error::SkinviewError;

/// Bind group index holding every resource of a draw.
pub const BIND_GROUP: u32 = 0;
/// Binding of the [`Transforms`] block.
pub const TRANSFORMS_BINDING: u32 = 1;
/// Binding of the [`JointMatrices`] block.
pub const JOINTS_BINDING: u32 = 2;
/// Binding of the [`SettingsBlock`].
pub const SETTINGS_BINDING: u32 = 3;
/// Binding of the [`Material`] block.
pub const MATERIAL_BINDING: u32 = 4;
/// Binding of the [`Lighting`] block.
pub const LIGHTING_BINDING: u32 = 5;
/// Binding of the 2D texture `my_texture`.
pub const TEXTURE_BINDING: u32 = 6;
/// Binding of the sampler paired with `my_texture`.
pub const SAMPLER_BINDING: u32 = 7;

/// A struct that is uploaded as one uniform buffer at a fixed binding.
pub trait UniformBlock: ShaderType + ShaderSize + WriteInto {
    /// The binding port in [`BIND_GROUP`].
    const BINDING: u32;
    /// Debug label for the GPU buffer.
    const LABEL: &'static str;

    /// Size of the encoded block in bytes.
    fn byte_size() -> u64 {
        Self::min_size().get()
    }

    /// Encode into std140 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::UniformLayout`] if encase rejects the value.
    fn to_std140(&self) -> Result<Vec<u8>, SkinviewError> {
        let mut buffer = encase::UniformBuffer::new(Vec::<u8>::new());
        buffer
            .write(self)
            .map_err(|e| SkinviewError::UniformLayout(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

/// Every uniform value one draw reads. Both the GPU renderer and the CPU
/// shading path consume this.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawUniforms {
    /// Projection, view and model matrices.
    pub transforms: Transforms,
    /// Joint matrix palette.
    pub joints: JointMatrices,
    /// Shader flags.
    pub settings: Settings,
    /// Base color and shading scalars.
    pub material: Material,
    /// Light and eye positions.
    pub lighting: Lighting,
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3, Vec4};

    use super::*;

    fn f32_at(bytes: &[u8], offset: usize) -> f32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&bytes[offset..offset + 4]);
        f32::from_le_bytes(raw)
    }

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&bytes[offset..offset + 4]);
        u32::from_le_bytes(raw)
    }

    #[test]
    fn transforms_are_three_column_major_matrices() {
        let t = Transforms::new(
            Mat4::from_scale(Vec3::splat(2.0)),
            Mat4::IDENTITY,
            Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
        );
        let bytes = t.to_std140().unwrap();
        assert_eq!(bytes.len(), 192);
        assert_eq!(Transforms::byte_size(), 192);
        assert_eq!(f32_at(&bytes, 0), 2.0);
        // model translation lives in the 4th column of the 3rd matrix
        assert_eq!(f32_at(&bytes, 128 + 48), 1.0);
        assert_eq!(f32_at(&bytes, 128 + 52), 2.0);
        assert_eq!(f32_at(&bytes, 128 + 56), 3.0);
    }

    #[test]
    fn joint_block_holds_256_matrices() {
        assert_eq!(JointMatrices::byte_size(), 256 * 64);
        let palette = JointMatrices::from_slice(&[Mat4::from_translation(
            Vec3::X,
        )])
        .unwrap();
        let bytes = palette.to_std140().unwrap();
        assert_eq!(bytes.len(), 16384);
        assert_eq!(f32_at(&bytes, 48), 1.0);
        // unused slots are identity
        assert_eq!(f32_at(&bytes, 64), 1.0);
        assert_eq!(f32_at(&bytes, 64 + 48), 0.0);
    }

    #[test]
    fn lighting_vec3_fields_are_16_byte_aligned() {
        let lighting = Lighting::new(
            Vec3::new(200.0, 100.0, 300.0),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let bytes = lighting.to_std140().unwrap();
        assert_eq!(f32_at(&bytes, 0), 200.0);
        assert_eq!(f32_at(&bytes, 8), 300.0);
        assert_eq!(f32_at(&bytes, 16), 1.0);
        assert_eq!(f32_at(&bytes, 24), 3.0);
    }

    #[test]
    fn material_scalars_follow_base_color() {
        let material = Material::new(Vec4::new(0.1, 0.2, 0.3, 0.4))
            .with_specular(0.5, 16.0);
        let bytes = material.to_std140().unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(f32_at(&bytes, 12), 0.4);
        assert_eq!(f32_at(&bytes, 16), 0.1);
        assert_eq!(f32_at(&bytes, 20), 1.0);
        assert_eq!(f32_at(&bytes, 24), 0.5);
        assert_eq!(f32_at(&bytes, 28), 16.0);
    }

    #[test]
    fn settings_flags_encode_as_u32() {
        let settings = Settings {
            do_skinning: true,
            drawing_points: false,
            lighting: true,
            show_normals: false,
        };
        let bytes = settings.block().to_std140().unwrap();
        assert_eq!(u32_at(&bytes, 0), 1);
        assert_eq!(u32_at(&bytes, 4), 0);
        assert_eq!(u32_at(&bytes, 8), 1);
        assert_eq!(u32_at(&bytes, 12), 0);
    }

    #[test]
    fn bindings_are_distinct() {
        let mut bindings = vec![
            Transforms::BINDING,
            JointMatrices::BINDING,
            SettingsBlock::BINDING,
            Material::BINDING,
            Lighting::BINDING,
            TEXTURE_BINDING,
            SAMPLER_BINDING,
        ];
        bindings.sort_unstable();
        bindings.dedup();
        assert_eq!(bindings, vec![1, 2, 3, 4, 5, 6, 7]);
    }
}
