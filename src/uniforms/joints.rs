use encase::ShaderType;
use glam::Mat4;

use super::{UniformBlock, JOINTS_BINDING};
use crate::error::SkinviewError;

/// Capacity of the joint matrix block.
pub const MAX_JOINTS: usize = 256;

/// Skeletal pose snapshot: one matrix per joint, indexed by the vertex
/// joint indices.
///
/// Slots past the supplied pose are identity, so a stray index into the
/// unused tail leaves the vertex in bind pose.
#[derive(Debug, Clone, PartialEq, ShaderType)]
pub struct JointMatrices {
    /// Joint matrices in palette order.
    pub matrices: [Mat4; MAX_JOINTS],
}

impl JointMatrices {
    /// Palette where every slot is identity.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrices: [Mat4::IDENTITY; MAX_JOINTS],
        }
    }

    /// Palette holding `matrices` in its first slots.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::TooManyJoints`] if more than [`MAX_JOINTS`]
    /// matrices are supplied.
    pub fn from_slice(matrices: &[Mat4]) -> Result<Self, SkinviewError> {
        let mut palette = Self::identity();
        palette.set(matrices)?;
        Ok(palette)
    }

    /// Overwrite the leading slots with `matrices`, resetting the rest to
    /// identity.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::TooManyJoints`] if more than [`MAX_JOINTS`]
    /// matrices are supplied; the palette is left untouched.
    pub fn set(&mut self, matrices: &[Mat4]) -> Result<(), SkinviewError> {
        if matrices.len() > MAX_JOINTS {
            return Err(SkinviewError::TooManyJoints {
                count: matrices.len(),
                max: MAX_JOINTS,
            });
        }
        let (head, tail) = self.matrices.split_at_mut(matrices.len());
        head.copy_from_slice(matrices);
        tail.fill(Mat4::IDENTITY);
        Ok(())
    }

    /// Matrix used for joint `index`, clamped to the last slot the same way
    /// the vertex shader clamps it.
    #[must_use]
    pub fn get_clamped(&self, index: u32) -> Mat4 {
        self.matrices[(index as usize).min(MAX_JOINTS - 1)]
    }
}

impl Default for JointMatrices {
    fn default() -> Self {
        Self::identity()
    }
}

impl UniformBlock for JointMatrices {
    const BINDING: u32 = JOINTS_BINDING;
    const LABEL: &'static str = "Joint Matrices";
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn too_many_joints_is_an_error() {
        let matrices = vec![Mat4::IDENTITY; MAX_JOINTS + 1];
        assert!(matches!(
            JointMatrices::from_slice(&matrices),
            Err(SkinviewError::TooManyJoints { count: 257, max: 256 })
        ));
        assert!(JointMatrices::from_slice(&matrices[..MAX_JOINTS]).is_ok());
    }

    #[test]
    fn set_resets_previous_pose() {
        let moved = Mat4::from_translation(Vec3::Y);
        let mut palette = JointMatrices::from_slice(&[moved, moved]).unwrap();
        palette.set(&[moved]).unwrap();
        assert_eq!(palette.matrices[0], moved);
        assert_eq!(palette.matrices[1], Mat4::IDENTITY);
    }

    #[test]
    fn lookup_clamps_to_last_slot() {
        let mut palette = JointMatrices::identity();
        let last = Mat4::from_scale(Vec3::splat(3.0));
        palette.matrices[MAX_JOINTS - 1] = last;
        assert_eq!(palette.get_clamped(10_000), last);
    }
}
