//! Joint hierarchy that turns a pose into a joint matrix palette.
//!
//! Joints are stored parent-before-child, so one forward pass computes
//! every world transform. The joint matrix uploaded for skinning is
//! `world * inverse_bind`: identity in the bind pose, and the bind-to-pose
//! delta otherwise.

mod transform;

use glam::{Mat4, Vec3};
pub use transform::Transform;

use crate::{error::SkinviewError, uniforms::MAX_JOINTS};

/// One joint of a skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    /// Name for debug purposes.
    pub name: String,
    /// Index of the parent joint (`None` for a root).
    pub parent: Option<usize>,
    /// Transforms a model-space vertex into this joint's bind-pose space.
    pub inverse_bind_matrix: Mat4,
    /// Current local transform relative to the parent.
    pub local: Transform,
}

impl Joint {
    /// A joint with the given parent, bind matrix and local transform.
    #[must_use]
    pub fn new(
        name: &str,
        parent: Option<usize>,
        inverse_bind_matrix: Mat4,
        local: Transform,
    ) -> Self {
        Self {
            name: name.to_owned(),
            parent,
            inverse_bind_matrix,
            local,
        }
    }
}

/// Skeleton: joints ordered so every parent precedes its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skeleton {
    joints: Vec<Joint>,
    bind_pose: Vec<Transform>,
}

impl Skeleton {
    /// Build a skeleton, remembering the given local transforms as the
    /// bind pose.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::InvalidJointParent`] if a parent index does
    /// not precede its child, and [`SkinviewError::TooManyJoints`] if the
    /// skeleton would not fit in the joint block.
    pub fn new(joints: Vec<Joint>) -> Result<Self, SkinviewError> {
        if joints.len() > MAX_JOINTS {
            return Err(SkinviewError::TooManyJoints {
                count: joints.len(),
                max: MAX_JOINTS,
            });
        }
        for (index, joint) in joints.iter().enumerate() {
            if let Some(parent) = joint.parent {
                if parent >= index {
                    return Err(SkinviewError::InvalidJointParent {
                        joint: index,
                        parent,
                    });
                }
            }
        }
        let bind_pose = joints.iter().map(|j| j.local).collect();
        Ok(Self { joints, bind_pose })
    }

    /// A straight chain of `count` joints along +Y, each `bone_length`
    /// above its parent, with inverse bind matrices matching that rest pose.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::TooManyJoints`] if `count` exceeds
    /// [`MAX_JOINTS`].
    pub fn chain(
        count: usize,
        bone_length: f32,
    ) -> Result<Self, SkinviewError> {
        let joints = (0..count)
            .map(|i| {
                let (parent, offset) = if i == 0 {
                    (None, Vec3::ZERO)
                } else {
                    (Some(i - 1), Vec3::Y * bone_length)
                };
                let bind_world =
                    Mat4::from_translation(Vec3::Y * bone_length * i as f32);
                Joint::new(
                    &format!("joint-{i}"),
                    parent,
                    bind_world.inverse(),
                    Transform::from_translation(offset),
                )
            })
            .collect();
        Self::new(joints)
    }

    /// The joints in storage order.
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Number of joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// True if the skeleton has no joints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Index of the first joint with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<usize> {
        self.joints.iter().position(|j| j.name == name)
    }

    /// Mutable access to a joint's local transform.
    pub fn local_mut(&mut self, joint: usize) -> Option<&mut Transform> {
        self.joints.get_mut(joint).map(|j| &mut j.local)
    }

    /// Restore every local transform to the bind pose.
    pub fn reset_to_bind_pose(&mut self) {
        for (joint, bind) in self.joints.iter_mut().zip(&self.bind_pose) {
            joint.local = *bind;
        }
    }

    /// Model-space transform of every joint for the current pose.
    #[must_use]
    pub fn world_transforms(&self) -> Vec<Mat4> {
        let mut world: Vec<Mat4> = Vec::with_capacity(self.joints.len());
        for joint in &self.joints {
            let local = joint.local.matrix();
            // parents precede children, so world[parent] is already filled
            let transform = match joint.parent {
                Some(parent) => world[parent] * local,
                None => local,
            };
            world.push(transform);
        }
        world
    }

    /// Joint matrix palette (`world * inverse_bind`) for the current pose.
    #[must_use]
    pub fn joint_matrices(&self) -> Vec<Mat4> {
        self.world_transforms()
            .iter()
            .zip(&self.joints)
            .map(|(world, joint)| *world * joint.inverse_bind_matrix)
            .collect()
    }

    /// Model-space origin of every joint (debug point rendering).
    #[must_use]
    pub fn joint_positions(&self) -> Vec<Vec3> {
        self.world_transforms()
            .iter()
            .map(|m| m.transform_point3(Vec3::ZERO))
            .collect()
    }

    /// One `(child, parent)` segment per joint that has a parent (debug
    /// line rendering).
    #[must_use]
    pub fn bone_segments(&self) -> Vec<(Vec3, Vec3)> {
        let positions = self.joint_positions();
        self.joints
            .iter()
            .enumerate()
            .filter_map(|(i, joint)| {
                joint.parent.map(|parent| (positions[i], positions[parent]))
            })
            .collect()
    }
}
