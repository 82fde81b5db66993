//! Keyframed skeletal animation.
//!
//! An [`Animation`] is a set of [`Channel`]s, each driving one property of
//! one joint. Applying it at a time writes the sampled values into the
//! skeleton's local transforms; the [`AnimationPlayer`] owns the clock.

mod channel;
pub mod interpolation;
mod player;

pub use channel::{Channel, ChannelTarget, Interpolation, Keyframes};
pub use player::{AnimationPlayer, PlaybackMode};

use crate::{error::SkinviewError, skeleton::Skeleton};

/// A named clip.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Clip name.
    pub name: String,
    channels: Vec<Channel>,
    duration: f32,
}

impl Animation {
    /// Clip from channels; its duration is the latest keyframe time.
    #[must_use]
    pub fn new(name: &str, channels: Vec<Channel>) -> Self {
        let duration =
            channels.iter().map(Channel::end_time).fold(0.0, f32::max);
        Self {
            name: name.to_owned(),
            channels,
            duration,
        }
    }

    /// Time of the latest keyframe over all channels.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// The clip's channels.
    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Pose `skeleton` at `time`. Channels whose joint does not exist are
    /// skipped.
    pub fn apply(&self, time: f32, skeleton: &mut Skeleton) {
        for channel in &self.channels {
            match skeleton.local_mut(channel.joint) {
                Some(local) => channel.apply(time, local),
                None => log::debug!(
                    "{}: channel targets missing joint {}",
                    self.name,
                    channel.joint
                ),
            }
        }
    }

    /// Bend every joint after the root of a chain about Z, back and forth
    /// over `period` seconds. Used by the demo scene.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::InvalidChannel`] if `period` is not a
    /// positive finite number.
    pub fn sway(
        skeleton: &Skeleton,
        max_angle: f32,
        period: f32,
    ) -> Result<Self, SkinviewError> {
        let times = vec![0.0, period * 0.25, period * 0.75, period];
        let channels = (1..skeleton.len())
            .map(|joint| {
                let rotations = [0.0, max_angle, -max_angle, 0.0]
                    .map(glam::Quat::from_rotation_z)
                    .to_vec();
                let keys = Keyframes::new(
                    times.clone(),
                    rotations,
                    Interpolation::Linear,
                )?;
                Ok(Channel::new(joint, ChannelTarget::Rotation(keys)))
            })
            .collect::<Result<Vec<_>, SkinviewError>>()?;
        Ok(Self::new("sway", channels))
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;

    #[test]
    fn duration_is_latest_keyframe() {
        let short = Keyframes::new(
            vec![0.0, 1.0],
            vec![Vec3::ZERO, Vec3::ONE],
            Interpolation::Linear,
        )
        .unwrap();
        let long = Keyframes::new(
            vec![0.5, 4.0],
            vec![Vec3::ONE, Vec3::ONE],
            Interpolation::Step,
        )
        .unwrap();
        let anim = Animation::new(
            "test",
            vec![
                Channel::new(0, ChannelTarget::Translation(short)),
                Channel::new(0, ChannelTarget::Scale(long)),
            ],
        );
        assert_eq!(anim.duration(), 4.0);
    }

    #[test]
    fn missing_joint_is_skipped() {
        let keys = Keyframes::new(
            vec![0.0],
            vec![Vec3::ONE],
            Interpolation::Linear,
        )
        .unwrap();
        let anim = Animation::new(
            "test",
            vec![Channel::new(7, ChannelTarget::Translation(keys))],
        );
        let mut skeleton = Skeleton::chain(2, 1.0).unwrap();
        anim.apply(0.0, &mut skeleton);
        assert!(skeleton.joint_matrices()[1].abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn sway_bends_chain_and_returns_to_rest() {
        let mut skeleton = Skeleton::chain(3, 1.0).unwrap();
        let anim = Animation::sway(&skeleton, 0.5, 2.0).unwrap();
        assert_eq!(anim.channels().len(), 2);
        assert_eq!(anim.duration(), 2.0);

        anim.apply(0.5, &mut skeleton);
        assert!(skeleton.joint_positions()[2].x.abs() > 0.1);

        anim.apply(2.0, &mut skeleton);
        assert!(skeleton.joint_positions()[2].x.abs() < 1e-5);
    }

    #[test]
    fn sway_rejects_non_positive_period() {
        let skeleton = Skeleton::chain(3, 1.0).unwrap();
        assert!(matches!(
            Animation::sway(&skeleton, 0.5, 0.0),
            Err(SkinviewError::InvalidChannel(_))
        ));
        assert!(matches!(
            Animation::sway(&skeleton, 0.5, -1.0),
            Err(SkinviewError::InvalidChannel(_))
        ));
    }
}
