use glam::{Quat, Vec3};

use super::interpolation::Interpolate;
use crate::{error::SkinviewError, skeleton::Transform};

/// How values between keyframes are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Hold the previous keyframe's value.
    Step,
    /// Lerp for vectors, shortest-arc slerp for rotations.
    #[default]
    Linear,
    /// Cubic Hermite spline; every keyframe stores in-tangent, value and
    /// out-tangent, in that order.
    CubicSpline,
}

/// Keyframe times and values of one animated property.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes<T> {
    times: Vec<f32>,
    values: Vec<T>,
    interpolation: Interpolation,
}

impl<T: Interpolate> Keyframes<T> {
    /// Validate and store keyframes.
    ///
    /// # Errors
    ///
    /// Returns [`SkinviewError::InvalidChannel`] if there are no keys, the
    /// times are not finite and strictly increasing, or the value count does
    /// not match (one per key, three per key for cubic splines).
    pub fn new(
        times: Vec<f32>,
        values: Vec<T>,
        interpolation: Interpolation,
    ) -> Result<Self, SkinviewError> {
        if times.is_empty() {
            return Err(SkinviewError::InvalidChannel(
                "channel has no keyframes".to_owned(),
            ));
        }
        if times.iter().any(|t| !t.is_finite()) {
            return Err(SkinviewError::InvalidChannel(
                "keyframe time is not finite".to_owned(),
            ));
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SkinviewError::InvalidChannel(
                "keyframe times are not strictly increasing".to_owned(),
            ));
        }
        let per_key = match interpolation {
            Interpolation::CubicSpline => 3,
            Interpolation::Step | Interpolation::Linear => 1,
        };
        if values.len() != times.len() * per_key {
            return Err(SkinviewError::InvalidChannel(format!(
                "{} values for {} keyframes ({per_key} per key expected)",
                values.len(),
                times.len()
            )));
        }
        Ok(Self {
            times,
            values,
            interpolation,
        })
    }

    /// Time of the last keyframe.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Keyframe times.
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    /// Interpolation mode.
    #[must_use]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    fn value(&self, key: usize) -> T {
        match self.interpolation {
            Interpolation::CubicSpline => self.values[key * 3 + 1],
            Interpolation::Step | Interpolation::Linear => self.values[key],
        }
    }

    /// Value at time `t`. Times before the first key hold the first value,
    /// times after the last key hold the last value. NaN holds the first
    /// value.
    #[must_use]
    pub fn sample(&self, t: f32) -> T {
        let last = self.times.len() - 1;
        if t.is_nan() || t <= self.times[0] || last == 0 {
            return self.value(0);
        }
        if t >= self.times[last] {
            return self.value(last);
        }

        let key = self
            .times
            .partition_point(|time| *time <= t)
            .saturating_sub(1);
        let start = self.times[key];
        let td = self.times[key + 1] - start;
        let s = (t - start) / td;

        match self.interpolation {
            Interpolation::Step => self.value(key),
            Interpolation::Linear => {
                T::linear(self.value(key), self.value(key + 1), s)
            }
            Interpolation::CubicSpline => {
                let out0 = self.values[key * 3 + 2];
                let in1 = self.values[(key + 1) * 3];
                T::cubic(
                    self.value(key),
                    out0,
                    in1,
                    self.value(key + 1),
                    td,
                    s,
                )
            }
        }
    }
}

/// The property a channel animates, with its keyframes.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelTarget {
    /// Local translation.
    Translation(Keyframes<Vec3>),
    /// Local rotation.
    Rotation(Keyframes<Quat>),
    /// Local scale.
    Scale(Keyframes<Vec3>),
}

/// Animates one property of one joint.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Index of the joint in the skeleton.
    pub joint: usize,
    /// Animated property and its keyframes.
    pub target: ChannelTarget,
}

impl Channel {
    /// Channel driving `joint`.
    #[must_use]
    pub fn new(joint: usize, target: ChannelTarget) -> Self {
        Self { joint, target }
    }

    /// Time of the channel's last keyframe.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match &self.target {
            ChannelTarget::Translation(k) | ChannelTarget::Scale(k) => {
                k.end_time()
            }
            ChannelTarget::Rotation(k) => k.end_time(),
        }
    }

    /// Write the sampled value at `t` into `transform`.
    pub fn apply(&self, t: f32, transform: &mut Transform) {
        match &self.target {
            ChannelTarget::Translation(k) => {
                transform.translation = k.sample(t);
            }
            ChannelTarget::Rotation(k) => transform.rotation = k.sample(t),
            ChannelTarget::Scale(k) => transform.scale = k.sample(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn linear_translation() -> Keyframes<Vec3> {
        Keyframes::new(
            vec![0.0, 1.0, 3.0],
            vec![Vec3::ZERO, Vec3::X, Vec3::new(3.0, 0.0, 0.0)],
            Interpolation::Linear,
        )
        .unwrap()
    }

    #[test]
    fn sampling_clamps_outside_key_range() {
        let keys = linear_translation();
        assert_eq!(keys.sample(-5.0), Vec3::ZERO);
        assert_eq!(keys.sample(10.0), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(keys.end_time(), 3.0);
    }

    #[test]
    fn nan_time_holds_first_key() {
        let keys = linear_translation();
        assert_eq!(keys.sample(f32::NAN), Vec3::ZERO);
        assert_eq!(keys.sample(f32::INFINITY), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(keys.sample(f32::NEG_INFINITY), Vec3::ZERO);
    }

    #[test]
    fn linear_sampling_interpolates_within_segment() {
        let keys = linear_translation();
        assert!((keys.sample(0.5).x - 0.5).abs() < 1e-6);
        assert!((keys.sample(2.0).x - 2.0).abs() < 1e-6);
        assert_eq!(keys.sample(1.0), Vec3::X);
    }

    #[test]
    fn step_holds_previous_key() {
        let keys = Keyframes::new(
            vec![0.0, 1.0],
            vec![Vec3::ZERO, Vec3::ONE],
            Interpolation::Step,
        )
        .unwrap();
        assert_eq!(keys.sample(0.99), Vec3::ZERO);
        assert_eq!(keys.sample(1.0), Vec3::ONE);
    }

    #[test]
    fn cubic_spline_reads_value_from_triplets() {
        let keys = Keyframes::new(
            vec![0.0, 2.0],
            vec![
                Vec3::ZERO,
                Vec3::ZERO,
                Vec3::ZERO,
                Vec3::ZERO,
                Vec3::new(0.0, 8.0, 0.0),
                Vec3::ZERO,
            ],
            Interpolation::CubicSpline,
        )
        .unwrap();
        assert_eq!(keys.sample(0.0), Vec3::ZERO);
        assert_eq!(keys.sample(2.0), Vec3::new(0.0, 8.0, 0.0));
        assert!((keys.sample(1.0).y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn malformed_keyframes_are_rejected() {
        assert!(Keyframes::<Vec3>::new(vec![], vec![], Interpolation::Linear)
            .is_err());
        assert!(Keyframes::new(
            vec![0.0, 0.0],
            vec![Vec3::ZERO, Vec3::ONE],
            Interpolation::Linear
        )
        .is_err());
        assert!(Keyframes::new(
            vec![0.0, 1.0],
            vec![Vec3::ZERO, Vec3::ONE],
            Interpolation::CubicSpline
        )
        .is_err());
    }

    #[test]
    fn rotation_channel_applies_to_transform() {
        let keys = Keyframes::new(
            vec![0.0, 1.0],
            vec![Quat::IDENTITY, Quat::from_rotation_x(PI / 2.0)],
            Interpolation::Linear,
        )
        .unwrap();
        let channel = Channel::new(0, ChannelTarget::Rotation(keys));
        let mut transform = Transform::IDENTITY;
        channel.apply(0.5, &mut transform);
        let expected = Quat::from_rotation_x(PI / 4.0);
        assert!(transform.rotation.angle_between(expected) < 1e-4);
        assert_eq!(transform.translation, Vec3::ZERO);
    }
}
