use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Animation;
use crate::skeleton::Skeleton;

/// How the player advances its clock.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Time advances with `advance` and wraps at the clip's duration.
    #[default]
    Loop,
    /// Time is only changed by `set_time` and is clamped to the clip.
    Controllable,
    /// The skeleton is held in its bind pose.
    Static,
}

/// Plays one of a set of animations onto a skeleton.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    animations: Vec<Animation>,
    current: usize,
    time: f32,
    /// Playback rate multiplier for `advance`.
    pub speed: f32,
    /// Clock behavior.
    pub mode: PlaybackMode,
}

impl AnimationPlayer {
    /// Player over `animations`, starting at the first clip, time zero.
    #[must_use]
    pub fn new(animations: Vec<Animation>, mode: PlaybackMode) -> Self {
        Self {
            animations,
            current: 0,
            time: 0.0,
            speed: 1.0,
            mode,
        }
    }

    /// The clip being played, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Animation> {
        self.animations.get(self.current)
    }

    /// Current clip time in seconds.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of clips.
    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// True if there are no clips.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Switch to clip `index` and rewind. Returns false (and keeps the
    /// current clip) if the index is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.animations.len() {
            log::warn!(
                "animation {index} out of range ({} clips)",
                self.animations.len()
            );
            return false;
        }
        self.current = index;
        self.time = 0.0;
        true
    }

    fn duration(&self) -> f32 {
        self.current().map_or(0.0, Animation::duration)
    }

    /// Advance the clock by `dt` seconds (scaled by `speed`). Only
    /// [`PlaybackMode::Loop`] moves the clock.
    pub fn advance(&mut self, dt: f32) {
        if self.mode != PlaybackMode::Loop {
            return;
        }
        let duration = self.duration();
        if duration <= 0.0 {
            self.time = 0.0;
            return;
        }
        self.time = (self.time + dt * self.speed).rem_euclid(duration);
    }

    /// Set the clock directly, clamped to `[0, duration]`.
    pub fn set_time(&mut self, time: f32) {
        self.time = time.clamp(0.0, self.duration());
    }

    /// Pose `skeleton` for the current clip and time.
    pub fn apply(&self, skeleton: &mut Skeleton) {
        if self.mode == PlaybackMode::Static {
            skeleton.reset_to_bind_pose();
            return;
        }
        if let Some(animation) = self.current() {
            animation.apply(self.time, skeleton);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::animation::{Channel, ChannelTarget, Interpolation, Keyframes};

    fn slide() -> Animation {
        let keys = Keyframes::new(
            vec![0.0, 2.0],
            vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)],
            Interpolation::Linear,
        )
        .unwrap();
        Animation::new(
            "slide",
            vec![Channel::new(0, ChannelTarget::Translation(keys))],
        )
    }

    #[test]
    fn looping_wraps_time() {
        let mut player =
            AnimationPlayer::new(vec![slide()], PlaybackMode::Loop);
        player.advance(1.5);
        player.advance(1.0);
        assert!((player.time() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn controllable_ignores_advance_and_clamps() {
        let mut player =
            AnimationPlayer::new(vec![slide()], PlaybackMode::Controllable);
        player.advance(1.0);
        assert_eq!(player.time(), 0.0);
        player.set_time(5.0);
        assert_eq!(player.time(), 2.0);
        player.set_time(-1.0);
        assert_eq!(player.time(), 0.0);
    }

    #[test]
    fn static_mode_holds_bind_pose() {
        let mut skeleton = Skeleton::chain(1, 1.0).unwrap();
        let mut player =
            AnimationPlayer::new(vec![slide()], PlaybackMode::Controllable);
        player.set_time(1.0);
        player.apply(&mut skeleton);
        assert!((skeleton.joint_positions()[0].x - 1.0).abs() < 1e-6);

        player.mode = PlaybackMode::Static;
        player.apply(&mut skeleton);
        assert_eq!(skeleton.joint_positions()[0], Vec3::ZERO);
    }

    #[test]
    fn select_rejects_out_of_range() {
        let mut player =
            AnimationPlayer::new(vec![slide()], PlaybackMode::Loop);
        assert!(!player.select(3));
        assert!(player.select(0));
        assert_eq!(player.current().map(|a| a.name.as_str()), Some("slide"));
    }
}
