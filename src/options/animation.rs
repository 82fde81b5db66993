use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::PlaybackMode;

/// Animation playback parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
pub struct AnimationOptions {
    /// Clock behavior of the player.
    #[schemars(title = "Mode")]
    pub mode: PlaybackMode,
    /// Playback rate multiplier.
    #[schemars(title = "Speed", range(min = 0.0, max = 4.0), extend("step" = 0.05))]
    pub speed: f32,
    /// Index of the clip played first.
    #[schemars(skip)]
    pub clip: usize,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            mode: PlaybackMode::Loop,
            speed: 1.0,
            clip: 0,
        }
    }
}
