use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and fly-control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Initial eye position.
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Movement per unit of input.
    #[schemars(title = "Move Speed", range(min = 0.01, max = 10.0), extend("step" = 0.01))]
    pub move_speed: f32,
    /// Degrees turned per pixel of cursor movement.
    #[schemars(title = "Look Sensitivity", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub look_sensitivity: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 60.0,
            znear: 0.1,
            zfar: 300.0,
            position: [0.0, 1.0, 4.0],
            move_speed: 0.1,
            look_sensitivity: 0.1,
        }
    }
}
