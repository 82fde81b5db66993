use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Debug visualization toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Debug", inline)]
#[serde(default)]
pub struct DebugOptions {
    /// Visualize surface normals as RGB colors.
    #[schemars(title = "Show Normals")]
    pub show_normals: bool,
    /// Draw joint points and bone lines over skinned meshes.
    #[schemars(title = "Show Joints")]
    pub show_joints: bool,
    /// Color of the joint points and bone lines.
    #[schemars(skip)]
    pub joint_color: [f32; 4],
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            show_normals: false,
            show_joints: true,
            joint_color: [1.0, 0.8, 0.1, 1.0],
        }
    }
}
