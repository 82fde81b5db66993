//! Fly camera and projection for viewing a scene.

/// First-person camera and perspective projection.
pub mod core;

pub use self::core::{projection, FlyCamera, MAX_PITCH};
