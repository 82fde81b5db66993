//! Shared utilities.

/// Frame clock with delta time and smoothed FPS.
pub mod frame_timing;
