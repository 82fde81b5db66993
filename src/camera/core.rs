use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Pitch limit in degrees; keeps the view direction off the up axis.
pub const MAX_PITCH: f32 = 89.0;

/// First-person fly camera.
///
/// Yaw and pitch are in degrees. Yaw 0 / pitch 0 looks down -Z. The view
/// matrix is cached and rebuilt on the first read after a change.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    cursor: Option<(f32, f32)>,
    /// World units moved per unit of `move_*` input.
    pub move_speed: f32,
    /// Degrees turned per pixel of cursor movement.
    pub look_sensitivity: f32,
    changed: bool,
    view: Mat4,
}

impl FlyCamera {
    /// Camera at `position` looking down -Z.
    #[must_use]
    pub fn new(
        position: Vec3,
        move_speed: f32,
        look_sensitivity: f32,
    ) -> Self {
        Self {
            position,
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            yaw: 0.0,
            pitch: 0.0,
            cursor: None,
            move_speed,
            look_sensitivity,
            changed: true,
            view: Mat4::IDENTITY,
        }
    }

    /// Camera placed and tuned from options.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self::new(
            Vec3::from_array(options.position),
            options.move_speed,
            options.look_sensitivity,
        )
    }

    /// Eye position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit view direction.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Yaw and pitch in degrees.
    #[must_use]
    pub fn angles(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }

    /// View matrix, rebuilt only if the camera moved since the last call.
    pub fn view_matrix(&mut self) -> Mat4 {
        if self.changed {
            self.changed = false;
            self.view = Mat4::look_at_rh(
                self.position,
                self.position + self.direction,
                self.up,
            );
        }
        self.view
    }

    /// Teleport the eye.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.changed = true;
    }

    /// Move along the view direction.
    pub fn move_forward(&mut self, amount: f32) {
        self.position += self.direction * amount * self.move_speed;
        self.changed = true;
    }

    /// Move against the view direction.
    pub fn move_backward(&mut self, amount: f32) {
        self.move_forward(-amount);
    }

    /// Move to the right of the view direction.
    pub fn strafe_right(&mut self, amount: f32) {
        let right = self.direction.cross(self.up).normalize_or_zero();
        self.position += right * amount * self.move_speed;
        self.changed = true;
    }

    /// Move to the left of the view direction.
    pub fn strafe_left(&mut self, amount: f32) {
        self.strafe_right(-amount);
    }

    /// Record the cursor position without turning (e.g. when mouse-look
    /// starts).
    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = Some((x, y));
    }

    /// Turn by the cursor movement since the last recorded position.
    /// Moving right turns right, moving up (smaller `y`) looks up.
    pub fn adjust_look(&mut self, x: f32, y: f32) {
        let (last_x, last_y) = self.cursor.unwrap_or((x, y));
        self.cursor = Some((x, y));
        self.rotate(
            (x - last_x) * self.look_sensitivity,
            (last_y - y) * self.look_sensitivity,
        );
    }

    /// Add to yaw and pitch (degrees); pitch is clamped to
    /// `±MAX_PITCH`.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.yaw += yaw;
        self.pitch = (self.pitch + pitch).clamp(-MAX_PITCH, MAX_PITCH);
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.direction = Vec3::new(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        )
        .normalize();
        self.changed = true;
    }
}

/// Right-handed perspective projection with a `[0, 1]` depth range.
#[must_use]
pub fn projection(options: &CameraOptions, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(
        options.fovy.to_radians(),
        aspect,
        options.znear,
        options.zfar,
    )
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    fn camera() -> FlyCamera {
        FlyCamera::new(Vec3::new(0.0, 0.0, 5.0), 2.0, 0.5)
    }

    #[test]
    fn looks_down_negative_z_by_default() {
        let mut cam = camera();
        let expected = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::Y,
        );
        assert!(cam.view_matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn movement_scales_by_move_speed() {
        let mut cam = camera();
        cam.move_forward(1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-6));
        cam.strafe_right(0.5);
        assert!(cam.position().abs_diff_eq(Vec3::new(1.0, 0.0, 3.0), 1e-6));
        cam.strafe_left(0.5);
        cam.move_backward(1.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-6));
    }

    #[test]
    fn view_matrix_is_cached_until_changed() {
        let mut cam = camera();
        let first = cam.view_matrix();
        assert!(!cam.changed);
        assert_eq!(cam.view_matrix(), first);
        cam.move_forward(1.0);
        assert!(cam.changed);
        assert_ne!(cam.view_matrix(), first);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = camera();
        cam.set_cursor(100.0, 100.0);
        cam.adjust_look(100.0, -1000.0);
        assert_eq!(cam.angles().1, MAX_PITCH);
        assert!(cam.direction().y > 0.99);
        cam.rotate(0.0, -500.0);
        assert_eq!(cam.angles().1, -MAX_PITCH);
    }

    #[test]
    fn moving_cursor_right_turns_right() {
        let mut cam = camera();
        cam.set_cursor(0.0, 0.0);
        cam.adjust_look(180.0, 0.0);
        assert_eq!(cam.angles().0, 90.0);
        assert!(cam.direction().abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn projection_maps_near_plane_to_zero_depth() {
        let options = CameraOptions::default();
        let proj = projection(&options, 1.5);
        let clip = proj * Vec4::new(0.0, 0.0, -options.znear, 1.0);
        assert!((clip.z / clip.w).abs() < 1e-5);
    }
}
