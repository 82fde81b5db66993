use glam::Mat3;

/// Determinants below this are treated as singular.
pub const SINGULAR_EPSILON: f32 = 1e-8;

/// Inverse-transpose of `m` via cofactors: the columns of the result are
/// `(b × c, c × a, a × b) / det` for the columns `a, b, c` of `m`.
///
/// A singular matrix is returned unchanged. The WGSL `inverse_transpose3`
/// evaluates the same expression.
#[must_use]
pub fn inverse_transpose3(m: Mat3) -> Mat3 {
    let (a, b, c) = (m.x_axis, m.y_axis, m.z_axis);
    let bc = b.cross(c);
    let det = a.dot(bc);
    if det.abs() < SINGULAR_EPSILON {
        return m;
    }
    Mat3::from_cols(bc, c.cross(a), a.cross(b)) * (1.0 / det)
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Quat, Vec3};

    use super::*;

    #[test]
    fn matches_glam_inverse_transpose() {
        let m = Mat3::from_mat4(Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, 2.0, 0.5),
            Quat::from_euler(glam::EulerRot::XYZ, 0.3, -0.7, 1.1),
            Vec3::new(4.0, 5.0, 6.0),
        ));
        let expected = m.inverse().transpose();
        assert!(inverse_transpose3(m).abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn rotation_is_its_own_inverse_transpose() {
        let m = Mat3::from_quat(Quat::from_rotation_y(0.9));
        assert!(inverse_transpose3(m).abs_diff_eq(m, 1e-6));
    }

    #[test]
    fn non_uniform_scale_keeps_normals_perpendicular() {
        let m = Mat3::from_diagonal(Vec3::new(4.0, 1.0, 1.0));
        let tangent = Vec3::new(1.0, -1.0, 0.0);
        let normal = Vec3::new(1.0, 1.0, 0.0);
        let n = inverse_transpose3(m) * normal;
        assert!((m * tangent).dot(n).abs() < 1e-6);
    }

    #[test]
    fn singular_matrix_falls_back_to_input() {
        let m = Mat3::from_diagonal(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(inverse_transpose3(m), m);
    }
}
