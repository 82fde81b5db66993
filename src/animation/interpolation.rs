//! Keyframe interpolation primitives.

use glam::{Quat, Vec3, Vec4};

/// A value that can be interpolated between keyframes.
pub trait Interpolate: Copy {
    /// Linear blend at parameter `s` in `[0, 1]`.
    fn linear(a: Self, b: Self, s: f32) -> Self;

    /// Cubic Hermite segment between `v0` and `v1`.
    ///
    /// `out0` is the out-tangent of the first key, `in1` the in-tangent of
    /// the second, both per second; `td` is the segment duration.
    fn cubic(v0: Self, out0: Self, in1: Self, v1: Self, td: f32, s: f32)
        -> Self;
}

/// Hermite basis weights `(h00, h10, h01, h11)` at `s`.
#[inline]
#[must_use]
pub fn hermite_basis(s: f32) -> (f32, f32, f32, f32) {
    let s2 = s * s;
    let s3 = s2 * s;
    (
        2.0 * s3 - 3.0 * s2 + 1.0,
        s3 - 2.0 * s2 + s,
        -2.0 * s3 + 3.0 * s2,
        s3 - s2,
    )
}

/// Spherical interpolation along the shorter arc between two rotations.
/// Both inputs are normalized first.
#[must_use]
pub fn slerp_shortest(a: Quat, b: Quat, s: f32) -> Quat {
    let a = a.normalize();
    let b = b.normalize();
    let a = if a.dot(b) < 0.0 { -a } else { a };
    a.slerp(b, s).normalize()
}

impl Interpolate for Vec3 {
    #[inline]
    fn linear(a: Self, b: Self, s: f32) -> Self {
        a.lerp(b, s)
    }

    fn cubic(
        v0: Self,
        out0: Self,
        in1: Self,
        v1: Self,
        td: f32,
        s: f32,
    ) -> Self {
        let (h00, h10, h01, h11) = hermite_basis(s);
        v0 * h00 + out0 * (h10 * td) + v1 * h01 + in1 * (h11 * td)
    }
}

impl Interpolate for Quat {
    #[inline]
    fn linear(a: Self, b: Self, s: f32) -> Self {
        slerp_shortest(a, b, s)
    }

    fn cubic(
        v0: Self,
        out0: Self,
        in1: Self,
        v1: Self,
        td: f32,
        s: f32,
    ) -> Self {
        let (h00, h10, h01, h11) = hermite_basis(s);
        let v = Vec4::from(v0) * h00
            + Vec4::from(out0) * (h10 * td)
            + Vec4::from(v1) * h01
            + Vec4::from(in1) * (h11 * td);
        Quat::from_vec4(v).normalize()
    }
}
