//! Moving frames and parallel transport.

use config::constants::DIRECTION_EPSILON;
use glam::{DQuat, DVec3};

/// Position and orthonormal orientation at a point on a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Curve position.
    pub position: DVec3,
    /// Unit tangent (forward along the curve).
    pub tangent: DVec3,
    /// Unit normal, perpendicular to the tangent.
    pub normal: DVec3,
    /// Unit binormal, `tangent × normal`.
    pub binormal: DVec3,
}

/// Normalizes `v`, or returns `None` when it has no usable direction.
#[inline]
pub(crate) fn direction(v: DVec3) -> Option<DVec3> {
    if v.length_squared() > DIRECTION_EPSILON {
        v.try_normalize()
    } else {
        None
    }
}

/// A unit vector perpendicular to unit `v`, built from the coordinate axis
/// least aligned with it.
pub(crate) fn perpendicular(v: DVec3) -> DVec3 {
    let a = v.abs();
    let axis = if a.x <= a.y && a.x <= a.z {
        DVec3::X
    } else if a.y <= a.z {
        DVec3::Y
    } else {
        DVec3::Z
    };
    direction(v.cross(axis)).unwrap_or(DVec3::Y)
}

/// Rotates `normal` by the minimal rotation taking unit tangent `from` to
/// unit tangent `to`.
pub(crate) fn transport(normal: DVec3, from: DVec3, to: DVec3) -> DVec3 {
    DQuat::from_rotation_arc(from, to) * normal
}

/// Projects `normal` onto the plane perpendicular to `tangent` and
/// completes the frame.
pub(crate) fn orthonormalize(position: DVec3, tangent: DVec3, normal: DVec3) -> Frame {
    let normal = direction(normal - tangent * tangent.dot(normal))
        .unwrap_or_else(|| perpendicular(tangent));
    Frame {
        position,
        tangent,
        normal,
        binormal: tangent.cross(normal),
    }
}

/// Signed angle rotating unit `from` onto unit `to` about unit `axis`.
pub(crate) fn signed_angle(from: DVec3, to: DVec3, axis: DVec3) -> f64 {
    let angle = from.dot(to).clamp(-1.0, 1.0).acos();
    if axis.dot(from.cross(to)) < 0.0 {
        -angle
    } else {
        angle
    }
}

/// Rotates `v` about unit `axis` by `angle` radians.
#[inline]
pub(crate) fn rotate_about(v: DVec3, axis: DVec3, angle: f64) -> DVec3 {
    if angle == 0.0 {
        v
    } else {
        DQuat::from_axis_angle(axis, angle) * v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perpendicular_is_orthogonal() {
        for v in [DVec3::X, DVec3::Y, DVec3::Z, DVec3::new(1.0, 2.0, 3.0).normalize()] {
            let p = perpendicular(v);
            assert_relative_eq!(p.dot(v), 0.0, epsilon = 1e-12);
            assert_relative_eq!(p.length(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_transport_keeps_normal_perpendicular() {
        let from = DVec3::X;
        let to = DVec3::new(1.0, 1.0, 0.0).normalize();
        let moved = transport(DVec3::Z, from, to);
        // Rotation about Z leaves Z untouched
        assert_relative_eq!(moved.distance(DVec3::Z), 0.0, epsilon = 1e-12);

        let moved = transport(DVec3::Y, from, to);
        assert_relative_eq!(moved.dot(to), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_orthonormalize_builds_right_handed_frame() {
        let frame = orthonormalize(DVec3::ZERO, DVec3::Z, DVec3::new(1.0, 0.0, 0.5));
        assert_relative_eq!(frame.normal.distance(DVec3::X), 0.0, epsilon = 1e-12);
        assert_relative_eq!(frame.binormal.distance(DVec3::Y), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_signed_angle() {
        assert_relative_eq!(
            signed_angle(DVec3::X, DVec3::Y, DVec3::Z),
            std::f64::consts::FRAC_PI_2,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            signed_angle(DVec3::Y, DVec3::X, DVec3::Z),
            -std::f64::consts::FRAC_PI_2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_direction_rejects_zero() {
        assert!(direction(DVec3::ZERO).is_none());
        assert_eq!(direction(DVec3::new(0.0, 3.0, 0.0)), Some(DVec3::Y));
    }
}
