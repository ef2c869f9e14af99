//! Quadric error forms.
//!
//! A plane `n·x + d = 0` gives the form `p pᵀ` with `p = (n, d)`; the error
//! of a point `x` is `[x 1] Q [x 1]ᵀ`, the squared distance to the plane.
//! Forms add, so a vertex quadric measures the summed squared distance to
//! all incident planes.

use config::constants::QUADRIC_SINGULAR_EPSILON;
use glam::{DMat3, DMat4, DVec3, DVec4};

/// Quadric of the plane through `point` with unit `normal`.
pub(crate) fn plane_quadric(normal: DVec3, point: DVec3) -> DMat4 {
    let p = DVec4::new(normal.x, normal.y, normal.z, -normal.dot(point));
    DMat4::from_cols(p * p.x, p * p.y, p * p.z, p * p.w)
}

/// Squared-distance error of `x` under `q`.
pub(crate) fn quadric_error(q: &DMat4, x: DVec3) -> f64 {
    let v = x.extend(1.0);
    v.dot(*q * v)
}

/// Point minimizing `q`, or `fallback` when the 3x3 system is singular.
pub(crate) fn optimal_point(q: &DMat4, fallback: DVec3) -> DVec3 {
    let a = DMat3::from_cols(
        q.x_axis.truncate(),
        q.y_axis.truncate(),
        q.z_axis.truncate(),
    );
    if a.determinant().abs() < QUADRIC_SINGULAR_EPSILON {
        return fallback;
    }
    let x = a.inverse() * -q.w_axis.truncate();
    if x.is_finite() {
        x
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Test that a plane quadric measures squared distance to the plane.
    #[test]
    fn test_plane_quadric_is_squared_distance() {
        let q = plane_quadric(DVec3::Z, DVec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(quadric_error(&q, DVec3::new(5.0, -2.0, 4.0)), 9.0, epsilon = 1e-12);
        assert_relative_eq!(quadric_error(&q, DVec3::new(1.0, 1.0, 1.0)), 0.0, epsilon = 1e-12);
    }

    /// Test that three orthogonal planes pin the optimum to their corner.
    #[test]
    fn test_optimal_point_of_three_planes() {
        let corner = DVec3::new(1.0, 2.0, 3.0);
        let q = plane_quadric(DVec3::X, corner)
            + plane_quadric(DVec3::Y, corner)
            + plane_quadric(DVec3::Z, corner);
        let x = optimal_point(&q, DVec3::ZERO);
        assert_relative_eq!(x.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(x.y, 2.0, epsilon = 1e-9);
        assert_relative_eq!(x.z, 3.0, epsilon = 1e-9);
    }

    /// Test that a single plane is singular and falls back.
    #[test]
    fn test_singular_system_uses_fallback() {
        let q = plane_quadric(DVec3::Z, DVec3::ZERO);
        let fallback = DVec3::new(0.5, 0.5, 0.0);
        assert_eq!(optimal_point(&q, fallback), fallback);
    }
}
