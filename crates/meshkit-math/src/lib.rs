#![warn(missing_docs)]

//! Math types for the meshkit triangle mesh toolkit.
//!
//! Thin wrappers around nalgebra providing the handful of vector
//! operations the mesh analysis needs: distances, angles between
//! vectors, and the triangle / tetrahedron measures built on them.

use nalgebra::Vector3;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// Euclidean distance between two points.
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (b - a).norm()
}

/// Angle between two vectors in radians, in `[0, π]`.
///
/// A zero-length input has no direction; the angle is reported as 0 so
/// that area formulas built on it collapse to 0 rather than NaN.
pub fn angle_between(u: &Vec3, v: &Vec3) -> f64 {
    let denom = u.norm() * v.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (u.dot(v) / denom).clamp(-1.0, 1.0).acos()
}

/// Area of the triangle `abc`.
///
/// Computed from the two edge vectors leaving `a` and the angle between
/// them: `½·|AB|·|AC|·sin(θ)`. Collinear points give 0.
pub fn triangle_area(a: &Point3, b: &Point3, c: &Point3) -> f64 {
    let ab = b - a;
    let ac = c - a;
    let angle = angle_between(&ab, &ac);
    0.5 * ab.norm() * ac.norm() * angle.sin()
}

/// Unnormalized normal of the triangle `abc`: `(b - a) × (c - a)`.
pub fn triangle_cross(a: &Point3, b: &Point3, c: &Point3) -> Vec3 {
    (b - a).cross(&(c - a))
}

/// Volume of the tetrahedron `abcd`.
///
/// Absolute scalar triple product of the three edge vectors running
/// from each of `a`, `b`, `c` to `d`, divided by 6.
pub fn tetrahedron_volume(a: &Point3, b: &Point3, c: &Point3, d: &Point3) -> f64 {
    let ad = d - a;
    let bd = d - b;
    let cd = d - c;
    ad.dot(&bd.cross(&cd)).abs() / 6.0
}
