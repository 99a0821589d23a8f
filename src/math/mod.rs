pub mod angle_2d;
pub mod bezier_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D point type, used for scene positions.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance under which two wall endpoints are the same vertex.
///
/// Wall endpoints are authored independently and rounded to centimeters,
/// so this is a merge rule rather than a float comparison.
pub const VERTEX_TOLERANCE: f64 = 0.1;

/// Z component of the cross product `a × b`.
///
/// Positive when `b` lies counter-clockwise of `a`.
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Returns `true` if `a` and `b` are within `tolerance` of each other.
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    (a - b).norm() < tolerance
}
