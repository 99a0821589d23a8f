use super::{Point2, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Signed area below which a polygon is treated as degenerate.
pub const DEGENERATE_AREA: f64 = 1e-10;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the area centroid of a simple polygon.
///
/// # Errors
///
/// Returns `GeometryError::DegenerateCentroid` if the polygon has fewer than
/// three vertices or its signed area is below [`DEGENERATE_AREA`].
pub fn polygon_centroid(points: &[Point2]) -> Result<Point2> {
    let n = points.len();
    if n < 3 {
        return Err(GeometryError::DegenerateCentroid { area: 0.0 }.into());
    }

    let mut area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let cross = points[i].x * points[j].y - points[j].x * points[i].y;
        area += cross;
        cx += (points[i].x + points[j].x) * cross;
        cy += (points[i].y + points[j].y) * cross;
    }
    area *= 0.5;

    if area.abs() < DEGENERATE_AREA {
        return Err(GeometryError::DegenerateCentroid { area }.into());
    }

    Ok(Point2::new(cx / (6.0 * area), cy / (6.0 * area)))
}

/// Tests whether `point` lies inside the polygon by ray casting.
///
/// Points exactly on the boundary may be classified either way.
#[must_use]
pub fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Returns `true` if `a` comes before `b` in leftmost-bottom order:
/// smaller x first, ties broken by smaller y.
#[must_use]
pub fn is_left_bottom_of(a: &Point2, b: &Point2) -> bool {
    a.x < b.x - TOLERANCE || ((a.x - b.x).abs() < TOLERANCE && a.y < b.y)
}

/// Computes the normalized direction from point `a` to point `b`.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if the segment has zero length.
pub fn segment_direction(a: &Point2, b: &Point2) -> Result<Vector2> {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(d / len)
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}
