use super::Point2;

/// Evaluates the quadratic Bezier curve with start `a`, control `c` and
/// end `b` at parameter `t`.
///
/// `P(t) = (1-t)² a + 2(1-t)t c + t² b`
#[must_use]
pub fn quadratic_point_at(a: &Point2, c: &Point2, b: &Point2, t: f64) -> Point2 {
    let s = 1.0 - t;
    let wa = s * s;
    let wc = 2.0 * s * t;
    let wb = t * t;
    Point2::new(
        wa * a.x + wc * c.x + wb * b.x,
        wa * a.y + wc * c.y + wb * b.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn endpoints_are_exact() {
        let a = Point2::new(0.0, 0.0);
        let c = Point2::new(1.0, 1.0);
        let b = Point2::new(2.0, 0.0);
        assert_eq!(quadratic_point_at(&a, &c, &b, 0.0), a);
        assert_eq!(quadratic_point_at(&a, &c, &b, 1.0), b);
    }

    #[test]
    fn midpoint_is_pulled_toward_control() {
        let a = Point2::new(0.0, 0.0);
        let c = Point2::new(1.0, 1.0);
        let b = Point2::new(2.0, 0.0);
        let mid = quadratic_point_at(&a, &c, &b, 0.5);
        assert_relative_eq!(mid.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(mid.y, 0.5, epsilon = 1e-12);
    }
}
