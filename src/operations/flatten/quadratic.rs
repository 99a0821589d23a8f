use crate::error::{OperationError, Result};
use crate::math::bezier_2d::quadratic_point_at;
use crate::math::Point2;

use super::FlattenParams;

/// Initial parameter step when probing for the next chord.
const INITIAL_STEP: f64 = 0.1;

/// Distance from the curve end beyond which the end point is appended.
const END_SNAP: f64 = 1e-6;

/// Parameters this close to 1 are treated as the curve end.
const T_SNAP: f64 = 1e-9;

/// Flattens a quadratic Bezier curve into a polyline of bounded chords.
///
/// Starting at `t = 0`, each step probes forward with a parameter step that
/// starts at 0.1 and doubles until the chord reaches `min_chord_length` or the
/// probe hits `t = 1`. The first point is always `start` and the last point
/// is always `end`; every chord but the last is at least `min_chord_length`.
#[derive(Debug)]
pub struct FlattenQuadratic {
    start: Point2,
    control: Point2,
    end: Point2,
    params: FlattenParams,
}

impl FlattenQuadratic {
    /// Creates a new flattening operation with default parameters.
    #[must_use]
    pub fn new(start: Point2, control: Point2, end: Point2) -> Self {
        Self {
            start,
            control,
            end,
            params: FlattenParams::default(),
        }
    }

    /// Sets custom flattening parameters.
    #[must_use]
    pub fn with_params(mut self, params: FlattenParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the flattening, returning between 2 and
    /// `max_segments + 1` points.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `min_chord_length` is not a
    /// positive finite number or `max_segments` is zero.
    pub fn execute(&self) -> Result<Vec<Point2>> {
        let FlattenParams {
            min_chord_length,
            max_segments,
        } = self.params;
        if !(min_chord_length.is_finite() && min_chord_length > 0.0) {
            return Err(OperationError::InvalidInput(format!(
                "minimum chord length must be positive, got {min_chord_length}"
            ))
            .into());
        }
        if max_segments == 0 {
            return Err(
                OperationError::InvalidInput("at least one segment required".to_owned()).into(),
            );
        }

        let eval = |t: f64| quadratic_point_at(&self.start, &self.control, &self.end, t);

        let mut points = Vec::with_capacity(max_segments.min(16) + 1);
        points.push(self.start);
        let mut current_t = 0.0;
        let mut segment_count = 0;

        while current_t < 1.0 && segment_count < max_segments {
            let current_point = eval(current_t);
            let mut next_t = current_t;
            let mut step = INITIAL_STEP;

            while next_t < 1.0 {
                next_t = (current_t + step).min(1.0);
                if 1.0 - next_t < T_SNAP {
                    next_t = 1.0;
                }
                let chord = (eval(next_t) - current_point).norm();
                if chord >= min_chord_length || next_t >= 1.0 {
                    break;
                }
                step *= 2.0;
            }

            if next_t <= current_t {
                break;
            }
            points.push(eval(next_t));
            current_t = next_t;
            segment_count += 1;
        }

        let ends_at_curve_end = points
            .last()
            .is_some_and(|last| (last - self.end).norm() <= END_SNAP);
        if !ends_at_curve_end {
            if segment_count >= max_segments {
                // Out of segments: bend the final chord onto the end point.
                points.pop();
            }
            points.push(self.end);
        }

        Ok(points)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn arch() -> FlattenQuadratic {
        FlattenQuadratic::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 0.0),
        )
    }

    fn params(min_chord_length: f64, max_segments: usize) -> FlattenParams {
        FlattenParams {
            min_chord_length,
            max_segments,
        }
    }

    #[test]
    fn arch_with_half_unit_chords() {
        let op = arch().with_params(params(0.5, 100));
        let pts = op.execute().unwrap();

        assert_eq!(pts[0], Point2::new(0.0, 0.0));
        let last = pts.last().unwrap();
        assert!((last - Point2::new(2.0, 0.0)).norm() <= 1e-6);
        assert!(pts.len() >= 2 && pts.len() <= 101);
        for pair in pts.windows(2).take(pts.len() - 2) {
            let chord = (pair[1] - pair[0]).norm();
            assert!(chord >= 0.5, "chord {chord} shorter than 0.5");
        }
    }

    #[test]
    fn chord_longer_than_curve_gives_single_segment() {
        let pts = arch().with_params(params(10.0, 100)).execute().unwrap();
        assert_eq!(pts, vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)]);
    }

    #[test]
    fn segment_cap_is_respected() {
        let pts = arch().with_params(params(0.01, 3)).execute().unwrap();
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[0], Point2::new(0.0, 0.0));
        assert_eq!(*pts.last().unwrap(), Point2::new(2.0, 0.0));
    }

    #[test]
    fn single_segment_cap() {
        let pts = arch().with_params(params(0.01, 1)).execute().unwrap();
        assert_eq!(pts, vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)]);
    }

    #[test]
    fn points_lie_on_curve() {
        let op = arch().with_params(params(0.3, 100));
        let pts = op.execute().unwrap();
        // On this arch, y = x - x²/2.
        for p in &pts {
            assert!((p.y - (p.x - p.x * p.x / 2.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn invalid_params_rejected() {
        assert!(arch().with_params(params(0.0, 10)).execute().is_err());
        assert!(arch().with_params(params(f64::NAN, 10)).execute().is_err());
        assert!(arch().with_params(params(0.5, 0)).execute().is_err());
    }

    #[test]
    fn accumulated_steps_land_on_end() {
        // Ten steps of 0.1 sum to slightly less than 1.
        let pts = arch().with_params(params(0.1, 100)).execute().unwrap();
        assert_eq!(pts.len(), 11);
        assert_eq!(*pts.last().unwrap(), Point2::new(2.0, 0.0));
    }

    #[test]
    fn straight_curve_flattens_along_chord() {
        let op = FlattenQuadratic::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        )
        .with_params(params(0.5, 100));
        let pts = op.execute().unwrap();
        assert!(pts.iter().all(|p| p.y.abs() < 1e-12));
        assert!(pts.windows(2).all(|w| w[1].x > w[0].x));
    }
}
