use std::fmt;

use crate::math::polygon_2d::{left_normal, segment_direction};
use crate::math::{Point2, Vector2};

/// Stable identifier of a wall record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WallId(pub i64);

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unit direction and left normal of a non-degenerate wall.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WallFrame {
    direction: Vector2,
    normal: Vector2,
}

/// A wall segment of a floor plan.
///
/// Straight walls run from `start` to `end`. Curved walls additionally carry
/// the control point of a quadratic Bezier and are flattened into straight
/// walls before room extraction. Walls are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    id: WallId,
    start: Point2,
    end: Point2,
    control: Option<Point2>,
    thickness: f64,
    height: f64,
    parent: Option<WallId>,
    frame: Option<WallFrame>,
    midpoint: Point2,
}

impl Wall {
    /// Creates a straight wall.
    #[must_use]
    pub fn straight(id: WallId, start: Point2, end: Point2) -> Self {
        let frame = segment_direction(&start, &end).ok().map(|direction| WallFrame {
            direction,
            normal: left_normal(direction),
        });
        Self {
            id,
            start,
            end,
            control: None,
            thickness: 0.0,
            height: 0.0,
            parent: None,
            frame,
            midpoint: nalgebra::center(&start, &end),
        }
    }

    /// Creates a wall curved along the quadratic Bezier `start, control, end`.
    ///
    /// Direction, normal and midpoint describe the chord.
    #[must_use]
    pub fn curved(id: WallId, start: Point2, control: Point2, end: Point2) -> Self {
        Self {
            control: Some(control),
            ..Self::straight(id, start, end)
        }
    }

    /// Sets the cross-section of the wall.
    #[must_use]
    pub fn with_section(mut self, thickness: f64, height: f64) -> Self {
        self.thickness = thickness;
        self.height = height;
        self
    }

    /// Creates one straight piece of a flattened curved wall.
    ///
    /// The piece reports the curved wall's id and inherits its cross-section.
    #[must_use]
    pub(crate) fn flattened_piece(parent: &Wall, start: Point2, end: Point2) -> Self {
        Self {
            parent: Some(parent.id),
            ..Self::straight(parent.id, start, end).with_section(parent.thickness, parent.height)
        }
    }

    #[must_use]
    pub fn id(&self) -> WallId {
        self.id
    }

    #[must_use]
    pub fn start(&self) -> Point2 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        self.end
    }

    /// Control point, for curved walls.
    #[must_use]
    pub fn control(&self) -> Option<Point2> {
        self.control
    }

    #[must_use]
    pub fn is_curved(&self) -> bool {
        self.control.is_some()
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The curved wall this piece was flattened from, if any.
    #[must_use]
    pub fn parent(&self) -> Option<WallId> {
        self.parent
    }

    /// Unit direction from `start` to `end`; `None` for a zero-length wall.
    #[must_use]
    pub fn direction(&self) -> Option<Vector2> {
        self.frame.map(|f| f.direction)
    }

    /// Unit normal pointing to the left of the direction; `None` for a
    /// zero-length wall.
    #[must_use]
    pub fn normal(&self) -> Option<Vector2> {
        self.frame.map(|f| f.normal)
    }

    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        self.midpoint
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}
