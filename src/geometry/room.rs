use std::fmt;

use super::wall::{Wall, WallId};
use crate::error::Result;
use crate::math::polygon_2d::{point_in_polygon, polygon_centroid, signed_area_2d};
use crate::math::Point2;
use crate::script::write_wall_ids;

/// An enclosed room recovered from the wall network.
///
/// `wall_ids` lists the bounding walls in the cyclic order the boundary was
/// traced; `boundary` holds the corresponding corner positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i64,
    pub wall_ids: Vec<WallId>,
    pub boundary: Vec<Point2>,
}

impl Room {
    /// Unsigned floor area of the room.
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area_2d(&self.boundary).abs()
    }

    /// Area centroid of the room's boundary polygon.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateCentroid` if the boundary encloses
    /// no area.
    pub fn centroid(&self) -> Result<Point2> {
        polygon_centroid(&self.boundary)
    }

    /// Tests whether `point` lies inside the room.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        point_in_polygon(point, &self.boundary)
    }

    /// Tests whether the left side of `wall` faces into this room.
    ///
    /// Probes the point `offset` away from the wall midpoint along its left
    /// normal. Zero-length walls face nothing.
    #[must_use]
    pub fn faces_wall(&self, wall: &Wall, offset: f64) -> bool {
        wall.normal()
            .is_some_and(|n| self.contains(&(wall.midpoint() + n * offset)))
    }
}

/// Renders the room as a `make_room` command line.
impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "make_room, id={}, wall_ids=", self.id)?;
        write_wall_ids(f, &self.wall_ids)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_room() -> Room {
        Room {
            id: 9000,
            wall_ids: vec![WallId(0), WallId(1), WallId(2), WallId(3)],
            boundary: vec![
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 1.0),
                Point2::new(1.0, 1.0),
                Point2::new(1.0, 0.0),
            ],
        }
    }

    #[test]
    fn command_line_format() {
        assert_eq!(unit_room().to_string(), "make_room, id=9000, wall_ids=0-1-2-3");
    }

    #[test]
    fn area_is_unsigned() {
        assert_relative_eq!(unit_room().area(), 1.0);
    }

    #[test]
    fn centroid_and_containment() {
        let room = unit_room();
        let c = room.centroid().unwrap();
        assert_relative_eq!(c.x, 0.5);
        assert_relative_eq!(c.y, 0.5);
        assert!(room.contains(&c));
        assert!(!room.contains(&Point2::new(2.0, 0.5)));
    }

    #[test]
    fn wall_facing() {
        let room = unit_room();
        // Bottom wall drawn left to right: its left normal points up, into the room.
        let bottom = Wall::straight(WallId(0), Point2::new(0.0, 0.0), Point2::new(1.0, 0.0));
        assert!(room.faces_wall(&bottom, 0.25));
        let reversed = Wall::straight(WallId(0), Point2::new(1.0, 0.0), Point2::new(0.0, 0.0));
        assert!(!room.faces_wall(&reversed, 0.25));
    }

    #[test]
    fn negative_ids_render_verbatim() {
        let room = Room {
            id: 9001,
            wall_ids: vec![WallId(-4), WallId(12)],
            boundary: Vec::new(),
        };
        assert_eq!(room.to_string(), "make_room, id=9001, wall_ids=-4-12");
    }
}
