use std::fmt;

use crate::geometry::{Room, Wall, WallId};
use crate::math::{Point2, Point3, Vector3};

/// A `make_wall` record.
///
/// A wall with a control point is curved; only its plan position matters.
#[derive(Debug, Clone, PartialEq)]
pub struct WallRecord {
    pub id: i64,
    pub a: Point3,
    pub b: Point3,
    pub control: Option<Point2>,
    pub height: f64,
    pub thickness: f64,
}

impl WallRecord {
    /// Projects the record onto the floor plane.
    #[must_use]
    pub fn to_wall(&self) -> Wall {
        let start = self.a.xy();
        let end = self.b.xy();
        let wall = match self.control {
            Some(control) => Wall::curved(WallId(self.id), start, control, end),
            None => Wall::straight(WallId(self.id), start, end),
        };
        wall.with_section(self.thickness, self.height)
    }
}

/// A `make_door` or `make_window` record.
#[derive(Debug, Clone, PartialEq)]
pub struct Opening {
    pub id: i64,
    pub wall0_id: i64,
    /// Second wall the opening cuts through, `-1` if none.
    pub wall1_id: i64,
    pub position: Point3,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// A `make_bbox` record: an oriented box around a detected object.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub id: i64,
    pub class: String,
    pub position: Point3,
    /// Rotation about the vertical axis, in radians.
    pub angle_z: f64,
    pub scale: Vector3,
}

/// A `make_room` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub id: i64,
    pub wall_ids: Vec<WallId>,
}

impl From<&Room> for RoomRecord {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            wall_ids: room.wall_ids.clone(),
        }
    }
}

/// One line of a scene script.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Wall(WallRecord),
    Door(Opening),
    Window(Opening),
    BoundingBox(BoundingBox),
    Room(RoomRecord),
}

impl Command {
    pub const WALL: &'static str = "make_wall";
    pub const DOOR: &'static str = "make_door";
    pub const WINDOW: &'static str = "make_window";
    pub const BOUNDING_BOX: &'static str = "make_bbox";
    pub const ROOM: &'static str = "make_room";

    /// The command keyword that starts the line.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wall(_) => Self::WALL,
            Self::Door(_) => Self::DOOR,
            Self::Window(_) => Self::WINDOW,
            Self::BoundingBox(_) => Self::BOUNDING_BOX,
            Self::Room(_) => Self::ROOM,
        }
    }
}

/// Float as written to scripts: shortest round-trip form, always with a
/// fractional part or exponent.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

fn write_point(f: &mut fmt::Formatter<'_>, prefix: &str, p: &Point3) -> fmt::Result {
    write!(
        f,
        ", {prefix}_x={}, {prefix}_y={}, {prefix}_z={}",
        Num(p.x),
        Num(p.y),
        Num(p.z)
    )
}

pub(crate) fn write_wall_ids(f: &mut fmt::Formatter<'_>, ids: &[WallId]) -> fmt::Result {
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            f.write_str("-")?;
        }
        write!(f, "{id}")?;
    }
    Ok(())
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        match self {
            Self::Wall(w) => {
                write!(f, ", id={}", w.id)?;
                write_point(f, "a", &w.a)?;
                write_point(f, "b", &w.b)?;
                if let Some(c) = w.control {
                    write!(f, ", c_x={}, c_y={}", Num(c.x), Num(c.y))?;
                }
                write!(f, ", height={}, thickness={}", Num(w.height), Num(w.thickness))
            }
            Self::Door(o) | Self::Window(o) => {
                write!(f, ", id={}, wall0_id={}, wall1_id={}", o.id, o.wall0_id, o.wall1_id)?;
                write_point(f, "position", &o.position)?;
                if let Some(width) = o.width {
                    write!(f, ", width={}", Num(width))?;
                }
                if let Some(height) = o.height {
                    write!(f, ", height={}", Num(height))?;
                }
                Ok(())
            }
            Self::BoundingBox(b) => {
                write!(f, ", id={}, class={}", b.id, b.class)?;
                write_point(f, "position", &b.position)?;
                write!(
                    f,
                    ", angle_z={}, scale_x={}, scale_y={}, scale_z={}",
                    Num(b.angle_z),
                    Num(b.scale.x),
                    Num(b.scale.y),
                    Num(b.scale.z)
                )
            }
            Self::Room(r) => {
                write!(f, ", id={}, wall_ids=", r.id)?;
                write_wall_ids(f, &r.wall_ids)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_line_format() {
        let cmd = Command::Wall(WallRecord {
            id: 26,
            a: Point3::new(-8.26, 4.26, 0.0),
            b: Point3::new(-8.27, 2.02, 0.0),
            control: None,
            height: 2.8,
            thickness: 0.3,
        });
        assert_eq!(
            cmd.to_string(),
            "make_wall, id=26, a_x=-8.26, a_y=4.26, a_z=0.0, b_x=-8.27, b_y=2.02, b_z=0.0, \
             height=2.8, thickness=0.3"
        );
    }

    #[test]
    fn room_line_matches_room_display() {
        let room = Room {
            id: 9003,
            wall_ids: vec![WallId(4), WallId(11), WallId(7)],
            boundary: Vec::new(),
        };
        let line = Command::Room(RoomRecord::from(&room)).to_string();
        assert_eq!(line, "make_room, id=9003, wall_ids=4-11-7");
        assert_eq!(line, room.to_string());
    }

    #[test]
    fn curved_record_becomes_curved_wall() {
        let record = WallRecord {
            id: 3,
            a: Point3::new(0.0, 0.0, 0.0),
            b: Point3::new(2.0, 0.0, 0.0),
            control: Some(Point2::new(1.0, 1.0)),
            height: 2.5,
            thickness: 0.2,
        };
        let wall = record.to_wall();
        assert!(wall.is_curved());
        assert_eq!(wall.id(), WallId(3));
        assert_eq!(wall.end(), Point2::new(2.0, 0.0));
        assert!((wall.height() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn opening_omits_missing_size() {
        let cmd = Command::Door(Opening {
            id: 1000,
            wall0_id: 2,
            wall1_id: -1,
            position: Point3::new(0.5, 0.0, 0.0),
            width: None,
            height: None,
        });
        assert_eq!(
            cmd.to_string(),
            "make_door, id=1000, wall0_id=2, wall1_id=-1, position_x=0.5, position_y=0.0, \
             position_z=0.0"
        );
    }
}
