use tracing::debug;

use super::command::{BoundingBox, Command, Opening, RoomRecord, WallRecord};
use crate::error::{Result, RoomgraphError, ScriptError};
use crate::geometry::WallId;
use crate::math::{Point2, Point3, Vector3};

/// The `key=value` entries of one command line.
struct Fields<'a> {
    line: usize,
    command: &'static str,
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> Fields<'a> {
    fn raw(&self, keys: &[&str]) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(k, _)| keys.contains(k))
            .map(|&(_, v)| v)
    }

    fn missing(&self, field: &'static str) -> ScriptError {
        ScriptError::MissingField {
            line: self.line,
            command: self.command,
            field,
        }
    }

    fn invalid(&self, field: &str, value: &str) -> ScriptError {
        ScriptError::InvalidValue {
            line: self.line,
            field: field.to_owned(),
            value: value.to_owned(),
        }
    }

    fn opt_f64(&self, field: &'static str, keys: &[&str]) -> Result<Option<f64>> {
        let Some(value) = self.raw(keys) else {
            return Ok(None);
        };
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(self.invalid(field, value).into()),
        }
    }

    fn f64(&self, field: &'static str) -> Result<f64> {
        self.opt_f64(field, &[field])?
            .ok_or_else(|| self.missing(field).into())
    }

    fn i64(&self, field: &'static str) -> Result<i64> {
        let value = self.raw(&[field]).ok_or_else(|| self.missing(field))?;
        value
            .parse::<i64>()
            .map_err(|_| self.invalid(field, value).into())
    }

    fn text(&self, field: &'static str) -> Result<String> {
        self.raw(&[field])
            .map(str::to_owned)
            .ok_or_else(|| self.missing(field).into())
    }

    fn point3(&self, x: &'static str, y: &'static str, z: &'static str) -> Result<Point3> {
        Ok(Point3::new(self.f64(x)?, self.f64(y)?, self.f64(z)?))
    }

    fn wall_ids(&self, field: &'static str) -> Result<Vec<WallId>> {
        let value = self.raw(&[field]).ok_or_else(|| self.missing(field))?;
        value
            .split('-')
            .map(|part| {
                part.parse::<i64>()
                    .map(WallId)
                    .map_err(|_| RoomgraphError::from(self.invalid(field, value)))
            })
            .collect()
    }
}

fn parse_wall(fields: &Fields<'_>) -> Result<Command> {
    let control = match (fields.opt_f64("c_x", &["c_x"])?, fields.opt_f64("c_y", &["c_y"])?) {
        (Some(x), Some(y)) => Some(Point2::new(x, y)),
        (None, None) => None,
        (Some(_), None) => return Err(fields.missing("c_y").into()),
        (None, Some(_)) => return Err(fields.missing("c_x").into()),
    };
    let height = fields
        .opt_f64("height", &["height", "heigth"])?
        .ok_or_else(|| fields.missing("height"))?;
    Ok(Command::Wall(WallRecord {
        id: fields.i64("id")?,
        a: fields.point3("a_x", "a_y", "a_z")?,
        b: fields.point3("b_x", "b_y", "b_z")?,
        control,
        height,
        thickness: fields.f64("thickness")?,
    }))
}

fn parse_opening(fields: &Fields<'_>) -> Result<Opening> {
    Ok(Opening {
        id: fields.i64("id")?,
        wall0_id: fields.i64("wall0_id")?,
        wall1_id: fields.i64("wall1_id")?,
        position: fields.point3("position_x", "position_y", "position_z")?,
        width: fields.opt_f64("width", &["width"])?,
        height: fields.opt_f64("height", &["height"])?,
    })
}

fn parse_bbox(fields: &Fields<'_>) -> Result<Command> {
    Ok(Command::BoundingBox(BoundingBox {
        id: fields.i64("id")?,
        class: fields.text("class")?,
        position: fields.point3("position_x", "position_y", "position_z")?,
        angle_z: fields.f64("angle_z")?,
        scale: Vector3::new(
            fields.f64("scale_x")?,
            fields.f64("scale_y")?,
            fields.f64("scale_z")?,
        ),
    }))
}

fn parse_room(fields: &Fields<'_>) -> Result<Command> {
    Ok(Command::Room(RoomRecord {
        id: fields.i64("id")?,
        wall_ids: fields.wall_ids("wall_ids")?,
    }))
}

/// Parses a single script line.
///
/// Blank lines and `#` comments yield `None`. `line` is the 1-based line
/// number reported in errors. Keys the command does not use are ignored;
/// the legacy spelling `heigth` is accepted for a wall's height.
///
/// # Errors
///
/// Returns a `ScriptError` for an unknown command, an entry without `=`, a
/// missing required field, or a value that does not parse.
pub fn parse_line(text: &str, line: usize) -> Result<Option<Command>> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let mut parts = text.split(',').map(str::trim);
    let name = parts.next().unwrap_or_default();
    let command = match name {
        Command::WALL => Command::WALL,
        Command::DOOR => Command::DOOR,
        Command::WINDOW => Command::WINDOW,
        Command::BOUNDING_BOX => Command::BOUNDING_BOX,
        Command::ROOM => Command::ROOM,
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_owned(),
            }
            .into())
        }
    };

    let mut entries = Vec::new();
    for part in parts {
        let (key, value) = part.split_once('=').ok_or_else(|| ScriptError::Malformed {
            line,
            entry: part.to_owned(),
        })?;
        entries.push((key.trim(), value.trim()));
    }
    let fields = Fields {
        line,
        command,
        entries,
    };

    let parsed = match command {
        Command::WALL => parse_wall(&fields)?,
        Command::DOOR => Command::Door(parse_opening(&fields)?),
        Command::WINDOW => Command::Window(parse_opening(&fields)?),
        Command::BOUNDING_BOX => parse_bbox(&fields)?,
        _ => parse_room(&fields)?,
    };
    Ok(Some(parsed))
}

/// Parses every line of a script, stopping at the first bad line.
///
/// # Errors
///
/// Returns the first `ScriptError`, carrying its 1-based line number.
pub fn parse_script(text: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(command) = parse_line(line, index + 1)? {
            commands.push(command);
        }
    }
    debug!(commands = commands.len(), "parsed script");
    Ok(commands)
}
