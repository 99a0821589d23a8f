//! Scene script lines: one `make_*` command per line, fields as
//! comma-separated `key=value` pairs.

mod command;
mod parse;

pub use command::{BoundingBox, Command, Opening, RoomRecord, WallRecord};
pub(crate) use command::write_wall_ids;
pub use parse::{parse_line, parse_script};

use crate::geometry::{Room, Wall};

/// Floor-plane walls of every `make_wall` command, in script order.
#[must_use]
pub fn walls_from_script(commands: &[Command]) -> Vec<Wall> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::Wall(record) => Some(record.to_wall()),
            _ => None,
        })
        .collect()
}

/// Renders rooms as `make_room` lines, one per room, each ending in a newline.
#[must_use]
pub fn rooms_to_script(rooms: &[Room]) -> String {
    rooms.iter().map(|room| format!("{room}\n")).collect()
}
