pub mod room;
pub mod wall;

pub use room::Room;
pub use wall::{Wall, WallId};
