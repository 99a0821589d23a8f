pub mod flatten;
pub mod rooms;
