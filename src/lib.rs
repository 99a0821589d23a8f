pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod script;
pub mod topology;

pub use error::{Result, RoomgraphError};
pub use geometry::{Room, Wall, WallId};
pub use operations::rooms::{ExtractRooms, Extraction, ExtractionParams};
