mod build;
mod resolve;
mod trace;

pub use build::{BuildGraph, BuildReport, WallGraph};
pub use resolve::resolve_cycle;
pub use trace::{Cycle, MinimalCycles};

use tracing::debug;

use crate::error::Result;
use crate::geometry::{Room, Wall};
use crate::math::VERTEX_TOLERANCE;
use crate::operations::flatten::FlattenParams;

/// Parameters controlling room extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionParams {
    /// Distance under which wall endpoints are the same vertex.
    pub tolerance: f64,
    /// Id of the first room; later rooms count up from it.
    pub room_id_base: i64,
    /// Flattening of curved walls.
    pub flatten: FlattenParams,
    /// Face tracing gives up after `iteration_factor * (edges + 1)` rounds.
    pub iteration_factor: usize,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            tolerance: VERTEX_TOLERANCE,
            room_id_base: 9000,
            flatten: FlattenParams::default(),
            iteration_factor: 4,
        }
    }
}

/// Rooms found in one floor design.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub rooms: Vec<Room>,
    pub report: BuildReport,
}

/// Extracts the enclosed rooms of a floor design from its walls.
///
/// Curved walls are flattened, all walls are merged into a planar graph,
/// every minimal face of the graph is traced, and each face is reported as a
/// room listing its bounding walls in boundary order.
#[derive(Debug)]
pub struct ExtractRooms<'a> {
    walls: &'a [Wall],
    params: ExtractionParams,
}

impl<'a> ExtractRooms<'a> {
    /// Creates a new room extraction with default parameters.
    #[must_use]
    pub fn new(walls: &'a [Wall]) -> Self {
        Self {
            walls,
            params: ExtractionParams::default(),
        }
    }

    /// Sets custom extraction parameters.
    #[must_use]
    pub fn with_params(mut self, params: ExtractionParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the extraction.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::StuckTraversal` or
    /// `TopologyError::IterationLimit` if the wall graph cannot be traced,
    /// `TopologyError::UnresolvedWall` if a traced edge maps to no wall, or
    /// `OperationError::InvalidInput` for unusable flattening parameters.
    pub fn execute(&self) -> Result<Extraction> {
        let mut built = BuildGraph::new(self.walls)
            .with_tolerance(self.params.tolerance)
            .with_flatten_params(self.params.flatten)
            .execute()?;

        let cycles = MinimalCycles::new()
            .with_iteration_factor(self.params.iteration_factor)
            .execute(&mut built.graph)?;

        let mut rooms = Vec::with_capacity(cycles.len());
        for (index, cycle) in (0_i64..).zip(cycles) {
            let wall_ids = resolve_cycle(&cycle, &built)?;
            rooms.push(Room {
                id: self.params.room_id_base + index,
                wall_ids,
                boundary: cycle.points,
            });
        }

        debug!(rooms = rooms.len(), walls = self.walls.len(), "extracted rooms");

        Ok(Extraction {
            rooms,
            report: built.report,
        })
    }
}
