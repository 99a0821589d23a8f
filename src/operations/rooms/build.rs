use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::{Wall, WallId};
use crate::math::points_coincide;
use crate::operations::flatten::{FlattenParams, FlattenQuadratic};
use crate::topology::{PlanarGraph, VertexId};

/// Unordered vertex pair used to look up the wall behind an edge.
pub(crate) fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// What happened to the input walls while the graph was built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Walls whose endpoints merged into one vertex.
    pub degenerate: Vec<WallId>,
    /// Walls whose endpoints were already connected by an earlier wall.
    pub duplicates: Vec<WallId>,
    /// Curved walls replaced by straight pieces.
    pub flattened: Vec<WallId>,
}

/// The wall graph plus the tables needed to map edges back to walls.
#[derive(Debug)]
pub struct WallGraph {
    pub graph: PlanarGraph,
    /// Straight walls that make up the graph, curved walls already flattened.
    pub walls: Vec<Wall>,
    /// Index into `walls` of the first wall on each edge.
    pub(crate) edges: HashMap<(VertexId, VertexId), usize>,
    pub report: BuildReport,
}

impl WallGraph {
    /// The wall that produced the edge between `a` and `b`, in either order.
    #[must_use]
    pub fn wall_between(&self, a: VertexId, b: VertexId) -> Option<&Wall> {
        self.edges.get(&edge_key(a, b)).map(|&i| &self.walls[i])
    }
}

/// Builds the planar graph of a set of walls.
///
/// Endpoints are merged by the graph tolerance. Curved walls are flattened
/// into chains of straight pieces first. Walls that collapse to a single
/// vertex are skipped; walls that repeat an existing edge keep the first
/// wall's id.
#[derive(Debug)]
pub struct BuildGraph<'a> {
    walls: &'a [Wall],
    tolerance: f64,
    flatten: FlattenParams,
}

impl<'a> BuildGraph<'a> {
    /// Creates a new graph build over `walls`.
    #[must_use]
    pub fn new(walls: &'a [Wall]) -> Self {
        Self {
            walls,
            tolerance: crate::math::VERTEX_TOLERANCE,
            flatten: FlattenParams::default(),
        }
    }

    /// Sets the endpoint merge tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the parameters used to flatten curved walls.
    #[must_use]
    pub fn with_flatten_params(mut self, params: FlattenParams) -> Self {
        self.flatten = params;
        self
    }

    /// Executes the build.
    ///
    /// # Errors
    ///
    /// Returns an error if a curved wall cannot be flattened with the
    /// configured parameters.
    pub fn execute(&self) -> Result<WallGraph> {
        let mut report = BuildReport::default();
        let mut straight = Vec::with_capacity(self.walls.len());

        for wall in self.walls {
            match wall.control() {
                Some(control) => {
                    let points = FlattenQuadratic::new(wall.start(), control, wall.end())
                        .with_params(self.flatten)
                        .execute()?;
                    debug!(wall = %wall.id(), pieces = points.len() - 1, "flattened curved wall");
                    straight.extend(
                        points
                            .windows(2)
                            .map(|w| Wall::flattened_piece(wall, w[0], w[1])),
                    );
                    report.flattened.push(wall.id());
                }
                None => straight.push(wall.clone()),
            }
        }

        let mut graph = PlanarGraph::new(self.tolerance);
        let mut edges = HashMap::with_capacity(straight.len());

        for (index, wall) in straight.iter().enumerate() {
            // A collapsed wall must not register a vertex that later
            // endpoints would merge into.
            if wall.parent().is_none()
                && points_coincide(&wall.start(), &wall.end(), self.tolerance)
            {
                warn!(wall = %wall.id(), "skipping wall with coincident endpoints");
                report.degenerate.push(wall.id());
                continue;
            }
            let a = graph.get_or_create_vertex(wall.start());
            let b = graph.get_or_create_vertex(wall.end());
            if a == b {
                // Flattened pieces shorter than the tolerance collapse here;
                // their neighbors already share the merged vertex. A straight
                // wall lands here only when both ends snap to one vertex.
                if wall.parent().is_none() {
                    warn!(wall = %wall.id(), "skipping wall that merges into one vertex");
                    report.degenerate.push(wall.id());
                }
                continue;
            }
            if graph.connect(a, b)? {
                edges.insert(edge_key(a, b), index);
            } else {
                warn!(wall = %wall.id(), "wall repeats an existing edge");
                report.duplicates.push(wall.id());
            }
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "built wall graph"
        );

        Ok(WallGraph {
            graph,
            walls: straight,
            edges,
            report,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn wall(id: i64, a: (f64, f64), b: (f64, f64)) -> Wall {
        Wall::straight(WallId(id), Point2::new(a.0, a.1), Point2::new(b.0, b.1))
    }

    #[test]
    fn square_shares_corners() {
        let walls = vec![
            wall(0, (0.0, 0.0), (1.0, 0.0)),
            wall(1, (1.0, 0.0), (1.0, 1.0)),
            wall(2, (1.0, 1.0), (0.0, 1.0)),
            wall(3, (0.0, 1.0), (0.0, 0.0)),
        ];
        let built = BuildGraph::new(&walls).execute().unwrap();
        assert_eq!(built.graph.vertex_count(), 4);
        assert_eq!(built.graph.edge_count(), 4);
        built.graph.check_symmetry().unwrap();
        assert_eq!(built.report, BuildReport::default());
    }

    #[test]
    fn endpoints_within_tolerance_merge() {
        let walls = vec![
            wall(0, (0.0, 0.0), (2.0, 0.0)),
            wall(1, (2.04, 0.03), (2.0, 2.0)),
        ];
        let built = BuildGraph::new(&walls).execute().unwrap();
        assert_eq!(built.graph.vertex_count(), 3);
        let corner = built.graph.find_vertex(&Point2::new(2.0, 0.0)).unwrap();
        assert_eq!(built.graph.degree(corner), 2);
    }

    #[test]
    fn degenerate_wall_is_skipped() {
        let walls = vec![
            wall(0, (0.0, 0.0), (1.0, 0.0)),
            wall(5, (3.0, 3.0), (3.02, 3.01)),
        ];
        let built = BuildGraph::new(&walls).execute().unwrap();
        assert_eq!(built.report.degenerate, vec![WallId(5)]);
        assert_eq!(built.graph.edge_count(), 1);
        // The collapsed wall leaves no vertex behind.
        assert_eq!(built.graph.vertex_count(), 2);
        assert!(built.graph.find_vertex(&Point2::new(3.0, 3.0)).is_none());
    }

    #[test]
    fn degenerate_wall_does_not_capture_later_endpoints() {
        let walls = vec![
            wall(99, (0.93, 0.0), (0.94, 0.0)),
            wall(0, (0.0, 0.0), (1.0, 0.0)),
            wall(1, (1.05, 0.0), (1.0, 1.0)),
        ];
        let built = BuildGraph::new(&walls).execute().unwrap();
        assert_eq!(built.report.degenerate, vec![WallId(99)]);
        let corner = built.graph.find_vertex(&Point2::new(1.0, 0.0)).unwrap();
        assert_eq!(built.graph.degree(corner), 2);
        assert_eq!(built.graph.vertex_count(), 3);
        built.graph.check_symmetry().unwrap();
    }

    #[test]
    fn duplicate_wall_keeps_first_id() {
        let walls = vec![
            wall(0, (0.0, 0.0), (1.0, 0.0)),
            wall(9, (1.0, 0.0), (0.0, 0.0)),
        ];
        let built = BuildGraph::new(&walls).execute().unwrap();
        assert_eq!(built.report.duplicates, vec![WallId(9)]);
        let a = built.graph.find_vertex(&Point2::new(0.0, 0.0)).unwrap();
        let b = built.graph.find_vertex(&Point2::new(1.0, 0.0)).unwrap();
        assert_eq!(built.wall_between(b, a).unwrap().id(), WallId(0));
    }

    #[test]
    fn curved_wall_becomes_chain() {
        let walls = vec![Wall::curved(
            WallId(4),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 0.0),
        )
        .with_section(0.2, 2.5)];
        let built = BuildGraph::new(&walls)
            .with_flatten_params(FlattenParams {
                min_chord_length: 0.5,
                max_segments: 100,
            })
            .execute()
            .unwrap();
        assert_eq!(built.report.flattened, vec![WallId(4)]);
        assert!(built.walls.len() >= 2);
        assert!(built.walls.iter().all(|w| !w.is_curved() && w.parent() == Some(WallId(4))));
        assert_eq!(built.graph.edge_count(), built.walls.len());
        assert_eq!(built.graph.vertex_count(), built.walls.len() + 1);
        built.graph.check_symmetry().unwrap();
    }
}
