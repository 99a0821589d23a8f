mod half_edge;
mod vertex;

pub use half_edge::{HalfEdgeData, HalfEdgeId};
pub use vertex::{VertexData, VertexId};

use std::cmp::Ordering;

use crate::error::{OperationError, Result, TopologyError};
use crate::math::angle_2d::ccw_sweep_cmp;
use crate::math::{points_coincide, Point2, Vector2, VERTEX_TOLERANCE};
use slotmap::SlotMap;

/// Undirected planar graph of wall endpoints.
///
/// Vertices and half-edges live in generational arenas and reference each
/// other by ID. Vertices closer than the merge tolerance are the same
/// vertex. Each vertex keeps its outgoing half-edges in counter-clockwise
/// order, which is the rotation system used to walk face boundaries.
#[derive(Debug)]
pub struct PlanarGraph {
    vertices: SlotMap<VertexId, VertexData>,
    half_edges: SlotMap<HalfEdgeId, HalfEdgeData>,
    tolerance: f64,
}

impl Default for PlanarGraph {
    fn default() -> Self {
        Self::new(VERTEX_TOLERANCE)
    }
}

impl PlanarGraph {
    /// Creates an empty graph that merges points closer than `tolerance`.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            vertices: SlotMap::with_key(),
            half_edges: SlotMap::with_key(),
            tolerance,
        }
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    // --- Vertex operations ---

    /// Returns the first vertex within tolerance of `point`.
    #[must_use]
    pub fn find_vertex(&self, point: &Point2) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|(_, v)| points_coincide(&v.point, point, self.tolerance))
            .map(|(id, _)| id)
    }

    /// Returns the vertex within tolerance of `point`, creating it if needed.
    pub fn get_or_create_vertex(&mut self, point: Point2) -> VertexId {
        match self.find_vertex(&point) {
            Some(id) => id,
            None => self.vertices.insert(VertexData::new(point)),
        }
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex has been removed.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound(format!("vertex {id:?}")).into())
    }

    /// Position of a vertex, if it still exists.
    #[must_use]
    pub fn point(&self, id: VertexId) -> Option<Point2> {
        self.vertices.get(id).map(|v| v.point)
    }

    #[must_use]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(id)
    }

    /// Number of edges incident to `id`; zero for a removed vertex.
    #[must_use]
    pub fn degree(&self, id: VertexId) -> usize {
        self.vertices.get(id).map_or(0, VertexData::degree)
    }

    /// Vertices adjacent to `id`, in counter-clockwise order.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .get(id)
            .map(|v| v.outgoing.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&he| self.half_edges.get(he).map(|h| h.target))
    }

    /// Iterates over all live vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Removes a vertex together with every edge touching it.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<VertexData> {
        let outgoing = self.vertices.get(id)?.outgoing.clone();
        for he in outgoing {
            self.remove_edge(he);
        }
        self.vertices.remove(id)
    }

    // --- Edge operations ---

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.half_edges.len() / 2
    }

    /// Returns a reference to the half-edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge has been removed.
    pub fn half_edge(&self, id: HalfEdgeId) -> Result<&HalfEdgeData> {
        self.half_edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound(format!("half-edge {id:?}")).into())
    }

    /// The half-edge leaving `from` towards `to`, if the two are adjacent.
    #[must_use]
    pub fn half_edge_between(&self, from: VertexId, to: VertexId) -> Option<HalfEdgeId> {
        self.vertices.get(from)?.outgoing.iter().copied().find(|&he| {
            self.half_edges.get(he).is_some_and(|h| h.target == to)
        })
    }

    /// Returns `true` if `a` and `b` share an edge.
    #[must_use]
    pub fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        self.half_edge_between(a, b).is_some()
    }

    /// Vector from the origin to the target of a half-edge.
    #[must_use]
    pub fn direction(&self, id: HalfEdgeId) -> Option<Vector2> {
        let he = self.half_edges.get(id)?;
        Some(self.point(he.target)? - self.point(he.origin)?)
    }

    /// Connects two vertices. Connecting an already adjacent pair is a no-op.
    ///
    /// Returns `true` if a new edge was created.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `a == b`, or
    /// `TopologyError::EntityNotFound` if either vertex does not exist.
    pub fn connect(&mut self, a: VertexId, b: VertexId) -> Result<bool> {
        if a == b {
            return Err(OperationError::InvalidInput(
                "cannot connect a vertex to itself".to_owned(),
            )
            .into());
        }
        self.vertex(a)?;
        self.vertex(b)?;
        if self.are_adjacent(a, b) {
            return Ok(false);
        }

        let ab = self.half_edges.insert(HalfEdgeData {
            origin: a,
            target: b,
            twin: HalfEdgeId::default(),
        });
        let ba = self.half_edges.insert(HalfEdgeData {
            origin: b,
            target: a,
            twin: ab,
        });
        if let Some(he) = self.half_edges.get_mut(ab) {
            he.twin = ba;
        }

        self.insert_outgoing(a, ab);
        self.insert_outgoing(b, ba);
        Ok(true)
    }

    /// Removes the edge between `a` and `b` from both sides.
    ///
    /// Returns `true` if an edge was removed.
    pub fn disconnect(&mut self, a: VertexId, b: VertexId) -> bool {
        match self.half_edge_between(a, b) {
            Some(he) => {
                self.remove_edge(he);
                true
            }
            None => false,
        }
    }

    /// The half-edge that follows `id` along the boundary of the face on its
    /// right: the first outgoing half-edge counter-clockwise from `id`'s twin.
    ///
    /// At a dead end the twin itself is returned, so a walk turns back.
    #[must_use]
    pub fn next_in_face(&self, id: HalfEdgeId) -> Option<HalfEdgeId> {
        let he = self.half_edges.get(id)?;
        let out = &self.vertices.get(he.target)?.outgoing;
        let idx = out.iter().position(|&o| o == he.twin)?;
        Some(out[(idx + 1) % out.len()])
    }

    /// Verifies that adjacency is symmetric and the rotation order is intact.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidTopology` describing the first
    /// violation found.
    pub fn check_symmetry(&self) -> Result<()> {
        for (id, he) in &self.half_edges {
            let twin = self.half_edge(he.twin)?;
            if twin.twin != id || twin.origin != he.target || twin.target != he.origin {
                return Err(invalid(format!("half-edge {id:?} and its twin disagree")));
            }
            let listed = self
                .vertex(he.origin)?
                .outgoing
                .iter()
                .filter(|&&o| o == id)
                .count();
            if listed != 1 {
                return Err(invalid(format!(
                    "half-edge {id:?} listed {listed} times at its origin"
                )));
            }
        }

        for (vid, v) in &self.vertices {
            let mut targets = Vec::with_capacity(v.outgoing.len());
            for &he in &v.outgoing {
                let data = self.half_edge(he)?;
                if data.origin != vid {
                    return Err(invalid(format!("vertex {vid:?} lists a foreign half-edge")));
                }
                if targets.contains(&data.target) {
                    return Err(invalid(format!("vertex {vid:?} has a doubled edge")));
                }
                targets.push(data.target);
            }
            for pair in v.outgoing.windows(2) {
                if self.rotation_cmp(pair[0], pair[1]) == Ordering::Greater {
                    return Err(invalid(format!("vertex {vid:?} rotation is out of order")));
                }
            }
        }
        Ok(())
    }

    fn remove_edge(&mut self, id: HalfEdgeId) {
        let Some(he) = self.half_edges.remove(id) else {
            return;
        };
        self.half_edges.remove(he.twin);
        if let Some(v) = self.vertices.get_mut(he.origin) {
            v.outgoing.retain(|&o| o != id);
        }
        if let Some(v) = self.vertices.get_mut(he.target) {
            v.outgoing.retain(|&o| o != he.twin);
        }
    }

    fn insert_outgoing(&mut self, vertex: VertexId, he: HalfEdgeId) {
        let pos = match self.vertices.get(vertex) {
            Some(v) => v
                .outgoing
                .partition_point(|&o| self.rotation_cmp(o, he) != Ordering::Greater),
            None => return,
        };
        if let Some(v) = self.vertices.get_mut(vertex) {
            v.outgoing.insert(pos, he);
        }
    }

    /// Counter-clockwise order of two half-edges sharing an origin.
    fn rotation_cmp(&self, a: HalfEdgeId, b: HalfEdgeId) -> Ordering {
        let east = Vector2::new(1.0, 0.0);
        match (self.direction(a), self.direction(b)) {
            (Some(da), Some(db)) => ccw_sweep_cmp(&east, &da, &db),
            _ => Ordering::Equal,
        }
    }
}

fn invalid(msg: String) -> crate::error::RoomgraphError {
    TopologyError::InvalidTopology(msg).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn nearby_points_merge() {
        let mut g = PlanarGraph::default();
        let a = g.get_or_create_vertex(p(1.0, 1.0));
        let b = g.get_or_create_vertex(p(1.05, 0.98));
        let c = g.get_or_create_vertex(p(1.2, 1.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn connect_is_symmetric_and_idempotent() {
        let mut g = PlanarGraph::default();
        let a = g.get_or_create_vertex(p(0.0, 0.0));
        let b = g.get_or_create_vertex(p(1.0, 0.0));
        assert!(g.connect(a, b).unwrap());
        assert!(!g.connect(b, a).unwrap());
        assert_eq!(g.degree(a), 1);
        assert_eq!(g.degree(b), 1);
        assert_eq!(g.edge_count(), 1);
        assert!(g.are_adjacent(a, b));
        assert!(g.are_adjacent(b, a));
        g.check_symmetry().unwrap();
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut g = PlanarGraph::default();
        let a = g.get_or_create_vertex(p(0.0, 0.0));
        assert!(g.connect(a, a).is_err());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn disconnect_removes_both_sides() {
        let mut g = PlanarGraph::default();
        let a = g.get_or_create_vertex(p(0.0, 0.0));
        let b = g.get_or_create_vertex(p(1.0, 0.0));
        let c = g.get_or_create_vertex(p(0.0, 1.0));
        g.connect(a, b).unwrap();
        g.connect(a, c).unwrap();
        assert!(g.disconnect(b, a));
        assert!(!g.disconnect(a, b));
        assert_eq!(g.degree(a), 1);
        assert_eq!(g.degree(b), 0);
        assert!(!g.are_adjacent(a, b));
        assert!(!g.are_adjacent(b, a));
        g.check_symmetry().unwrap();
    }

    #[test]
    fn remove_vertex_drops_incident_edges() {
        let mut g = PlanarGraph::default();
        let hub = g.get_or_create_vertex(p(0.0, 0.0));
        let spokes: Vec<_> = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)]
            .iter()
            .map(|&(x, y)| g.get_or_create_vertex(p(x, y)))
            .collect();
        for &s in &spokes {
            g.connect(hub, s).unwrap();
        }
        g.remove_vertex(hub).unwrap();
        assert!(!g.contains_vertex(hub));
        assert_eq!(g.edge_count(), 0);
        assert!(spokes.iter().all(|&s| g.degree(s) == 0));
        g.check_symmetry().unwrap();
    }

    #[test]
    fn outgoing_edges_are_sorted_counter_clockwise() {
        let mut g = PlanarGraph::default();
        let hub = g.get_or_create_vertex(p(0.0, 0.0));
        // Inserted out of angular order on purpose.
        let south = g.get_or_create_vertex(p(0.0, -1.0));
        let north = g.get_or_create_vertex(p(0.0, 1.0));
        let east = g.get_or_create_vertex(p(1.0, 0.0));
        let west = g.get_or_create_vertex(p(-1.0, 0.0));
        for v in [south, north, east, west] {
            g.connect(hub, v).unwrap();
        }
        let order: Vec<_> = g.neighbors(hub).collect();
        assert_eq!(order, vec![north, west, south, east]);
        g.check_symmetry().unwrap();
    }

    #[test]
    fn next_in_face_turns_to_first_ccw_edge() {
        let mut g = PlanarGraph::default();
        let a = g.get_or_create_vertex(p(0.0, 1.0));
        let hub = g.get_or_create_vertex(p(0.0, 0.0));
        let west = g.get_or_create_vertex(p(-1.0, 0.0));
        let east = g.get_or_create_vertex(p(1.0, 0.0));
        g.connect(a, hub).unwrap();
        g.connect(hub, west).unwrap();
        g.connect(hub, east).unwrap();

        // Heading south into the hub, the face on the right continues west.
        let incoming = g.half_edge_between(a, hub).unwrap();
        let next = g.next_in_face(incoming).unwrap();
        assert_eq!(g.half_edge(next).unwrap().target, west);
    }

    #[test]
    fn next_in_face_turns_back_at_dead_end() {
        let mut g = PlanarGraph::default();
        let a = g.get_or_create_vertex(p(0.0, 0.0));
        let b = g.get_or_create_vertex(p(1.0, 0.0));
        g.connect(a, b).unwrap();
        let ab = g.half_edge_between(a, b).unwrap();
        let next = g.next_in_face(ab).unwrap();
        assert_eq!(next, g.half_edge(ab).unwrap().twin);
    }

    #[test]
    fn symmetry_holds_after_mixed_mutations() {
        let mut g = PlanarGraph::default();
        let ids: Vec<_> = (0..6)
            .map(|i| g.get_or_create_vertex(p(f64::from(i % 3), f64::from(i / 3))))
            .collect();
        for w in ids.windows(2) {
            g.connect(w[0], w[1]).unwrap();
        }
        g.connect(ids[0], ids[3]).unwrap();
        g.connect(ids[1], ids[4]).unwrap();
        g.check_symmetry().unwrap();
        g.disconnect(ids[1], ids[4]);
        g.remove_vertex(ids[5]);
        g.connect(ids[2], ids[4]).unwrap();
        g.check_symmetry().unwrap();
        for (id, _) in g.vertices() {
            for n in g.neighbors(id) {
                assert!(g.neighbors(n).any(|m| m == id));
            }
        }
    }
}
