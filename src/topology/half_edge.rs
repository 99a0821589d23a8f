use super::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a half-edge in the planar graph.
    pub struct HalfEdgeId;
}

/// One direction of an undirected edge.
///
/// Every edge is stored as two half-edges that point at each other through
/// `twin`; removing an edge always removes both.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdgeData {
    /// Vertex this half-edge leaves from.
    pub origin: VertexId,
    /// Vertex this half-edge arrives at.
    pub target: VertexId,
    /// The opposite half-edge of the same edge.
    pub twin: HalfEdgeId,
}
