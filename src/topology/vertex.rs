use super::HalfEdgeId;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the planar graph.
    pub struct VertexId;
}

/// Data associated with a graph vertex.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The position of the vertex.
    pub point: Point2,
    /// Half-edges leaving this vertex, sorted counter-clockwise by direction
    /// starting just above the +x axis.
    pub(crate) outgoing: Vec<HalfEdgeId>,
}

impl VertexData {
    /// Creates a new isolated vertex at the given point.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            outgoing: Vec::new(),
        }
    }

    /// Half-edges leaving this vertex in counter-clockwise order.
    #[must_use]
    pub fn outgoing(&self) -> &[HalfEdgeId] {
        &self.outgoing
    }

    /// Number of edges incident to this vertex.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.outgoing.len()
    }
}
