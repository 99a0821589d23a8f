use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::math::angle_2d::cw_sweep_cmp;
use crate::math::polygon_2d::is_left_bottom_of;
use crate::math::{Point2, Vector2};
use crate::topology::{HalfEdgeId, PlanarGraph, VertexId};

/// A closed boundary of a minimal face.
///
/// Consecutive vertices are adjacent and the last vertex connects back to
/// the first. No vertex appears twice.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    pub vertices: Vec<VertexId>,
    /// Positions of `vertices`, captured before the graph is consumed.
    pub points: Vec<Point2>,
}

/// Extracts every minimal bounded face of a planar graph.
///
/// Each round starts at the leftmost-bottom vertex, walks the face to the
/// right of its steepest outgoing edge, collapses detours through junctions,
/// then removes that first edge and strips any filaments left behind. The
/// graph is consumed: it is empty when `execute` returns successfully.
#[derive(Debug, Clone, Copy)]
pub struct MinimalCycles {
    iteration_factor: usize,
}

impl Default for MinimalCycles {
    fn default() -> Self {
        Self::new()
    }
}

impl MinimalCycles {
    /// Creates a new cycle extraction with the default iteration guard.
    #[must_use]
    pub fn new() -> Self {
        Self {
            iteration_factor: 4,
        }
    }

    /// Caps the number of rounds at `factor * (edges + 1)`.
    #[must_use]
    pub fn with_iteration_factor(mut self, factor: usize) -> Self {
        self.iteration_factor = factor.max(1);
        self
    }

    /// Executes the extraction, consuming `graph`.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::StuckTraversal` if a walk reaches a vertex with
    /// no way forward, or `TopologyError::IterationLimit` if a walk or the
    /// outer loop fails to terminate.
    pub fn execute(&self, graph: &mut PlanarGraph) -> Result<Vec<Cycle>> {
        let initial: Vec<VertexId> = graph.vertices().map(|(id, _)| id).collect();
        let mut pruned = 0;
        for v in initial {
            pruned += remove_filament_at(graph, v);
        }
        if pruned > 0 {
            debug!(pruned, "stripped filaments before tracing");
        }

        let limit = self.iteration_factor * (graph.edge_count() + 1);
        let mut cycles = Vec::new();
        let mut rounds = 0;

        while let Some(start) = left_bottom_vertex(graph) {
            rounds += 1;
            if rounds > limit {
                return Err(TopologyError::IterationLimit { limit }.into());
            }
            if let Some(cycle) = trace_round(graph, start)? {
                cycles.push(cycle);
            }
        }

        Ok(cycles)
    }
}

/// Walks the face at `start`, then consumes the walk's first edge and the
/// filaments it leaves behind. Returns the face if it bounds an area.
fn trace_round(graph: &mut PlanarGraph, start: VertexId) -> Result<Option<Cycle>> {
    let step_limit = 2 * graph.edge_count() + 1;
    let walk = closed_walk_from(graph, start, step_limit)?;
    let (first, second) = (walk[0], walk[1]);
    let reduced = reduce_walk(walk);

    let cycle = if reduced.len() > 2 {
        let points = reduced
            .iter()
            .map(|&v| graph.point(v))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| TopologyError::EntityNotFound("cycle vertex".to_owned()))?;
        debug!(len = reduced.len(), "found minimal cycle");
        Some(Cycle {
            vertices: reduced,
            points,
        })
    } else {
        None
    };

    graph.disconnect(first, second);
    remove_filament_at(graph, first);
    remove_filament_at(graph, second);
    Ok(cycle)
}

/// The remaining vertex with the smallest x, ties broken by smallest y.
fn left_bottom_vertex(graph: &PlanarGraph) -> Option<VertexId> {
    graph
        .vertices()
        .reduce(|best, cand| {
            if is_left_bottom_of(&cand.1.point, &best.1.point) {
                cand
            } else {
                best
            }
        })
        .map(|(id, _)| id)
}

/// Walks from `start` along one face boundary until it returns to `start`.
///
/// The first edge is the first one met turning clockwise from straight down,
/// which at the leftmost-bottom vertex is the steepest edge upward. From
/// there every step takes the next edge counter-clockwise from the edge just
/// arrived on, so the walk keeps the face on its right. Fails once the walk
/// holds more than `step_limit` vertices.
fn closed_walk_from(
    graph: &PlanarGraph,
    start: VertexId,
    step_limit: usize,
) -> Result<Vec<VertexId>> {
    let stuck = |v: VertexId, walk_len: usize| {
        let (x, y) = graph.point(v).map_or((f64::NAN, f64::NAN), |p| (p.x, p.y));
        TopologyError::StuckTraversal {
            vertex: format!("{v:?}"),
            x,
            y,
            walk_len,
        }
    };

    let down = Vector2::new(0.0, -1.0);
    let outgoing = graph.vertex(start)?.outgoing();
    let first = outgoing
        .iter()
        .copied()
        .filter_map(|he| graph.direction(he).map(|d| (he, d)))
        .min_by(|a, b| cw_sweep_cmp(&down, &a.1, &b.1))
        .map(|(he, _)| he)
        .ok_or_else(|| stuck(start, 0))?;

    let mut walk = vec![start];
    let mut he: HalfEdgeId = first;

    loop {
        let current = graph.half_edge(he)?.target;
        if current == start {
            return Ok(walk);
        }
        walk.push(current);
        if walk.len() > step_limit {
            return Err(TopologyError::IterationLimit { limit: step_limit }.into());
        }
        he = graph
            .next_in_face(he)
            .ok_or_else(|| stuck(current, walk.len()))?;
    }
}

/// Collapses detours so no vertex appears twice.
///
/// Finds the earliest position that repeats an earlier vertex and drops
/// everything after the first occurrence up to and including the repeat.
/// Repeats until the walk is simple.
fn reduce_walk(mut walk: Vec<VertexId>) -> Vec<VertexId> {
    loop {
        let mut seen: HashMap<VertexId, usize> = HashMap::with_capacity(walk.len());
        let mut repeat = None;
        for (k, &v) in walk.iter().enumerate() {
            if let Some(&i) = seen.get(&v) {
                repeat = Some((i, k));
                break;
            }
            seen.insert(v, k);
        }
        match repeat {
            Some((i, k)) => {
                walk.drain(i + 1..=k);
            }
            None => return walk,
        }
    }
}

/// Strips the dangling chain that starts at `v`, if any.
///
/// Removes `v` while it has fewer than two neighbors and continues with its
/// last neighbor. Returns the number of vertices removed.
fn remove_filament_at(graph: &mut PlanarGraph, v: VertexId) -> usize {
    let mut removed = 0;
    let mut current = Some(v);
    while let Some(c) = current {
        if !graph.contains_vertex(c) || graph.degree(c) >= 2 {
            break;
        }
        current = graph.neighbors(c).next();
        graph.remove_vertex(c);
        removed += 1;
    }
    removed
}
