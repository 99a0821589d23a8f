use crate::error::{Result, TopologyError};
use crate::geometry::{Wall, WallId};

use super::build::WallGraph;
use super::trace::Cycle;

/// Maps a traced cycle back to the ids of the walls along it.
///
/// Consecutive pieces of the same flattened curve report the curve once,
/// including a run split across the start of the cycle.
///
/// # Errors
///
/// Returns `TopologyError::UnresolvedWall` if a cycle edge has no wall.
pub fn resolve_cycle(cycle: &Cycle, walls: &WallGraph) -> Result<Vec<WallId>> {
    let n = cycle.vertices.len();
    let mut along: Vec<&Wall> = Vec::with_capacity(n);
    for i in 0..n {
        let j = (i + 1) % n;
        let wall = walls
            .wall_between(cycle.vertices[i], cycle.vertices[j])
            .ok_or_else(|| TopologyError::UnresolvedWall {
                from: (cycle.points[i].x, cycle.points[i].y),
                to: (cycle.points[j].x, cycle.points[j].y),
            })?;
        along.push(wall);
    }

    let mut runs: Vec<(WallId, Option<WallId>)> = Vec::with_capacity(n);
    for wall in along {
        if let (Some(&(_, Some(prev))), Some(parent)) = (runs.last(), wall.parent()) {
            if prev == parent {
                continue;
            }
        }
        runs.push((wall.id(), wall.parent()));
    }
    if runs.len() > 1 {
        if let (Some(&(_, Some(first))), Some(&(_, Some(last)))) = (runs.first(), runs.last()) {
            if first == last {
                runs.pop();
            }
        }
    }

    Ok(runs.into_iter().map(|(id, _)| id).collect())
}
