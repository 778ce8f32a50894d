//! Polyline construction for search results.

use lane_core::{GridCell, GridMapper, WorldPoint};

/// The two-point segment every non-reachable result falls back to.
#[inline]
pub fn straight_line(start: WorldPoint, goal: WorldPoint) -> Vec<WorldPoint> {
    vec![start, goal]
}

/// `start`, the centers of `interior` cells, then `goal`.
///
/// The caller guarantees `interior` excludes the start and goal cells, so
/// no cell appears twice.
pub(crate) fn through_cells(
    mapper: &GridMapper,
    start: WorldPoint,
    interior: &[GridCell],
    goal: WorldPoint,
) -> Vec<WorldPoint> {
    let mut points = Vec::with_capacity(interior.len() + 2);
    points.push(start);
    points.extend(interior.iter().map(|&c| mapper.grid_to_world(c)));
    points.push(goal);
    points
}
