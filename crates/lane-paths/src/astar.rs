//! Bounded A* lane search.
//!
//! Each call rasterizes its own [`NavGrid`], searches it with 8-way moves and
//! a Euclidean heuristic, then classifies the outcome. Nothing is cached
//! between calls.

use std::collections::BinaryHeap;

use lane_core::{GridCell, GridMapper, WorldPoint};
use log::{debug, trace, warn};

use crate::config::{DEFAULT_MAX_VISITED, FallbackPolicy};
use crate::distance::{euclidean, step_cost};
use crate::fallback::{straight_line, through_cells};
use crate::navgrid::NavGrid;
use crate::node::{NO_PARENT, Node, OpenEntry};
use crate::request::PathRequest;
use crate::result::{BlockedCause, PathResult};

/// Route `request.start` to `request.goal` around the request's colliders.
///
/// Always returns a polyline of at least two points; see [`PathResult`].
pub fn search(request: &PathRequest<'_>) -> PathResult {
    search_with_grid(request).1
}

/// Like [`search`], also handing back the rasterized grid.
///
/// The grid is `None` when the request was rejected before rasterization.
pub fn search_with_grid(request: &PathRequest<'_>) -> (Option<NavGrid>, PathResult) {
    trace!(
        "lane search: start={} goal={} colliders={} bounds={} resolution={}",
        request.start,
        request.goal,
        request.colliders.len(),
        request.world_bounds,
        request.resolution
    );

    let mapper = match request.validate() {
        Ok(m) => m,
        Err(err) => {
            warn!("lane search rejected: {err}");
            let (start, goal) = request.sanitized_endpoints();
            let result = PathResult::Blocked {
                points: straight_line(start, goal),
                cause: BlockedCause::InvalidRequest(err),
                visited: 0,
            };
            return (None, result);
        }
    };

    let start_cell = mapper.world_to_grid(request.start);
    let goal_cell = mapper.world_to_grid(request.goal);
    let grid = NavGrid::build(mapper, request.colliders, &[start_cell, goal_cell]);
    let budget = request.max_visited.unwrap_or(DEFAULT_MAX_VISITED);

    let mut lane = LaneSearch::new(&grid, start_cell, goal_cell);
    let outcome = lane.run(budget);
    let result = lane.classify(outcome, request);
    debug!(
        "lane search: {} after {} visited, {} points",
        result.state(),
        result.visited(),
        result.points().len()
    );
    (Some(grid), result)
}

/// How the main loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Found,
    Exhausted,
    Abandoned,
}

/// Request-scoped A* state over one grid.
struct LaneSearch<'g> {
    grid: &'g NavGrid,
    nodes: Vec<Node>,
    open: BinaryHeap<OpenEntry>,
    seq: u64,
    start_idx: usize,
    goal_idx: usize,
    goal: GridCell,
    visited: usize,
    // Dequeued cell closest to the goal, for the partial fallback.
    best_idx: usize,
    best_h: f64,
}

impl<'g> LaneSearch<'g> {
    fn new(grid: &'g NavGrid, start: GridCell, goal: GridCell) -> Self {
        let mapper = grid.mapper();
        // Both cells come from world_to_grid, which clamps onto the grid.
        let start_idx = mapper.index(start).unwrap_or(0);
        let goal_idx = mapper.index(goal).unwrap_or(0);
        Self {
            grid,
            nodes: vec![Node::default(); mapper.len()],
            open: BinaryHeap::new(),
            seq: 0,
            start_idx,
            goal_idx,
            goal,
            visited: 0,
            best_idx: start_idx,
            best_h: f64::INFINITY,
        }
    }

    #[inline]
    fn mapper(&self) -> &GridMapper {
        self.grid.mapper()
    }

    fn push(&mut self, idx: usize, g: f64, h: f64) {
        self.open.push(OpenEntry {
            idx,
            f: g + h,
            h,
            seq: self.seq,
        });
        self.seq += 1;
    }

    fn run(&mut self, budget: usize) -> Outcome {
        let start = self.mapper().cell(self.start_idx);
        self.nodes[self.start_idx].g = 0.0;
        self.push(self.start_idx, 0.0, euclidean(start, self.goal));

        loop {
            let Some(current) = self.open.pop() else {
                return Outcome::Exhausted;
            };
            let ci = current.idx;

            // Stale entry left behind by a later improvement.
            if self.nodes[ci].closed {
                continue;
            }
            self.nodes[ci].closed = true;
            self.visited += 1;

            if ci == self.goal_idx {
                return Outcome::Found;
            }
            if current.h < self.best_h {
                self.best_h = current.h;
                self.best_idx = ci;
            }
            if self.visited > budget {
                return Outcome::Abandoned;
            }

            self.expand(ci);
        }
    }

    fn expand(&mut self, ci: usize) {
        let cell = self.mapper().cell(ci);
        let current_g = self.nodes[ci].g;

        for n in cell.neighbors_8() {
            let Some(ni) = self.mapper().index(n) else {
                continue;
            };
            if self.grid.blocked_at(ni) || self.nodes[ni].closed {
                continue;
            }
            let tentative_g = current_g + step_cost(cell, n);
            if tentative_g >= self.nodes[ni].g {
                continue;
            }
            let node = &mut self.nodes[ni];
            node.g = tentative_g;
            node.parent = ci;
            let h = euclidean(n, self.goal);
            self.push(ni, tentative_g, h);
        }
    }

    /// Cells from the start to `idx`, inclusive, by parent links.
    fn trace_back(&self, idx: usize) -> Vec<GridCell> {
        let mut cells = Vec::new();
        let mut ci = idx;
        while ci != NO_PARENT {
            cells.push(self.mapper().cell(ci));
            ci = self.nodes[ci].parent;
        }
        cells.reverse();
        cells
    }

    fn fallback_points(&self, request: &PathRequest<'_>) -> Vec<WorldPoint> {
        match request.fallback {
            FallbackPolicy::StraightLine => straight_line(request.start, request.goal),
            FallbackPolicy::BestPartial => {
                let cells = self.trace_back(self.best_idx);
                let interior = cells.get(1..).unwrap_or(&[]);
                through_cells(self.mapper(), request.start, interior, request.goal)
            }
        }
    }

    fn classify(&self, outcome: Outcome, request: &PathRequest<'_>) -> PathResult {
        let visited = self.visited;
        match outcome {
            Outcome::Found => {
                let cells = self.trace_back(self.goal_idx);
                let interior = match cells.len() {
                    0..=2 => &[][..],
                    n => &cells[1..n - 1],
                };
                PathResult::Reachable {
                    points: through_cells(self.mapper(), request.start, interior, request.goal),
                    cost: self.nodes[self.goal_idx].g * self.mapper().resolution(),
                    visited,
                }
            }
            Outcome::Exhausted => PathResult::Blocked {
                points: self.fallback_points(request),
                cause: BlockedCause::Unreachable,
                visited,
            },
            Outcome::Abandoned => PathResult::Unstable {
                points: self.fallback_points(request),
                visited,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{Endpoint, RequestError};
    use crate::result::PathState;
    use approx::assert_relative_eq;
    use lane_core::{ColliderKind, GridError, StaticCollider};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn wp(x: f64, z: f64) -> WorldPoint {
        WorldPoint::new(x, z)
    }

    fn wall(x0: f64, z0: f64, x1: f64, z1: f64) -> StaticCollider {
        StaticCollider::wall_between(wp(x0, z0), wp(x1, z1))
    }

    fn assert_no_repeated_cells(result: &PathResult, mapper: &GridMapper) {
        let cells: Vec<_> = result
            .points()
            .iter()
            .map(|&p| mapper.world_to_grid(p))
            .collect();
        let unique: HashSet<_> = cells.iter().copied().collect();
        assert_eq!(unique.len(), cells.len(), "repeated cell in {cells:?}");
    }

    /// Wall along z at x in [0, 1], open only in the top row.
    fn detour_wall() -> Vec<StaticCollider> {
        vec![wall(0.0, -12.0, 1.0, 11.0)]
    }

    #[test]
    fn empty_world_is_reachable() {
        let goals = [wp(0.0, 0.0), wp(-8.7, 3.2), wp(5.0, -5.0), wp(8.9, 8.9)];
        for goal in goals {
            let r = search(&PathRequest::new(wp(-8.0, -8.0), goal, &[], 9.0));
            assert_eq!(r.state(), PathState::Reachable);
            assert!(r.points().len() >= 2);
            assert_eq!(r.points()[0], wp(-8.0, -8.0));
            assert_eq!(*r.points().last().unwrap(), goal);
        }
    }

    #[test]
    fn open_space_diagonal_route() {
        let req = PathRequest::new(wp(10.0, 10.0), wp(0.0, 0.0), &[], 20.0);
        let r = search(&req);
        assert_eq!(r.state(), PathState::Reachable);
        let pts = r.points();
        assert!(pts.len() > 1);
        assert_eq!(pts.len(), 11);
        assert_eq!(pts[1], wp(9.5, 9.5));
        assert_eq!(pts[9], wp(1.5, 1.5));
        let PathResult::Reachable { cost, .. } = r else {
            unreachable!()
        };
        assert_relative_eq!(cost, 10.0 * std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn straight_route_stays_in_row() {
        let r = search(&PathRequest::new(wp(-5.0, 0.0), wp(5.0, 0.0), &[], 9.0));
        assert!(r.is_reachable());
        let pts = r.points();
        assert_eq!(pts.len(), 11);
        for p in &pts[1..pts.len() - 1] {
            assert_eq!(p.z, 0.5);
        }
        let PathResult::Reachable { cost, .. } = r else {
            unreachable!()
        };
        assert_relative_eq!(cost, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn same_cell_endpoints_give_two_points() {
        let r = search(&PathRequest::new(wp(0.1, 0.1), wp(0.9, 0.4), &[], 9.0));
        assert_eq!(r.state(), PathState::Reachable);
        assert_eq!(r.points(), &[wp(0.1, 0.1), wp(0.9, 0.4)]);
        assert_eq!(r.visited(), 1);
    }

    #[test]
    fn parallel_walls_block_crossing() {
        // Walls along z at x in [-1, 0] and [1, 2] leave a one-cell corridor
        // between them that runs the full depth of the world.
        let walls = [wall(-1.0, -9.0, 0.0, 9.0), wall(1.0, -9.0, 2.0, 9.0)];
        let req = PathRequest::new(wp(-8.0, 0.0), wp(8.0, 0.0), &walls, 9.0);
        let (grid, r) = search_with_grid(&req);
        let grid = grid.unwrap();

        assert_ne!(r.state(), PathState::Reachable);
        assert_eq!(
            r,
            PathResult::Blocked {
                points: vec![wp(-8.0, 0.0), wp(8.0, 0.0)],
                cause: BlockedCause::Unreachable,
                visited: r.visited(),
            }
        );
        // The corridor itself only touches the walls and stays open.
        for gz in 0..18 {
            assert!(grid.is_walkable(GridCell::new(9, gz)));
            assert!(grid.is_blocked(GridCell::new(8, gz)));
            assert!(grid.is_blocked(GridCell::new(10, gz)));
        }
    }

    #[test]
    fn single_gap_in_wall_is_used() {
        let walls = [wall(0.0, -9.0, 1.0, 0.0), wall(0.0, 1.0, 1.0, 9.0)];
        let req = PathRequest::new(wp(-8.0, -6.0), wp(8.0, 6.0), &walls, 9.0);
        let r = search(&req);
        assert_eq!(r.state(), PathState::Reachable);
        assert!(r.points().contains(&wp(0.5, 0.5)));
        assert_no_repeated_cells(&r, &req.validate().unwrap());
    }

    #[test]
    fn small_budget_terminates() {
        let colliders = detour_wall();
        let req = PathRequest::new(wp(-6.0, 0.0), wp(6.0, 0.0), &colliders, 12.0)
            .with_max_visited(50);
        let r = search(&req);
        assert!(matches!(
            r.state(),
            PathState::Blocked | PathState::Unstable | PathState::Reachable
        ));
        assert!(r.points().len() > 1);
    }

    #[test]
    fn exhausted_budget_is_unstable_then_retry_succeeds() {
        let colliders = detour_wall();
        let base = PathRequest::new(wp(-6.0, 0.0), wp(6.0, 0.0), &colliders, 12.0);

        let r = search(&base.with_max_visited(50));
        assert_eq!(r.state(), PathState::Unstable);
        assert_eq!(r.visited(), 51);
        assert!(!r.is_proven_optimal());
        assert_eq!(r.points(), &[wp(-6.0, 0.0), wp(6.0, 0.0)]);

        let r = search(&base);
        assert_eq!(r.state(), PathState::Reachable);
        // The only way round is through the top row.
        assert!(r.points().iter().any(|p| p.z > 11.0));
        assert_no_repeated_cells(&r, &base.validate().unwrap());
    }

    #[test]
    fn best_partial_fallback_heads_toward_goal() {
        let colliders = detour_wall();
        let req = PathRequest::new(wp(-6.0, 0.0), wp(6.0, 0.0), &colliders, 12.0)
            .with_max_visited(50)
            .with_fallback(FallbackPolicy::BestPartial);
        let r = search(&req);
        assert_eq!(r.state(), PathState::Unstable);
        let pts = r.points();
        assert!(pts.len() > 2);
        assert_eq!(pts[0], wp(-6.0, 0.0));
        assert_eq!(*pts.last().unwrap(), wp(6.0, 0.0));
        // The closest explored cell is further east than the start.
        assert!(pts[pts.len() - 2].x > -6.0);
        assert_no_repeated_cells(&r, &req.validate().unwrap());
    }

    #[test]
    fn best_partial_on_blocked_stays_on_own_side() {
        let walls = [wall(-1.0, -9.0, 0.0, 9.0)];
        let req = PathRequest::new(wp(-8.0, 0.0), wp(8.0, 0.0), &walls, 9.0)
            .with_fallback(FallbackPolicy::BestPartial);
        let r = search(&req);
        assert_eq!(r.state(), PathState::Blocked);
        let pts = r.points();
        // Last explored cell is against the wall, at x center -1.5.
        assert_eq!(pts[pts.len() - 2], wp(-1.5, 0.5));
        assert_no_repeated_cells(&r, &req.validate().unwrap());
    }

    #[test]
    fn endpoints_inside_colliders_are_cleared() {
        let colliders = [
            StaticCollider::new(wp(-5.5, 0.5), wp(0.4, 0.4), ColliderKind::Structure),
            StaticCollider::new(wp(5.5, 0.5), wp(0.4, 0.4), ColliderKind::Terrain),
        ];
        let req = PathRequest::new(wp(-5.5, 0.5), wp(5.5, 0.5), &colliders, 9.0);
        let (grid, r) = search_with_grid(&req);
        assert_eq!(r.state(), PathState::Reachable);
        assert_eq!(grid.unwrap().blocked_count(), 0);
    }

    #[test]
    fn enclosed_start_is_blocked() {
        // Ring of blocked cells around the start cell.
        let colliders = [
            wall(-2.0, -2.0, 1.0, -1.0),
            wall(-2.0, 0.0, 1.0, 1.0),
            wall(-2.0, -1.0, -1.0, 0.0),
            wall(0.0, -1.0, 1.0, 0.0),
        ];
        let req = PathRequest::new(wp(-0.5, -0.5), wp(6.0, 6.0), &colliders, 9.0);
        let r = search(&req);
        assert_eq!(r.state(), PathState::Blocked);
        assert_eq!(r.visited(), 1);
    }

    #[test]
    fn invalid_configuration_is_blocked_not_panicking() {
        let r = search(&PathRequest::new(wp(1.0, 2.0), wp(3.0, 4.0), &[], 9.0).with_resolution(0.0));
        assert_eq!(
            r,
            PathResult::Blocked {
                points: vec![wp(1.0, 2.0), wp(3.0, 4.0)],
                cause: BlockedCause::InvalidRequest(RequestError::Grid(
                    GridError::NonPositiveResolution(0.0)
                )),
                visited: 0,
            }
        );

        let r = search(&PathRequest::new(wp(3.0, f64::INFINITY), wp(f64::NAN, -7.0), &[], 5.0));
        assert_eq!(r.state(), PathState::Blocked);
        assert_eq!(r.points(), &[wp(3.0, 5.0), wp(0.0, -5.0)]);
        assert!(matches!(
            r,
            PathResult::Blocked {
                cause: BlockedCause::InvalidRequest(RequestError::NonFiniteCoordinate {
                    which: Endpoint::Start
                }),
                ..
            }
        ));

        let r = search(&PathRequest::new(wp(3.0, 3.0), wp(1.0, 1.0), &[], -2.0));
        assert_eq!(r.state(), PathState::Blocked);
        assert_eq!(r.points().len(), 2);
        assert!(r.points().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn out_of_bounds_endpoints_are_clamped_onto_grid() {
        let r = search(&PathRequest::new(wp(-40.0, 0.0), wp(40.0, 0.0), &[], 9.0));
        assert_eq!(r.state(), PathState::Reachable);
        assert_eq!(r.points()[0], wp(-40.0, 0.0));
        assert_eq!(r.points()[1], wp(-7.5, 0.5));
    }

    #[test]
    fn zero_budget_still_reports() {
        let r = search(&PathRequest::new(wp(-5.0, 0.0), wp(5.0, 0.0), &[], 9.0).with_max_visited(0));
        assert_eq!(r.state(), PathState::Unstable);
        assert_eq!(r.points().len(), 2);
    }

    fn random_colliders(rng: &mut StdRng, n: usize, bounds: f64) -> Vec<StaticCollider> {
        (0..n)
            .map(|_| {
                StaticCollider::new(
                    wp(
                        rng.random_range(-bounds..bounds),
                        rng.random_range(-bounds..bounds),
                    ),
                    wp(rng.random_range(0.2..2.5), rng.random_range(0.2..2.5)),
                    ColliderKind::Structure,
                )
            })
            .collect()
    }

    #[test]
    fn every_result_has_usable_polyline() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..60 {
            let colliders = random_colliders(&mut rng, 25, 12.0);
            let start = wp(rng.random_range(-12.0..12.0), rng.random_range(-12.0..12.0));
            let goal = wp(rng.random_range(-12.0..12.0), rng.random_range(-12.0..12.0));
            let budget = rng.random_range(0..400);
            for fallback in [FallbackPolicy::StraightLine, FallbackPolicy::BestPartial] {
                let req = PathRequest::new(start, goal, &colliders, 12.0)
                    .with_max_visited(budget)
                    .with_fallback(fallback);
                let r = search(&req);
                assert!(r.points().len() >= 2);
                assert_eq!(r.points()[0], start);
                assert_eq!(*r.points().last().unwrap(), goal);
                assert_no_repeated_cells(&r, &req.validate().unwrap());
            }
        }
    }

    #[test]
    fn identical_requests_give_identical_results() {
        let mut rng = StdRng::seed_from_u64(99);
        let colliders = random_colliders(&mut rng, 30, 12.0);
        let req = PathRequest::new(wp(-11.0, -11.0), wp(11.0, 10.0), &colliders, 12.0)
            .with_fallback(FallbackPolicy::BestPartial);
        let first = search(&req);
        for _ in 0..5 {
            assert_eq!(search(&req), first);
        }
        let (g1, _) = search_with_grid(&req);
        let (g2, _) = search_with_grid(&req);
        assert_eq!(g1, g2);
    }
}
