//! Wave scenarios for exercising the lane engine from the command line.
//!
//! A [`WaveScenario`] scatters seeded structures and terrain across a square
//! world, keeps the spawn points and the central target clear, and routes
//! every spawner to the target.

use lane_core::{
    CellRegion, ColliderKind, GridMapper, StaticCollider, WorldPoint, distance_to_collider_surface,
};
use lane_paths::{NavGrid, PathRequest, PathResult, SearchConfig, search_with_grid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Radius kept free of obstacles around spawners and the target.
pub const CLEAR_RADIUS: f64 = 2.5;

/// Attempts per requested obstacle before giving up on placing it.
const PLACEMENT_TRIES: usize = 16;

/// One lane computed for a spawner.
#[derive(Debug, Clone)]
pub struct Lane {
    pub spawner: WorldPoint,
    pub grid: Option<NavGrid>,
    pub result: PathResult,
}

/// A reproducible obstacle layout with four border spawners.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveScenario {
    pub bounds: f64,
    pub target: WorldPoint,
    pub colliders: Vec<StaticCollider>,
}

impl WaveScenario {
    /// Place up to `obstacles` random colliders using `seed`.
    ///
    /// Candidates that would crowd a spawner or the target are redrawn.
    pub fn generate(seed: u64, bounds: f64, obstacles: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scenario = Self {
            bounds,
            target: WorldPoint::ORIGIN,
            colliders: Vec::with_capacity(obstacles),
        };
        let keep_free: Vec<WorldPoint> = scenario
            .spawners()
            .into_iter()
            .chain(std::iter::once(scenario.target))
            .collect();
        let span = bounds * 0.9;

        for _ in 0..obstacles {
            for _ in 0..PLACEMENT_TRIES {
                let kind = if rng.random_bool(0.7) {
                    ColliderKind::Structure
                } else {
                    ColliderKind::Terrain
                };
                let (hx, hz) = match kind {
                    // Long thin pieces read like walls from the top.
                    ColliderKind::Structure if rng.random_bool(0.5) => {
                        (rng.random_range(0.5..1.0), rng.random_range(2.0..5.0))
                    }
                    _ => (rng.random_range(0.5..2.0), rng.random_range(0.5..2.0)),
                };
                let collider = StaticCollider::new(
                    WorldPoint::new(rng.random_range(-span..span), rng.random_range(-span..span)),
                    if rng.random_bool(0.5) {
                        WorldPoint::new(hx, hz)
                    } else {
                        WorldPoint::new(hz, hx)
                    },
                    kind,
                );
                let crowded = keep_free
                    .iter()
                    .any(|&p| distance_to_collider_surface(p, CLEAR_RADIUS, &collider) <= 0.0);
                if !crowded {
                    scenario.colliders.push(collider);
                    break;
                }
            }
        }
        scenario
    }

    /// Border midpoints, one per side, inset by one world unit.
    pub fn spawners(&self) -> [WorldPoint; 4] {
        let b = self.bounds - 1.0;
        [
            WorldPoint::new(0.0, -b),
            WorldPoint::new(b, 0.0),
            WorldPoint::new(0.0, b),
            WorldPoint::new(-b, 0.0),
        ]
    }

    /// Cells a host would recompute after `collider` is built or removed:
    /// its footprint grown by `margin` cells. `None` if the grid parameters
    /// are invalid.
    pub fn invalidation_region(
        &self,
        collider: &StaticCollider,
        config: &SearchConfig,
        margin: i32,
    ) -> Option<CellRegion> {
        let mapper = GridMapper::new(self.bounds, config.resolution).ok()?;
        Some(mapper.expand_bounds(mapper.footprint(collider), margin))
    }

    /// Route every spawner to the target.
    pub fn route_all(&self, config: &SearchConfig) -> Vec<Lane> {
        self.spawners()
            .into_iter()
            .map(|spawner| {
                let request = PathRequest::new(spawner, self.target, &self.colliders, self.bounds)
                    .with_config(config);
                let (grid, result) = search_with_grid(&request);
                Lane {
                    spawner,
                    grid,
                    result,
                }
            })
            .collect()
    }
}

/// Draw `grid` with the polyline of `result` on top.
///
/// `#` blocked, `.` free, `*` path cells, `S` start, `G` goal. Rows run from
/// `gz = 0` downwards, matching [`NavGrid`]'s `Display`.
pub fn render(grid: &NavGrid, result: &PathResult) -> String {
    let size = grid.size();
    let mut canvas: Vec<Vec<char>> = grid
        .to_string()
        .lines()
        .map(|row| row.chars().collect())
        .collect();

    let points = result.points();
    let last = points.len().saturating_sub(1);
    for (i, &p) in points.iter().enumerate() {
        let cell = grid.mapper().world_to_grid(p);
        let glyph = match i {
            0 => 'S',
            i if i == last => 'G',
            _ => '*',
        };
        if let Some(row) = canvas.get_mut(cell.z as usize) {
            if let Some(c) = row.get_mut(cell.x as usize) {
                *c = glyph;
            }
        }
    }

    let mut out = String::with_capacity(size * (size + 1));
    for row in canvas {
        out.extend(row);
        out.push('\n');
    }
    out
}
