//! Occupancy grid rasterized from a collider snapshot.

use std::fmt;

use lane_core::{GridCell, GridMapper, StaticCollider, WorldPoint, aabb_overlap};
use log::warn;

/// Edge-contact tolerance, as a fraction of the resolution. Gaps smaller
/// than this count as touching.
const TOUCH_EPSILON: f64 = 1e-9;

/// Flat walkable/blocked table for one search, indexed `gz * size + gx`.
///
/// Built once by [`NavGrid::build`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NavGrid {
    mapper: GridMapper,
    blocked: Vec<bool>,
}

impl NavGrid {
    /// A grid with every cell walkable.
    pub fn open(mapper: GridMapper) -> Self {
        Self {
            blocked: vec![false; mapper.len()],
            mapper,
        }
    }

    /// Rasterize `colliders` onto the grid described by `mapper`.
    ///
    /// A cell is blocked when its square footprint strictly overlaps a
    /// collider; cells that only share an edge stay walkable, up to
    /// [`TOUCH_EPSILON`] of float error in the cell edges. Cells listed in
    /// `keep_clear` are walkable no matter what covers them.
    pub fn build(mapper: GridMapper, colliders: &[StaticCollider], keep_clear: &[GridCell]) -> Self {
        let mut grid = Self::open(mapper);
        let res = mapper.resolution();
        // Shrinking the cell turns sub-epsilon overlaps into edge contact.
        let h = res * (0.5 - TOUCH_EPSILON);
        let cell_half = WorldPoint::new(h, h);

        for collider in colliders {
            if !collider.is_finite() || collider.half_extents.x < 0.0 || collider.half_extents.z < 0.0
            {
                warn!("skipping malformed collider {:?}", collider);
                continue;
            }
            for cell in mapper.footprint(collider) {
                let center = mapper.grid_to_world(cell);
                if aabb_overlap(
                    center,
                    cell_half,
                    collider.center,
                    collider.half_extents,
                    true,
                ) {
                    if let Some(i) = mapper.index(cell) {
                        grid.blocked[i] = true;
                    }
                }
            }
        }

        for &cell in keep_clear {
            if let Some(i) = mapper.index(cell) {
                grid.blocked[i] = false;
            }
        }
        grid
    }

    #[inline]
    pub fn mapper(&self) -> &GridMapper {
        &self.mapper
    }

    /// Cells per side.
    #[inline]
    pub fn size(&self) -> usize {
        self.mapper.size()
    }

    /// Whether `cell` is blocked. Cells off the grid count as blocked.
    #[inline]
    pub fn is_blocked(&self, cell: GridCell) -> bool {
        self.mapper.index(cell).is_none_or(|i| self.blocked[i])
    }

    /// Whether `cell` is on the grid and free.
    #[inline]
    pub fn is_walkable(&self, cell: GridCell) -> bool {
        !self.is_blocked(cell)
    }

    #[inline]
    pub(crate) fn blocked_at(&self, idx: usize) -> bool {
        self.blocked[idx]
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }
}

impl fmt::Display for NavGrid {
    /// One text row per `gz`, starting at 0: `#` blocked, `.` walkable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.blocked.chunks(self.size()) {
            for &b in row {
                f.write_str(if b { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
