//! Conversions between world coordinates and grid cells.
//!
//! The world is the square `[-bounds, bounds]²`. It is cut into
//! `size × size` cells of side `resolution`, with cell (0, 0) at the
//! `(-bounds, -bounds)` corner.

use crate::collider::StaticCollider;
use crate::error::GridError;
use crate::geom::{CellRegion, GridCell, WorldPoint};

/// Largest accepted grid side, in cells.
pub const MAX_GRID_SIZE: usize = 2048;

/// Map a world coordinate to the cell containing it, clamped to the grid.
///
/// Floors first, then clamps, so points exactly on the far edge land in the
/// last cell and points outside the world land on the border.
pub fn world_to_grid(x: f64, z: f64, bounds: f64, resolution: f64, size: usize) -> GridCell {
    GridCell::new(
        axis_to_grid(x, bounds, resolution, size),
        axis_to_grid(z, bounds, resolution, size),
    )
}

fn axis_to_grid(v: f64, bounds: f64, resolution: f64, size: usize) -> i32 {
    let last = size.saturating_sub(1).min(i32::MAX as usize) as i32;
    let g = ((v + bounds) / resolution).floor();
    if g.is_nan() {
        return 0;
    }
    // Float-to-int casts saturate, so infinities clamp as well.
    (g as i64).clamp(0, last as i64) as i32
}

/// World-space center of cell (gx, gz).
#[inline]
pub fn grid_to_world(gx: i32, gz: i32, bounds: f64, resolution: f64) -> WorldPoint {
    WorldPoint::new(
        f64::from(gx) * resolution - bounds + resolution * 0.5,
        f64::from(gz) * resolution - bounds + resolution * 0.5,
    )
}

/// Whether (gx, gz) is a cell of a `size × size` grid.
#[inline]
pub fn is_inside(gx: i32, gz: i32, size: usize) -> bool {
    gx >= 0 && gz >= 0 && (gx as usize) < size && (gz as usize) < size
}

/// Flat index of (gx, gz): `gz * size + gx`.
#[inline]
pub fn index(gx: i32, gz: i32, size: usize) -> usize {
    gz as usize * size + gx as usize
}

/// Grow `region` by `by` cells on every side, clamped to the grid.
///
/// Used when an obstacle changes and its neighbourhood must be recomputed.
pub fn expand_bounds(region: CellRegion, by: i32, size: usize) -> CellRegion {
    region.grow_within(by, CellRegion::square(size))
}

/// Clamp `p` into `[-bounds, bounds]²`. NaN coordinates become 0.
pub fn clamp_world(p: WorldPoint, bounds: f64) -> WorldPoint {
    let axis = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(-bounds, bounds) };
    WorldPoint::new(axis(p.x), axis(p.z))
}

/// Number of cells per side for the given world bounds and resolution.
pub fn grid_size(bounds: f64, resolution: f64) -> Result<usize, GridError> {
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(GridError::NonPositiveResolution(resolution));
    }
    if !(bounds.is_finite() && bounds > 0.0) {
        return Err(GridError::NonPositiveBounds(bounds));
    }
    let cells = (2.0 * bounds / resolution - 1e-9).ceil().max(1.0);
    if cells > MAX_GRID_SIZE as f64 {
        return Err(GridError::TooLarge {
            // Saturates: an infinite ratio reports u64::MAX.
            cells: cells as u64,
            max: MAX_GRID_SIZE,
        });
    }
    Ok(cells as usize)
}

/// Validated mapping parameters for one grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridMapper {
    bounds: f64,
    resolution: f64,
    size: usize,
}

impl GridMapper {
    /// Create a mapper for the world `[-bounds, bounds]²` at `resolution`
    /// world units per cell.
    pub fn new(bounds: f64, resolution: f64) -> Result<Self, GridError> {
        let size = grid_size(bounds, resolution)?;
        Ok(Self {
            bounds,
            resolution,
            size,
        })
    }

    #[inline]
    pub fn bounds(&self) -> f64 {
        self.bounds
    }

    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Cells per side.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.size * self.size
    }

    /// Always false: a valid grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn world_to_grid(&self, p: WorldPoint) -> GridCell {
        world_to_grid(p.x, p.z, self.bounds, self.resolution, self.size)
    }

    #[inline]
    pub fn grid_to_world(&self, c: GridCell) -> WorldPoint {
        grid_to_world(c.x, c.z, self.bounds, self.resolution)
    }

    #[inline]
    pub fn is_inside(&self, c: GridCell) -> bool {
        is_inside(c.x, c.z, self.size)
    }

    /// Flat index of `c`, or `None` if it is off the grid.
    #[inline]
    pub fn index(&self, c: GridCell) -> Option<usize> {
        self.is_inside(c).then(|| index(c.x, c.z, self.size))
    }

    /// Cell at flat index `idx`.
    #[inline]
    pub fn cell(&self, idx: usize) -> GridCell {
        GridCell::new((idx % self.size) as i32, (idx / self.size) as i32)
    }

    /// The whole grid as a region.
    #[inline]
    pub fn full_region(&self) -> CellRegion {
        CellRegion::square(self.size)
    }

    /// See [`expand_bounds`].
    #[inline]
    pub fn expand_bounds(&self, region: CellRegion, by: i32) -> CellRegion {
        expand_bounds(region, by, self.size)
    }

    /// Cells whose footprint may touch `collider`, clamped to the grid.
    ///
    /// The region is conservative: it can include border cells that turn
    /// out not to overlap, never the other way around.
    pub fn footprint(&self, collider: &StaticCollider) -> CellRegion {
        let lo = self.world_to_grid(collider.min());
        let hi = self.world_to_grid(collider.max());
        CellRegion::new(lo.x, lo.z, hi.x + 1, hi.z + 1)
    }
}
