//! Geometry primitives: [`WorldPoint`], [`GridCell`] and [`CellRegion`].
//!
//! World space is continuous and measured on the ground plane (x, z); the
//! vertical axis never matters to lane routing. Grid space is integer and
//! always starts at cell (0, 0).

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// WorldPoint
// ---------------------------------------------------------------------------

/// A continuous position on the ground plane, in world units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPoint {
    pub x: f64,
    pub z: f64,
}

impl WorldPoint {
    /// Origin (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, z: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: WorldPoint) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Whether both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    /// Per-axis absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.z.abs())
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.z)
    }
}

impl Add for WorldPoint {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl Sub for WorldPoint {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl Mul<f64> for WorldPoint {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.z * rhs)
    }
}

// ---------------------------------------------------------------------------
// GridCell
// ---------------------------------------------------------------------------

/// An integer grid cell. `x` grows with world x, `z` with world z.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pub x: i32,
    pub z: i32,
}

impl GridCell {
    /// Create a new cell.
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Return a cell shifted by (dx, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// All eight neighbours, clockwise starting from `z - 1`.
    ///
    /// The order is fixed; searches rely on it for reproducible tie-breaks.
    #[inline]
    pub fn neighbors_8(self) -> [GridCell; 8] {
        [
            self.shift(0, -1),
            self.shift(1, -1),
            self.shift(1, 0),
            self.shift(1, 1),
            self.shift(0, 1),
            self.shift(-1, 1),
            self.shift(-1, 0),
            self.shift(-1, -1),
        ]
    }

    /// Whether `other` is a diagonal neighbour of `self`.
    #[inline]
    pub fn is_diagonal_to(self, other: GridCell) -> bool {
        (self.x - other.x).abs() == 1 && (self.z - other.z).abs() == 1
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

// ---------------------------------------------------------------------------
// CellRegion
// ---------------------------------------------------------------------------

/// A half-open rectangle of cells \[min, max).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRegion {
    pub min: GridCell,
    pub max: GridCell,
}

impl CellRegion {
    /// Create a region from two corners, canonicalized so that `min` ≤ `max`
    /// on each axis.
    #[inline]
    pub fn new(x0: i32, z0: i32, x1: i32, z1: i32) -> Self {
        Self {
            min: GridCell::new(x0.min(x1), z0.min(z1)),
            max: GridCell::new(x0.max(x1), z0.max(z1)),
        }
    }

    /// The region covering a whole `size × size` grid.
    #[inline]
    pub fn square(size: usize) -> Self {
        let s = i32::try_from(size).unwrap_or(i32::MAX);
        Self::new(0, 0, s, s)
    }

    /// Total number of cells in the region.
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let w = (self.max.x - self.min.x) as usize;
        w * (self.max.z - self.min.z) as usize
    }

    /// Whether the region has no cells.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.z >= self.max.z
    }

    /// Grow by `by` cells on every side and clip to `clip`. Empty results
    /// collapse to the default region.
    pub fn grow_within(self, by: i32, clip: CellRegion) -> Self {
        let r = Self {
            min: GridCell::new(
                self.min.x.saturating_sub(by).max(clip.min.x),
                self.min.z.saturating_sub(by).max(clip.min.z),
            ),
            max: GridCell::new(
                self.max.x.saturating_add(by).min(clip.max.x),
                self.max.z.saturating_add(by).min(clip.max.z),
            ),
        };
        if r.is_empty() { Self::default() } else { r }
    }

    /// Row-major iterator over every cell in the region.
    #[inline]
    pub fn iter(self) -> RegionIter {
        RegionIter {
            origin: self.min,
            width: (self.max.x - self.min.x).max(0) as usize,
            next: 0,
            end: self.len(),
        }
    }
}

impl IntoIterator for CellRegion {
    type Item = GridCell;
    type IntoIter = RegionIter;
    #[inline]
    fn into_iter(self) -> RegionIter {
        self.iter()
    }
}

impl fmt::Display for CellRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

/// Row-major iterator over the cells in a [`CellRegion`].
#[derive(Clone, Debug)]
pub struct RegionIter {
    origin: GridCell,
    width: usize,
    next: usize,
    end: usize,
}

impl Iterator for RegionIter {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        if self.next >= self.end {
            return None;
        }
        let (dx, dz) = (self.next % self.width, self.next / self.width);
        self.next += 1;
        Some(self.origin.shift(dx as i32, dz as i32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for RegionIter {}
