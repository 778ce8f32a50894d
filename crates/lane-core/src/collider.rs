//! Static obstacles and the box queries shared by rasterization and local
//! clearance checks.

use crate::geom::WorldPoint;

/// What placed an obstacle in the world. The search treats every kind the
/// same; the tag only travels with the collider for the caller's benefit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColliderKind {
    #[default]
    Wall,
    Structure,
    Terrain,
}

/// An axis-aligned box obstacle on the ground plane.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticCollider {
    pub center: WorldPoint,
    /// Half of the box size along x and z.
    pub half_extents: WorldPoint,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: ColliderKind,
}

impl StaticCollider {
    /// Create a collider from its center and half-extents.
    pub const fn new(center: WorldPoint, half_extents: WorldPoint, kind: ColliderKind) -> Self {
        Self {
            center,
            half_extents,
            kind,
        }
    }

    /// A [`ColliderKind::Wall`] spanning `min..max` in world space.
    pub fn wall_between(min: WorldPoint, max: WorldPoint) -> Self {
        let center = WorldPoint::new((min.x + max.x) * 0.5, (min.z + max.z) * 0.5);
        let half = (max - min).abs() * 0.5;
        Self::new(center, half, ColliderKind::Wall)
    }

    /// Whether every field is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.half_extents.is_finite()
    }

    /// Smallest world x/z covered by the box.
    #[inline]
    pub fn min(&self) -> WorldPoint {
        self.center - self.half_extents
    }

    /// Largest world x/z covered by the box.
    #[inline]
    pub fn max(&self) -> WorldPoint {
        self.center + self.half_extents
    }

    /// Whether `p` lies inside or on the box.
    #[inline]
    pub fn contains(&self, p: WorldPoint) -> bool {
        (p.x - self.center.x).abs() <= self.half_extents.x
            && (p.z - self.center.z).abs() <= self.half_extents.z
    }

    /// Overlap test against another collider. See [`aabb_overlap`].
    #[inline]
    pub fn overlaps(&self, other: &StaticCollider, touching_allowed: bool) -> bool {
        aabb_overlap(
            self.center,
            self.half_extents,
            other.center,
            other.half_extents,
            touching_allowed,
        )
    }
}

/// Whether two boxes overlap on both x and z.
///
/// With `touching_allowed`, boxes whose edges meet exactly (gap == 0) are
/// not overlapping; without it, edge contact counts as overlap. The result
/// is the same when A and B are swapped.
pub fn aabb_overlap(
    center_a: WorldPoint,
    half_a: WorldPoint,
    center_b: WorldPoint,
    half_b: WorldPoint,
    touching_allowed: bool,
) -> bool {
    let gap_x = (center_a.x - center_b.x).abs() - (half_a.x + half_b.x);
    let gap_z = (center_a.z - center_b.z).abs() - (half_a.z + half_b.z);
    if touching_allowed {
        gap_x < 0.0 && gap_z < 0.0
    } else {
        gap_x <= 0.0 && gap_z <= 0.0
    }
}

/// Clearance between a disc of `radius` at `position` and the box.
///
/// This is the distance from `position` to the nearest point of the box
/// (zero when inside) minus `radius`. Positive values are a free gap.
pub fn distance_to_collider_surface(
    position: WorldPoint,
    radius: f64,
    collider: &StaticCollider,
) -> f64 {
    let dx = ((position.x - collider.center.x).abs() - collider.half_extents.x).max(0.0);
    let dz = ((position.z - collider.center.z).abs() - collider.half_extents.z).max(0.0);
    dx.hypot(dz) - radius
}

/// Smallest [`distance_to_collider_surface`] over `colliders`, or `None`
/// for an empty list.
pub fn min_clearance(
    position: WorldPoint,
    radius: f64,
    colliders: &[StaticCollider],
) -> Option<f64> {
    colliders
        .iter()
        .map(|c| distance_to_collider_surface(position, radius, c))
        .reduce(f64::min)
}
