//! **lane-core**: geometry shared by the lane pathfinding engine.
//!
//! - [`geom`]: world points, grid cells and cell regions
//! - [`mapper`]: world ↔ grid conversion, clamping and region expansion
//! - [`collider`]: axis-aligned obstacles, overlap and clearance queries
//!
//! Everything here is a pure value or a pure function; nothing keeps state
//! between calls.

pub mod collider;
pub mod error;
pub mod geom;
pub mod mapper;

pub use collider::{
    ColliderKind, StaticCollider, aabb_overlap, distance_to_collider_surface, min_clearance,
};
pub use error::GridError;
pub use geom::{CellRegion, GridCell, RegionIter, WorldPoint};
pub use mapper::{
    GridMapper, MAX_GRID_SIZE, clamp_world, expand_bounds, grid_size, grid_to_world, index,
    is_inside, world_to_grid,
};
