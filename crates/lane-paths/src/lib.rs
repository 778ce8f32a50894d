//! Lane pathfinding over rasterized collider snapshots.
//!
//! A wave/spawn system calls [`search`] with a [`PathRequest`] whenever it
//! needs a lane from a spawn point to the central target. The engine:
//!
//! 1. validates the request and builds a [`GridMapper`](lane_core::GridMapper),
//! 2. rasterizes the colliders into a [`NavGrid`], force-clearing the start
//!    and goal cells,
//! 3. runs a bounded 8-way A* search,
//! 4. classifies the outcome as a [`PathResult`].
//!
//! | State | Meaning | Polyline |
//! |---|---|---|
//! | `Reachable` | shortest grid route found | start, cell centers, goal |
//! | `Blocked` | proven unreachable, or malformed request | fallback |
//! | `Unstable` | visited-node budget ran out | fallback |
//!
//! Every call is independent and allocates its own state, so concurrent
//! calls from many spawners need no synchronisation.

mod astar;
mod config;
mod distance;
mod fallback;
mod navgrid;
mod node;
mod request;
mod result;

pub use astar::{search, search_with_grid};
pub use config::{DEFAULT_MAX_VISITED, FallbackPolicy, SearchConfig};
pub use distance::{euclidean, step_cost};
pub use fallback::straight_line;
pub use navgrid::NavGrid;
pub use request::{Endpoint, PathRequest, RequestError};
pub use result::{BlockedCause, PathResult, PathState};
