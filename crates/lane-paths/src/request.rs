use std::fmt;

use lane_core::{GridError, GridMapper, StaticCollider, WorldPoint, clamp_world};
use thiserror::Error;

use crate::config::{FallbackPolicy, SearchConfig};

/// Which end of a request a problem refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::Goal => f.write_str("goal"),
        }
    }
}

/// Why a request was not searched.
///
/// Never returned directly: [`search`](crate::search) folds it into a
/// `Blocked` result so a per-tick caller always gets a usable polyline.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("{which} point is not finite")]
    NonFiniteCoordinate { which: Endpoint },
}

/// One lane query: route from `start` to `goal` around `colliders`.
///
/// The collider slice is only borrowed for the duration of the search.
#[derive(Debug, Clone, Copy)]
pub struct PathRequest<'a> {
    pub start: WorldPoint,
    pub goal: WorldPoint,
    pub colliders: &'a [StaticCollider],
    /// Half side of the square world, which spans `[-world_bounds, world_bounds]`.
    pub world_bounds: f64,
    /// World units per grid cell.
    pub resolution: f64,
    /// `None` uses [`DEFAULT_MAX_VISITED`](crate::DEFAULT_MAX_VISITED).
    pub max_visited: Option<usize>,
    pub fallback: FallbackPolicy,
}

impl<'a> PathRequest<'a> {
    /// A request at resolution 1 with the default budget.
    pub fn new(
        start: WorldPoint,
        goal: WorldPoint,
        colliders: &'a [StaticCollider],
        world_bounds: f64,
    ) -> Self {
        Self {
            start,
            goal,
            colliders,
            world_bounds,
            resolution: 1.0,
            max_visited: None,
            fallback: FallbackPolicy::StraightLine,
        }
    }

    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_max_visited(mut self, max_visited: usize) -> Self {
        self.max_visited = Some(max_visited);
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Take resolution, budget and fallback policy from `config`.
    pub fn with_config(mut self, config: &SearchConfig) -> Self {
        self.resolution = config.resolution;
        self.max_visited = Some(config.max_visited);
        self.fallback = config.fallback;
        self
    }

    /// Build the grid mapper, or report why the request cannot be searched.
    pub fn validate(&self) -> Result<GridMapper, RequestError> {
        let mapper = GridMapper::new(self.world_bounds, self.resolution)?;
        if !self.start.is_finite() {
            return Err(RequestError::NonFiniteCoordinate {
                which: Endpoint::Start,
            });
        }
        if !self.goal.is_finite() {
            return Err(RequestError::NonFiniteCoordinate {
                which: Endpoint::Goal,
            });
        }
        Ok(mapper)
    }

    /// Start and goal with NaN replaced by zero and everything clamped into
    /// the world square. Invalid bounds clamp to the origin.
    pub fn sanitized_endpoints(&self) -> (WorldPoint, WorldPoint) {
        let bounds = if self.world_bounds.is_finite() && self.world_bounds > 0.0 {
            self.world_bounds
        } else {
            0.0
        };
        (
            clamp_world(self.start, bounds),
            clamp_world(self.goal, bounds),
        )
    }
}
