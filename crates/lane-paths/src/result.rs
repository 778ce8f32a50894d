use std::fmt;

use lane_core::WorldPoint;

use crate::request::RequestError;

/// The three ways a lane search can end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathState {
    Reachable,
    Blocked,
    Unstable,
}

impl fmt::Display for PathState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PathState::Reachable => "reachable",
            PathState::Blocked => "blocked",
            PathState::Unstable => "unstable",
        };
        f.write_str(s)
    }
}

/// Why a result is `Blocked`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockedCause {
    /// The open set ran dry: no route exists under the current obstacles.
    Unreachable,
    /// The request was malformed and never searched.
    InvalidRequest(RequestError),
}

/// Outcome of one lane search.
///
/// Every variant carries a polyline of at least two points, starting at the
/// request's start and ending at its goal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathResult {
    /// A shortest route through the grid.
    Reachable {
        points: Vec<WorldPoint>,
        /// Length of the cell route, in world units.
        cost: f64,
        visited: usize,
    },
    /// No route exists, or the request was unusable.
    Blocked {
        points: Vec<WorldPoint>,
        cause: BlockedCause,
        visited: usize,
    },
    /// The visited-node budget ran out before the search could decide.
    Unstable {
        points: Vec<WorldPoint>,
        visited: usize,
    },
}

impl PathResult {
    pub fn state(&self) -> PathState {
        match self {
            PathResult::Reachable { .. } => PathState::Reachable,
            PathResult::Blocked { .. } => PathState::Blocked,
            PathResult::Unstable { .. } => PathState::Unstable,
        }
    }

    pub fn points(&self) -> &[WorldPoint] {
        match self {
            PathResult::Reachable { points, .. }
            | PathResult::Blocked { points, .. }
            | PathResult::Unstable { points, .. } => points,
        }
    }

    pub fn into_points(self) -> Vec<WorldPoint> {
        match self {
            PathResult::Reachable { points, .. }
            | PathResult::Blocked { points, .. }
            | PathResult::Unstable { points, .. } => points,
        }
    }

    /// Cells dequeued by the search (zero for rejected requests).
    pub fn visited(&self) -> usize {
        match self {
            PathResult::Reachable { visited, .. }
            | PathResult::Blocked { visited, .. }
            | PathResult::Unstable { visited, .. } => *visited,
        }
    }

    #[inline]
    pub fn is_reachable(&self) -> bool {
        matches!(self, PathResult::Reachable { .. })
    }

    /// Only a reachable result is a proven shortest grid route; fallbacks
    /// are just something to walk along.
    #[inline]
    pub fn is_proven_optimal(&self) -> bool {
        self.is_reachable()
    }

    /// Polyline length in world units.
    pub fn length(&self) -> f64 {
        self.points()
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}
