/// Visited-node budget used when a request does not set one.
pub const DEFAULT_MAX_VISITED: usize = 4096;

/// What a non-`Reachable` result carries as its polyline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FallbackPolicy {
    /// The segment from start to goal.
    #[default]
    StraightLine,
    /// Start, the explored cells leading to the cell closest to the goal,
    /// then the goal.
    BestPartial,
}

/// Search parameters a host usually keeps per level or per game mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// World units per grid cell.
    pub resolution: f64,
    /// Cells the search may dequeue before giving up with `Unstable`.
    pub max_visited: usize,
    pub fallback: FallbackPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_visited: DEFAULT_MAX_VISITED,
            fallback: FallbackPolicy::StraightLine,
        }
    }
}

impl SearchConfig {
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_max_visited(mut self, max_visited: usize) -> Self {
        self.max_visited = max_visited;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }
}
