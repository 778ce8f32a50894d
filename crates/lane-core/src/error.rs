use thiserror::Error;

/// Reasons a grid cannot be built from the given world parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    #[error("resolution must be finite and positive, got {0}")]
    NonPositiveResolution(f64),
    #[error("world bounds must be finite and positive, got {0}")]
    NonPositiveBounds(f64),
    #[error("grid would need {cells} cells per side, limit is {max}")]
    TooLarge { cells: u64, max: usize },
}
