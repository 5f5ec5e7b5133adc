use crate::cell::Cell;
use thiserror::Error;

/// Every way a grid, path or tour query can fail. Searches never return partial results, so any
/// failure surfaces as one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("invalid grid text: {0}")]
    InvalidGridText(String),
    #[error("{0} lies outside the grid")]
    OutOfBounds(Cell),
    #[error("{0} is not walkable")]
    BlockedEndpoint(Cell),
    #[error("{goal} is not reachable from {start}")]
    Unreachable { start: Cell, goal: Cell },
    #[error("no goal cells were given")]
    NoGoals,
    #[error("no visiting order reaches every waypoint and returns home")]
    NoFeasibleTour,
    #[error("search was cancelled")]
    Cancelled,
}

pub type SearchResult<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Outcomes a caller should report as "no route" rather than treat as a bug upstream.
    pub fn is_no_route(&self) -> bool {
        matches!(
            self,
            SearchError::Unreachable { .. } | SearchError::NoFeasibleTour
        )
    }

    pub fn invalid_grid_text(message: impl Into<String>) -> Self {
        Self::InvalidGridText(message.into())
    }
}
