//! # grid_routing
//!
//! Route planning on an occupancy grid. Implements
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with 8-directional movement, where
//! cardinal steps cost 1 and diagonal steps cost √2, and an exact closed-tour planner that visits a
//! small set of [Waypoint]s from a home cell in the cheapest possible order. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! ```
//! use grid_routing::{Cell, Grid, PathFinder};
//!
//! let grid: Grid = "...\n.#.\n...".parse().unwrap();
//! let path = PathFinder::new()
//!     .find(&grid, Cell::new(0, 0), Cell::new(2, 2))
//!     .unwrap();
//! assert_eq!(path.len(), 4);
//! ```
mod astar;
pub mod cancel;
pub mod cell;
pub mod cost;
pub mod error;
pub mod grid;
pub mod neighbors;
pub mod pathfinder;
pub mod tour;
pub mod waypoint;

pub use cancel::CancelToken;
pub use cell::{Cell, Direction};
pub use cost::CostModel;
pub use error::{SearchError, SearchResult};
pub use grid::Grid;
pub use neighbors::{MooreNeighborhood, NeighborPolicy};
pub use pathfinder::{Path, PathFinder};
pub use tour::{LegTable, Tour, TourPlanner};
pub use waypoint::Waypoint;

/// Cost of a cardinal (straight) move.
pub const CARDINAL_COST: f64 = 1.0;
/// Cost of a diagonal move.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;
/// Default corner policy: a diagonal step is allowed even if both flanking cells are blocked.
pub const ALLOW_CORNER_CUTTING: bool = true;

/// Inline capacity of successor lists; a cell never has more than 8 neighbours.
pub const N_SMALLVEC_SIZE: usize = 8;
