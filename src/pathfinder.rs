use crate::astar::{astar, AstarOutcome};
use crate::cancel::CancelToken;
use crate::cell::Cell;
use crate::cost::CostModel;
use crate::error::{SearchError, SearchResult};
use crate::grid::Grid;
use crate::neighbors::{MooreNeighborhood, NeighborPolicy};
use log::{debug, info, warn};

/// An ordered sequence of cells from a start to a goal, together with its total cost.
///
/// Paths returned by [PathFinder] always hold at least one cell. [Path::start] and [Path::goal]
/// rely on that; a hand-built path must keep `cells` non-empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub cells: Vec<Cell>,
    pub cost: f64,
}

impl Path {
    /// The single-cell path of a query whose start is its goal.
    pub fn trivial(cell: Cell) -> Path {
        Path {
            cells: vec![cell],
            cost: 0.0,
        }
    }

    /// # Panics
    ///
    /// Panics if `cells` is empty.
    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    /// # Panics
    ///
    /// Panics if `cells` is empty.
    pub fn goal(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    /// Number of cells, both endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Checks that every cell is walkable and every consecutive pair is a move allowed by `policy`.
    pub fn is_valid_on<P: NeighborPolicy>(&self, grid: &Grid, policy: &P) -> bool {
        !self.cells.is_empty()
            && self.cells.iter().all(|c| grid.is_walkable(c))
            && self
                .cells
                .windows(2)
                .all(|w| policy.is_valid_move(grid, &w[0], &w[1]))
    }
}

/// A* search between cells of a [Grid] with the Euclidean distance as heuristic.
///
/// Holds no state between queries apart from its configuration, so one finder can serve any
/// number of grids and threads.
#[derive(Clone, Debug, Default)]
pub struct PathFinder<P = MooreNeighborhood> {
    pub policy: P,
    pub cancel: Option<CancelToken>,
}

impl PathFinder<MooreNeighborhood> {
    pub fn new() -> PathFinder<MooreNeighborhood> {
        PathFinder::with_policy(MooreNeighborhood::new())
    }
}

impl<P: NeighborPolicy> PathFinder<P> {
    pub fn with_policy(policy: P) -> PathFinder<P> {
        PathFinder {
            policy,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> PathFinder<P> {
        self.cancel = Some(cancel);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Computes a lowest-cost path from `start` to `goal`.
    pub fn find(&self, grid: &Grid, start: Cell, goal: Cell) -> SearchResult<Path> {
        for cell in [&start, &goal] {
            if !grid.is_within_bounds(cell) {
                return Err(SearchError::OutOfBounds(*cell));
            }
        }
        grid.check_endpoint(&start)?;
        grid.check_endpoint(&goal)?;
        if start == goal {
            return Ok(Path::trivial(start));
        }
        // Check if start and goal are on the same connected component.
        if !grid.components_dirty() && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Err(SearchError::Unreachable { start, goal });
        }
        let model = CostModel;
        let outcome = astar(
            &start,
            |cell| self.policy.neighbors(grid, cell),
            |cell| model.heuristic(cell, &goal),
            |cell| *cell == goal,
            || self.is_cancelled(),
        );
        match outcome {
            AstarOutcome::Found(cells, cost) => {
                debug!(
                    "Path {} -> {}: {} steps, cost {:.3}",
                    start,
                    goal,
                    cells.len() - 1,
                    cost
                );
                Ok(Path { cells, cost })
            }
            AstarOutcome::Exhausted => {
                if !grid.components_dirty() {
                    warn!(
                        "{} shares a component with {} but could not be pathed to",
                        goal, start
                    );
                }
                Err(SearchError::Unreachable { start, goal })
            }
            AstarOutcome::Cancelled => Err(SearchError::Cancelled),
        }
    }

    /// Computes a path from `start` to the cheapest of the given goals and returns the selected
    /// goal in addition to the found path. The heuristic is the distance to the closest goal.
    /// Among equally cheap goals the one reached first by the search wins.
    ///
    /// Blocked goals are skipped like any other goal without a path. A goal outside the grid is a
    /// caller error and fails the query with [SearchError::OutOfBounds].
    pub fn find_nearest(
        &self,
        grid: &Grid,
        start: Cell,
        goals: &[Cell],
    ) -> SearchResult<(Cell, Path)> {
        if goals.is_empty() {
            return Err(SearchError::NoGoals);
        }
        grid.check_endpoint(&start)?;
        if let Some(goal) = goals.iter().find(|g| !grid.is_within_bounds(g)) {
            return Err(SearchError::OutOfBounds(*goal));
        }
        let candidates: Vec<Cell> = goals
            .iter()
            .copied()
            .filter(|g| grid.is_walkable(g))
            .collect();
        if candidates.len() < goals.len() {
            debug!("Skipping {} blocked goals", goals.len() - candidates.len());
        }
        if candidates.contains(&start) {
            return Ok((start, Path::trivial(start)));
        }
        let unreachable = Err(SearchError::Unreachable {
            start,
            goal: goals[0],
        });
        // Check if any remaining goal is on the same connected component as start.
        let disconnected =
            !grid.components_dirty() && candidates.iter().all(|g| grid.unreachable(&start, g));
        if candidates.is_empty() || disconnected {
            info!("None of {} goals is reachable from {}", goals.len(), start);
            return unreachable;
        }
        let model = CostModel;
        let outcome = astar(
            &start,
            |cell| self.policy.neighbors(grid, cell),
            |cell| {
                candidates
                    .iter()
                    .map(|g| model.heuristic(cell, g))
                    .fold(f64::INFINITY, f64::min)
            },
            |cell| candidates.contains(cell),
            || self.is_cancelled(),
        );
        match outcome {
            AstarOutcome::Found(cells, cost) => {
                let selected = cells[cells.len() - 1];
                debug!("Selected goal {} from {}, cost {:.3}", selected, start, cost);
                Ok((selected, Path { cells, cost }))
            }
            AstarOutcome::Exhausted => unreachable,
            AstarOutcome::Cancelled => Err(SearchError::Cancelled),
        }
    }
}
