use crate::cell::{Cell, Direction};
use crate::cost::CostModel;
use crate::grid::Grid;
use crate::{ALLOW_CORNER_CUTTING, N_SMALLVEC_SIZE};
use smallvec::SmallVec;

pub type Successors = SmallVec<[(Cell, f64); N_SMALLVEC_SIZE]>;

/// Enumerates the moves available from a cell together with their step costs.
///
/// Implementations must be pure and must yield neighbours in a fixed order, since the search
/// resolves equal-cost ties by discovery order.
pub trait NeighborPolicy {
    fn neighbors(&self, grid: &Grid, cell: &Cell) -> Successors;

    /// Whether a single step from `from` to `to` is a move this policy allows.
    fn is_valid_move(&self, grid: &Grid, from: &Cell, to: &Cell) -> bool {
        self.neighbors(grid, from).iter().any(|(n, _)| n == to)
    }
}

/// The 8-neighbourhood, visited in [Direction::ALL] order (N, NE, E, SE, S, SW, W, NW).
#[derive(Clone, Copy, Debug)]
pub struct MooreNeighborhood {
    /// Allows a diagonal step even when both flanking cardinal cells are blocked.
    pub allow_corner_cutting: bool,
}

impl MooreNeighborhood {
    pub fn new() -> MooreNeighborhood {
        MooreNeighborhood {
            allow_corner_cutting: ALLOW_CORNER_CUTTING,
        }
    }

    fn can_move(&self, grid: &Grid, from: &Cell, dir: Direction) -> bool {
        let to = *from + dir;
        if !grid.is_walkable(&to) {
            return false;
        }
        if self.allow_corner_cutting || !dir.diagonal() {
            return true;
        }
        // Without corner cutting both flanking cardinal cells have to be open.
        [dir.x_dir(), dir.y_dir()]
            .into_iter()
            .flatten()
            .all(|d| grid.is_walkable(&(*from + d)))
    }
}

impl Default for MooreNeighborhood {
    fn default() -> Self {
        Self::new()
    }
}

impl NeighborPolicy for MooreNeighborhood {
    fn neighbors(&self, grid: &Grid, cell: &Cell) -> Successors {
        let model = CostModel;
        Direction::ALL
            .into_iter()
            .filter(|&d| self.can_move(grid, cell, d))
            .map(|d| {
                let n = *cell + d;
                (n, model.step_cost(cell, &n))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    #[test]
    fn open_cell_has_eight_neighbors_in_order() {
        let grid = Grid::new(3, 3).unwrap();
        let policy = MooreNeighborhood::new();
        let n = policy.neighbors(&grid, &Cell::new(1, 1));
        let cells: Vec<Cell> = n.iter().map(|(c, _)| *c).collect();
        assert_eq!(cells, Cell::new(1, 1).moore_neighborhood().to_vec());
        assert_eq!(n[0].1, 1.0);
        assert_eq!(n[1].1, SQRT_2);
    }

    #[test]
    fn corner_and_blocked_cells_are_skipped() {
        let grid = Grid::with_blocked(3, 3, [Cell::new(1, 0)]).unwrap();
        let policy = MooreNeighborhood::new();
        let cells: Vec<Cell> = policy
            .neighbors(&grid, &Cell::new(0, 0))
            .iter()
            .map(|(c, _)| *c)
            .collect();
        assert_eq!(cells, vec![Cell::new(1, 1), Cell::new(0, 1)]);
    }

    // Tests whether allowing corner cutting has the expected effect in a minimal setting.
    #[test]
    fn test_corner_cutting_switch() {
        //  ___
        // |.#|
        // |#.|
        //  __
        let grid: Grid = ".#\n#.".parse().unwrap();
        let start = Cell::new(0, 0);
        let goal = Cell::new(1, 1);
        let cutting = MooreNeighborhood::new();
        let strict = MooreNeighborhood {
            allow_corner_cutting: false,
        };
        assert_eq!(cutting.is_valid_move(&grid, &start, &goal), ALLOW_CORNER_CUTTING);
        assert!(!strict.is_valid_move(&grid, &start, &goal));
        assert!(strict.neighbors(&grid, &start).is_empty());
    }
}
