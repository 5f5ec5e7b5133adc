use crate::cell::Cell;
use crate::{CARDINAL_COST, DIAGONAL_COST};

/// Uses [CARDINAL_COST] for cardinal (straight) moves and [DIAGONAL_COST] for diagonal moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct CostModel;

impl CostModel {
    /// Cost of a single step between adjacent cells.
    pub fn step_cost(&self, from: &Cell, to: &Cell) -> f64 {
        if from.x != to.x && from.y != to.y {
            DIAGONAL_COST
        } else {
            CARDINAL_COST
        }
    }

    /// Sum of step costs, accumulated front to back like the search does.
    pub fn path_cost(&self, path: &[Cell]) -> f64 {
        path.windows(2)
            .fold(0.0, |total, w| total + self.step_cost(&w[0], &w[1]))
    }

    /// Straight-line distance. Never exceeds the cheapest 8-directional route, so it is admissible
    /// and consistent for this cost model.
    pub fn heuristic(&self, from: &Cell, to: &Cell) -> f64 {
        from.euclidean_distance(to)
    }

    /// Cost of the cheapest route on an empty grid: as many diagonal steps as possible, then
    /// straight.
    pub fn octile_distance(&self, from: &Cell, to: &Cell) -> f64 {
        let dx = (from.x - to.x).abs();
        let dy = (from.y - to.y).abs();
        let diagonal = dx.min(dy) as f64;
        let straight = (dx - dy).abs() as f64;
        diagonal * DIAGONAL_COST + straight * CARDINAL_COST
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    #[test]
    fn step_costs() {
        let model = CostModel;
        let c = Cell::new(3, 3);
        assert_eq!(model.step_cost(&c, &Cell::new(3, 2)), 1.0);
        assert_eq!(model.step_cost(&c, &Cell::new(4, 4)), SQRT_2);
    }

    #[test]
    fn path_cost_sums_steps() {
        let model = CostModel;
        let path = [Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 1)];
        assert!((model.path_cost(&path) - (SQRT_2 + 1.0)).abs() < 1e-12);
        assert_eq!(model.path_cost(&path[..1]), 0.0);
    }

    #[test]
    fn heuristic_is_admissible_on_open_grid() {
        let model = CostModel;
        let origin = Cell::new(0, 0);
        for x in -6..=6 {
            for y in -6..=6 {
                let c = Cell::new(x, y);
                assert!(model.heuristic(&origin, &c) <= model.octile_distance(&origin, &c) + 1e-12);
            }
        }
    }
}
