use grid_routing::{Cell, Grid, PathFinder, SearchError};
use std::f64::consts::SQRT_2;

#[test]
fn open_grid_diagonal() {
    let grid = Grid::new(3, 3).unwrap();
    let path = PathFinder::new()
        .find(&grid, Cell::new(0, 0), Cell::new(2, 2))
        .unwrap();
    assert_eq!(path.len(), 3);
    assert!((path.cost - 2.0 * SQRT_2).abs() < 1e-9);
}

#[test]
fn wall_in_corridor() {
    let grid = Grid::with_blocked(3, 1, [Cell::new(1, 0)]).unwrap();
    let result = PathFinder::new().find(&grid, Cell::new(0, 0), Cell::new(2, 0));
    assert!(matches!(result, Err(SearchError::Unreachable { .. })));
}

#[test]
fn blocked_start() {
    let grid = Grid::with_blocked(3, 3, [Cell::new(0, 0)]).unwrap();
    let result = PathFinder::new().find(&grid, Cell::new(0, 0), Cell::new(2, 2));
    assert_eq!(result, Err(SearchError::BlockedEndpoint(Cell::new(0, 0))));
}

#[test]
fn invalid_dimensions() {
    assert_eq!(
        Grid::new(0, 0).unwrap_err(),
        SearchError::InvalidDimensions { width: 0, height: 0 }
    );
}

#[test]
fn repeated_queries_are_identical() {
    // Many equal-cost routes exist around the block; the same one must come back every time.
    let grid: Grid = "......\n.####.\n......".parse().unwrap();
    let finder = PathFinder::new();
    let first = finder.find(&grid, Cell::new(0, 1), Cell::new(5, 1)).unwrap();
    for _ in 0..20 {
        assert_eq!(finder.find(&grid, Cell::new(0, 1), Cell::new(5, 1)).unwrap(), first);
    }
}
