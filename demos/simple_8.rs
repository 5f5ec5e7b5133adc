use grid_routing::{Cell, Grid, PathFinder};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have an 8-neighborhood

fn main() {
    let grid: Grid = "...\n.#.\n...".parse().unwrap();
    println!("{}", grid);
    let start = Cell::new(0, 0);
    let end = Cell::new(2, 2);
    let path = PathFinder::new().find(&grid, start, end).unwrap();
    println!("Path (cost {:.3}):", path.cost);
    for p in path.cells {
        println!("{}", p);
    }
}
