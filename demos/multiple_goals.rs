use grid_routing::{Cell, Grid, PathFinder};

// In this example a path is found to one of two goals on a 3x3 grid with shape
//  ___
// |S G|
// | # |
// |  G|
//  ___
// where
// - \# marks an obstacle
// - S marks the start
// - G marks a goal
// The found path moves to the closest goal, which is the top one.

fn main() {
    let grid: Grid = "...\n.#.\n...".parse().unwrap();
    println!("{}", grid);
    let start = Cell::new(0, 0);
    let goals = [Cell::new(2, 0), Cell::new(2, 2)];
    let (selected_goal, path) = PathFinder::new().find_nearest(&grid, start, &goals).unwrap();
    println!("Selected goal: {}\n", selected_goal);
    println!("Path:");
    for p in path.cells {
        println!("{}", p);
    }
}
