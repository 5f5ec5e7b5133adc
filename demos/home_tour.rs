use grid_routing::{waypoint, Cell, Grid, SearchError, TourPlanner, Waypoint};

// Plans the cheapest round trip from home past every point of interest on a small map
//  ______
// |H.#..A|
// |..#...|
// |..#.#.|
// |......|
// |C...#C|
//  ______
// where H is home, A an apartment block and C a café.

fn main() {
    let grid: Grid = "..#...\n..#...\n..#.#.\n......\n....#.".parse().unwrap();
    let points = vec![
        Waypoint::new(Cell::new(0, 0), "MyHome"),
        Waypoint::new(Cell::new(5, 0), "Apartment"),
        Waypoint::new(Cell::new(0, 4), "Cafe"),
        Waypoint::new(Cell::new(5, 4), "Cafe"),
    ];
    let Some(home) = waypoint::first_labeled(&points, "MyHome") else {
        println!("No home on the map");
        return;
    };
    match TourPlanner::new().plan(&grid, home.cell, &points) {
        Ok(tour) => {
            println!("Tour cost {:.3} over {} steps", tour.cost, tour.steps());
            for stop in &tour.stops {
                println!("  visit {}", stop);
            }
            let route: Vec<String> = tour.cells.iter().map(Cell::to_string).collect();
            println!("{}", route.join(" -> "));
        }
        Err(e @ SearchError::NoFeasibleTour) => println!("No route: {}", e),
        Err(e) => println!("Query failed: {}", e),
    }
}
