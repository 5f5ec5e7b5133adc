#![allow(dead_code)]

use grid_routing::{Cell, Grid, MooreNeighborhood, NeighborPolicy};
use rand::prelude::*;
use std::collections::HashMap;

/// Random grid with roughly `density` of its cells blocked, keeping `open` cells walkable.
pub fn random_grid(w: i32, h: i32, density: f64, open: &[Cell], rng: &mut StdRng) -> Grid {
    let mut blocked = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let c = Cell::new(x, y);
            if rng.gen_bool(density) && !open.contains(&c) {
                blocked.push(c);
            }
        }
    }
    Grid::with_blocked(w, h, blocked).unwrap()
}

pub fn random_cell(grid: &Grid, rng: &mut StdRng) -> Cell {
    Cell::new(
        rng.gen_range(0..grid.width()) as i32,
        rng.gen_range(0..grid.height()) as i32,
    )
}

/// Exact distances from `source` by repeated relaxation until nothing changes. Slow but obviously
/// correct, which is the point.
pub fn brute_force_distances(grid: &Grid, source: Cell) -> HashMap<Cell, f64> {
    let policy = MooreNeighborhood::new();
    let mut dist = HashMap::new();
    dist.insert(source, 0.0);
    loop {
        let mut changed = false;
        for cell in grid.walkable_cells() {
            let Some(&d) = dist.get(&cell) else {
                continue;
            };
            for (n, step) in policy.neighbors(grid, &cell) {
                let candidate = d + step;
                if dist.get(&n).map_or(true, |&old| candidate < old - 1e-12) {
                    dist.insert(n, candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            return dist;
        }
    }
}

pub fn visualize_grid(grid: &Grid, start: &Cell, end: &Cell) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Cell::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_walkable(&p) {
                print!(".");
            } else {
                print!("#");
            }
        }
        println!();
    }
}
