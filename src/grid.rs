use crate::cell::Cell;
use crate::error::{SearchError, SearchResult};
use core::fmt;
use core::str::FromStr;
use log::{debug, info};
use petgraph::unionfind::UnionFind;

/// Rectangular occupancy grid. Cells are walkable unless marked blocked.
///
/// In addition to the raw occupancy, [Grid] maintains
/// [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) in a [UnionFind] structure so that queries between disconnected regions can be rejected
/// without flood-filling the grid. Components are computed for the full 8-neighbourhood, which
/// makes them a sound over-approximation of connectivity under any stricter neighbour policy.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Grid {
    /// Creates a fully walkable grid.
    pub fn new(width: i32, height: i32) -> SearchResult<Grid> {
        if width <= 0 || height <= 0 {
            return Err(SearchError::InvalidDimensions { width, height });
        }
        let (w, h) = (width as usize, height as usize);
        let mut grid = Grid {
            width: w,
            height: h,
            blocked: vec![false; w * h],
            components: UnionFind::new(w * h),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Creates a grid where exactly the given cells are blocked.
    pub fn with_blocked<I>(width: i32, height: i32, blocked: I) -> SearchResult<Grid>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut grid = Grid::new(width, height)?;
        for cell in blocked {
            let ix = grid.index_of(&cell).ok_or(SearchError::OutOfBounds(cell))?;
            grid.blocked[ix] = true;
        }
        grid.generate_components();
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_within_bounds(&self, cell: &Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    /// Fails closed: anything outside the grid is not walkable.
    pub fn is_walkable(&self, cell: &Cell) -> bool {
        self.index_of(cell).is_some_and(|ix| !self.blocked[ix])
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Cell::new(x, y)))
    }

    pub fn walkable_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |c| self.is_walkable(c))
    }

    fn index_of(&self, cell: &Cell) -> Option<usize> {
        self.is_within_bounds(cell)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }

    /// Updates a cell. Joins newly connected components when a cell is opened up and flags the
    /// components as dirty when blocking may have broken a component apart.
    pub fn set_blocked(&mut self, cell: Cell, blocked: bool) -> SearchResult<()> {
        let ix = self.index_of(&cell).ok_or(SearchError::OutOfBounds(cell))?;
        if self.blocked[ix] == blocked {
            return Ok(());
        }
        self.blocked[ix] = blocked;
        if blocked {
            self.components_dirty = true;
        } else {
            for n in cell.moore_neighborhood() {
                if let Some(n_ix) = self.index_of(&n).filter(|&i| !self.blocked[i]) {
                    self.components.union(ix, n_ix);
                }
            }
        }
        Ok(())
    }

    pub fn components_dirty(&self) -> bool {
        self.components_dirty
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable neighbours into the same
    /// components.
    pub fn generate_components(&mut self) {
        debug!(
            "Generating connected components for {}x{} grid",
            self.width, self.height
        );
        self.components = UnionFind::new(self.width * self.height);
        self.components_dirty = false;
        let (w, h) = (self.width as i32, self.height as i32);
        for cell in (0..h).flat_map(|y| (0..w).map(move |x| Cell::new(x, y))) {
            let Some(ix) = self.index_of(&cell).filter(|&i| !self.blocked[i]) else {
                continue;
            };
            // Forward half of the neighbourhood covers every undirected pair once.
            for n in [
                Cell::new(cell.x + 1, cell.y),
                Cell::new(cell.x + 1, cell.y + 1),
                Cell::new(cell.x, cell.y + 1),
                Cell::new(cell.x - 1, cell.y + 1),
            ] {
                if let Some(n_ix) = self.index_of(&n).filter(|&i| !self.blocked[i]) {
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// Component id of a walkable cell, or [None] for blocked and out of bounds cells.
    pub fn component(&self, cell: &Cell) -> Option<usize> {
        self.index_of(cell)
            .filter(|&ix| !self.blocked[ix])
            .map(|ix| self.components.find(ix))
    }

    /// Checks if both cells are walkable and on the same component. Only meaningful while the
    /// components are not dirty.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        match (self.component(start), self.component(goal)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.reachable(start, goal)
    }

    /// Validates a search endpoint, reporting why it cannot be used.
    pub(crate) fn check_endpoint(&self, cell: &Cell) -> SearchResult<()> {
        if !self.is_within_bounds(cell) {
            return Err(SearchError::OutOfBounds(*cell));
        }
        if !self.is_walkable(cell) {
            return Err(SearchError::BlockedEndpoint(*cell));
        }
        Ok(())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            let row = &self.blocked[y * self.width..(y + 1) * self.width];
            let line: String = row.iter().map(|&b| if b { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses rows of `.` (walkable) and `#` (blocked). Surrounding whitespace and blank lines are
/// ignored; all rows must have the same width.
impl FromStr for Grid {
    type Err = SearchError;

    fn from_str(s: &str) -> SearchResult<Grid> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut blocked = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(SearchError::invalid_grid_text(format!(
                    "row {} has width {}, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '.' => {}
                    '#' => blocked.push(Cell::new(x as i32, y as i32)),
                    other => {
                        return Err(SearchError::invalid_grid_text(format!(
                            "unexpected character {:?} at {}",
                            other,
                            Cell::new(x as i32, y as i32)
                        )))
                    }
                }
            }
        }
        Grid::with_blocked(width as i32, rows.len() as i32, blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 3).unwrap_err(),
            SearchError::InvalidDimensions { width: 0, height: 3 }
        );
        assert!(matches!(
            Grid::new(4, -1),
            Err(SearchError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn lookups_fail_closed() {
        let grid = Grid::with_blocked(3, 2, [Cell::new(1, 1)]).unwrap();
        assert!(grid.is_walkable(&Cell::new(0, 0)));
        assert!(!grid.is_walkable(&Cell::new(1, 1)));
        assert!(!grid.is_walkable(&Cell::new(-1, 0)));
        assert!(!grid.is_walkable(&Cell::new(3, 0)));
        assert!(!grid.is_within_bounds(&Cell::new(0, 2)));
        assert_eq!(grid.walkable_cells().count(), 5);
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |.#.|
        // |.#.|
        let grid: Grid = ".#.\n.#.".parse().unwrap();
        let p1 = Cell::new(0, 0);
        let p2 = Cell::new(1, 1);
        let p3 = Cell::new(0, 1);
        let p4 = Cell::new(2, 0);
        assert!(grid.unreachable(&p1, &p2));
        assert!(grid.reachable(&p1, &p3));
        assert!(grid.unreachable(&p1, &p4));
    }

    #[test]
    fn diagonal_gap_connects_components() {
        //  |.#|
        //  |#.|
        let grid: Grid = ".#\n#.".parse().unwrap();
        assert!(grid.reachable(&Cell::new(0, 0), &Cell::new(1, 1)));
    }

    #[test]
    fn incremental_updates() {
        let mut grid: Grid = ".#.\n.#.".parse().unwrap();
        let (left, right) = (Cell::new(0, 0), Cell::new(2, 0));
        assert!(grid.unreachable(&left, &right));
        grid.set_blocked(Cell::new(1, 0), false).unwrap();
        assert!(!grid.components_dirty());
        assert!(grid.reachable(&left, &right));

        grid.set_blocked(Cell::new(1, 0), true).unwrap();
        assert!(grid.components_dirty());
        grid.update();
        assert!(!grid.components_dirty());
        assert!(grid.unreachable(&left, &right));

        assert_eq!(
            grid.set_blocked(Cell::new(5, 5), true),
            Err(SearchError::OutOfBounds(Cell::new(5, 5)))
        );
    }

    #[test]
    fn text_round_trip() {
        let text = "..#\n#..\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn malformed_text() {
        assert!(matches!(
            "..\n...".parse::<Grid>(),
            Err(SearchError::InvalidGridText(_))
        ));
        assert!(matches!(
            "..x".parse::<Grid>(),
            Err(SearchError::InvalidGridText(_))
        ));
        assert!(matches!(
            "".parse::<Grid>(),
            Err(SearchError::InvalidDimensions { .. })
        ));
    }
}
