use core::fmt;
use core::ops::Add;

/// Integer coordinate on a [Grid](crate::Grid). `y` grows downwards, so [Direction::N]
/// decreases it. Signed so that cells just outside the grid can be represented and rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Number of king moves between two cells.
    pub fn chebyshev_distance(&self, other: &Cell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    pub fn euclidean_distance(&self, other: &Cell) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }

    /// True if `other` is exactly one 8-directional step away.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.chebyshev_distance(other) == 1
    }

    /// Direction of a single step from `self` to `other`, if they are adjacent.
    pub fn dir_to(&self, other: &Cell) -> Option<Direction> {
        if !self.is_adjacent(other) {
            return None;
        }
        let (dx, dy) = (other.x - self.x, other.y - self.y);
        Direction::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }

    /// The 8 surrounding cells in [Direction::ALL] order. Bounds are not checked.
    pub fn moore_neighborhood(&self) -> [Cell; 8] {
        Direction::ALL.map(|d| *self + d)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}

impl Add<Direction> for Cell {
    type Output = Cell;

    fn add(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        Cell::new(self.x + dx, self.y + dy)
    }
}

/// Compass directions. The discriminant is the position in the fixed enumeration order, which is
/// what makes equal-cost tie-breaking reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    N = 0,
    NE = 1,
    E = 2,
    SE = 3,
    S = 4,
    SW = 5,
    W = 6,
    NW = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn num(&self) -> usize {
        *self as usize
    }

    pub fn diagonal(&self) -> bool {
        self.num() % 2 == 1
    }

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }

    /// Horizontal component of a diagonal move (or the move itself if it is cardinal).
    pub fn x_dir(&self) -> Option<Direction> {
        match self.delta().0 {
            1 => Some(Direction::E),
            -1 => Some(Direction::W),
            _ => None,
        }
    }

    pub fn y_dir(&self) -> Option<Direction> {
        match self.delta().1 {
            1 => Some(Direction::S),
            -1 => Some(Direction::N),
            _ => None,
        }
    }
}
