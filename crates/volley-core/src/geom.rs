//! Geometry primitives: cardinal directions, world positions, grid cells.
//!
//! The arena uses two coordinate systems. World positions are continuous
//! `f64` pairs in units where one maze cell spans `cell_size` units. Grid
//! positions are integer cell coordinates obtained by floor division. All
//! world-to-grid mapping in the simulator goes through
//! [`Vec2::to_cell`] so that cell-boundary cases resolve consistently.

use std::fmt;

/// One of the four cardinal directions.
///
/// Tanks move and fire along cardinals only; `Direction` is also the
/// facing stored on each tank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Negative y.
    Up,
    /// Positive y.
    Down,
    /// Negative x.
    Left,
    /// Positive x.
    Right,
}

impl Direction {
    /// All four directions in the canonical probe order (up, right,
    /// down, left). Search routines iterate this order so that ties
    /// resolve deterministically.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit cell offset `(dx, dy)` for this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The opposite direction.
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The direction whose dominant axis points from the origin towards
    /// `(dx, dy)`. Vertical wins ties, matching the movement heuristics
    /// throughout the decision engine.
    pub fn towards(dx: i32, dy: i32) -> Direction {
        if dx.abs() > dy.abs() {
            if dx > 0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    /// The direction pointing away from `(dx, dy)` along its dominant axis.
    pub fn away_from(dx: i32, dy: i32) -> Direction {
        Direction::towards(dx, dy).reverse()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{s}")
    }
}

/// A continuous world-space position or velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal component, in world units.
    pub x: f64,
    /// Vertical component, in world units.
    pub y: f64,
}

impl Vec2 {
    /// Construct from components.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The grid cell containing this world position, by floor division.
    pub fn to_cell(self, cell_size: f64) -> GridPos {
        GridPos {
            x: (self.x / cell_size).floor() as i32,
            y: (self.y / cell_size).floor() as i32,
        }
    }

    /// Euclidean distance to another position.
    pub fn distance(self, other: Vec2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An integer maze cell coordinate.
///
/// May be out of maze bounds; consumers query the maze, which treats
/// out-of-bounds cells as walls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl GridPos {
    /// Construct from cell coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step in `dir` from this one.
    pub fn step(self, dir: Direction) -> GridPos {
        let (dx, dy) = dir.offset();
        GridPos::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to another cell.
    pub fn manhattan(self, other: GridPos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Whether this cell shares a row or column with `other`.
    pub fn aligned_with(self, other: GridPos) -> bool {
        self.x == other.x || self.y == other.y
    }

    /// Center of this cell in world units.
    pub fn center(self, cell_size: f64) -> Vec2 {
        Vec2::new(
            self.x as f64 * cell_size + cell_size / 2.0,
            self.y as f64 * cell_size + cell_size / 2.0,
        )
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
