//! The immutable maze grid and its spatial queries.
//!
//! A [`Maze`] is a row-major grid of [`Cell`]s produced by the generator
//! and shared read-only for the rest of the match. All queries treat
//! out-of-bounds coordinates as walls, so callers can probe neighbouring
//! cells without bounds checks of their own.

use rand::Rng;
use smallvec::SmallVec;
use volley_core::{Direction, GridPos};

/// A single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Passable floor.
    Floor,
    /// Impassable wall.
    Wall,
}

/// An immutable 2D maze.
///
/// Replaced wholesale on reseed; never mutated after generation. The
/// walkable-cell index is precomputed in row-major order so that random
/// spawn selection is O(1) and deterministic under a seeded RNG.
#[derive(Clone, Debug)]
pub struct Maze {
    width: u32,
    height: u32,
    cells: Box<[Cell]>,
    walkable: Vec<GridPos>,
}

impl Maze {
    /// Build a maze from raw row-major cells.
    ///
    /// # Panics
    ///
    /// Panics if `cells.len() != width * height`. Callers are the
    /// generator and the ASCII parser, both of which size correctly.
    pub(crate) fn from_cells(width: u32, height: u32, cells: Box<[Cell]>) -> Self {
        assert_eq!(cells.len(), (width as usize) * (height as usize));
        let mut walkable = Vec::new();
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                if cells[(y as usize) * (width as usize) + x as usize] == Cell::Floor {
                    walkable.push(GridPos::new(x, y));
                }
            }
        }
        Self {
            width,
            height,
            cells,
            walkable,
        }
    }

    /// Build a maze from an ASCII sketch: `#` for wall, `.` for floor.
    ///
    /// Intended for tests and tooling; rows must be non-empty and of
    /// equal length.
    ///
    /// # Panics
    ///
    /// Panics on ragged rows, empty input, or characters other than
    /// `#` and `.`.
    pub fn parse(rows: &[&str]) -> Self {
        assert!(!rows.is_empty(), "maze sketch must have at least one row");
        let width = rows[0].len();
        assert!(width > 0, "maze sketch rows must be non-empty");
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            assert_eq!(row.len(), width, "maze sketch rows must be equal length");
            for ch in row.chars() {
                cells.push(match ch {
                    '#' => Cell::Wall,
                    '.' => Cell::Floor,
                    other => panic!("unexpected maze sketch character {other:?}"),
                });
            }
        }
        Self::from_cells(width as u32, rows.len() as u32, cells.into_boxed_slice())
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `pos` lies inside the grid.
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// The cell at `pos`, or `None` out of bounds.
    pub fn get(&self, pos: GridPos) -> Option<Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.cells[(pos.y as usize) * (self.width as usize) + pos.x as usize])
    }

    /// Whether `pos` is an in-bounds floor cell.
    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.get(pos) == Some(Cell::Floor)
    }

    /// Walkable cardinal neighbours of `pos`, in canonical probe order.
    pub fn open_neighbours(&self, pos: GridPos) -> SmallVec<[GridPos; 4]> {
        let mut out = SmallVec::new();
        for dir in Direction::ALL {
            let next = pos.step(dir);
            if self.is_walkable(next) {
                out.push(next);
            }
        }
        out
    }

    /// Number of walkable cardinal neighbours of `pos`.
    pub fn open_neighbour_count(&self, pos: GridPos) -> usize {
        Direction::ALL
            .iter()
            .filter(|dir| self.is_walkable(pos.step(**dir)))
            .count()
    }

    /// Whether `pos` is a narrow cell: walkable with at most two open
    /// neighbours. Corridors and dead ends qualify.
    pub fn is_choke_point(&self, pos: GridPos) -> bool {
        self.is_walkable(pos) && self.open_neighbour_count(pos) <= 2
    }

    /// Length of the run of open cells starting one step from `pos` in
    /// `dir`, capped at `max`. A wall or the grid edge ends the run.
    pub fn corridor_length(&self, pos: GridPos, dir: Direction, max: u32) -> u32 {
        let mut cursor = pos;
        let mut len = 0;
        while len < max {
            cursor = cursor.step(dir);
            if !self.is_walkable(cursor) {
                break;
            }
            len += 1;
        }
        len
    }

    /// Whether a shot from `pos` travelling in `dir` reaches `max` cells
    /// without striking a wall. Leaving the grid counts as a clear lane;
    /// the projectile simply despawns.
    pub fn clear_lane(&self, pos: GridPos, dir: Direction, max: u32) -> bool {
        let mut cursor = pos;
        for _ in 0..max {
            cursor = cursor.step(dir);
            if !self.in_bounds(cursor) {
                break;
            }
            if !self.is_walkable(cursor) {
                return false;
            }
        }
        true
    }

    /// Approximate line-of-sight test between two cells.
    ///
    /// Samples cells along the segment and tolerates up to two wall
    /// samples, which keeps thin corner clips from blinding hunters.
    /// This is a targeting heuristic, not a collision predicate.
    pub fn line_of_sight(&self, from: GridPos, to: GridPos) -> bool {
        let dx = (to.x - from.x) as f64;
        let dy = (to.y - from.y) as f64;
        let steps = dx.abs().max(dy.abs()) as i32;
        if steps == 0 {
            return true;
        }
        let step_x = dx / steps as f64;
        let step_y = dy / steps as f64;

        let mut wall_count = 0;
        for i in 1..steps {
            let probe = GridPos::new(
                (from.x as f64 + step_x * i as f64).floor() as i32,
                (from.y as f64 + step_y * i as f64).floor() as i32,
            );
            if self.get(probe) == Some(Cell::Wall) {
                wall_count += 1;
                if wall_count > 2 {
                    return false;
                }
            }
        }
        true
    }

    /// All walkable cells in row-major order.
    pub fn walkable_cells(&self) -> &[GridPos] {
        &self.walkable
    }

    /// Fraction of cells that are walkable.
    pub fn walkable_fraction(&self) -> f64 {
        self.walkable.len() as f64 / ((self.width as usize) * (self.height as usize)) as f64
    }

    /// A uniformly random walkable cell, or `None` if the maze has no
    /// floor at all.
    pub fn random_walkable_cell<R: Rng>(&self, rng: &mut R) -> Option<GridPos> {
        if self.walkable.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.walkable.len());
        Some(self.walkable[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor_maze() -> Maze {
        Maze::parse(&[
            "#########", //
            "#.......#", //
            "####.####", //
            "#.......#", //
            "#########",
        ])
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let maze = corridor_maze();
        assert!(!maze.is_walkable(GridPos::new(-1, 0)));
        assert!(!maze.is_walkable(GridPos::new(0, 100)));
        assert_eq!(maze.get(GridPos::new(9, 0)), None);
    }

    #[test]
    fn open_neighbours_follow_probe_order() {
        let maze = corridor_maze();
        // Cell (4, 1) has open right, down, and left neighbours.
        let n = maze.open_neighbours(GridPos::new(4, 1));
        assert_eq!(
            n.as_slice(),
            &[
                GridPos::new(5, 1),
                GridPos::new(4, 2),
                GridPos::new(3, 1)
            ]
        );
    }

    #[test]
    fn choke_point_detects_corridors() {
        let maze = corridor_maze();
        // The vertical connector has exactly two open neighbours.
        assert!(maze.is_choke_point(GridPos::new(4, 2)));
        // A wall is not a choke point.
        assert!(!maze.is_choke_point(GridPos::new(0, 0)));
        // The junction cell above the connector has three.
        assert!(!maze.is_choke_point(GridPos::new(4, 1)));
    }

    #[test]
    fn corridor_length_stops_at_walls_and_cap() {
        let maze = corridor_maze();
        let start = GridPos::new(1, 1);
        assert_eq!(maze.corridor_length(start, Direction::Right, 10), 6);
        assert_eq!(maze.corridor_length(start, Direction::Right, 3), 3);
        assert_eq!(maze.corridor_length(start, Direction::Up, 10), 0);
    }

    #[test]
    fn clear_lane_blocked_by_walls() {
        let maze = corridor_maze();
        let start = GridPos::new(1, 1);
        assert!(maze.clear_lane(start, Direction::Right, 6));
        assert!(!maze.clear_lane(start, Direction::Right, 7));
        assert!(!maze.clear_lane(start, Direction::Down, 2));
    }

    #[test]
    fn line_of_sight_along_open_row() {
        let maze = corridor_maze();
        assert!(maze.line_of_sight(GridPos::new(1, 1), GridPos::new(7, 1)));
        // Straight down through two wall rows stays within tolerance,
        // diagonal across the block does too; a same-cell query is trivially clear.
        assert!(maze.line_of_sight(GridPos::new(4, 1), GridPos::new(4, 1)));
    }

    #[test]
    fn walkable_index_is_row_major() {
        let maze = Maze::parse(&[
            "###", //
            "#.#", //
            "#.#", //
            "###",
        ]);
        assert_eq!(
            maze.walkable_cells(),
            &[GridPos::new(1, 1), GridPos::new(1, 2)]
        );
        assert!((maze.walkable_fraction() - 2.0 / 12.0).abs() < 1e-12);
    }
}
