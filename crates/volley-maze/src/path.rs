//! Breadth-first pathfinding over the maze grid.
//!
//! Decision policies replan every decision tick and only ever consume
//! the first step of a route, so the search is deliberately shallow:
//! depth-capped BFS with a Chebyshev goal tolerance, a ring search to
//! retarget goals that sit inside walls, and a greedy single-axis
//! fallback when no route exists within the cap.

use std::collections::VecDeque;

use volley_core::{Direction, GridPos};

use crate::grid::Maze;

/// Tunable caps for the route search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathLimits {
    /// Maximum route length in steps. Replanning every decision tick
    /// makes anything deeper wasted work.
    pub max_steps: u32,
    /// Chebyshev distance at which the goal counts as reached.
    pub goal_tolerance: i32,
    /// Ring search radius for retargeting unwalkable goals.
    pub ring_radius: i32,
}

impl Default for PathLimits {
    fn default() -> Self {
        Self {
            max_steps: 15,
            goal_tolerance: 1,
            ring_radius: 5,
        }
    }
}

/// Chebyshev distance between two cells.
fn chebyshev(a: GridPos, b: GridPos) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Shortest route from `from` to within `goal_tolerance` of `to`.
///
/// Returns the cells visited, start and endpoint inclusive, or `None`
/// when `from` is not walkable or no route exists within `max_steps`.
/// Expansion follows [`Direction::ALL`], so equal-length routes resolve
/// deterministically.
pub fn shortest_path(
    maze: &Maze,
    from: GridPos,
    to: GridPos,
    limits: &PathLimits,
) -> Option<Vec<GridPos>> {
    if !maze.is_walkable(from) {
        return None;
    }
    if chebyshev(from, to) <= limits.goal_tolerance {
        return Some(vec![from]);
    }

    let width = maze.width() as usize;
    let cell_count = width * maze.height() as usize;
    let index = |p: GridPos| (p.y as usize) * width + p.x as usize;

    let mut visited = vec![false; cell_count];
    let mut parent: Vec<GridPos> = vec![GridPos::default(); cell_count];
    let mut depth = vec![0u32; cell_count];
    let mut queue = VecDeque::new();

    visited[index(from)] = true;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        if depth[index(current)] >= limits.max_steps {
            continue;
        }
        for dir in Direction::ALL {
            let next = current.step(dir);
            if !maze.is_walkable(next) || visited[index(next)] {
                continue;
            }
            visited[index(next)] = true;
            parent[index(next)] = current;
            depth[index(next)] = depth[index(current)] + 1;

            if chebyshev(next, to) <= limits.goal_tolerance {
                let mut path = vec![next];
                let mut cursor = next;
                while cursor != from {
                    cursor = parent[index(cursor)];
                    path.push(cursor);
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(next);
        }
    }
    None
}

/// The nearest walkable cell to `around`, searching outward ring by
/// ring up to `radius`. `around` itself is returned when walkable.
pub fn nearest_walkable(maze: &Maze, around: GridPos, radius: i32) -> Option<GridPos> {
    if maze.is_walkable(around) {
        return Some(around);
    }
    for r in 1..=radius {
        for dx in -r..=r {
            for dy in -r..=r {
                if dx.abs() != r && dy.abs() != r {
                    continue;
                }
                let candidate = GridPos::new(around.x + dx, around.y + dy);
                if maze.is_walkable(candidate) {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

/// The first step of a route from `from` towards `to`.
///
/// Unwalkable goals are retargeted to the nearest walkable cell first.
/// When BFS finds no route within the caps, falls back to a greedy
/// single-axis step so a tank keeps nudging towards distant goals
/// instead of freezing. `None` means already on the goal cell or boxed
/// in on both axes.
pub fn first_step_towards(
    maze: &Maze,
    from: GridPos,
    to: GridPos,
    limits: &PathLimits,
) -> Option<Direction> {
    if from == to {
        return None;
    }
    // Within routing tolerance but not on the goal: pickups need the
    // cell itself, so close the last gap greedily.
    if chebyshev(from, to) <= limits.goal_tolerance {
        return greedy_step(maze, from, to);
    }

    let goal = if maze.is_walkable(to) {
        Some(to)
    } else {
        nearest_walkable(maze, to, limits.ring_radius)
    };

    if let Some(goal) = goal {
        if let Some(path) = shortest_path(maze, from, goal, limits) {
            if path.len() >= 2 {
                let dx = path[1].x - path[0].x;
                let dy = path[1].y - path[0].y;
                return Some(Direction::towards(dx, dy));
            }
            return None;
        }
    }
    greedy_step(maze, from, to)
}

/// A single walkable step along the dominant axis towards `to`, trying
/// the secondary axis when the dominant one is blocked.
fn greedy_step(maze: &Maze, from: GridPos, to: GridPos) -> Option<Direction> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let primary = Direction::towards(dx, dy);
    let secondary = if matches!(primary, Direction::Up | Direction::Down) {
        if dx != 0 {
            Some(Direction::towards(dx, 0))
        } else {
            None
        }
    } else if dy != 0 {
        Some(Direction::towards(0, dy))
    } else {
        None
    };

    for dir in [Some(primary), secondary].into_iter().flatten() {
        if maze.is_walkable(from.step(dir)) {
            return Some(dir);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_maze() -> Maze {
        Maze::parse(&[
            "#######", //
            "#.....#", //
            "#####.#", //
            "#.....#", //
            "#.#####", //
            "#.....#", //
            "#######",
        ])
    }

    #[test]
    fn finds_a_minimal_route() {
        let maze = snake_maze();
        let limits = PathLimits {
            goal_tolerance: 0,
            ..PathLimits::default()
        };
        let path =
            shortest_path(&maze, GridPos::new(1, 1), GridPos::new(5, 3), &limits).unwrap();
        // Right along the top row, down the connector, then back: 6 steps.
        assert_eq!(path.len(), 7);
        assert_eq!(path[0], GridPos::new(1, 1));
        assert_eq!(path[6], GridPos::new(5, 3));
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1, "non-adjacent step");
            assert!(maze.is_walkable(pair[1]));
        }
    }

    #[test]
    fn goal_tolerance_accepts_adjacent_cells() {
        let maze = snake_maze();
        let limits = PathLimits::default();
        // One step away diagonally: already within tolerance.
        assert_eq!(
            shortest_path(&maze, GridPos::new(1, 1), GridPos::new(2, 2), &limits),
            Some(vec![GridPos::new(1, 1)])
        );
    }

    #[test]
    fn depth_cap_prunes_long_routes() {
        let maze = snake_maze();
        let limits = PathLimits {
            max_steps: 3,
            goal_tolerance: 0,
            ..PathLimits::default()
        };
        assert_eq!(
            shortest_path(&maze, GridPos::new(1, 1), GridPos::new(1, 5), &limits),
            None
        );
    }

    #[test]
    fn unwalkable_start_yields_no_route() {
        let maze = snake_maze();
        assert_eq!(
            shortest_path(
                &maze,
                GridPos::new(0, 0),
                GridPos::new(1, 1),
                &PathLimits::default()
            ),
            None
        );
    }

    #[test]
    fn ring_search_retargets_walled_goals() {
        let maze = snake_maze();
        // (4, 2) is wall; its nearest walkable ring cell at radius 1 is
        // found in scan order.
        let found = nearest_walkable(&maze, GridPos::new(4, 2), 5).unwrap();
        assert!(maze.is_walkable(found));
        assert_eq!(chebyshev(GridPos::new(4, 2), found), 1);
        // A goal deep outside the grid is beyond any ring.
        assert_eq!(nearest_walkable(&maze, GridPos::new(-20, -20), 5), None);
    }

    #[test]
    fn first_step_heads_along_the_route() {
        let maze = snake_maze();
        let limits = PathLimits::default();
        let step =
            first_step_towards(&maze, GridPos::new(1, 1), GridPos::new(5, 3), &limits);
        assert_eq!(step, Some(Direction::Right));
        // Already on the goal: nothing to do.
        assert_eq!(
            first_step_towards(&maze, GridPos::new(1, 1), GridPos::new(1, 1), &limits),
            None
        );
    }

    #[test]
    fn adjacent_goal_still_gets_the_closing_step() {
        let maze = snake_maze();
        let limits = PathLimits::default();
        // One open cell away is inside routing tolerance, but a tank
        // chasing a coin must still step onto the cell to pick it up.
        assert_eq!(
            first_step_towards(&maze, GridPos::new(1, 1), GridPos::new(2, 1), &limits),
            Some(Direction::Right)
        );
        // An adjacent walled goal stays unreachable.
        assert_eq!(
            first_step_towards(&maze, GridPos::new(1, 1), GridPos::new(1, 2), &limits),
            None
        );
    }

    #[test]
    fn greedy_fallback_when_route_exceeds_caps() {
        let maze = snake_maze();
        let limits = PathLimits {
            max_steps: 2,
            goal_tolerance: 0,
            ring_radius: 0,
        };
        // BFS cannot reach (5, 5) in two steps; the greedy fallback
        // still nudges along an open axis.
        let step =
            first_step_towards(&maze, GridPos::new(1, 3), GridPos::new(5, 5), &limits);
        assert_eq!(step, Some(Direction::Right));
    }
}
