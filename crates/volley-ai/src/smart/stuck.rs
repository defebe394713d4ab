//! Stuck detection and escape moves.
//!
//! Tanks wedge themselves against walls and in dead ends; a wedged
//! tank burns its whole match doing nothing. The detector watches the
//! recent position history, and the escape scorer picks the most open
//! direction out, biased away from recently visited cells.

use volley_core::{Direction, GridPos};

use crate::observation::Observation;

use super::{SmartPolicy, POSITION_HISTORY};

/// Lookahead depth when scoring escape directions.
const ESCAPE_LOOKAHEAD: i32 = 5;
/// Escape score below which the tank heads for unexplored ground
/// instead of the locally best direction.
const ESCAPE_MIN_SCORE: f64 = 5.0;

impl SmartPolicy {
    /// Record the current cell in the position history.
    pub(super) fn note_position(&mut self, pos: GridPos) {
        if self.recent.len() == POSITION_HISTORY {
            self.recent.pop_front();
        }
        self.recent.push_back(pos);
    }

    /// Whether the recent history looks wedged: the current cell seen
    /// three or more times, or the last six positions covering three
    /// or fewer distinct cells.
    pub(super) fn is_stuck(&self) -> bool {
        let Some(&current) = self.recent.back() else {
            return false;
        };
        let repeats = self.recent.iter().filter(|&&p| p == current).count();
        if repeats > 2 {
            return true;
        }
        if self.recent.len() >= 6 {
            let mut distinct: Vec<GridPos> = Vec::with_capacity(6);
            for &p in self.recent.iter().rev().take(6) {
                if !distinct.contains(&p) {
                    distinct.push(p);
                }
            }
            if distinct.len() <= 3 {
                return true;
            }
        }
        false
    }

    /// The best direction out of a wedge.
    ///
    /// Scores each open direction by how far it runs before a wall
    /// (nearer open cells weigh more), how open its first cell is, and
    /// whether that cell was just visited. A weak best score means the
    /// local area is exhausted, so the tank heads for unexplored
    /// ground instead. Issuing an escape clears the position history;
    /// the old history would re-trip the detector next round.
    pub(super) fn escape_move(&mut self, obs: &Observation) -> Option<Direction> {
        let pos = obs.you.pos;
        let mut best: Option<(f64, Direction)> = None;

        for dir in Direction::ALL {
            let first = pos.step(dir);
            if !obs.maze.is_walkable(first) {
                continue;
            }
            let mut score = 0.0;
            let mut cursor = pos;
            for step in 1..=ESCAPE_LOOKAHEAD {
                cursor = cursor.step(dir);
                if !obs.maze.is_walkable(cursor) {
                    break;
                }
                score += (ESCAPE_LOOKAHEAD + 1 - step) as f64;
            }
            score += 2.0 * obs.maze.open_neighbour_count(first) as f64;
            if self.recent.contains(&first) {
                score -= 10.0;
            }
            if best.map_or(true, |(b, _)| score > b) {
                best = Some((score, dir));
            }
        }

        let escape = match best {
            Some((score, dir)) if score >= ESCAPE_MIN_SCORE => Some(dir),
            Some((_, dir)) => Some(self.unexplored_direction(obs).unwrap_or(dir)),
            None => None,
        };
        if escape.is_some() {
            self.recent.clear();
        }
        escape
    }

    /// The direction with the most nearby unvisited open cells, if any.
    pub(super) fn unexplored_direction(&self, obs: &Observation) -> Option<Direction> {
        let pos = obs.you.pos;
        let mut best: Option<(f64, Direction)> = None;
        for dir in Direction::ALL {
            if !obs.maze.is_walkable(pos.step(dir)) {
                continue;
            }
            let mut score = 0.0;
            let mut cursor = pos;
            for step in 1..=3 {
                cursor = cursor.step(dir);
                if !obs.maze.is_walkable(cursor) {
                    break;
                }
                if !self.visited.contains(&cursor) {
                    score += ((4 - step) * 5) as f64;
                }
            }
            if score > 0.0 && best.map_or(true, |(b, _)| score > b) {
                best = Some((score, dir));
            }
        }
        best.map(|(_, dir)| dir)
    }
}
