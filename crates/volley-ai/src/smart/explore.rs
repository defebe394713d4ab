//! Idle-time movement: coin collection and map coverage per style.

use volley_core::{Action, GridPos};
use volley_maze::nearest_walkable;

use crate::observation::Observation;
use crate::personality::ExploreStyle;

use super::SmartPolicy;

/// Coin pickup range for the safe style.
const SAFE_COIN_RANGE: i32 = 4;
/// Coin pickup range for the tactical style.
const TACTICAL_COIN_RANGE: i32 = 5;
/// Enemy proximity that makes a coin contested.
const CONTESTED_RANGE: i32 = 6;
/// Minimum score for chasing a weakened enemy.
const VULNERABLE_SCORE: f64 = 20.0;

impl SmartPolicy {
    /// The exploration decision for this profile's style.
    pub(super) fn explore(&mut self, obs: &Observation) -> Action {
        match self.profile.explore {
            ExploreStyle::Tactical => self.tactical_explore(obs),
            ExploreStyle::Hunt => self.hunt_explore(obs),
            ExploreStyle::Safe => self.safe_explore(obs),
            ExploreStyle::Systematic => self.systematic_explore(obs),
            ExploreStyle::Greedy => self.greedy_explore(obs),
            ExploreStyle::Avoid => self.avoid_explore(obs),
            ExploreStyle::Random => match self.random_open_direction(obs) {
                Some(dir) => Action::drive(dir),
                None => Action::default(),
            },
        }
    }

    // ── Styles ─────────────────────────────────────────────────────

    /// Only grab coins that are nearly underfoot; otherwise cover ground.
    fn safe_explore(&mut self, obs: &Observation) -> Action {
        if let Some(coin) = obs.nearest_coin() {
            if obs.you.pos.manhattan(coin.pos) <= SAFE_COIN_RANGE {
                if let Some(dir) = self.step_towards(obs, coin.pos) {
                    return Action::drive(dir);
                }
            }
        }
        self.roam(obs)
    }

    /// Chase the best value-per-distance coin on the board.
    fn greedy_explore(&mut self, obs: &Observation) -> Action {
        let mut best: Option<(f64, GridPos)> = None;
        for coin in &obs.coins {
            let dist = obs.you.pos.manhattan(coin.pos);
            let worth = coin.kind.value() / (dist as f64 + 1.0) * self.profile.coin_priority;
            if best.map_or(true, |(b, _)| worth > b) {
                best = Some((worth, coin.pos));
            }
        }
        if let Some((_, goal)) = best {
            if let Some(dir) = self.step_towards(obs, goal) {
                return Action::drive(dir);
            }
        }
        self.roam(obs)
    }

    /// Coins when close enough, otherwise sweep the quadrants.
    fn systematic_explore(&mut self, obs: &Observation) -> Action {
        if let Some(coin) = obs.nearest_coin() {
            let range = (6.0 * self.profile.coin_priority) as i32;
            if obs.you.pos.manhattan(coin.pos) <= range {
                if let Some(dir) = self.step_towards(obs, coin.pos) {
                    return Action::drive(dir);
                }
            }
        }
        self.quadrant_sweep(obs)
    }

    /// Head straight for the nearest enemy.
    fn hunt_explore(&mut self, obs: &Observation) -> Action {
        if let Some(enemy) = obs.nearest_enemy() {
            let goal = enemy.pos;
            if let Some(dir) = self.step_towards(obs, goal) {
                return Action::drive(dir);
            }
        }
        self.quadrant_sweep(obs)
    }

    /// Keep the most distance from everything.
    fn avoid_explore(&mut self, obs: &Observation) -> Action {
        if !obs.enemies.is_empty() {
            let mut best: Option<(i32, volley_core::Direction)> = None;
            for dir in volley_core::Direction::ALL {
                let next = obs.you.pos.step(dir);
                if !obs.maze.is_walkable(next) {
                    continue;
                }
                let nearest = obs
                    .enemies
                    .iter()
                    .map(|e| next.manhattan(e.pos))
                    .min()
                    .unwrap_or(i32::MAX);
                if best.map_or(true, |(b, _)| nearest > b) {
                    best = Some((nearest, dir));
                }
            }
            if let Some((_, dir)) = best {
                return Action::drive(dir);
            }
        }
        self.roam(obs)
    }

    /// Zone control: safe coins first, then weakened enemies, then the
    /// best map anchor, then the quadrant sweep.
    fn tactical_explore(&mut self, obs: &Observation) -> Action {
        if let Some(goal) = self.safe_coin(obs) {
            if let Some(dir) = self.step_towards(obs, goal) {
                return Action::drive(dir);
            }
        }
        if let Some(goal) = self.vulnerable_target(obs) {
            if let Some(dir) = self.step_towards(obs, goal) {
                return Action::drive(dir);
            }
        }
        if self.profile.tactics.zone_control {
            if let Some(goal) = self.zone_anchor(obs) {
                if let Some(dir) = self.step_towards(obs, goal) {
                    return Action::drive(dir);
                }
            }
        }
        self.quadrant_sweep(obs)
    }

    // ── Tactical helpers ───────────────────────────────────────────

    /// A nearby coin worth grabbing: close, and either uncontested or
    /// the tank is healthy enough to contest it.
    fn safe_coin(&self, obs: &Observation) -> Option<GridPos> {
        let coin = obs.nearest_coin()?;
        if obs.you.pos.manhattan(coin.pos) > TACTICAL_COIN_RANGE {
            return None;
        }
        let contested = obs
            .enemies
            .iter()
            .any(|e| e.pos.manhattan(coin.pos) <= CONTESTED_RANGE);
        if !contested || obs.you.hp_ratio() > 0.7 {
            Some(coin.pos)
        } else {
            None
        }
    }

    /// An enemy weak or cornered enough to be worth hunting down.
    fn vulnerable_target(&self, obs: &Observation) -> Option<GridPos> {
        let mut best: Option<(f64, GridPos)> = None;
        for enemy in &obs.enemies {
            let mut score = 0.0;
            if enemy.hp <= 30.0 {
                score += 50.0;
            } else if enemy.hp <= 60.0 {
                score += 20.0;
            }
            if obs.maze.is_choke_point(enemy.pos) {
                score += 30.0;
            }
            score -= obs.you.pos.manhattan(enemy.pos) as f64;
            if score > VULNERABLE_SCORE && best.map_or(true, |(b, _)| score > b) {
                best = Some((score, enemy.pos));
            }
        }
        best.map(|(_, pos)| pos)
    }

    /// The highest-value map anchor worth holding: the centre and four
    /// inset corners, scored by openness against travel distance. An
    /// anchor already held (within two cells) is not worth a move.
    fn zone_anchor(&self, obs: &Observation) -> Option<GridPos> {
        let w = obs.maze.width() as i32;
        let h = obs.maze.height() as i32;
        let anchors = [
            GridPos::new(w / 2, h / 2),
            GridPos::new(5, 5),
            GridPos::new(w - 6, 5),
            GridPos::new(5, h - 6),
            GridPos::new(w - 6, h - 6),
        ];
        let mut best: Option<(f64, GridPos)> = None;
        for anchor in anchors {
            let Some(cell) = nearest_walkable(&obs.maze, anchor, 5) else {
                continue;
            };
            let score = obs.maze.open_neighbour_count(cell) as f64 * 10.0
                - obs.you.pos.manhattan(cell) as f64;
            if best.map_or(true, |(b, _)| score > b) {
                best = Some((score, cell));
            }
        }
        match best {
            Some((_, cell)) if obs.you.pos.manhattan(cell) > 2 => Some(cell),
            _ => None,
        }
    }

    // ── Coverage ───────────────────────────────────────────────────

    /// Visit the four map quadrants in nearest-first order, resetting
    /// once all are covered.
    fn quadrant_sweep(&mut self, obs: &Observation) -> Action {
        let w = obs.maze.width() as i32;
        let h = obs.maze.height() as i32;
        let centres = [
            GridPos::new(w / 4, h / 4),
            GridPos::new(3 * w / 4, h / 4),
            GridPos::new(w / 4, 3 * h / 4),
            GridPos::new(3 * w / 4, 3 * h / 4),
        ];

        for (i, centre) in centres.iter().enumerate() {
            if !self.quadrants_done[i] && obs.you.pos.manhattan(*centre) < 3 {
                self.quadrants_done[i] = true;
            }
        }
        if self.quadrants_done.iter().all(|&done| done) {
            self.quadrants_done = [false; 4];
        }

        let target = centres
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.quadrants_done[*i])
            .min_by_key(|(_, c)| obs.you.pos.manhattan(**c))
            .map(|(_, c)| *c);
        if let Some(goal) = target {
            if let Some(dir) = self.step_towards(obs, goal) {
                return Action::drive(dir);
            }
        }
        self.roam(obs)
    }

    /// Head for the most promising unexplored area, or anywhere open.
    fn roam(&mut self, obs: &Observation) -> Action {
        if let Some(goal) = self.unexplored_area(obs) {
            if let Some(dir) = self.step_towards(obs, goal) {
                return Action::drive(dir);
            }
        }
        match self
            .unexplored_direction(obs)
            .or_else(|| self.random_open_direction(obs))
        {
            Some(dir) => Action::drive(dir),
            None => Action::default(),
        }
    }

    /// Scan outward rings of bearings for unvisited open cells,
    /// favouring near cells with unvisited neighbourhoods.
    fn unexplored_area(&self, obs: &Observation) -> Option<GridPos> {
        let pos = obs.you.pos;
        let mut best: Option<(f64, GridPos)> = None;
        for radius in (3..10).step_by(2) {
            for octant in 0..8 {
                let angle = octant as f64 * std::f64::consts::FRAC_PI_4;
                let candidate = GridPos::new(
                    pos.x + (angle.cos() * radius as f64).round() as i32,
                    pos.y + (angle.sin() * radius as f64).round() as i32,
                );
                if !obs.maze.is_walkable(candidate) || self.visited.contains(&candidate) {
                    continue;
                }
                let fresh_neighbours = obs
                    .maze
                    .open_neighbours(candidate)
                    .iter()
                    .filter(|n| !self.visited.contains(*n))
                    .count();
                let score = 100.0 / radius as f64 + fresh_neighbours as f64 * 10.0;
                if best.map_or(true, |(b, _)| score > b) {
                    best = Some((score, candidate));
                }
            }
        }
        best.map(|(_, cell)| cell)
    }
}
