//! A deliberately plain baseline policy.
//!
//! Fires at the nearest visible enemy when the gun is ready, otherwise
//! walks greedily towards the nearest coin, then towards the nearest
//! enemy, and wanders with a sticky random direction when nothing is
//! visible. Useful as a regression baseline and as a predictable
//! opponent in tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use volley_core::{Action, Direction};

use crate::observation::Observation;
use crate::policy::Policy;

/// Probability per decision of re-rolling the wander direction.
const WANDER_REROLL: f64 = 0.1;

/// The baseline greedy policy.
#[derive(Debug)]
pub struct SimplePolicy {
    rng: ChaCha8Rng,
    wander: Option<Direction>,
}

impl SimplePolicy {
    /// Create a baseline policy with a per-tank seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            wander: None,
        }
    }

    fn random_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.random_range(0..Direction::ALL.len())]
    }

    /// Dominant-axis step towards `dx, dy`, trying the secondary axis
    /// when the first is blocked.
    fn greedy_towards(&self, obs: &Observation, dx: i32, dy: i32) -> Option<Direction> {
        let primary = Direction::towards(dx, dy);
        let secondary = if matches!(primary, Direction::Up | Direction::Down) {
            (dx != 0).then(|| Direction::towards(dx, 0))
        } else {
            (dy != 0).then(|| Direction::towards(0, dy))
        };
        [Some(primary), secondary]
            .into_iter()
            .flatten()
            .find(|dir| obs.maze.is_walkable(obs.you.pos.step(*dir)))
    }
}

impl Policy for SimplePolicy {
    fn decide(&mut self, obs: &Observation) -> Action {
        if let Some(enemy) = obs.nearest_enemy() {
            if obs.you.cooldown == 0 {
                let dx = enemy.pos.x - obs.you.pos.x;
                let dy = enemy.pos.y - obs.you.pos.y;
                return Action {
                    fire: Some(Direction::towards(dx, dy)),
                    ..Action::default()
                };
            }
        }

        if let Some(coin) = obs.nearest_coin() {
            let dx = coin.pos.x - obs.you.pos.x;
            let dy = coin.pos.y - obs.you.pos.y;
            if let Some(dir) = self.greedy_towards(obs, dx, dy) {
                return Action::drive(dir);
            }
        }

        if let Some(enemy) = obs.nearest_enemy() {
            let dx = enemy.pos.x - obs.you.pos.x;
            let dy = enemy.pos.y - obs.you.pos.y;
            if let Some(dir) = self.greedy_towards(obs, dx, dy) {
                return Action::drive(dir);
            }
        }

        // Sticky wander: keep the current direction while it is open,
        // with a small chance of changing course anyway.
        let reroll = self.rng.random_bool(WANDER_REROLL);
        let dir = match self.wander {
            Some(dir) if !reroll && obs.maze.is_walkable(obs.you.pos.step(dir)) => dir,
            _ => self.random_direction(),
        };
        self.wander = Some(dir);
        Action::drive(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use volley_core::{CoinId, CoinKind, GridPos, TankId, TickId};
    use volley_maze::Maze;

    use crate::observation::{CoinView, EnemyView, SelfView};

    fn observation(pos: GridPos) -> Observation {
        Observation {
            tick: TickId(0),
            you: SelfView {
                id: TankId(1),
                pos,
                hp: 100.0,
                max_hp: 100.0,
                speed: 1.0,
                atk: 10.0,
                def: 0.0,
                direction: Direction::Up,
                cooldown: 0,
                coins: 0,
                sight: 8,
            },
            enemies: Vec::new(),
            bullets: Vec::new(),
            coins: Vec::new(),
            maze: Arc::new(Maze::parse(&[
                "#######", //
                "#.....#", //
                "#.....#", //
                "#.....#", //
                "#######",
            ])),
        }
    }

    #[test]
    fn fires_at_visible_enemy_when_ready() {
        let mut policy = SimplePolicy::new(1);
        let mut obs = observation(GridPos::new(1, 2));
        obs.enemies.push(EnemyView {
            id: TankId(2),
            pos: GridPos::new(5, 2),
            hp: 100.0,
            direction: Direction::Left,
        });
        let action = policy.decide(&obs);
        assert_eq!(action.fire, Some(Direction::Right));
        assert_eq!(action.move_dir, None);
    }

    #[test]
    fn walks_towards_coin_while_reloading() {
        let mut policy = SimplePolicy::new(1);
        let mut obs = observation(GridPos::new(1, 1));
        obs.you.cooldown = 5;
        obs.coins.push(CoinView {
            id: CoinId(1),
            pos: GridPos::new(4, 1),
            kind: CoinKind::Normal,
        });
        let action = policy.decide(&obs);
        assert_eq!(action.move_dir, Some(Direction::Right));
        assert_eq!(action.fire, None);
    }

    #[test]
    fn wanders_when_nothing_is_visible() {
        let mut policy = SimplePolicy::new(1);
        let obs = observation(GridPos::new(3, 2));
        for _ in 0..20 {
            let action = policy.decide(&obs);
            let dir = action.move_dir.unwrap();
            // The wander step must be open from the centre cell.
            assert!(obs.maze.is_walkable(obs.you.pos.step(dir)));
        }
    }
}
