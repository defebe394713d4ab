//! The per-tank world snapshot handed to decision policies.
//!
//! Policies never touch the live world. Each decision tick the engine
//! builds one [`Observation`] per living tank: the tank's own full
//! stats, plus enemies, bullets, and coins within its sight radius,
//! all in grid coordinates. The maze is shared by handle; it is
//! immutable for the whole match.

use std::sync::Arc;

use volley_core::{CoinId, CoinKind, Direction, GridPos, TankId, TickId};
use volley_maze::Maze;

/// The observing tank's own state.
#[derive(Clone, Debug)]
pub struct SelfView {
    /// This tank's id.
    pub id: TankId,
    /// Grid cell the tank occupies.
    pub pos: GridPos,
    /// Current hit points.
    pub hp: f64,
    /// Maximum hit points.
    pub max_hp: f64,
    /// Movement speed in cells per second.
    pub speed: f64,
    /// Attack stat; bullet damage before the target's defence.
    pub atk: f64,
    /// Defence stat, a damage reduction fraction in `[0, 1)`.
    pub def: f64,
    /// Current facing.
    pub direction: Direction,
    /// Fire cooldown in physics ticks; zero means ready to fire.
    pub cooldown: u32,
    /// Coins held.
    pub coins: u32,
    /// Sight radius in cells.
    pub sight: i32,
}

impl SelfView {
    /// Remaining health as a fraction of maximum.
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp > 0.0 {
            self.hp / self.max_hp
        } else {
            0.0
        }
    }
}

/// A visible enemy tank.
#[derive(Clone, Copy, Debug)]
pub struct EnemyView {
    /// The enemy's id.
    pub id: TankId,
    /// Grid cell the enemy occupies.
    pub pos: GridPos,
    /// The enemy's current hit points.
    pub hp: f64,
    /// The enemy's facing.
    pub direction: Direction,
}

/// A visible bullet in flight.
#[derive(Clone, Copy, Debug)]
pub struct BulletView {
    /// Grid cell the bullet occupies.
    pub pos: GridPos,
    /// Travel direction.
    pub direction: Direction,
}

/// A visible coin.
#[derive(Clone, Copy, Debug)]
pub struct CoinView {
    /// The coin's id.
    pub id: CoinId,
    /// Grid cell the coin occupies.
    pub pos: GridPos,
    /// Coin kind; kinds differ in pickup effect and value.
    pub kind: CoinKind,
}

/// One tank's filtered snapshot of the world at a decision tick.
#[derive(Clone, Debug)]
pub struct Observation {
    /// Physics tick this snapshot was taken at.
    pub tick: TickId,
    /// The observing tank.
    pub you: SelfView,
    /// Enemies within sight, in ascending id order.
    pub enemies: Vec<EnemyView>,
    /// Bullets within sight.
    pub bullets: Vec<BulletView>,
    /// Coins within sight.
    pub coins: Vec<CoinView>,
    /// The match maze.
    pub maze: Arc<Maze>,
}

impl Observation {
    /// The visible enemy nearest by Manhattan distance. Ties resolve to
    /// the lowest id, which is first in the sorted list.
    pub fn nearest_enemy(&self) -> Option<&EnemyView> {
        self.enemies
            .iter()
            .min_by_key(|e| self.you.pos.manhattan(e.pos))
    }

    /// The visible coin nearest by Manhattan distance.
    pub fn nearest_coin(&self) -> Option<&CoinView> {
        self.coins
            .iter()
            .min_by_key(|c| self.you.pos.manhattan(c.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_maze() -> Arc<Maze> {
        Arc::new(Maze::parse(&[
            "#######", //
            "#.....#", //
            "#.....#", //
            "#.....#", //
            "#######",
        ]))
    }

    fn observation_at(pos: GridPos) -> Observation {
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
            maze: open_maze(),
        }
    }

    #[test]
    fn nearest_enemy_breaks_ties_by_id() {
        let mut obs = observation_at(GridPos::new(3, 2));
        obs.enemies = vec![
            EnemyView {
                id: TankId(2),
                pos: GridPos::new(1, 2),
                hp: 50.0,
                direction: Direction::Left,
            },
            EnemyView {
                id: TankId(3),
                pos: GridPos::new(5, 2),
                hp: 50.0,
                direction: Direction::Right,
            },
        ];
        assert_eq!(obs.nearest_enemy().map(|e| e.id), Some(TankId(2)));
    }

    #[test]
    fn nearest_coin_by_manhattan_distance() {
        let mut obs = observation_at(GridPos::new(1, 1));
        obs.coins = vec![
            CoinView {
                id: CoinId(1),
                pos: GridPos::new(5, 3),
                kind: CoinKind::Normal,
            },
            CoinView {
                id: CoinId(2),
                pos: GridPos::new(2, 1),
                kind: CoinKind::Speed,
            },
        ];
        assert_eq!(obs.nearest_coin().map(|c| c.id), Some(CoinId(2)));
        assert!(obs.nearest_enemy().is_none());
    }

    #[test]
    fn hp_ratio_handles_zero_max() {
        let mut obs = observation_at(GridPos::new(1, 1));
        assert!((obs.you.hp_ratio() - 1.0).abs() < 1e-12);
        obs.you.hp = 25.0;
        assert!((obs.you.hp_ratio() - 0.25).abs() < 1e-12);
        obs.you.max_hp = 0.0;
        assert_eq!(obs.you.hp_ratio(), 0.0);
    }
}
