//! Live match entities and their store.

use indexmap::IndexMap;
use volley_core::{BulletId, CoinId, CoinKind, Color, Direction, GridPos, TankId, Vec2};

use crate::config::TankConfig;

/// One tank's live state, including its running score tallies.
#[derive(Clone, Debug)]
pub struct Tank {
    /// Stable id, assigned in roster order.
    pub id: TankId,
    /// Owning team's registered name.
    pub team_name: String,
    /// Owning team's display name.
    pub display_name: String,
    /// Team colour.
    pub color: Color,
    /// World-space position of the tank centre.
    pub pos: Vec2,
    /// Current velocity in world units per tick.
    pub velocity: Vec2,
    /// Facing.
    pub direction: Direction,
    /// Current hit points; zero is dead.
    pub hp: f64,
    /// Hit point ceiling.
    pub max_hp: f64,
    /// Movement speed in cells per second.
    pub speed: f64,
    /// Attack stat; raw damage of a fired bullet.
    pub atk: f64,
    /// Damage reduction fraction.
    pub def: f64,
    /// Ticks until the gun is ready.
    pub cooldown: u32,
    /// Coins currently held.
    pub coins: u32,
    /// Sight radius in cells.
    pub sight: i32,
    /// Spawn protection seconds remaining.
    pub birth_protection: f64,
    /// Whether the tank is still in the match.
    pub alive: bool,
    /// Kills credited.
    pub kills: u32,
    /// Damage dealt to others.
    pub damage_dealt: f64,
    /// Coins picked up over the whole match.
    pub coins_collected: u32,
    /// Seconds survived.
    pub survival_secs: f64,
}

impl Tank {
    /// A fresh tank at `pos` with base stats.
    pub fn spawn(
        id: TankId,
        team_name: String,
        display_name: String,
        color: Color,
        pos: Vec2,
        base: &TankConfig,
    ) -> Self {
        Self {
            id,
            team_name,
            display_name,
            color,
            pos,
            velocity: Vec2::default(),
            direction: Direction::Up,
            hp: base.max_hp,
            max_hp: base.max_hp,
            speed: base.speed,
            atk: base.atk,
            def: base.def,
            cooldown: 0,
            coins: 0,
            sight: base.sight,
            birth_protection: base.birth_protection_secs,
            alive: true,
            kills: 0,
            damage_dealt: 0.0,
            coins_collected: 0,
            survival_secs: 0.0,
        }
    }

    /// Whether spawn protection is still running.
    pub fn is_protected(&self) -> bool {
        self.birth_protection > 0.0
    }

    /// The grid cell under the tank centre.
    pub fn cell(&self, cell_size: f64) -> GridPos {
        self.pos.to_cell(cell_size)
    }
}

/// A bullet in flight.
#[derive(Clone, Copy, Debug)]
pub struct Bullet {
    /// Unique id.
    pub id: BulletId,
    /// Tank that fired it; never hit by its own bullet.
    pub owner: TankId,
    /// World-space position.
    pub pos: Vec2,
    /// Velocity in world units per tick.
    pub velocity: Vec2,
    /// Travel direction.
    pub direction: Direction,
    /// Raw damage before the target's defence.
    pub damage: f64,
    /// Collision radius contribution in world units.
    pub size: f64,
}

/// A coin on the floor.
#[derive(Clone, Copy, Debug)]
pub struct Coin {
    /// Unique id.
    pub id: CoinId,
    /// World-space position.
    pub pos: Vec2,
    /// Kind, which decides the pickup effect.
    pub kind: CoinKind,
}

/// All live entities, keyed by id in insertion order.
///
/// Insertion order doubles as id order, which keeps every iteration in
/// the engine deterministic.
#[derive(Debug, Default)]
pub struct EntityStore {
    /// Tanks by id. Dead tanks stay for the scoreboard.
    pub tanks: IndexMap<TankId, Tank>,
    /// Bullets in flight.
    pub bullets: IndexMap<BulletId, Bullet>,
    /// Coins on the floor.
    pub coins: IndexMap<CoinId, Coin>,
    next_bullet: u64,
    next_coin: u64,
}

impl EntityStore {
    /// Ids of tanks still in the match, in id order.
    pub fn alive_ids(&self) -> Vec<TankId> {
        self.tanks
            .values()
            .filter(|t| t.alive)
            .map(|t| t.id)
            .collect()
    }

    /// Number of tanks still in the match.
    pub fn alive_count(&self) -> usize {
        self.tanks.values().filter(|t| t.alive).count()
    }

    /// Add a bullet, assigning the next id.
    pub fn spawn_bullet(
        &mut self,
        owner: TankId,
        pos: Vec2,
        velocity: Vec2,
        direction: Direction,
        damage: f64,
        size: f64,
    ) -> BulletId {
        self.next_bullet += 1;
        let id = BulletId(self.next_bullet);
        self.bullets.insert(
            id,
            Bullet {
                id,
                owner,
                pos,
                velocity,
                direction,
                damage,
                size,
            },
        );
        id
    }

    /// Add a coin, assigning the next id.
    pub fn spawn_coin(&mut self, pos: Vec2, kind: CoinKind) -> CoinId {
        self.next_coin += 1;
        let id = CoinId(self.next_coin);
        self.coins.insert(id, Coin { id, pos, kind });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_tank_carries_base_stats() {
        let base = TankConfig::default();
        let tank = Tank::spawn(
            TankId(1),
            "alpha".to_owned(),
            "Alpha Squad".to_owned(),
            Color(0xff0000),
            Vec2::new(30.0, 30.0),
            &base,
        );
        assert!(tank.alive);
        assert!(tank.is_protected());
        assert_eq!(tank.hp, base.max_hp);
        assert_eq!(tank.cell(20.0), GridPos::new(1, 1));
    }

    #[test]
    fn bullet_and_coin_ids_are_sequential() {
        let mut store = EntityStore::default();
        let b1 = store.spawn_bullet(
            TankId(1),
            Vec2::default(),
            Vec2::default(),
            Direction::Up,
            10.0,
            4.0,
        );
        let b2 = store.spawn_bullet(
            TankId(1),
            Vec2::default(),
            Vec2::default(),
            Direction::Up,
            10.0,
            4.0,
        );
        assert_eq!(b1, BulletId(1));
        assert_eq!(b2, BulletId(2));
        let c1 = store.spawn_coin(Vec2::default(), CoinKind::Normal);
        assert_eq!(c1, CoinId(1));
    }

    #[test]
    fn alive_bookkeeping() {
        let base = TankConfig::default();
        let mut store = EntityStore::default();
        for id in 1..=3u32 {
            let tank = Tank::spawn(
                TankId(id),
                format!("team-{id}"),
                format!("Team {id}"),
                Color(0),
                Vec2::default(),
                &base,
            );
            store.tanks.insert(tank.id, tank);
        }
        store.tanks[&TankId(2)].alive = false;
        assert_eq!(store.alive_count(), 2);
        assert_eq!(store.alive_ids(), vec![TankId(1), TankId(3)]);
    }
}
