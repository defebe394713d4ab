//! The authoritative match world and its fixed-rate tick loop.
//!
//! One [`SimulationWorld`] owns everything in a match: the maze, the
//! entity store, the event log, and the driver host. [`step()`]
//! advances exactly one physics tick; decision rounds run on a strict
//! subsample of physics ticks, and all driver interaction goes through
//! the host so a faulty driver can never stall the loop. Every random
//! draw comes from RNGs derived from the maze seed, so a match replays
//! bit-identically from its configuration.
//!
//! [`step()`]: SimulationWorld::step

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use volley_ai::{
    build_policy, BulletView, CoinView, DriverHost, EnemyView, Observation, Policy, SelfView,
};
use volley_core::{
    Action, BulletId, CoinId, DescriptorError, Direction, EventKind, EventLog, GridPos, TankId,
    TeamDescriptor, TickId, Vec2,
};
use volley_maze::{hash_seed, Maze, MazeError};

use crate::combat::{apply_coin_boost, bullet_size, draw_coin_kind, hit_damage};
use crate::config::{ConfigError, MatchConfig};
use crate::entity::{EntityStore, Tank};
use crate::metrics::MatchMetrics;
use crate::scoreboard::{standings, ScoreRow};

/// Fraction of a cell that a tank's collision box spans from its
/// centre to each side.
const TANK_HALF_EXTENT: f64 = 0.4;
/// Fraction of a cell used as the base bullet hit radius.
const HIT_RADIUS: f64 = 0.4;

/// Whether the match is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchStatus {
    /// Ticks still advance the match.
    Running,
    /// The match is over; further steps are no-ops.
    Finished,
}

/// Errors from building a world.
#[derive(Debug)]
pub enum WorldError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// Maze generation failed.
    Maze(MazeError),
    /// A team descriptor failed validation.
    Descriptor {
        /// The offending team's registered name.
        team: String,
        /// The underlying validation failure.
        source: DescriptorError,
    },
    /// A match needs at least two teams.
    TooFewTeams {
        /// Teams actually given.
        given: usize,
    },
    /// The maze has fewer walkable cells than tanks to place.
    NoSpawnRoom {
        /// Tanks needing distinct cells.
        needed: usize,
    },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Maze(err) => write!(f, "maze generation failed: {err}"),
            Self::Descriptor { team, source } => {
                write!(f, "invalid descriptor for team {team:?}: {source}")
            }
            Self::TooFewTeams { given } => {
                write!(f, "a match needs at least 2 teams, got {given}")
            }
            Self::NoSpawnRoom { needed } => {
                write!(f, "maze lacks {needed} distinct walkable spawn cells")
            }
        }
    }
}

impl Error for WorldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Maze(err) => Some(err),
            Self::Descriptor { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for WorldError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<MazeError> for WorldError {
    fn from(err: MazeError) -> Self {
        Self::Maze(err)
    }
}

/// The authoritative state of one match.
pub struct SimulationWorld {
    config: MatchConfig,
    maze: Arc<Maze>,
    store: EntityStore,
    host: DriverHost,
    rng: ChaCha8Rng,
    tick: TickId,
    game_secs: f64,
    log: EventLog,
    metrics: MatchMetrics,
    actions: IndexMap<TankId, Action>,
    // Faults of drivers already detached, so totals survive deaths.
    faults_base: u64,
    status: MatchStatus,
}

impl SimulationWorld {
    /// Build a world from a configuration and a team roster, with each
    /// team's policy built from its descriptor.
    ///
    /// # Errors
    ///
    /// See [`WorldError`].
    pub fn new(
        config: MatchConfig,
        descriptors: Vec<TeamDescriptor>,
    ) -> Result<Self, WorldError> {
        let teams = descriptors
            .into_iter()
            .enumerate()
            .map(|(i, descriptor)| {
                let seed = hash_seed(&format!("{}/driver/{}", config.maze.seed, i + 1));
                let policy = build_policy(&descriptor.policy, seed);
                (descriptor, policy)
            })
            .collect();
        Self::with_policies(config, teams)
    }

    /// Build a world with explicitly provided policies, one per team.
    ///
    /// This is the injection point for scripted or faulty policies in
    /// tests; [`new()`](Self::new) is the descriptor-driven path.
    ///
    /// # Errors
    ///
    /// See [`WorldError`].
    pub fn with_policies(
        config: MatchConfig,
        teams: Vec<(TeamDescriptor, Box<dyn Policy>)>,
    ) -> Result<Self, WorldError> {
        config.validate()?;
        if teams.len() < 2 {
            return Err(WorldError::TooFewTeams { given: teams.len() });
        }
        for (descriptor, _) in &teams {
            descriptor
                .validate()
                .map_err(|source| WorldError::Descriptor {
                    team: descriptor.team_name.clone(),
                    source,
                })?;
        }

        let maze = Arc::new(Maze::generate(
            config.maze.width,
            config.maze.height,
            &config.maze.seed,
        )?);
        let needed = teams.len();
        if maze.walkable_cells().len() < needed {
            return Err(WorldError::NoSpawnRoom { needed });
        }

        // A separate stream from the generator's: same seed string,
        // different derivation, so spawns do not replay carving draws.
        let mut rng =
            ChaCha8Rng::seed_from_u64(hash_seed(&format!("{}/world", config.maze.seed)));
        let cell = config.maze.cell_size;
        let mut store = EntityStore::default();
        let mut host = DriverHost::new(config.decision_budget);

        let mut taken: Vec<GridPos> = Vec::new();
        for (i, (descriptor, policy)) in teams.into_iter().enumerate() {
            let id = TankId(i as u32 + 1);
            // Walkable cells outnumber tanks, so the redraw terminates.
            let spawn = loop {
                match maze.random_walkable_cell(&mut rng) {
                    Some(candidate) if !taken.contains(&candidate) => {
                        taken.push(candidate);
                        break candidate.center(cell);
                    }
                    Some(_) => continue,
                    None => return Err(WorldError::NoSpawnRoom { needed }),
                }
            };
            store.tanks.insert(
                id,
                Tank::spawn(
                    id,
                    descriptor.team_name,
                    descriptor.display_name,
                    descriptor.color,
                    spawn,
                    &config.tank,
                ),
            );
            host.attach(id, policy);
        }

        let mut metrics = MatchMetrics::default();
        let initial = (((config.maze.width * config.maze.height) as f64
            * config.coin.initial_fraction)
            .floor() as usize)
            .min(config.coin.max_coins);
        for _ in 0..initial {
            if let Some(pos) = maze.random_walkable_cell(&mut rng) {
                let kind = draw_coin_kind(&mut rng);
                store.spawn_coin(pos.center(cell), kind);
                metrics.coins_spawned += 1;
            }
        }

        let mut log = EventLog::new();
        log.record(TickId(0), EventKind::MatchStart);

        Ok(Self {
            config,
            maze,
            store,
            host,
            rng,
            tick: TickId(0),
            game_secs: 0.0,
            log,
            metrics,
            actions: IndexMap::new(),
            faults_base: 0,
            status: MatchStatus::Running,
        })
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Current physics tick.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Simulated seconds elapsed.
    pub fn seconds(&self) -> f64 {
        self.game_secs
    }

    /// Whether the match is still running.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// The match maze.
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// The event log so far.
    pub fn events(&self) -> &EventLog {
        &self.log
    }

    /// Running counters.
    pub fn metrics(&self) -> MatchMetrics {
        let mut m = self.metrics;
        m.driver_faults = self.faults_base
            + self
                .store
                .tanks
                .keys()
                .map(|&id| self.host.faults(id))
                .sum::<u64>();
        m
    }

    /// One tank's live state.
    pub fn tank(&self, id: TankId) -> Option<&Tank> {
        self.store.tanks.get(&id)
    }

    /// Current standings, highest score first.
    pub fn standings(&self) -> Vec<ScoreRow> {
        standings(self.store.tanks.values())
    }

    // ── The tick loop ──────────────────────────────────────────────

    /// Advance one physics tick. A no-op once the match has finished.
    pub fn step(&mut self) -> MatchStatus {
        if self.status == MatchStatus::Finished {
            return self.status;
        }
        self.tick = TickId(self.tick.0 + 1);
        let dt = self.config.tick_seconds();
        self.game_secs += dt;
        self.metrics.ticks += 1;

        // Ticks are 1-based, so tick 1 opens the first decision round
        // and rounds recur every `decision_interval` ticks after it.
        if (self.tick.0 - 1) % self.config.decision_interval() == 0 {
            self.run_decisions();
        }
        self.apply_actions();
        self.move_tanks();
        self.move_bullets();
        self.resolve_hits();
        self.collect_coins();
        self.tick_timers(dt);
        self.spawn_coins();
        self.check_termination();
        self.status
    }

    /// Step until the match finishes, then return the final standings.
    pub fn run(&mut self) -> Vec<ScoreRow> {
        while self.step() == MatchStatus::Running {}
        self.standings()
    }

    // ── Decisions ──────────────────────────────────────────────────

    fn run_decisions(&mut self) {
        let batch: Vec<(TankId, Observation)> = self
            .store
            .alive_ids()
            .into_iter()
            .map(|id| (id, self.build_observation(id)))
            .collect();
        let decided = self.host.decide(batch);
        self.metrics.decision_rounds += 1;

        for (tank, mut action) in decided {
            if let Some(kind) = action.upgrade.take() {
                self.log
                    .record(self.tick, EventKind::UpgradeIntent { tank, kind });
            }
            self.actions.insert(tank, action);
        }
    }

    /// The sight-filtered snapshot for one tank.
    fn build_observation(&self, id: TankId) -> Observation {
        let cell = self.config.maze.cell_size;
        let me = &self.store.tanks[&id];
        let pos = me.cell(cell);
        let sight = me.sight;

        let enemies = self
            .store
            .tanks
            .values()
            .filter(|t| t.alive && t.id != id)
            .filter(|t| pos.manhattan(t.cell(cell)) <= sight)
            .map(|t| EnemyView {
                id: t.id,
                pos: t.cell(cell),
                hp: t.hp,
                direction: t.direction,
            })
            .collect();
        let bullets = self
            .store
            .bullets
            .values()
            .filter(|b| pos.manhattan(b.pos.to_cell(cell)) <= sight)
            .map(|b| BulletView {
                pos: b.pos.to_cell(cell),
                direction: b.direction,
            })
            .collect();
        let coins = self
            .store
            .coins
            .values()
            .filter(|c| pos.manhattan(c.pos.to_cell(cell)) <= sight)
            .map(|c| CoinView {
                id: c.id,
                pos: c.pos.to_cell(cell),
                kind: c.kind,
            })
            .collect();

        Observation {
            tick: self.tick,
            you: SelfView {
                id,
                pos,
                hp: me.hp,
                max_hp: me.max_hp,
                speed: me.speed,
                atk: me.atk,
                def: me.def,
                direction: me.direction,
                cooldown: me.cooldown,
                coins: me.coins,
                sight,
            },
            enemies,
            bullets,
            coins,
            maze: self.maze.clone(),
        }
    }

    // ── Physics ────────────────────────────────────────────────────

    /// Turn each tank's standing action into velocity and fire.
    fn apply_actions(&mut self) {
        let cell = self.config.maze.cell_size;
        let tick_rate = self.config.clock.tick_rate as f64;
        let cooldown_ticks =
            (tick_rate / self.config.tank.fire_rate).round().max(1.0) as u32;

        for id in self.store.alive_ids() {
            let action = self.actions.get(&id).copied().unwrap_or_default();
            let mut fired: Option<(Vec2, Direction, f64)> = None;
            {
                let tank = &mut self.store.tanks[&id];
                match action.move_dir {
                    Some(dir) => {
                        let step = tank.speed * cell / tick_rate;
                        let (dx, dy) = dir.offset();
                        tank.velocity = Vec2::new(dx as f64 * step, dy as f64 * step);
                        tank.direction = dir;
                    }
                    None => tank.velocity = Vec2::default(),
                }
                if let Some(dir) = action.fire {
                    if tank.cooldown == 0 {
                        tank.direction = dir;
                        tank.cooldown = cooldown_ticks;
                        fired = Some((tank.pos, dir, tank.atk));
                    }
                }
                if tank.cooldown > 0 {
                    tank.cooldown -= 1;
                }
            }
            if let Some((pos, dir, atk)) = fired {
                let speed = self.config.bullet.speed * cell / tick_rate;
                let (dx, dy) = dir.offset();
                let bullet = self.store.spawn_bullet(
                    id,
                    pos,
                    Vec2::new(dx as f64 * speed, dy as f64 * speed),
                    dir,
                    atk,
                    bullet_size(atk, self.config.tank.atk),
                );
                self.log
                    .record(self.tick, EventKind::Fire { tank: id, bullet, dir });
                self.metrics.bullets_fired += 1;
            }
        }
    }

    /// Move tanks with wall collision: the full move is reverted and
    /// velocity zeroed if any corner of the collision box lands in a
    /// wall, which is what makes walls feel solid at this tick rate.
    fn move_tanks(&mut self) {
        let cell = self.config.maze.cell_size;
        let min = cell;
        let max_x = self.maze.width() as f64 * cell - cell;
        let max_y = self.maze.height() as f64 * cell - cell;
        let half = TANK_HALF_EXTENT * cell;
        let maze = self.maze.clone();

        for id in self.store.alive_ids() {
            let tank = &mut self.store.tanks[&id];
            if tank.velocity == Vec2::default() {
                continue;
            }
            let mut next = tank.pos + tank.velocity;
            next.x = next.x.clamp(min, max_x);
            next.y = next.y.clamp(min, max_y);

            let corners = [
                Vec2::new(next.x - half, next.y - half),
                Vec2::new(next.x + half, next.y - half),
                Vec2::new(next.x - half, next.y + half),
                Vec2::new(next.x + half, next.y + half),
            ];
            let blocked = corners
                .iter()
                .any(|c| !maze.is_walkable(c.to_cell(cell)));
            if blocked {
                tank.velocity = Vec2::default();
            } else {
                tank.pos = next;
            }
        }
    }

    /// Advance bullets; a bullet despawns silently on a wall cell or
    /// outside the maze.
    fn move_bullets(&mut self) {
        let cell = self.config.maze.cell_size;
        let maze = self.maze.clone();
        self.store.bullets.retain(|_, bullet| {
            bullet.pos = bullet.pos + bullet.velocity;
            maze.is_walkable(bullet.pos.to_cell(cell))
        });
    }

    /// Bullet-versus-tank collisions, one target per bullet.
    fn resolve_hits(&mut self) {
        let cell = self.config.maze.cell_size;
        let base_radius = HIT_RADIUS * cell;

        let mut contacts: Vec<(BulletId, TankId)> = Vec::new();
        for bullet in self.store.bullets.values() {
            for tank in self.store.tanks.values() {
                if !tank.alive || tank.id == bullet.owner {
                    continue;
                }
                if bullet.pos.distance(tank.pos) < base_radius + bullet.size {
                    contacts.push((bullet.id, tank.id));
                    break;
                }
            }
        }

        for (bullet_id, target_id) in contacts {
            // A target may have died to an earlier contact this tick;
            // its bullet flies on instead of hitting a wreck.
            if !self.store.tanks[&target_id].alive {
                continue;
            }
            let Some(bullet) = self.store.bullets.shift_remove(&bullet_id) else {
                continue;
            };
            let (damage, died) = {
                let target = &mut self.store.tanks[&target_id];
                let damage = hit_damage(bullet.damage, target.def, target.is_protected());
                target.hp = (target.hp - damage).max(0.0);
                (damage, target.hp <= 0.0)
            };
            if let Some(attacker) = self.store.tanks.get_mut(&bullet.owner) {
                attacker.damage_dealt += damage;
                if died {
                    attacker.kills += 1;
                }
            }
            self.log.record(
                self.tick,
                EventKind::Hit {
                    bullet: bullet_id,
                    attacker: bullet.owner,
                    target: target_id,
                    damage,
                },
            );
            self.metrics.hits += 1;

            if died {
                let target = &mut self.store.tanks[&target_id];
                target.alive = false;
                target.velocity = Vec2::default();
                self.log.record(
                    self.tick,
                    EventKind::Death {
                        tank: target_id,
                        killer: bullet.owner,
                    },
                );
                self.metrics.deaths += 1;
                self.faults_base += self.host.faults(target_id);
                self.host.detach(target_id);
                self.actions.shift_remove(&target_id);
            }
        }
    }

    /// Coin pickups; a contested coin goes to the lowest tank id.
    fn collect_coins(&mut self) {
        let cell = self.config.maze.cell_size;
        let mut picked: Vec<(CoinId, TankId)> = Vec::new();
        for coin in self.store.coins.values() {
            for tank in self.store.tanks.values() {
                if tank.alive && coin.pos.distance(tank.pos) < cell {
                    picked.push((coin.id, tank.id));
                    break;
                }
            }
        }

        for (coin_id, tank_id) in picked {
            let Some(coin) = self.store.coins.shift_remove(&coin_id) else {
                continue;
            };
            let boost = {
                let tank = &mut self.store.tanks[&tank_id];
                tank.coins += 1;
                tank.coins_collected += 1;
                apply_coin_boost(tank, coin.kind, &self.config.tank, &mut self.rng)
            };
            self.log.record(
                self.tick,
                EventKind::CoinPickup {
                    tank: tank_id,
                    coin: coin_id,
                    kind: coin.kind,
                },
            );
            self.log
                .record(self.tick, EventKind::StatBoost { tank: tank_id, boost });
            self.metrics.coins_collected += 1;
        }
    }

    fn tick_timers(&mut self, dt: f64) {
        for tank in self.store.tanks.values_mut() {
            if !tank.alive {
                continue;
            }
            tank.birth_protection = (tank.birth_protection - dt).max(0.0);
            tank.survival_secs += dt;
        }
    }

    /// One replacement coin per interval while under the floor cap.
    fn spawn_coins(&mut self) {
        let interval = (self.config.coin.spawn_interval_secs
            * self.config.clock.tick_rate as f64)
            .round() as u64;
        if interval == 0 || self.tick.0 % interval != 0 {
            return;
        }
        if self.store.coins.len() >= self.config.coin.max_coins {
            return;
        }
        if let Some(pos) = self.maze.random_walkable_cell(&mut self.rng) {
            let kind = draw_coin_kind(&mut self.rng);
            self.store
                .spawn_coin(pos.center(self.config.maze.cell_size), kind);
            self.metrics.coins_spawned += 1;
        }
    }

    /// End the match on the clock or when at most one tank remains.
    fn check_termination(&mut self) {
        let time_up = self.game_secs >= self.config.clock.duration_secs;
        let last_standing = self.store.alive_count() <= 1;
        if !(time_up || last_standing) {
            return;
        }
        self.status = MatchStatus::Finished;
        self.log.record(self.tick, EventKind::MatchEnd);
        self.log.freeze();
        for id in self.store.alive_ids() {
            self.faults_base += self.host.faults(id);
            self.host.detach(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use volley_core::{Color, PolicyKind, PolicySpec};

    fn descriptor(name: &str) -> TeamDescriptor {
        TeamDescriptor {
            team_name: name.to_owned(),
            display_name: format!("Team {name}"),
            color: Color(0x00ff00),
            api_version: "1.0".to_owned(),
            policy: PolicySpec {
                kind: PolicyKind::RuleSet,
                payload: Default::default(),
            },
        }
    }

    fn small_config() -> MatchConfig {
        let mut config = MatchConfig::default();
        config.maze.width = 10;
        config.maze.height = 10;
        config.maze.seed = "t1".to_owned();
        config
    }

    struct Halt;
    impl Policy for Halt {
        fn decide(&mut self, _obs: &Observation) -> Action {
            Action::default()
        }
    }

    struct FireRight;
    impl Policy for FireRight {
        fn decide(&mut self, _obs: &Observation) -> Action {
            Action {
                fire: Some(Direction::Right),
                ..Action::default()
            }
        }
    }

    fn scripted_world() -> SimulationWorld {
        SimulationWorld::with_policies(
            small_config(),
            vec![
                (descriptor("gunner"), Box::new(FireRight) as Box<dyn Policy>),
                (descriptor("target"), Box::new(Halt)),
            ],
        )
        .unwrap()
    }

    /// Find a horizontal run of three open cells and park the two
    /// tanks at its ends, with protections and coins cleared so the
    /// first hit is pure base-stat arithmetic.
    fn stage_axis_duel(world: &mut SimulationWorld) {
        let cell = world.config.maze.cell_size;
        let run = world
            .maze
            .walkable_cells()
            .iter()
            .copied()
            .find(|p| {
                world.maze.is_walkable(GridPos::new(p.x + 1, p.y))
                    && world.maze.is_walkable(GridPos::new(p.x + 2, p.y))
            })
            .expect("generated maze has a 3-cell open run");
        world.store.tanks[&TankId(1)].pos = run.center(cell);
        world.store.tanks[&TankId(2)].pos = GridPos::new(run.x + 2, run.y).center(cell);
        for tank in world.store.tanks.values_mut() {
            tank.birth_protection = 0.0;
        }
        world.store.coins.clear();
    }

    #[test]
    fn too_few_teams_rejected() {
        match SimulationWorld::new(small_config(), vec![descriptor("solo")]) {
            Err(WorldError::TooFewTeams { given: 1 }) => {}
            other => panic!("expected TooFewTeams, got {:?}", other.err()),
        }
    }

    #[test]
    fn bad_descriptor_rejected() {
        let mut bad = descriptor("x");
        bad.api_version = "9.9".to_owned();
        match SimulationWorld::new(small_config(), vec![descriptor("ok"), bad]) {
            Err(WorldError::Descriptor { team, .. }) => assert_eq!(team, "x"),
            other => panic!("expected Descriptor error, got {:?}", other.err()),
        }
    }

    #[test]
    fn axis_shot_deals_exactly_base_attack() {
        let mut world = scripted_world();
        stage_axis_duel(&mut world);

        let mut hit = None;
        for _ in 0..40 {
            world.step();
            hit = world.events().events().iter().find_map(|e| match e.kind {
                EventKind::Hit { damage, target, .. } => Some((damage, target)),
                _ => None,
            });
            if hit.is_some() {
                break;
            }
        }
        let (damage, target) = hit.expect("bullet connected within 40 ticks");
        assert_eq!(target, TankId(2));
        assert_eq!(damage, 10.0);
        assert_eq!(world.tank(TankId(2)).unwrap().hp, 90.0);
        // Damage and the hit are credited to the shooter.
        assert_eq!(world.tank(TankId(1)).unwrap().damage_dealt, 10.0);
    }

    #[test]
    fn birth_protection_halves_damage() {
        let mut world = scripted_world();
        stage_axis_duel(&mut world);
        world.store.tanks[&TankId(2)].birth_protection = 5.0;

        for _ in 0..40 {
            world.step();
            if world.metrics().hits > 0 {
                break;
            }
        }
        assert_eq!(world.tank(TankId(2)).unwrap().hp, 95.0);
    }

    #[test]
    fn hp_never_goes_negative_and_death_ends_the_match() {
        let mut world = scripted_world();
        stage_axis_duel(&mut world);
        world.store.tanks[&TankId(2)].hp = 1.0;

        let mut status = MatchStatus::Running;
        for _ in 0..40 {
            status = world.step();
            if status == MatchStatus::Finished {
                break;
            }
        }
        assert_eq!(status, MatchStatus::Finished);
        let target = world.tank(TankId(2)).unwrap();
        assert!(!target.alive);
        assert_eq!(target.hp, 0.0);
        let shooter = world.tank(TankId(1)).unwrap();
        assert_eq!(shooter.kills, 1);
        // Death and the closing marker are on the log, which is frozen.
        let kinds: Vec<_> = world.events().events().iter().map(|e| e.kind).collect();
        assert!(matches!(
            kinds
                .iter()
                .copied()
                .find(|k| matches!(k, EventKind::Death { .. })),
            Some(EventKind::Death {
                tank: TankId(2),
                killer: TankId(1),
            })
        ));
        assert_eq!(kinds.last(), Some(&EventKind::MatchEnd));
        assert!(world.events().is_frozen());
    }

    #[test]
    fn simultaneous_hits_kill_only_once() {
        let mut world = scripted_world();
        stage_axis_duel(&mut world);
        let target_pos = world.store.tanks[&TankId(2)].pos;
        world.store.tanks[&TankId(2)].hp = 1.0;

        // Two live bullets overlapping the target on the same tick.
        for _ in 0..2 {
            world.store.spawn_bullet(
                TankId(1),
                target_pos,
                Vec2::default(),
                Direction::Right,
                10.0,
                4.0,
            );
        }
        world.resolve_hits();

        assert!(!world.store.tanks[&TankId(2)].alive);
        assert_eq!(world.metrics().deaths, 1);
        assert_eq!(world.store.tanks[&TankId(1)].kills, 1);
        let deaths = world
            .events()
            .events()
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Death { .. }))
            .count();
        assert_eq!(deaths, 1);
        // The second bullet was not spent on the wreck.
        assert_eq!(world.store.bullets.len(), 1);
    }

    #[test]
    fn halted_tanks_never_leave_their_cells() {
        let mut world = SimulationWorld::with_policies(
            small_config(),
            vec![
                (descriptor("a"), Box::new(Halt) as Box<dyn Policy>),
                (descriptor("b"), Box::new(Halt)),
            ],
        )
        .unwrap();
        let before: Vec<Vec2> = world.store.tanks.values().map(|t| t.pos).collect();
        for _ in 0..20 {
            world.step();
        }
        let after: Vec<Vec2> = world.store.tanks.values().map(|t| t.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn identical_configurations_replay_identically() {
        let config = small_config();
        let roster = || vec![descriptor("alpha"), descriptor("bravo")];
        let mut a = SimulationWorld::new(config.clone(), roster()).unwrap();
        let mut b = SimulationWorld::new(config, roster()).unwrap();
        for _ in 0..200 {
            a.step();
            b.step();
        }
        assert_eq!(a.events().events(), b.events().events());
        for (ta, tb) in a.store.tanks.values().zip(b.store.tanks.values()) {
            assert_eq!(ta.pos, tb.pos);
            assert_eq!(ta.hp, tb.hp);
        }
    }
}
