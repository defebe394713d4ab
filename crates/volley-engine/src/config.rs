//! Match configuration and validation.
//!
//! One [`MatchConfig`] fully describes a match apart from the team
//! roster. Defaults reproduce the standard arena: a 50x30 maze at 20
//! physics ticks per second, 5 decision rounds per second, and a
//! 180-second clock.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use volley_ai::DECISION_BUDGET;
use volley_maze::MIN_DIMENSION;

/// Maze dimensions and seeding.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeConfig {
    /// Maze width in cells.
    pub width: u32,
    /// Maze height in cells.
    pub height: u32,
    /// Cell edge length in world units.
    pub cell_size: f64,
    /// Generation seed; any string.
    pub seed: String,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 30,
            cell_size: 20.0,
            seed: "llm-tank-world".to_owned(),
        }
    }
}

/// Base tank stats applied at spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TankConfig {
    /// Starting and maximum hit points.
    pub max_hp: f64,
    /// Movement speed in cells per second.
    pub speed: f64,
    /// Attack stat; also the raw damage of a fired bullet.
    pub atk: f64,
    /// Damage reduction fraction, in `[0, 1)`.
    pub def: f64,
    /// Shots per second.
    pub fire_rate: f64,
    /// Sight radius in cells.
    pub sight: i32,
    /// Spawn protection window in seconds; damage is halved while it
    /// runs.
    pub birth_protection_secs: f64,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            max_hp: 100.0,
            speed: 1.0,
            atk: 10.0,
            def: 0.0,
            fire_rate: 2.0,
            sight: 8,
            birth_protection_secs: 2.0,
        }
    }
}

/// Projectile tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletConfig {
    /// Bullet speed in cells per second.
    pub speed: f64,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self { speed: 4.0 }
    }
}

/// Coin spawning and pickup tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoinConfig {
    /// Initial coin count as a fraction of the cell count.
    pub initial_fraction: f64,
    /// Seconds between spawn attempts.
    pub spawn_interval_secs: f64,
    /// Coins on the floor at once, at most.
    pub max_coins: usize,
}

impl Default for CoinConfig {
    fn default() -> Self {
        Self {
            initial_fraction: 0.05,
            spawn_interval_secs: 5.0,
            max_coins: 50,
        }
    }
}

/// Simulation clock rates and the match duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockConfig {
    /// Physics ticks per second.
    pub tick_rate: u32,
    /// Decision rounds per second. Must divide `tick_rate`.
    pub decision_rate: u32,
    /// Wall-clock match length in simulated seconds.
    pub duration_secs: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_rate: 20,
            decision_rate: 5,
            duration_secs: 180.0,
        }
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchConfig {
    /// Maze dimensions and seed.
    pub maze: MazeConfig,
    /// Base tank stats.
    pub tank: TankConfig,
    /// Projectile tuning.
    pub bullet: BulletConfig,
    /// Coin tuning.
    pub coin: CoinConfig,
    /// Clock rates and duration.
    pub clock: ClockConfig,
    /// Per-decision-round driver budget. Must be nonzero; a zero
    /// budget would fault every driver before it could answer.
    pub decision_budget: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            tank: TankConfig::default(),
            bullet: BulletConfig::default(),
            coin: CoinConfig::default(),
            clock: ClockConfig::default(),
            decision_budget: DECISION_BUDGET,
        }
    }
}

impl MatchConfig {
    /// Check every invariant the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. The maze must be generable.
        if self.maze.width < MIN_DIMENSION || self.maze.height < MIN_DIMENSION {
            return Err(ConfigError::MazeTooSmall {
                width: self.maze.width,
                height: self.maze.height,
            });
        }
        // 2. Cell size scales every world-space quantity.
        if !self.maze.cell_size.is_finite() || self.maze.cell_size <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "maze.cell_size",
            });
        }
        // 3. The physics clock must run.
        if self.clock.tick_rate == 0 {
            return Err(ConfigError::NonPositive {
                field: "clock.tick_rate",
            });
        }
        // 4. Decisions are a strict subsample of physics ticks.
        if self.clock.decision_rate == 0
            || self.clock.tick_rate % self.clock.decision_rate != 0
        {
            return Err(ConfigError::BadDecisionRate {
                tick_rate: self.clock.tick_rate,
                decision_rate: self.clock.decision_rate,
            });
        }
        // 5. The match must end.
        if !self.clock.duration_secs.is_finite() || self.clock.duration_secs <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "clock.duration_secs",
            });
        }
        // 6. Tank stats must be live.
        if self.tank.max_hp <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "tank.max_hp",
            });
        }
        if self.tank.speed <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "tank.speed",
            });
        }
        if self.tank.atk <= 0.0 {
            return Err(ConfigError::NonPositive { field: "tank.atk" });
        }
        if self.tank.fire_rate <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "tank.fire_rate",
            });
        }
        // 7. Defence is a reduction fraction, never total immunity.
        if !(0.0..1.0).contains(&self.tank.def) {
            return Err(ConfigError::DefenseOutOfRange {
                given: self.tank.def,
            });
        }
        // 8. Bullets must travel.
        if self.bullet.speed <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "bullet.speed",
            });
        }
        // 9. Coin tuning must be sane.
        if !(0.0..=1.0).contains(&self.coin.initial_fraction) {
            return Err(ConfigError::NonPositive {
                field: "coin.initial_fraction",
            });
        }
        if self.coin.spawn_interval_secs <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "coin.spawn_interval_secs",
            });
        }
        // 10. Drivers must get a chance to answer.
        if self.decision_budget.is_zero() {
            return Err(ConfigError::NonPositive {
                field: "decision_budget",
            });
        }
        Ok(())
    }

    /// Physics ticks between decision rounds.
    pub fn decision_interval(&self) -> u64 {
        (self.clock.tick_rate / self.clock.decision_rate) as u64
    }

    /// Seconds advanced per physics tick.
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.clock.tick_rate as f64
    }

    /// Total physics ticks in a full-length match.
    pub fn duration_ticks(&self) -> u64 {
        (self.clock.duration_secs * self.clock.tick_rate as f64).ceil() as u64
    }
}

/// A configuration invariant violation.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Maze dimensions below the generator minimum.
    MazeTooSmall {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A field that must be positive (or in range) is not.
    NonPositive {
        /// Dotted field path.
        field: &'static str,
    },
    /// The decision rate does not evenly subsample the tick rate.
    BadDecisionRate {
        /// Physics ticks per second.
        tick_rate: u32,
        /// Decision rounds per second.
        decision_rate: u32,
    },
    /// Defence must stay in `[0, 1)`.
    DefenseOutOfRange {
        /// Offending value.
        given: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MazeTooSmall { width, height } => {
                write!(
                    f,
                    "maze {width}x{height} below generator minimum of \
                     {MIN_DIMENSION}x{MIN_DIMENSION}"
                )
            }
            Self::NonPositive { field } => {
                write!(f, "config field {field} must be positive and in range")
            }
            Self::BadDecisionRate {
                tick_rate,
                decision_rate,
            } => {
                write!(
                    f,
                    "decision rate {decision_rate} must be positive and divide \
                     tick rate {tick_rate}"
                )
            }
            Self::DefenseOutOfRange { given } => {
                write!(f, "tank defence {given} outside [0, 1)")
            }
        }
    }
}

impl Error for ConfigError {}
