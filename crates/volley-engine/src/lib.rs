//! The authoritative fixed-rate match engine.
//!
//! A [`SimulationWorld`] runs one match: a seeded maze, a roster of
//! tanks with hosted decision policies, bullets, coins, and the
//! append-only event log. Physics advances at a fixed tick rate;
//! decisions run on a strict subsample of those ticks through the
//! driver host, so a slow or broken driver costs its tank turns, never
//! the simulation its clock. All randomness derives from the maze
//! seed: a configuration replays bit-identically.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod combat;
pub mod config;
pub mod entity;
pub mod metrics;
pub mod scoreboard;
pub mod world;

pub use combat::{apply_coin_boost, bullet_size, draw_coin_kind, hit_damage};
pub use config::{
    BulletConfig, ClockConfig, CoinConfig, ConfigError, MatchConfig, MazeConfig, TankConfig,
};
pub use entity::{Bullet, Coin, EntityStore, Tank};
pub use metrics::MatchMetrics;
pub use scoreboard::{score, standings, ScoreRow};
pub use world::{MatchStatus, SimulationWorld, WorldError};
