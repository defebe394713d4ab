//! Volley: a multi-agent tank arena battle simulator.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Volley sub-crates. For most users, adding `volley` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use volley::prelude::*;
//!
//! fn team(name: &str, behavior: BehaviorTag) -> TeamDescriptor {
//!     TeamDescriptor {
//!         team_name: name.into(),
//!         display_name: format!("Team {name}"),
//!         color: Color(0x3366cc),
//!         api_version: "1.0".into(),
//!         policy: PolicySpec {
//!             kind: PolicyKind::RuleSet,
//!             payload: PolicyPayload { behavior, ..Default::default() },
//!         },
//!     }
//! }
//!
//! let mut config = MatchConfig::default();
//! config.maze.width = 12;
//! config.maze.height = 12;
//! config.maze.seed = "demo".into();
//! config.clock.duration_secs = 5.0;
//!
//! let roster = vec![
//!     team("alpha", BehaviorTag::Aggressive),
//!     team("bravo", BehaviorTag::Defensive),
//! ];
//! let mut world = SimulationWorld::new(config, roster).unwrap();
//! let standings = world.run();
//! assert_eq!(standings.len(), 2);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `volley-core` | IDs, geometry, actions, events, descriptors |
//! | [`maze`] | `volley-maze` | Seeded generation, grid queries, pathfinding |
//! | [`ai`] | `volley-ai` | Decision policies and the driver host |
//! | [`engine`] | `volley-engine` | The authoritative match engine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`volley-core`).
///
/// Entity ids, geometry, the action vocabulary, the event log, and
/// team descriptors.
pub use volley_core as types;

/// Maze generation, grid queries, and pathfinding (`volley-maze`).
///
/// The seeded [`maze::MazeGenerator`], the immutable [`maze::Maze`],
/// and the depth-capped route search.
pub use volley_maze as maze;

/// Decision policies and the driver host (`volley-ai`).
///
/// The [`ai::Policy`] trait, the behaviour-profile [`ai::SmartPolicy`],
/// and the budgeted [`ai::DriverHost`].
pub use volley_ai as ai;

/// The authoritative match engine (`volley-engine`).
///
/// [`engine::SimulationWorld`] runs a match tick by tick and yields
/// the event log and final standings.
pub use volley_engine as engine;

/// Common imports for typical Volley usage.
///
/// ```rust
/// use volley::prelude::*;
/// ```
pub mod prelude {
    // Core vocabulary
    pub use volley_core::{
        Action, BehaviorTag, Color, Direction, Event, EventKind, GridPos, PolicyKind,
        PolicyPayload, PolicySpec, TankId, TeamDescriptor, TickId, UpgradeKind, Vec2,
    };

    // Maze
    pub use volley_maze::{Maze, MazeGenerator};

    // Policies
    pub use volley_ai::{build_policy, DriverHost, Observation, Policy, SmartPolicy};

    // Engine
    pub use volley_engine::{
        MatchConfig, MatchMetrics, MatchStatus, ScoreRow, SimulationWorld, WorldError,
    };
}
