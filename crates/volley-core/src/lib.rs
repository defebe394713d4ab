//! Core types for the Volley arena simulator.
//!
//! Defines the vocabulary shared by every other crate in the workspace:
//! entity identifiers, geometry, the driver [`Action`], the match
//! [`EventLog`], and the [`TeamDescriptor`] manifest with its validation.
//! This crate has no dependencies on the maze, AI, or engine layers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod descriptor;
pub mod event;
pub mod geom;
pub mod id;

pub use action::{Action, UpgradeKind};
pub use descriptor::{
    BehaviorTag, Color, DescriptorError, PolicyKind, PolicyPayload, PolicySpec, TacticFlags,
    TargetPreference, TeamDescriptor, SUPPORTED_API_VERSION,
};
pub use event::{BoostKind, CoinKind, Event, EventKind, EventLog};
pub use geom::{Direction, GridPos, Vec2};
pub use id::{BulletId, CoinId, TankId, TickId};
