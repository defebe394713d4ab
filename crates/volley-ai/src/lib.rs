//! Tank decision policies and the sandboxed driver host.
//!
//! Tanks do not act directly on the world: each one carries a
//! [`Policy`] that is handed a filtered [`Observation`] every decision
//! tick and answers with an [`Action`](volley_core::Action). Policies
//! run on worker threads under the [`DriverHost`], which enforces a
//! per-tick decision budget and substitutes the halt action for any
//! driver that overruns, panics, or disappears.
//!
//! The stock policy, [`SmartPolicy`], is parameterized by a behaviour
//! [`Profile`] resolved from the team descriptor; [`SimplePolicy`] is
//! the plain greedy baseline.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod host;
pub mod observation;
pub mod personality;
pub mod policy;
pub mod simple;
pub mod smart;

pub use host::{DriverHost, DECISION_BUDGET};
pub use observation::{BulletView, CoinView, EnemyView, Observation, SelfView};
pub use personality::{ExploreStyle, Profile};
pub use policy::{build_policy, Policy};
pub use simple::SimplePolicy;
pub use smart::SmartPolicy;
