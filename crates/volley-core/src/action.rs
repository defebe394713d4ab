//! The per-tick action a driver returns to the engine.

use crate::geom::Direction;

/// A stat a driver may request to improve when it has banked enough coins.
///
/// Upgrade intents are recorded in the event log for downstream analysis;
/// stat changes themselves come from coin pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    /// Restore or extend hit points.
    Health,
    /// Raise attack power.
    Attack,
    /// Raise damage reduction.
    Defense,
    /// Raise movement speed.
    Speed,
}

/// A driver's decision for one AI tick.
///
/// `Action::default()` is the halt action — no movement, no fire, no
/// upgrade — which the engine substitutes whenever a driver times out,
/// panics, or disconnects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Action {
    /// Direction to drive in, or `None` to stop.
    pub move_dir: Option<Direction>,
    /// Direction to fire in, or `None` to hold fire. Ignored while the
    /// tank's fire cooldown is running.
    pub fire: Option<Direction>,
    /// Declared upgrade intent, or `None`.
    pub upgrade: Option<UpgradeKind>,
}

impl Action {
    /// Movement in `dir` with no fire and no upgrade.
    pub fn drive(dir: Direction) -> Self {
        Self {
            move_dir: Some(dir),
            ..Self::default()
        }
    }
}
