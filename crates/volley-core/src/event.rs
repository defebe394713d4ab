//! The append-only match event stream.
//!
//! Every observable state change the simulation makes is recorded as an
//! [`Event`] in the [`EventLog`]: fires, hits, deaths, coin pickups, stat
//! boosts, declared upgrade intents, and the match start/end markers.
//! Events are ordered by tick, then by emission order within the tick.
//! The log is frozen when the match ends; later records are discarded.

use crate::geom::Direction;
use crate::id::{BulletId, CoinId, TankId, TickId};
use crate::UpgradeKind;

/// The kind of a coin on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoinKind {
    /// Grants a random stat boost on pickup.
    Normal,
    /// Grants a speed boost on pickup.
    Speed,
    /// Grants an attack boost on pickup.
    Bullet,
}

impl CoinKind {
    /// Relative desirability weight used by drivers when ranking coins.
    pub fn value(self) -> f64 {
        match self {
            CoinKind::Normal => 1.0,
            CoinKind::Speed => 2.0,
            CoinKind::Bullet => 3.0,
        }
    }
}

/// A stat improvement applied by a coin pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoostKind {
    /// Movement speed multiplier, capped relative to the base stat.
    Speed,
    /// Attack power multiplier.
    Attack,
    /// Additive damage reduction, capped at 0.7.
    Defense,
}

/// What happened. Variants carry the acting and affected entity IDs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventKind {
    /// The match started.
    MatchStart,
    /// `tank` fired `bullet` in `dir`.
    Fire {
        /// The firing tank.
        tank: TankId,
        /// The spawned bullet.
        bullet: BulletId,
        /// Travel direction.
        dir: Direction,
    },
    /// `bullet` (owned by `attacker`) struck `target` for `damage`.
    Hit {
        /// The bullet that connected.
        bullet: BulletId,
        /// Owner of the bullet.
        attacker: TankId,
        /// The tank that was struck.
        target: TankId,
        /// Damage applied after defense and birth protection.
        damage: f64,
    },
    /// `tank` was destroyed. `killer` is the owner of the lethal bullet.
    Death {
        /// The destroyed tank.
        tank: TankId,
        /// Credited attacker.
        killer: TankId,
    },
    /// `tank` picked up `coin`.
    CoinPickup {
        /// The collecting tank.
        tank: TankId,
        /// The consumed coin.
        coin: CoinId,
        /// The coin's kind.
        kind: CoinKind,
    },
    /// A coin pickup boosted one of `tank`'s stats.
    StatBoost {
        /// The boosted tank.
        tank: TankId,
        /// Which stat improved.
        boost: BoostKind,
    },
    /// `tank` declared an upgrade intent in its action.
    UpgradeIntent {
        /// The declaring tank.
        tank: TankId,
        /// The requested upgrade.
        kind: UpgradeKind,
    },
    /// The match ended.
    MatchEnd,
}

/// A single timestamped record in the event log.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Event {
    /// Physics tick at which the event occurred.
    pub tick: TickId,
    /// What happened.
    pub kind: EventKind,
}

/// The append-only, freezable event log for one match.
///
/// Records are kept in emission order. Once [`freeze()`](EventLog::freeze)
/// is called, further records are silently discarded; the log for a
/// finished match never changes.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
    frozen: bool,
}

impl EventLog {
    /// An empty, unfrozen log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, unless the log is frozen.
    pub fn record(&mut self, tick: TickId, kind: EventKind) {
        if !self.frozen {
            self.events.push(Event { tick, kind });
        }
    }

    /// Freeze the log. Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Whether the log has been frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// All recorded events, in emission order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
