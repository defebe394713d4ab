//! Strongly-typed identifiers for arena entities.
//!
//! All entity IDs are allocated sequentially by the entity store at spawn
//! time and remain stable for the lifetime of a match. They are opaque to
//! drivers: an ID says nothing about spawn order being observable.

use std::fmt;

/// Identifies a tank within a match.
///
/// Tanks are registered at match start and assigned sequential IDs.
/// `TankId(n)` corresponds to the n-th registered team descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TankId(pub u32);

impl fmt::Display for TankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TankId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a bullet in flight.
///
/// Allocated from a per-match monotonic counter on fire; never reused
/// within a match, even after the bullet despawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(pub u64);

impl fmt::Display for BulletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BulletId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies a coin on the field.
///
/// Allocated from a per-match monotonic counter on spawn; never reused
/// within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinId(pub u64);

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CoinId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Monotonically increasing physics tick counter.
///
/// Incremented each time the simulation advances one physics step.
/// Tick 0 is the pre-start state; the first stepped tick is 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_inner_value() {
        assert_eq!(TankId(3).to_string(), "3");
        assert_eq!(BulletId(17).to_string(), "17");
        assert_eq!(CoinId(5).to_string(), "5");
        assert_eq!(TickId(1200).to_string(), "1200");
    }

    #[test]
    fn ids_order_by_inner_value() {
        assert!(TankId(1) < TankId(2));
        assert!(TickId(0) < TickId(1));
    }
}
