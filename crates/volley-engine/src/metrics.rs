//! Running counters for one match.

/// Totals accumulated as the match runs. Plain data; read them off the
/// world whenever a caller wants progress numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchMetrics {
    /// Physics ticks simulated.
    pub ticks: u64,
    /// Decision rounds dispatched.
    pub decision_rounds: u64,
    /// Bullets fired.
    pub bullets_fired: u64,
    /// Bullet hits landed.
    pub hits: u64,
    /// Tanks destroyed.
    pub deaths: u64,
    /// Coins spawned, initial seeding included.
    pub coins_spawned: u64,
    /// Coins picked up.
    pub coins_collected: u64,
    /// Driver faults (budget overruns, panics, disconnects).
    pub driver_faults: u64,
}
