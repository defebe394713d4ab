//! Behaviour profiles: the numeric knobs behind each behaviour tag.
//!
//! A [`Profile`] is resolved once per tank at match start from its
//! descriptor payload. All randomness in resolution (the `Random` tag
//! draws its knobs) comes from the caller's seeded RNG, so profiles
//! are reproducible per match seed.

use rand::Rng;
use volley_core::{BehaviorTag, PolicyPayload, TacticFlags, TargetPreference};

/// Exploration style used when no combat or retreat pressure applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExploreStyle {
    /// Zone control: hold high-value anchors, pick vulnerable targets.
    Tactical,
    /// Head for the nearest enemy.
    Hunt,
    /// Grab only close coins, otherwise keep clear.
    Safe,
    /// Sweep the maze quadrant by quadrant.
    Systematic,
    /// Chase the best value-per-distance coin.
    Greedy,
    /// Keep away from everything.
    Avoid,
    /// Uniformly random wandering.
    Random,
}

/// Resolved behaviour knobs for one tank.
#[derive(Clone, Copy, Debug)]
pub struct Profile {
    /// The tag this profile was resolved from.
    pub behavior: BehaviorTag,
    /// Appetite for initiating and sustaining fights, in `[0, 1]`.
    pub aggression: f64,
    /// Willingness to fight at low health, in `[0, 1]`.
    pub risk_tolerance: f64,
    /// Preferred engagement range in cells.
    pub combat_distance: i32,
    /// Weight on coin goals versus enemy goals.
    pub coin_priority: f64,
    /// Health fraction below which the tank disengages.
    pub retreat_threshold: f64,
    /// Exploration style when idle.
    pub explore: ExploreStyle,
    /// Advanced combat tactics toggles.
    pub tactics: TacticFlags,
}

impl Profile {
    /// Resolve a profile from a descriptor payload.
    ///
    /// `Random` draws aggression and risk tolerance from `rng`; every
    /// other tag is a fixed table. `Elite` enables all tactics
    /// regardless of the payload flags.
    pub fn resolve<R: Rng>(payload: &PolicyPayload, rng: &mut R) -> Self {
        let behavior = payload.behavior;
        let aggression = match behavior {
            BehaviorTag::Elite => 0.9,
            BehaviorTag::Aggressive => 0.8,
            BehaviorTag::Defensive => 0.3,
            BehaviorTag::Opportunistic => 0.6,
            BehaviorTag::Passive => 0.1,
            BehaviorTag::Random => rng.random::<f64>(),
            BehaviorTag::Balanced | BehaviorTag::Cautious => 0.5,
        };
        let risk_tolerance = match behavior {
            BehaviorTag::Elite => 0.7,
            BehaviorTag::Aggressive => 0.8,
            BehaviorTag::Defensive => 0.2,
            BehaviorTag::Cautious => 0.3,
            BehaviorTag::Passive => 0.1,
            BehaviorTag::Random => rng.random::<f64>(),
            BehaviorTag::Balanced | BehaviorTag::Opportunistic => 0.5,
        };
        let combat_distance = match behavior {
            BehaviorTag::Elite => 4,
            BehaviorTag::Aggressive => 3,
            BehaviorTag::Defensive => 6,
            _ => 4,
        };
        let coin_priority = match payload.target_preference {
            TargetPreference::Coins => 1.5,
            TargetPreference::Tanks => 0.5,
            TargetPreference::Smart => 0.8,
            TargetPreference::Balanced => 1.0,
        };
        let retreat_threshold = match behavior {
            BehaviorTag::Elite => 0.25,
            BehaviorTag::Aggressive => 0.2,
            BehaviorTag::Defensive => 0.5,
            BehaviorTag::Cautious => 0.4,
            BehaviorTag::Passive => 0.7,
            _ => 0.3,
        };
        let explore = match behavior {
            BehaviorTag::Elite => ExploreStyle::Tactical,
            BehaviorTag::Aggressive => ExploreStyle::Hunt,
            BehaviorTag::Defensive => ExploreStyle::Safe,
            BehaviorTag::Opportunistic => ExploreStyle::Greedy,
            BehaviorTag::Passive => ExploreStyle::Avoid,
            BehaviorTag::Random => ExploreStyle::Random,
            BehaviorTag::Balanced | BehaviorTag::Cautious => ExploreStyle::Systematic,
        };
        let tactics = if behavior == BehaviorTag::Elite {
            TacticFlags {
                kiting: true,
                ambush: true,
                finish_him: true,
                zone_control: true,
            }
        } else {
            payload.tactics
        };
        Self {
            behavior,
            aggression,
            risk_tolerance,
            combat_distance,
            coin_priority,
            retreat_threshold,
            explore,
            tactics,
        }
    }
}
