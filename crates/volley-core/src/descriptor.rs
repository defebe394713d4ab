//! Team descriptors: the validated match-entry manifest for one tank.
//!
//! A [`TeamDescriptor`] is the external input describing a participant:
//! naming, display color, declared API version, and the policy that will
//! drive the tank. [`validate()`](TeamDescriptor::validate) rejects
//! malformed descriptors before the match is constructed.

use std::error::Error;
use std::fmt;

/// The manifest API version this engine accepts.
pub const SUPPORTED_API_VERSION: &str = "1.0";

/// An RGB display color carried through to scoreboards and renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Parse a `#rrggbb` hex string.
    pub fn parse(s: &str) -> Option<Color> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// The declared policy family of a driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Condition/action rules.
    RuleSet,
    /// Finite state machine.
    Fsm,
    /// Language-model hints compiled to tactics.
    LlmHint,
}

/// A personality tag shaping the decision engine's tuning profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BehaviorTag {
    /// High-skill composite: kiting, calculated risk, zone play.
    Elite,
    /// Close-range pressure, frequent fire.
    Aggressive,
    /// Keeps distance, retreats early.
    Defensive,
    /// Middle-of-road tuning.
    #[default]
    Balanced,
    /// Chases finishing blows and cheap gains.
    Opportunistic,
    /// Low risk tolerance, early retreat.
    Cautious,
    /// Avoids combat entirely.
    Passive,
    /// Traits drawn from the driver's seeded RNG at construction.
    Random,
}

/// What a driver preferentially hunts when not in combat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TargetPreference {
    /// Coins above all.
    Coins,
    /// Enemy tanks above all.
    Tanks,
    /// Situational weighting.
    Smart,
    /// Even weighting.
    #[default]
    Balanced,
}

/// Optional combat tactics a manifest can enable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TacticFlags {
    /// Maintain a range band, backing off and closing as needed.
    pub kiting: bool,
    /// Approach under cover and withhold fire until aligned.
    pub ambush: bool,
    /// Rush targets below a quarter of their health.
    pub finish_him: bool,
    /// Bias movement towards strategic map anchors.
    pub zone_control: bool,
}

/// Behavioral parameters handed to the policy at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolicyPayload {
    /// Personality tag.
    pub behavior: BehaviorTag,
    /// Hunt preference.
    pub target_preference: TargetPreference,
    /// Enabled tactics.
    pub tactics: TacticFlags,
}

/// The policy portion of a descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolicySpec {
    /// Declared policy family.
    pub kind: PolicyKind,
    /// Behavioral parameters.
    pub payload: PolicyPayload,
}

/// A participant manifest, validated before match construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamDescriptor {
    /// Unique team identifier shown in results.
    pub team_name: String,
    /// Human-readable tank name.
    pub display_name: String,
    /// Display color.
    pub color: Color,
    /// Declared manifest API version; must equal
    /// [`SUPPORTED_API_VERSION`].
    pub api_version: String,
    /// The driving policy.
    pub policy: PolicySpec,
}

impl TeamDescriptor {
    /// Validate structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: empty team name, empty
    /// display name, or an unsupported API version.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.team_name.trim().is_empty() {
            return Err(DescriptorError::MissingTeamName);
        }
        if self.display_name.trim().is_empty() {
            return Err(DescriptorError::MissingDisplayName);
        }
        if self.api_version != SUPPORTED_API_VERSION {
            return Err(DescriptorError::UnsupportedApiVersion {
                given: self.api_version.clone(),
            });
        }
        Ok(())
    }
}

/// Errors detected during [`TeamDescriptor::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DescriptorError {
    /// `team_name` is empty or whitespace.
    MissingTeamName,
    /// `display_name` is empty or whitespace.
    MissingDisplayName,
    /// `api_version` does not match [`SUPPORTED_API_VERSION`].
    UnsupportedApiVersion {
        /// The version string the manifest declared.
        given: String,
    },
    /// A color string could not be parsed as `#rrggbb`.
    InvalidColor {
        /// The rejected color string.
        given: String,
    },
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTeamName => write!(f, "team_name must not be empty"),
            Self::MissingDisplayName => write!(f, "display_name must not be empty"),
            Self::UnsupportedApiVersion { given } => {
                write!(
                    f,
                    "api_version '{given}' is not supported (expected '{SUPPORTED_API_VERSION}')"
                )
            }
            Self::InvalidColor { given } => {
                write!(f, "color '{given}' is not a #rrggbb hex string")
            }
        }
    }
}

impl Error for DescriptorError {}
