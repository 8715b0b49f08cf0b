//! Effect vocabulary shared by all three action domains.
//!
//! An [`EffectBundle`] is the complete description of what an action outcome
//! does to the world: typed counter deltas, flag changes, sub-process
//! triggers, and a fate for the target. Bundles carry no logic of their own;
//! the command applicator in `ecs::commands` interprets them.

use serde::{Deserialize, Serialize};

/// Closed set of world-state flags.
///
/// Replaces the string-flag membership checks of earlier designs so that a
/// typo cannot silently create a new flag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RegimeFlag {
    AtWar,
    MartialLaw,
    PurgeUnderway,
    BorderSealed,
}

/// What ultimately happened to an official.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Fate {
    #[default]
    Active,
    Dismissed,
    Demoted,
    Imprisoned,
    Exiled,
    Executed,
}

impl Fate {
    /// Whether the official can still act and be targeted.
    pub fn is_active(self) -> bool {
        matches!(self, Fate::Active)
    }
}

/// Sparse set of deltas and triggers applied when an action outcome lands.
///
/// World counters are signed deltas against `StateOfTheNation`; the
/// `target_*` fields apply to the targeted official's personal counters and
/// are ignored for untargeted actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectBundle {
    pub stability: i32,
    pub treasury: i32,
    pub party_standing: i32,
    pub international_standing: i32,
    pub intimidation: i32,

    pub target_disposition: i32,
    pub target_fear: i32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_flags: Vec<RegimeFlag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clear_flags: Vec<RegimeFlag>,

    /// Spawns a detention record for the target on success.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub starts_detention: bool,
    /// Spawns a trial record for the target on success.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub starts_trial: bool,
    /// Marks the target's fate (dismissal, demotion, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_fate: Option<Fate>,
}

impl EffectBundle {
    pub fn is_empty(&self) -> bool {
        *self == EffectBundle::default()
    }
}
