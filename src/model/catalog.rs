//! Action catalog types.
//!
//! An [`ActionDef`] is immutable table data: everything the validator,
//! success calculator, and executor need to know about a named action. The
//! per-domain tables live in `crate::catalog`.

use serde::{Deserialize, Serialize};

use super::effects::EffectBundle;

/// Action domain, doubling as an official's specialization track.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Security,
    Diplomacy,
    Ministry,
}

/// What kind of target an action requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    None,
    Official,
    Organization,
    Country,
}

impl TargetKind {
    /// Whether the action must name a target official from the roster.
    pub fn needs_official(self) -> bool {
        matches!(self, TargetKind::Official)
    }
}

/// Ordered risk tiers. Each tier carries a fixed success-chance modifier;
/// lower tiers are positive, higher tiers negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Minimal,
    Low,
    Moderate,
    High,
    Extreme,
}

impl RiskTier {
    pub fn chance_modifier(self) -> i32 {
        match self {
            RiskTier::Minimal => 10,
            RiskTier::Low => 0,
            RiskTier::Moderate => -5,
            RiskTier::High => -10,
            RiskTier::Extreme => -20,
        }
    }
}

/// Immutable definition of one named action.
#[derive(Debug, Clone)]
pub struct ActionDef {
    pub id: &'static str,
    pub name: &'static str,
    pub domain: Domain,
    /// Minimum actor rank (1..=10).
    pub min_rank: u8,
    /// Required specialization track, if any. Bypassed at high rank.
    pub required_track: Option<Domain>,
    pub target: TargetKind,
    /// Base success percentage before modifiers (0..=100).
    pub base_chance: i32,
    pub risk: RiskTier,
    /// 0 = resolves immediately, >0 = resolves this many turns later.
    pub execution_turns: u32,
    pub cooldown_turns: u32,
    /// Personal funds the actor must hold (and spends) to attempt this.
    pub resource_cost: i32,
    /// Hard ceiling: targets above this rank are forbidden outright.
    pub max_target_rank: Option<u8>,
    /// Soft ceiling: targets above this rank require higher-authority approval.
    pub approval_rank: Option<u8>,
    /// Ministry projects count against the concurrent project slot cap.
    pub is_project: bool,
    /// Multi-turn actions that may stack per (actor, action) pair.
    pub allows_stacking: bool,
    pub on_success: EffectBundle,
    pub on_failure: EffectBundle,
}

impl ActionDef {
    pub fn is_multi_turn(&self) -> bool {
        self.execution_turns > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_modifiers_decrease_with_risk() {
        let tiers = [
            RiskTier::Minimal,
            RiskTier::Low,
            RiskTier::Moderate,
            RiskTier::High,
            RiskTier::Extreme,
        ];
        for pair in tiers.windows(2) {
            assert!(
                pair[0].chance_modifier() > pair[1].chance_modifier(),
                "{:?} should out-modify {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn low_tier_is_neutral() {
        assert_eq!(RiskTier::Low.chance_modifier(), 0);
    }
}
