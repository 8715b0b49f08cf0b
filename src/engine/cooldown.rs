//! Per-domain cooldown ledgers.

use std::collections::BTreeMap;

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use crate::model::Domain;

/// Maps each action id to the turn on which it next becomes usable, kept
/// per domain. An action absent from its ledger is always usable.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cooldowns {
    domains: BTreeMap<Domain, BTreeMap<String, u64>>,
}

impl Cooldowns {
    pub fn available(&self, domain: Domain, action_id: &str, turn: u64) -> bool {
        self.turns_remaining(domain, action_id, turn) == 0
    }

    /// Turns until the action is usable again; 0 when available now.
    pub fn turns_remaining(&self, domain: Domain, action_id: &str, turn: u64) -> u64 {
        self.domains
            .get(&domain)
            .and_then(|ledger| ledger.get(action_id))
            .map(|&next_usable| next_usable.saturating_sub(turn))
            .unwrap_or(0)
    }

    /// Start a cooldown: the action becomes usable again at
    /// `turn + duration`. A zero duration leaves the ledger untouched.
    pub fn set(&mut self, domain: Domain, action_id: &str, turn: u64, duration: u64) {
        if duration == 0 {
            return;
        }
        let next_usable = turn + duration;
        let ledger = self.domains.entry(domain).or_default();
        let entry = ledger.entry(action_id.to_string()).or_insert(next_usable);
        // Never shorten an existing cooldown.
        *entry = (*entry).max(next_usable);
    }

    pub fn is_empty(&self) -> bool {
        self.domains.values().all(|ledger| ledger.is_empty())
    }

    /// Drop entries that have already expired. Bookkeeping only; an expired
    /// entry behaves identically to an absent one.
    pub fn prune(&mut self, turn: u64) {
        for ledger in self.domains.values_mut() {
            ledger.retain(|_, &mut next_usable| next_usable > turn);
        }
        self.domains.retain(|_, ledger| !ledger.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_action_is_always_usable() {
        let cooldowns = Cooldowns::default();
        assert!(cooldowns.available(Domain::Security, "arrest_official", 1));
        assert_eq!(cooldowns.turns_remaining(Domain::Security, "arrest_official", 1), 0);
    }

    #[test]
    fn cooldown_blocks_until_expiry() {
        let mut cooldowns = Cooldowns::default();
        cooldowns.set(Domain::Security, "arrest_official", 10, 4);
        for turn in 10..14 {
            assert!(!cooldowns.available(Domain::Security, "arrest_official", turn));
            assert_eq!(
                cooldowns.turns_remaining(Domain::Security, "arrest_official", turn),
                14 - turn
            );
        }
        assert!(cooldowns.available(Domain::Security, "arrest_official", 14));
    }

    #[test]
    fn domains_are_independent() {
        let mut cooldowns = Cooldowns::default();
        cooldowns.set(Domain::Security, "denounce_rival", 5, 3);
        assert!(cooldowns.available(Domain::Diplomacy, "denounce_rival", 5));
    }

    #[test]
    fn setting_never_shortens() {
        let mut cooldowns = Cooldowns::default();
        cooldowns.set(Domain::Ministry, "industrial_project", 10, 6);
        cooldowns.set(Domain::Ministry, "industrial_project", 11, 1);
        assert_eq!(
            cooldowns.turns_remaining(Domain::Ministry, "industrial_project", 11),
            5
        );
    }

    #[test]
    fn prune_drops_only_expired() {
        let mut cooldowns = Cooldowns::default();
        cooldowns.set(Domain::Security, "a", 1, 2);
        cooldowns.set(Domain::Security, "b", 1, 10);
        cooldowns.prune(5);
        assert!(cooldowns.available(Domain::Security, "a", 5));
        assert!(!cooldowns.available(Domain::Security, "b", 5));
        assert!(!cooldowns.is_empty());
    }

    #[test]
    fn round_trips_through_json() {
        let mut cooldowns = Cooldowns::default();
        cooldowns.set(Domain::Security, "arrest_official", 3, 4);
        cooldowns.set(Domain::Diplomacy, "trade_agreement", 3, 5);
        let json = serde_json::to_string(&cooldowns).unwrap();
        let back: Cooldowns = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cooldowns);
    }
}
