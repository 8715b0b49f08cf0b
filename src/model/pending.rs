//! In-flight multi-turn commitments.

use serde::{Deserialize, Serialize};

use super::outcome::Initiator;

/// A multi-turn action or ministry project, recorded when scheduled and
/// resolved automatically by the per-turn sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingAction {
    pub id: u64,
    pub action_id: String,
    pub actor: u64,
    pub target: Option<u64>,
    pub initiator: Initiator,
    pub initiated_turn: u64,
    pub completes_turn: u64,
    /// Success chance computed and frozen at schedule time.
    pub chance: i32,
    pub resolved: bool,
    /// Set once resolved: whether the roll succeeded.
    pub succeeded: Option<bool>,
}

impl PendingAction {
    pub fn is_due(&self, turn: u64) -> bool {
        !self.resolved && turn >= self.completes_turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(completes: u64) -> PendingAction {
        PendingAction {
            id: 1,
            action_id: "industrial_project".into(),
            actor: 7,
            target: None,
            initiator: Initiator::Player,
            initiated_turn: 10,
            completes_turn: completes,
            chance: 60,
            resolved: false,
            succeeded: None,
        }
    }

    #[test]
    fn due_only_at_or_after_completion_turn() {
        let r = record(13);
        assert!(!r.is_due(12));
        assert!(r.is_due(13));
        assert!(r.is_due(14));
    }

    #[test]
    fn resolved_records_are_never_due() {
        let mut r = record(13);
        r.resolved = true;
        assert!(!r.is_due(20));
    }
}
