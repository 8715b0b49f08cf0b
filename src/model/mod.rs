//! Pure data model: catalog types, effect vocabulary, and the in-flight
//! records (pending actions, detentions, trials). Nothing in this module
//! touches the ECS; the state machines take their randomness and views as
//! arguments so they can be tested in isolation.

pub mod catalog;
pub mod detention;
pub mod effects;
pub mod outcome;
pub mod pending;
pub mod trial;

pub use catalog::{ActionDef, Domain, RiskTier, TargetKind};
pub use detention::{
    AssociateView, ConfessionKind, DetentionEvent, DetentionPhase, DetentionRecord, PsycheView,
};
pub use effects::{EffectBundle, Fate, RegimeFlag};
pub use outcome::{
    Initiator, OutcomeRecord, Rejection, RequestOutcome, Resolution, narrative_key,
};
pub use pending::PendingAction;
pub use trial::{Charge, Sentence, TrialEvent, TrialPhase, TrialRecord};

use rand::Rng;

/// Draw one item from a weighted table. Weights must be positive; the
/// callers clamp theirs to a floor of 5.
pub(crate) fn weighted_pick<'a, T>(rng: &mut impl Rng, table: &'a [(T, i32)]) -> &'a T {
    let total: i32 = table.iter().map(|(_, w)| (*w).max(1)).sum();
    let mut roll = rng.random_range(1..=total.max(1));
    for (item, weight) in table {
        roll -= (*weight).max(1);
        if roll <= 0 {
            return item;
        }
    }
    &table[table.len() - 1].0
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn weighted_pick_respects_weights() {
        let table = [("common", 90), ("rare", 10)];
        let mut rng = SmallRng::seed_from_u64(1);
        let mut common = 0;
        for _ in 0..1000 {
            if *weighted_pick(&mut rng, &table) == "common" {
                common += 1;
            }
        }
        assert!(common > 800, "common drawn {common}/1000");
    }

    #[test]
    fn weighted_pick_single_entry() {
        let table = [(42, 1)];
        let mut rng = SmallRng::seed_from_u64(2);
        assert_eq!(*weighted_pick(&mut rng, &table), 42);
    }
}
