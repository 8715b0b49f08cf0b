//! Autonomous NPC behavior over many turns.

use apparat::Scenario;
use apparat::ecs::resources::{OutcomeLog, PendingOps, StateOfTheNation};
use apparat::model::{Domain, Initiator};

#[test]
fn ministry_npc_requisitions_when_treasury_is_low() {
    let mut scenario = Scenario::seeded(11);
    let npc = scenario
        .official("Comrade Planner")
        .rank(5)
        .track(Domain::Ministry)
        .id();
    scenario.nation(|n| n.treasury = 20);

    scenario.run_turns(60);
    let log = scenario.world().resource::<OutcomeLog>();
    let acted: Vec<_> = log
        .entries
        .iter()
        .filter(|e| e.initiator == Some(Initiator::Npc(npc)))
        .collect();
    assert!(!acted.is_empty(), "ministry official never acted in 60 turns");
    // Every action taken comes from the official's own track.
    let ministry_ids = ["requisition_funds", "grain_exports", "industrial_project"];
    assert!(
        acted
            .iter()
            .all(|e| ministry_ids.iter().any(|id| e.key.starts_with(id))),
        "unexpected actions: {acted:?}"
    );
    assert!(
        acted.iter().any(|e| e.key.starts_with("requisition_funds.")
            || e.key.starts_with("grain_exports.")),
        "low treasury never triggered a requisition"
    );
}

#[test]
fn security_npc_prefers_mass_arrests_during_unrest() {
    let mut scenario = Scenario::seeded(5);
    scenario
        .official("Chekist")
        .rank(6)
        .track(Domain::Security)
        .id();
    // Keep stability pinned low; successful mass arrests subtract from it
    // anyway, so the priority branch stays selected.
    scenario.nation(|n| n.stability = 20);

    scenario.run_turns(80);
    let log = scenario.world().resource::<OutcomeLog>();
    assert!(
        log.entries.iter().any(|e| e.key.starts_with("mass_arrests.")),
        "security official never ordered mass arrests: {:?}",
        log.entries
    );
}

#[test]
fn underranked_npc_changes_nothing() {
    let mut scenario = Scenario::seeded(3);
    // Rank 1 on the ministry track: every candidate action requires rank 2.
    scenario
        .official("Junior Clerk")
        .rank(1)
        .track(Domain::Ministry)
        .id();

    scenario.run_turns(50);
    let world = scenario.world();
    assert!(world.resource::<OutcomeLog>().entries.is_empty());
    assert!(world.resource::<PendingOps>().operations.is_empty());
    assert_eq!(*world.resource::<StateOfTheNation>(), StateOfTheNation::default());
}

#[test]
fn same_seed_replays_identically() {
    let build = || {
        let mut scenario = Scenario::seeded(77);
        scenario.official("Chekist").rank(5).track(Domain::Security).id();
        scenario.official("Envoy").rank(5).track(Domain::Diplomacy).id();
        scenario.official("Planner").rank(5).track(Domain::Ministry).id();
        scenario.nation(|n| n.stability = 35);
        scenario.run_turns(40);
        scenario
    };
    let a = build();
    let b = build();

    let keys = |s: &Scenario| -> Vec<String> {
        s.world()
            .resource::<OutcomeLog>()
            .entries
            .iter()
            .map(|e| e.key.clone())
            .collect()
    };
    assert_eq!(keys(&a), keys(&b));
    assert_eq!(
        a.world().resource::<StateOfTheNation>(),
        b.world().resource::<StateOfTheNation>()
    );
}
