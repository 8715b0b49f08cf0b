//! Action request lifecycle: validation, immediate resolution, multi-turn
//! scheduling, cooldowns, and the project slot cap.

use apparat::Scenario;
use apparat::catalog::{Catalog, PROJECT_SLOT_CAP};
use apparat::ecs::resources::{Detentions, OutcomeLog, PendingOps, Roster, StateOfTheNation, Trials};
use apparat::model::catalog::{ActionDef, RiskTier, TargetKind};
use apparat::model::trial::{Charge, TrialRecord};
use apparat::model::{DetentionRecord, Domain, EffectBundle, Initiator, Rejection, RequestOutcome};

fn influence_funds(scenario: &Scenario, official: u64) -> i32 {
    let entity = scenario.world().resource::<Roster>().entity(official).unwrap();
    scenario
        .world()
        .get::<apparat::ecs::components::Influence>(entity)
        .unwrap()
        .funds
}

#[test]
fn unknown_action_is_rejected() {
    let mut scenario = Scenario::new();
    let player = scenario.player("Chairman").rank(5).id();
    let outcome = scenario.request(player, "no_such_action", None);
    assert_eq!(
        outcome,
        RequestOutcome::Rejected {
            reason: Rejection::UnknownAction { action_id: "no_such_action".into() }
        }
    );
}

#[test]
fn unknown_actor_is_rejected() {
    let mut scenario = Scenario::new();
    let outcome = scenario.request(999, "surveillance_detail", None);
    assert!(matches!(
        outcome,
        RequestOutcome::Rejected { reason: Rejection::UnknownOfficial { official: 999 } }
    ));
}

#[test]
fn rank_gate_names_the_required_rank() {
    let mut scenario = Scenario::new();
    let player = scenario.player("Captain").rank(3).id();
    let outcome = scenario.request(player, "mass_arrests", None);
    assert_eq!(
        outcome,
        RequestOutcome::Rejected {
            reason: Rejection::RankTooLow { required: 5, actual: 3 }
        }
    );
}

#[test]
fn immediate_action_resolves_and_logs_once() {
    let mut scenario = Scenario::new();
    let player = scenario.player("Director").rank(3).id();
    let target = scenario.official("Rival").rank(2).id();

    let outcome = scenario.request(player, "arrest_official", Some(target));
    let RequestOutcome::Resolved(resolution) = outcome else {
        panic!("expected immediate resolution, got {outcome:?}");
    };
    assert!((5..=95).contains(&resolution.chance));
    assert!((1..=100).contains(&resolution.roll));

    let world = scenario.world();
    let nation = world.resource::<StateOfTheNation>();
    if resolution.succeeded {
        assert_eq!(resolution.narrative_key, "arrest_official.success");
        assert!(world.resource::<Detentions>().is_detained(target));
        assert_eq!(nation.intimidation, 15);
    } else {
        assert_eq!(resolution.narrative_key, "arrest_official.failure");
        assert!(!world.resource::<Detentions>().is_detained(target));
        assert_eq!(nation.party_standing, 45);
    }

    let log = world.resource::<OutcomeLog>();
    assert_eq!(log.entries.len(), 1);
    assert_eq!(log.entries[0].key, resolution.narrative_key);
    assert_eq!(log.entries[0].initiator, Some(Initiator::Player));
}

#[test]
fn cooldown_blocks_repeat_and_reports_remaining() {
    let mut scenario = Scenario::new();
    let player = scenario.player("Director").rank(3).id();
    // Ministry track keeps the target out of the shared security cooldowns.
    let target = scenario.official("Watched").rank(1).track(Domain::Ministry).id();

    let first = scenario.request(player, "surveillance_detail", Some(target));
    assert!(!first.is_rejected());

    let second = scenario.request(player, "surveillance_detail", Some(target));
    assert_eq!(
        second,
        RequestOutcome::Rejected {
            reason: Rejection::OnCooldown { turns_remaining: 2 }
        }
    );

    // The cooldown runs against the clock, not against further attempts.
    scenario.run_turns(2);
    let third = scenario.request(player, "surveillance_detail", Some(target));
    assert!(!third.is_rejected(), "got {third:?}");
}

#[test]
fn seniority_ceiling_and_approval_routing() {
    let mut scenario = Scenario::new();
    let player = scenario.player("Director").rank(5).id();
    let marshal = scenario.official("Marshal").rank(7).id();
    let minister = scenario.official("Minister").rank(5).id();

    let outcome = scenario.request(player, "arrest_official", Some(marshal));
    assert_eq!(
        outcome,
        RequestOutcome::Rejected {
            reason: Rejection::TargetTooSenior { ceiling: 6, target_rank: 7 }
        }
    );

    // Between the approval rank (4) and the ceiling (6): allowed but flagged.
    let outcome = scenario.request(player, "arrest_official", Some(minister));
    match outcome {
        RequestOutcome::Resolved(resolution) => assert!(resolution.required_approval),
        other => panic!("expected resolution, got {other:?}"),
    }
}

#[test]
fn detained_target_is_unavailable() {
    let mut scenario = Scenario::new();
    let player = scenario.player("Director").rank(5).id();
    let target = scenario.official("Suspect").rank(2).id();
    scenario
        .world_mut()
        .resource_mut::<Detentions>()
        .active
        .push(DetentionRecord::new(900, target, Initiator::Player, 1));

    let outcome = scenario.request(player, "arrest_official", Some(target));
    assert_eq!(
        outcome,
        RequestOutcome::Rejected {
            reason: Rejection::TargetUnavailable { target }
        }
    );
}

#[test]
fn target_on_trial_is_unavailable() {
    let mut scenario = Scenario::new();
    let player = scenario.player("Director").rank(5).id();
    let target = scenario.official("Defendant").rank(2).id();
    scenario
        .world_mut()
        .resource_mut::<Trials>()
        .records
        .push(TrialRecord::new(901, target, vec![Charge::Treason], None, 1));

    let outcome = scenario.request(player, "arrest_official", Some(target));
    assert_eq!(
        outcome,
        RequestOutcome::Rejected {
            reason: Rejection::TargetUnavailable { target }
        }
    );
}

#[test]
fn resource_cost_is_checked_and_spent() {
    let mut scenario = Scenario::new();
    let broke = scenario
        .player("Envoy")
        .rank(4)
        .track(Domain::Diplomacy)
        .funds(5)
        .id();
    let outcome = scenario.request(broke, "host_summit", None);
    assert_eq!(
        outcome,
        RequestOutcome::Rejected {
            reason: Rejection::InsufficientResources { required: 10, available: 5 }
        }
    );

    let mut scenario = Scenario::new();
    let envoy = scenario
        .player("Envoy")
        .rank(4)
        .track(Domain::Diplomacy)
        .funds(10)
        .id();
    let outcome = scenario.request(envoy, "host_summit", None);
    assert!(!outcome.is_rejected());
    assert_eq!(influence_funds(&scenario, envoy), 0);
}

#[test]
fn multi_turn_action_schedules_and_resolves_exactly_once() {
    let mut scenario = Scenario::new();
    let minister = scenario
        .player("Minister")
        .rank(3)
        .track(Domain::Ministry)
        .id();

    let outcome = scenario.request(minister, "industrial_project", None);
    let RequestOutcome::Scheduled { pending_id, completes_turn, .. } = outcome else {
        panic!("expected scheduling, got {outcome:?}");
    };
    assert_eq!(completes_turn, 5); // turn 1 + 4 execution turns

    // Not yet due after four turns (sweeps for turns 1..=4 have run).
    scenario.run_turns(4);
    {
        let ops = scenario.world().resource::<PendingOps>();
        let record = ops.projects.iter().find(|p| p.id == pending_id).unwrap();
        assert!(!record.resolved);
    }

    // The turn-5 sweep resolves it.
    scenario.run_turns(1);
    let world = scenario.world();
    let ops = world.resource::<PendingOps>();
    let record = ops.projects.iter().find(|p| p.id == pending_id).unwrap();
    assert!(record.resolved);
    assert!(record.succeeded.is_some());

    let log = world.resource::<OutcomeLog>();
    let resolutions: Vec<_> = log
        .entries
        .iter()
        .filter(|e| e.key.starts_with("industrial_project."))
        .collect();
    assert_eq!(resolutions.len(), 1, "resolved more than once: {resolutions:?}");

    // Further turns never touch the concluded record.
    scenario.run_turns(5);
    let log = scenario.world().resource::<OutcomeLog>();
    assert_eq!(
        log.entries.iter().filter(|e| e.key.starts_with("industrial_project.")).count(),
        1
    );
}

fn project_def(id: &'static str, allows_stacking: bool) -> ActionDef {
    ActionDef {
        id,
        name: id,
        domain: Domain::Ministry,
        min_rank: 1,
        required_track: Some(Domain::Ministry),
        target: TargetKind::None,
        base_chance: 60,
        risk: RiskTier::Low,
        execution_turns: 3,
        cooldown_turns: 0,
        resource_cost: 0,
        max_target_rank: None,
        approval_rank: None,
        is_project: true,
        allows_stacking,
        on_success: EffectBundle::default(),
        on_failure: EffectBundle::default(),
    }
}

#[test]
fn project_slots_are_capped() {
    let mut scenario = Scenario::new();
    let minister = scenario
        .player("Minister")
        .rank(5)
        .track(Domain::Ministry)
        .id();
    scenario
        .world_mut()
        .insert_resource(Catalog::from_actions(vec![project_def("build_plant", true)]));

    assert!(!scenario.request(minister, "build_plant", None).is_rejected());
    assert!(!scenario.request(minister, "build_plant", None).is_rejected());
    let third = scenario.request(minister, "build_plant", None);
    assert_eq!(
        third,
        RequestOutcome::Rejected {
            reason: Rejection::SlotLimitReached { cap: PROJECT_SLOT_CAP }
        }
    );

    // A completed project frees its slot.
    scenario.run_turns(4);
    assert!(!scenario.request(minister, "build_plant", None).is_rejected());
}

#[test]
fn non_stacking_action_rejects_a_duplicate() {
    let mut scenario = Scenario::new();
    let minister = scenario
        .player("Minister")
        .rank(5)
        .track(Domain::Ministry)
        .id();
    scenario
        .world_mut()
        .insert_resource(Catalog::from_actions(vec![project_def("land_reform", false)]));

    assert!(!scenario.request(minister, "land_reform", None).is_rejected());
    let duplicate = scenario.request(minister, "land_reform", None);
    assert_eq!(
        duplicate,
        RequestOutcome::Rejected { reason: Rejection::AlreadyInProgress }
    );
}

#[test]
fn track_requirement_bypassed_at_high_rank() {
    let mut scenario = Scenario::new();
    let outsider = scenario.player("Secretary").rank(4).track(Domain::Security).id();
    let outcome = scenario.request(outsider, "requisition_funds", None);
    assert_eq!(
        outcome,
        RequestOutcome::Rejected {
            reason: Rejection::WrongTrack { required: Domain::Ministry }
        }
    );

    let mut scenario = Scenario::new();
    let vozhd = scenario.player("Vozhd").rank(8).track(Domain::Security).id();
    assert!(!scenario.request(vozhd, "requisition_funds", None).is_rejected());
}
