//! Detention and trial lifecycles driven through full engine turns.

use apparat::Scenario;
use apparat::ecs::commands::EngineCommand;
use apparat::ecs::components::FateStatus;
use apparat::ecs::resources::{Detentions, OutcomeLog, Roster, StateOfTheNation, Trials};
use apparat::model::detention::DetentionPhase;
use apparat::model::trial::{Charge, TrialPhase, TrialRecord};
use apparat::model::{DetentionRecord, Initiator};
use bevy_ecs::message::Messages;

fn detain(scenario: &mut Scenario, target: u64) {
    let turn = scenario.turn();
    scenario
        .world_mut()
        .resource_mut::<Detentions>()
        .active
        .push(DetentionRecord::new(500, target, Initiator::Player, turn));
}

#[test]
fn detention_phases_follow_the_gates() {
    let mut scenario = Scenario::new();
    let suspect = scenario.official("Suspect").rank(3).id();
    detain(&mut scenario, suspect);

    // Turns 1-2: isolation holds.
    scenario.run_turns(2);
    let phase = scenario.world().resource::<Detentions>().active[0].phase;
    assert_eq!(phase, DetentionPhase::Isolation);

    // Turn 3 (two turns elapsed): interrogation begins.
    scenario.run_turns(1);
    let phase = scenario.world().resource::<Detentions>().active[0].phase;
    assert_eq!(phase, DetentionPhase::Interrogation);

    // One accrual tick cannot reach the evidence gate, so confession is
    // unreachable before turn 5.
    scenario.run_turns(1);
    let record = &scenario.world().resource::<Detentions>().active[0];
    assert!(record.phase < DetentionPhase::Confession);
    assert!(record.evidence > 0, "interrogation should accrue evidence");

    scenario.run_turns(1);
    let phase = scenario.world().resource::<Detentions>().active[0].phase;
    assert_eq!(phase, DetentionPhase::Confession);
}

#[test]
fn detention_concludes_archives_and_feeds_a_trial() {
    let mut scenario = Scenario::new();
    let suspect = scenario.official("Suspect").rank(3).loyalty(10).ambition(60).id();
    detain(&mut scenario, suspect);

    scenario.run_turns(30);
    let world = scenario.world();
    let detentions = world.resource::<Detentions>();
    assert!(detentions.active.is_empty(), "detention never concluded");
    let archived = detentions.archived_for(suspect).expect("record archived");
    assert!(archived.phase.is_terminal());

    match archived.phase {
        DetentionPhase::Referral => {
            // Referral opens a trial for the detainee.
            assert!(
                world
                    .resource::<Trials>()
                    .records
                    .iter()
                    .any(|t| t.defendant == suspect),
                "referral did not open a trial"
            );
            assert!(
                world
                    .resource::<OutcomeLog>()
                    .entries
                    .iter()
                    .any(|e| e.key.starts_with("detention.referred.")),
            );
        }
        DetentionPhase::DiedInDetention => {
            let entity = world.resource::<Roster>().entity(suspect).unwrap();
            assert!(!world.get::<FateStatus>(entity).unwrap().is_active());
        }
        other => panic!("unexpected terminal phase {other:?}"),
    }
}

#[test]
fn evidence_is_monotone_across_turns() {
    let mut scenario = Scenario::new();
    let suspect = scenario.official("Stubborn").loyalty(95).paranoia(90).id();
    detain(&mut scenario, suspect);

    let mut last = 0;
    for _ in 0..20 {
        scenario.run_turns(1);
        let detentions = scenario.world().resource::<Detentions>();
        let Some(record) = detentions.active.first() else {
            break;
        };
        assert!(record.evidence >= last);
        last = record.evidence;
    }
}

fn put_on_trial(scenario: &mut Scenario, defendant: u64) {
    let turn = scenario.turn();
    scenario.world_mut().resource_mut::<Trials>().records.push(TrialRecord::new(
        600,
        defendant,
        vec![Charge::Treason],
        None,
        turn,
    ));
}

#[test]
fn trial_runs_to_completion_and_applies_the_sentence() {
    let mut scenario = Scenario::new();
    let defendant = scenario.official("Accused").rank(5).id();
    put_on_trial(&mut scenario, defendant);

    // Gates: extraction at 2 elapsed, public trial at 5, sentencing at 7,
    // completion at 9. Started turn 1, so turn 10 completes it.
    scenario.run_turns(8);
    {
        let record = &scenario.world().resource::<Trials>().records[0];
        assert_eq!(record.phase, TrialPhase::Sentencing);
        assert!(record.sentence.is_some());
    }

    scenario.run_turns(2);
    let world = scenario.world();
    let record = &world.resource::<Trials>().records[0];
    assert_eq!(record.phase, TrialPhase::Completed);

    let sentence = record.sentence.unwrap();
    let entity = world.resource::<Roster>().entity(defendant).unwrap();
    let fate = world.get::<FateStatus>(entity).unwrap();
    assert_eq!(fate.0, sentence.fate());
    assert!(!fate.is_active());

    // Terminal metrics landed on the nation's counters.
    let nation = world.resource::<StateOfTheNation>();
    assert!(nation.intimidation >= 10 + record.intimidation_gained);
    assert!(nation.international_standing <= 50 - record.condemnation);

    assert!(
        world
            .resource::<OutcomeLog>()
            .entries
            .iter()
            .any(|e| e.key.starts_with("trial.completed.")),
    );
}

#[test]
fn completed_trial_is_left_untouched() {
    let mut scenario = Scenario::new();
    let defendant = scenario.official("Accused").rank(4).id();
    put_on_trial(&mut scenario, defendant);

    scenario.run_turns(12);
    let snapshot = scenario.world().resource::<Trials>().records[0].clone();
    scenario.run_turns(10);
    assert_eq!(scenario.world().resource::<Trials>().records[0], snapshot);
}

#[test]
fn command_pipeline_opens_detentions_and_skips_duplicates() {
    let mut scenario = Scenario::new();
    let target = scenario.official("Target").rank(2).id();

    {
        let mut messages = scenario
            .world_mut()
            .resource_mut::<Messages<EngineCommand>>();
        messages.write(EngineCommand::StartDetention {
            target,
            initiator: Initiator::Player,
        });
        messages.write(EngineCommand::StartDetention {
            target,
            initiator: Initiator::Player,
        });
    }
    scenario.run_turns(1);

    let detentions = scenario.world().resource::<Detentions>();
    assert_eq!(
        detentions.active.iter().filter(|d| d.target == target).count(),
        1,
        "duplicate detention was not suppressed"
    );
}
