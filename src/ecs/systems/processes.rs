//! Coercive-process drivers: detentions and trials.
//!
//! Both systems run exclusively in `DomainSet::Processes`. The state
//! machines themselves are pure; these systems feed them views of the
//! world, translate their events into commands and audit entries, and
//! handle archival.

use bevy_ecs::message::Messages;
use bevy_ecs::world::World;

use crate::ecs::clock::TurnClock;
use crate::ecs::commands::EngineCommand;
use crate::ecs::components::{FateStatus, OfficialCore, Psyche};
use crate::ecs::resources::{Detentions, EngineIds, OutcomeLog, ProcessRng, Roster, Trials};
use crate::model::detention::{AssociateView, DetentionEvent, PsycheView};
use crate::model::trial::TrialEvent;
use crate::model::{Charge, EffectBundle, Fate, Initiator, OutcomeRecord};

struct LogEntry {
    subject: u64,
    initiator: Option<Initiator>,
    key: String,
}

/// Advance every active detention by one turn and archive the concluded.
pub fn advance_detentions(world: &mut World) {
    let turn = world.resource::<TurnClock>().turn;
    let Some(mut detentions) = world.remove_resource::<Detentions>() else {
        return;
    };
    let Some(mut rng) = world.remove_resource::<ProcessRng>() else {
        world.insert_resource(detentions);
        return;
    };

    let mut commands = Vec::new();
    let mut log = Vec::new();

    for record in &mut detentions.active {
        let psyche = psyche_of(world, record.target);
        let associates = associates_of(world, record.target);
        for event in record.advance(turn, &mut rng.0, psyche, &associates) {
            match event {
                DetentionEvent::PhaseAdvanced(_) => {}
                DetentionEvent::ConfessionObtained(kind) => log.push(LogEntry {
                    subject: record.target,
                    initiator: Some(record.initiator),
                    key: format!("detention.confession.{}", kind.key()),
                }),
                DetentionEvent::Implicated(ids) => {
                    for id in ids {
                        log.push(LogEntry {
                            subject: id,
                            initiator: Some(record.initiator),
                            key: "detention.implicated".to_string(),
                        });
                    }
                }
                DetentionEvent::Referred { confession } => {
                    let suffix = confession.map_or("none", |c| c.key());
                    log.push(LogEntry {
                        subject: record.target,
                        initiator: Some(record.initiator),
                        key: format!("detention.referred.{suffix}"),
                    });
                    let mut charges = vec![Charge::Treason];
                    if !record.implicated.is_empty() {
                        charges.push(Charge::Conspiracy);
                    }
                    commands.push(EngineCommand::StartTrial {
                        defendant: record.target,
                        charges,
                        confession,
                    });
                }
                DetentionEvent::DiedInDetention => {
                    log.push(LogEntry {
                        subject: record.target,
                        initiator: Some(record.initiator),
                        key: "detention.death".to_string(),
                    });
                    commands.push(EngineCommand::MarkFate {
                        official: record.target,
                        fate: Fate::Executed,
                    });
                }
            }
        }
    }

    let concluded: Vec<_> = {
        let mut kept = Vec::new();
        let mut done = Vec::new();
        for record in detentions.active.drain(..) {
            if record.is_active() {
                kept.push(record);
            } else {
                done.push(record);
            }
        }
        detentions.active = kept;
        done
    };
    detentions.archive.extend(concluded);

    world.insert_resource(detentions);
    world.insert_resource(rng);
    emit(world, turn, commands, log);
}

/// Advance every active trial by one phase check. Completed trials apply
/// their terminal metrics through the command pipeline and stay in place.
pub fn advance_trials(world: &mut World) {
    let turn = world.resource::<TurnClock>().turn;
    let Some(mut trials) = world.remove_resource::<Trials>() else {
        return;
    };
    let Some(mut rng) = world.remove_resource::<ProcessRng>() else {
        world.insert_resource(trials);
        return;
    };

    let mut commands = Vec::new();
    let mut log = Vec::new();

    for record in &mut trials.records {
        if !record.is_active() {
            continue;
        }
        let psyche = psyche_of(world, record.defendant);
        let rank = rank_of(world, record.defendant);
        for event in record.advance(turn, &mut rng.0, psyche, rank) {
            match event {
                TrialEvent::PhaseAdvanced(_) => {}
                TrialEvent::ConfessionExtracted(kind) => log.push(LogEntry {
                    subject: record.defendant,
                    initiator: None,
                    key: format!("trial.confession.{}", kind.key()),
                }),
                TrialEvent::SentencePassed(sentence) => log.push(LogEntry {
                    subject: record.defendant,
                    initiator: None,
                    key: format!("trial.sentenced.{}", sentence.key()),
                }),
                TrialEvent::Completed {
                    sentence,
                    intimidation_gained,
                    condemnation,
                } => {
                    log.push(LogEntry {
                        subject: record.defendant,
                        initiator: None,
                        key: format!("trial.completed.{}", sentence.key()),
                    });
                    commands.push(EngineCommand::ApplyEffects {
                        bundle: EffectBundle {
                            intimidation: intimidation_gained,
                            international_standing: -condemnation,
                            ..Default::default()
                        },
                        initiator: Initiator::Player,
                        target: None,
                    });
                    commands.push(EngineCommand::MarkFate {
                        official: record.defendant,
                        fate: sentence.fate(),
                    });
                }
            }
        }
    }

    world.insert_resource(trials);
    world.insert_resource(rng);
    emit(world, turn, commands, log);
}

fn emit(world: &mut World, turn: u64, commands: Vec<EngineCommand>, log: Vec<LogEntry>) {
    if !commands.is_empty() {
        let mut messages = world.resource_mut::<Messages<EngineCommand>>();
        for command in commands {
            messages.write(command);
        }
    }
    for entry in log {
        let id = world.resource_mut::<EngineIds>().0.next_id();
        world.resource_mut::<OutcomeLog>().entries.push(OutcomeRecord {
            id,
            turn,
            initiator: entry.initiator,
            subject: Some(entry.subject),
            key: entry.key,
        });
    }
}

fn psyche_of(world: &World, official: u64) -> PsycheView {
    world
        .resource::<Roster>()
        .entity(official)
        .and_then(|e| world.get::<Psyche>(e))
        .map(Psyche::view)
        .unwrap_or_default()
}

fn rank_of(world: &World, official: u64) -> u8 {
    world
        .resource::<Roster>()
        .entity(official)
        .and_then(|e| world.get::<OfficialCore>(e))
        .map_or(1, |core| core.rank)
}

/// Everyone else on the roster with an active fate, flagged by faction
/// membership relative to the detainee.
fn associates_of(world: &World, detainee: u64) -> Vec<AssociateView> {
    let roster = world.resource::<Roster>();
    let detainee_faction = roster
        .entity(detainee)
        .and_then(|e| world.get::<OfficialCore>(e))
        .map(|core| core.faction);
    let mut associates = Vec::new();
    for id in roster.ids() {
        if id == detainee {
            continue;
        }
        let Some(entity) = roster.entity(id) else {
            continue;
        };
        if !world
            .get::<FateStatus>(entity)
            .is_some_and(FateStatus::is_active)
        {
            continue;
        }
        let Some(core) = world.get::<OfficialCore>(entity) else {
            continue;
        };
        associates.push(AssociateView {
            id,
            same_faction: Some(core.faction) == detainee_faction,
        });
    }
    associates
}
