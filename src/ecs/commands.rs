//! Command pipeline.
//!
//! Turn systems never mutate world counters or officials directly: they emit
//! [`EngineCommand`] messages, and the exclusive applicator in
//! `TurnPhase::PostUpdate` applies them. The synchronous `request_action`
//! path calls the same `apply_command` entry point directly, so every
//! mutation in the engine flows through one place.

use bevy_ecs::message::{Message, Messages};
use bevy_ecs::world::World;

use crate::ecs::clock::TurnClock;
use crate::ecs::components::{Attitude, FateStatus};
use crate::ecs::resources::{Detentions, EngineIds, Roster, StateOfTheNation, Trials};
use crate::model::detention::ConfessionKind;
use crate::model::{Charge, DetentionRecord, EffectBundle, Fate, Initiator, TrialRecord};

/// An intended state change, applied by the command applicator.
#[derive(Message, Debug, Clone)]
pub enum EngineCommand {
    /// Apply an effect bundle: world counter deltas, flag changes, target
    /// personal deltas, and any sub-process triggers it carries.
    ApplyEffects {
        bundle: EffectBundle,
        initiator: Initiator,
        target: Option<u64>,
    },
    MarkFate {
        official: u64,
        fate: Fate,
    },
    StartDetention {
        target: u64,
        initiator: Initiator,
    },
    StartTrial {
        defendant: u64,
        charges: Vec<Charge>,
        confession: Option<ConfessionKind>,
    },
}

/// Exclusive system draining all pending commands. Runs in
/// `TurnPhase::PostUpdate`.
pub fn apply_engine_commands(world: &mut World) {
    let commands: Vec<EngineCommand> = {
        let Some(mut messages) = world.get_resource_mut::<Messages<EngineCommand>>() else {
            return;
        };
        messages.drain().collect()
    };
    for command in commands {
        apply_command(world, command);
    }
}

pub(crate) fn apply_command(world: &mut World, command: EngineCommand) {
    match command {
        EngineCommand::ApplyEffects {
            bundle,
            initiator,
            target,
        } => apply_bundle(world, &bundle, initiator, target),
        EngineCommand::MarkFate { official, fate } => mark_fate(world, official, fate),
        EngineCommand::StartDetention { target, initiator } => {
            start_detention(world, target, initiator)
        }
        EngineCommand::StartTrial {
            defendant,
            charges,
            confession,
        } => start_trial(world, defendant, charges, confession),
    }
}

pub(crate) fn apply_bundle(
    world: &mut World,
    bundle: &EffectBundle,
    initiator: Initiator,
    target: Option<u64>,
) {
    {
        let mut nation = world.resource_mut::<StateOfTheNation>();
        StateOfTheNation::bump(&mut nation.stability, bundle.stability);
        StateOfTheNation::bump(&mut nation.treasury, bundle.treasury);
        StateOfTheNation::bump(&mut nation.party_standing, bundle.party_standing);
        StateOfTheNation::bump(
            &mut nation.international_standing,
            bundle.international_standing,
        );
        StateOfTheNation::bump(&mut nation.intimidation, bundle.intimidation);
        for &flag in &bundle.set_flags {
            nation.flags.insert(flag);
        }
        for &flag in &bundle.clear_flags {
            nation.flags.remove(&flag);
        }
    }

    if let Some(target_id) = target {
        apply_target_deltas(world, target_id, bundle);
        if bundle.starts_detention {
            start_detention(world, target_id, initiator);
        }
        if bundle.starts_trial {
            let charges = default_charges(world, target_id);
            let confession = carried_confession(world, target_id);
            start_trial(world, target_id, charges, confession);
        }
        if let Some(fate) = bundle.target_fate {
            mark_fate(world, target_id, fate);
        }
    }
}

fn apply_target_deltas(world: &mut World, target_id: u64, bundle: &EffectBundle) {
    if bundle.target_disposition == 0 && bundle.target_fear == 0 {
        return;
    }
    let Some(entity) = world.resource::<Roster>().entity(target_id) else {
        tracing::warn!(target_id, "effect bundle targets an unknown official");
        return;
    };
    let Some(mut attitude) = world.get_mut::<Attitude>(entity) else {
        tracing::warn!(target_id, "targeted official has no attitude component");
        return;
    };
    attitude.disposition = (attitude.disposition + bundle.target_disposition).clamp(-100, 100);
    attitude.fear = (attitude.fear + bundle.target_fear).clamp(0, 100);
}

fn mark_fate(world: &mut World, official: u64, fate: Fate) {
    let Some(entity) = world.resource::<Roster>().entity(official) else {
        tracing::warn!(official, ?fate, "cannot mark fate of unknown official");
        return;
    };
    if let Some(mut status) = world.get_mut::<FateStatus>(entity) {
        tracing::debug!(official, ?fate, "fate marked");
        status.0 = fate;
    }
}

fn start_detention(world: &mut World, target: u64, initiator: Initiator) {
    if world.resource::<Roster>().entity(target).is_none() {
        tracing::warn!(target, "cannot detain an unknown official");
        return;
    }
    if world.resource::<Detentions>().is_detained(target) {
        tracing::warn!(target, "official is already in detention");
        return;
    }
    let turn = world.resource::<TurnClock>().turn;
    let id = world.resource_mut::<EngineIds>().0.next_id();
    let record = DetentionRecord::new(id, target, initiator, turn);
    tracing::debug!(target, turn, "detention opened");
    world.resource_mut::<Detentions>().active.push(record);
}

fn start_trial(
    world: &mut World,
    defendant: u64,
    charges: Vec<Charge>,
    confession: Option<ConfessionKind>,
) {
    if world.resource::<Roster>().entity(defendant).is_none() {
        tracing::warn!(defendant, "cannot try an unknown official");
        return;
    }
    if world.resource::<Trials>().is_on_trial(defendant) {
        tracing::warn!(defendant, "official is already on trial");
        return;
    }
    let turn = world.resource::<TurnClock>().turn;
    let id = world.resource_mut::<EngineIds>().0.next_id();
    let record = TrialRecord::new(id, defendant, charges, confession, turn);
    tracing::debug!(defendant, turn, "trial opened");
    world.resource_mut::<Trials>().records.push(record);
}

/// A formal charge sheet: treason always, conspiracy when a concluded
/// detention implicated others.
fn default_charges(world: &World, defendant: u64) -> Vec<Charge> {
    let mut charges = vec![Charge::Treason];
    if let Some(archived) = world.resource::<Detentions>().archived_for(defendant)
        && !archived.implicated.is_empty()
    {
        charges.push(Charge::Conspiracy);
    }
    charges
}

/// A confession extracted in detention carries over into the trial.
fn carried_confession(world: &World, defendant: u64) -> Option<ConfessionKind> {
    world
        .resource::<Detentions>()
        .archived_for(defendant)
        .and_then(|d| d.confession)
}
