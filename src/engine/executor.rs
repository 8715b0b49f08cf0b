//! Action execution.
//!
//! [`request_action`] is the synchronous entry point the interface layer
//! calls between turns; the NPC planner drives the same [`attempt`] core
//! with its own RNG and the simplified chance model. Validation,
//! resource spend, cooldown start, and scheduling all happen here;
//! the actual state mutation goes through the command applicator's
//! `apply_bundle` so immediate and deferred resolution share one path.

use bevy_ecs::world::World;
use rand::Rng;
use rand::rngs::SmallRng;

use crate::catalog::Catalog;
use crate::ecs::clock::TurnClock;
use crate::ecs::commands;
use crate::ecs::components::{Attitude, FateStatus, Influence, OfficialCore};
use crate::ecs::resources::{
    Detentions, EngineIds, EngineRng, OutcomeLog, PendingOps, Roster, StateOfTheNation, Trials,
};
use crate::model::catalog::ActionDef;
use crate::model::outcome::{
    Initiator, OutcomeRecord, Rejection, RequestOutcome, Resolution, narrative_key,
};
use crate::model::pending::PendingAction;

use super::chance::{ActorView, TargetView, simplified_chance};
use super::cooldown::Cooldowns;
use super::validator::{ProcessLoad, validate};

/// Which success model an attempt rolls against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanceModel {
    /// Every modifier: rank, network, standing, world state, risk, target.
    Full,
    /// Base plus rank only. The planner deliberately plans on less
    /// information than the full calculator uses.
    Simplified,
}

/// One action attempt, fully specified.
#[derive(Debug, Clone, Copy)]
pub struct AttemptSpec<'a> {
    pub actor: u64,
    pub action_id: &'a str,
    pub target: Option<u64>,
    pub initiator: Initiator,
    pub model: ChanceModel,
}

/// Submit an action on behalf of the player. Runs synchronously between
/// turns against the master RNG; the outcome (or refusal) comes back
/// immediately, with multi-turn actions answering `Scheduled`.
pub fn request_action(
    world: &mut World,
    actor: u64,
    action_id: &str,
    target: Option<u64>,
) -> RequestOutcome {
    world.resource_scope(|world, mut master: bevy_ecs::world::Mut<EngineRng>| {
        attempt(
            world,
            &mut master.rng,
            AttemptSpec {
                actor,
                action_id,
                target,
                initiator: Initiator::Player,
                model: ChanceModel::Full,
            },
        )
    })
}

/// Validate, spend, and either resolve or schedule one attempt.
pub(crate) fn attempt(world: &mut World, rng: &mut SmallRng, spec: AttemptSpec<'_>) -> RequestOutcome {
    let Some(def) = world.resource::<Catalog>().get(spec.action_id).cloned() else {
        return RequestOutcome::Rejected {
            reason: Rejection::UnknownAction {
                action_id: spec.action_id.to_string(),
            },
        };
    };

    let Some(actor) = actor_view(world, spec.actor) else {
        return RequestOutcome::Rejected {
            reason: Rejection::UnknownOfficial { official: spec.actor },
        };
    };

    let target = if def.target.needs_official() {
        match spec.target {
            Some(id) => match target_view(world, id) {
                Ok(view) => Some(view),
                Err(reason) => return RequestOutcome::Rejected { reason },
            },
            None => return RequestOutcome::Rejected { reason: Rejection::TargetRequired },
        }
    } else {
        None
    };

    let turn = world.resource::<TurnClock>().turn;
    let load = {
        let ops = world.resource::<PendingOps>();
        ProcessLoad {
            active_projects: ops.active_project_count(),
            duplicate_in_flight: ops.has_in_flight(spec.actor, def.id),
        }
    };

    let clearance = {
        let cooldowns = world.resource::<Cooldowns>();
        let nation = world.resource::<StateOfTheNation>();
        match validate(&def, &actor, target.as_ref(), turn, cooldowns, load, nation) {
            Ok(clearance) => clearance,
            Err(reason) => return RequestOutcome::Rejected { reason },
        }
    };

    let chance = match spec.model {
        ChanceModel::Full => clearance.chance,
        ChanceModel::Simplified => simplified_chance(&def, actor.rank),
    };

    // The attempt is committed: spend funds and start the cooldown now,
    // whether or not the dice cooperate.
    spend_funds(world, spec.actor, def.resource_cost);
    world
        .resource_mut::<Cooldowns>()
        .set(def.domain, def.id, turn, u64::from(def.cooldown_turns));

    if def.is_multi_turn() {
        return schedule(world, &def, spec, turn, chance, clearance.requires_approval);
    }

    let roll = rng.random_range(1..=100);
    let succeeded = roll <= chance;
    let key = narrative_key(def.id, succeeded);
    tracing::debug!(
        actor = spec.actor,
        action = def.id,
        chance,
        roll,
        succeeded,
        "action resolved"
    );

    let bundle = if succeeded { &def.on_success } else { &def.on_failure };
    commands::apply_bundle(world, bundle, spec.initiator, spec.target);
    record_outcome(world, turn, spec, &key);

    RequestOutcome::Resolved(Resolution {
        succeeded,
        chance,
        roll,
        narrative_key: key,
        required_approval: clearance.requires_approval,
    })
}

fn schedule(
    world: &mut World,
    def: &ActionDef,
    spec: AttemptSpec<'_>,
    turn: u64,
    chance: i32,
    required_approval: bool,
) -> RequestOutcome {
    let id = world.resource_mut::<EngineIds>().0.next_id();
    let completes_turn = turn + u64::from(def.execution_turns);
    let record = PendingAction {
        id,
        action_id: def.id.to_string(),
        actor: spec.actor,
        target: spec.target,
        initiator: spec.initiator,
        initiated_turn: turn,
        completes_turn,
        chance,
        resolved: false,
        succeeded: None,
    };
    tracing::debug!(
        actor = spec.actor,
        action = def.id,
        completes_turn,
        "action scheduled"
    );
    let mut ops = world.resource_mut::<PendingOps>();
    if def.is_project {
        ops.projects.push(record);
    } else {
        ops.operations.push(record);
    }
    RequestOutcome::Scheduled {
        pending_id: id,
        completes_turn,
        required_approval,
    }
}

fn spend_funds(world: &mut World, official: u64, cost: i32) {
    if cost == 0 {
        return;
    }
    let Some(entity) = world.resource::<Roster>().entity(official) else {
        return;
    };
    if let Some(mut influence) = world.get_mut::<Influence>(entity) {
        influence.funds -= cost;
    }
}

fn record_outcome(world: &mut World, turn: u64, spec: AttemptSpec<'_>, key: &str) {
    let id = world.resource_mut::<EngineIds>().0.next_id();
    world.resource_mut::<OutcomeLog>().entries.push(OutcomeRecord {
        id,
        turn,
        initiator: Some(spec.initiator),
        subject: spec.target,
        key: key.to_string(),
    });
}

pub(crate) fn actor_view(world: &World, official: u64) -> Option<ActorView> {
    let entity = world.resource::<Roster>().entity(official)?;
    let core = world.get::<OfficialCore>(entity)?;
    let influence = world.get::<Influence>(entity)?;
    Some(ActorView {
        id: official,
        rank: core.rank,
        track: core.track,
        network: influence.network,
        standing: influence.standing,
        funds: influence.funds,
    })
}

fn target_view(world: &World, official: u64) -> Result<TargetView, Rejection> {
    let Some(entity) = world.resource::<Roster>().entity(official) else {
        return Err(Rejection::UnknownOfficial { official });
    };
    let active = world
        .get::<FateStatus>(entity)
        .is_some_and(FateStatus::is_active);
    if !active
        || world.resource::<Detentions>().is_detained(official)
        || world.resource::<Trials>().is_on_trial(official)
    {
        return Err(Rejection::TargetUnavailable { target: official });
    }
    let Some(core) = world.get::<OfficialCore>(entity) else {
        return Err(Rejection::UnknownOfficial { official });
    };
    let attitude = world.get::<Attitude>(entity).cloned().unwrap_or_default();
    Ok(TargetView {
        id: official,
        rank: core.rank,
        protection: attitude.protection,
        disposition: attitude.disposition,
    })
}
