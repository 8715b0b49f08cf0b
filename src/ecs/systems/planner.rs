//! Autonomous NPC planning.
//!
//! Once per turn each eligible NPC official may attempt one action from
//! their own track. Plans are chosen by simple world-state thresholds and
//! rolled against the simplified chance model; the planner knows less than
//! the full calculator does. A rejected plan falls through to the track's
//! fallback action, and a rejected fallback simply means the official sits
//! the turn out.

use bevy_ecs::entity::Entity;
use bevy_ecs::query::{With, Without};
use bevy_ecs::world::World;
use rand::Rng;
use rand::rngs::SmallRng;

use crate::catalog::Catalog;
use crate::ecs::components::{FateStatus, Official, OfficialCore, Player};
use crate::ecs::resources::{Detentions, PlannerRng, Roster, StateOfTheNation, Trials};
use crate::engine::executor::{AttemptSpec, ChanceModel, attempt};
use crate::model::{Domain, Initiator, RegimeFlag};

/// Percent chance per turn that an official of each track acts at all.
fn attempt_percent(track: Domain) -> i32 {
    match track {
        Domain::Security => 20,
        Domain::Diplomacy => 15,
        Domain::Ministry => 25,
    }
}

/// Candidate actions in priority order for one track, given the current
/// world state.
fn candidate_actions(track: Domain, nation: &StateOfTheNation) -> Vec<&'static str> {
    match track {
        Domain::Security => {
            if nation.stability < 40 {
                vec!["mass_arrests", "surveillance_detail"]
            } else {
                vec!["surveillance_detail"]
            }
        }
        Domain::Diplomacy => {
            if nation.has_flag(RegimeFlag::AtWar) {
                vec!["negotiate_ceasefire", "cultural_exchange"]
            } else {
                vec!["cultural_exchange"]
            }
        }
        Domain::Ministry => {
            if nation.treasury < 30 {
                vec!["requisition_funds", "grain_exports"]
            } else if nation.stability < 40 {
                vec!["industrial_project", "requisition_funds"]
            } else {
                vec!["requisition_funds"]
            }
        }
    }
}

pub fn plan_npc_actions(world: &mut World) {
    let Some(mut rng) = world.remove_resource::<PlannerRng>() else {
        return;
    };
    for (npc, track) in eligible_npcs(world) {
        if rng.0.random_range(1..=100) > attempt_percent(track) {
            continue;
        }
        let candidates = candidate_actions(track, world.resource::<StateOfTheNation>());
        for action_id in candidates {
            let target = if needs_official_target(world, action_id) {
                let Some(picked) = pick_target(world, &mut rng.0, npc) else {
                    continue;
                };
                Some(picked)
            } else {
                None
            };
            let outcome = attempt(
                world,
                &mut rng.0,
                AttemptSpec {
                    actor: npc,
                    action_id,
                    target,
                    initiator: Initiator::Npc(npc),
                    model: ChanceModel::Simplified,
                },
            );
            if !outcome.is_rejected() {
                break;
            }
        }
    }
    world.insert_resource(rng);
}

fn eligible_npcs(world: &mut World) -> Vec<(u64, Domain)> {
    let mut npcs = Vec::new();
    let mut query = world
        .query_filtered::<(Entity, &OfficialCore, &FateStatus), (With<Official>, Without<Player>)>();
    let candidates: Vec<_> = query
        .iter(world)
        .filter(|(_, _, fate)| fate.is_active())
        .map(|(entity, core, _)| (entity, core.track))
        .collect();
    let roster = world.resource::<Roster>();
    let detentions = world.resource::<Detentions>();
    let trials = world.resource::<Trials>();
    for (entity, track) in candidates {
        let Some(id) = roster.id_of(entity) else {
            continue;
        };
        if detentions.is_detained(id) || trials.is_on_trial(id) {
            continue;
        }
        npcs.push((id, track));
    }
    // Roster order keeps replays deterministic.
    npcs.sort_by_key(|&(id, _)| id);
    npcs
}

fn needs_official_target(world: &World, action_id: &str) -> bool {
    world
        .resource::<Catalog>()
        .get(action_id)
        .is_some_and(|def| def.target.needs_official())
}

/// A random other active official who is neither detained nor on trial.
fn pick_target(world: &mut World, rng: &mut SmallRng, actor: u64) -> Option<u64> {
    let mut query = world.query::<(Entity, &FateStatus)>();
    let active: Vec<_> = query
        .iter(world)
        .filter(|(_, fate)| fate.is_active())
        .map(|(entity, _)| entity)
        .collect();
    let roster = world.resource::<Roster>();
    let detentions = world.resource::<Detentions>();
    let trials = world.resource::<Trials>();
    let mut candidates: Vec<u64> = active
        .into_iter()
        .filter_map(|entity| roster.id_of(entity))
        .filter(|&id| id != actor && !detentions.is_detained(id) && !trials.is_on_trial(id))
        .collect();
    candidates.sort_unstable();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}
