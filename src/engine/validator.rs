//! Eligibility validation.
//!
//! Checks run in a fixed order and short-circuit on the first failure, so
//! the caller always sees the most fundamental objection. A passing
//! validation yields a [`Clearance`] carrying the computed success chance.

use crate::catalog::PROJECT_SLOT_CAP;
use crate::ecs::resources::StateOfTheNation;
use crate::model::catalog::ActionDef;
use crate::model::outcome::Rejection;

use super::chance::{ActorView, TargetView, success_chance};
use super::cooldown::Cooldowns;

/// Rank at which an official transcends track requirements.
pub const TRACK_TRANSCEND_RANK: u8 = 8;

/// A validated request: cleared to execute at this chance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clearance {
    pub chance: i32,
    /// Target outranks the approval threshold; the document queue must
    /// route this through higher authority.
    pub requires_approval: bool,
}

/// In-flight load relevant to slot and stacking checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLoad {
    pub active_projects: usize,
    pub duplicate_in_flight: bool,
}

/// Validate an action request. Order: rank, track, cooldown, target
/// seniority, resources, slots.
pub fn validate(
    def: &ActionDef,
    actor: &ActorView,
    target: Option<&TargetView>,
    turn: u64,
    cooldowns: &Cooldowns,
    load: ProcessLoad,
    nation: &StateOfTheNation,
) -> Result<Clearance, Rejection> {
    if actor.rank < def.min_rank {
        return Err(Rejection::RankTooLow {
            required: def.min_rank,
            actual: actor.rank,
        });
    }

    if let Some(required) = def.required_track
        && actor.track != required
        && actor.rank < TRACK_TRANSCEND_RANK
    {
        return Err(Rejection::WrongTrack { required });
    }

    let remaining = cooldowns.turns_remaining(def.domain, def.id, turn);
    if remaining > 0 {
        return Err(Rejection::OnCooldown {
            turns_remaining: remaining,
        });
    }

    let mut requires_approval = false;
    if def.target.needs_official() {
        let Some(target) = target else {
            return Err(Rejection::TargetRequired);
        };
        if let Some(ceiling) = def.max_target_rank
            && target.rank > ceiling
        {
            return Err(Rejection::TargetTooSenior {
                ceiling,
                target_rank: target.rank,
            });
        }
        if let Some(approval) = def.approval_rank {
            requires_approval = target.rank > approval;
        }
    }

    if def.resource_cost > 0 && actor.funds < def.resource_cost {
        return Err(Rejection::InsufficientResources {
            required: def.resource_cost,
            available: actor.funds,
        });
    }

    if def.is_project && load.active_projects >= PROJECT_SLOT_CAP {
        return Err(Rejection::SlotLimitReached {
            cap: PROJECT_SLOT_CAP,
        });
    }
    if def.is_multi_turn() && !def.allows_stacking && load.duplicate_in_flight {
        return Err(Rejection::AlreadyInProgress);
    }

    Ok(Clearance {
        chance: success_chance(def, actor, target, nation),
        requires_approval,
    })
}
