//! Success probability calculator.
//!
//! Pure arithmetic over views of the actor, target, and world. No mutation,
//! no randomness — the dice live in the executor.

use crate::ecs::resources::StateOfTheNation;
use crate::model::catalog::{ActionDef, Domain};
use crate::model::effects::RegimeFlag;

/// Final chances are always kept inside this band: nothing is certain,
/// nothing is hopeless.
pub const CHANCE_FLOOR: i32 = 5;
pub const CHANCE_CEILING: i32 = 95;

const NETWORK_BONUS_CAP: i32 = 10;
const STANDING_BONUS_CAP: i32 = 15;
const RANK_STEP_BONUS: i32 = 5;

/// The actor fields the calculator reads.
#[derive(Debug, Clone, Copy)]
pub struct ActorView {
    pub id: u64,
    pub rank: u8,
    pub track: Domain,
    pub network: i32,
    pub standing: i32,
    pub funds: i32,
}

/// The target fields the calculator reads.
#[derive(Debug, Clone, Copy)]
pub struct TargetView {
    pub id: u64,
    pub rank: u8,
    pub protection: i32,
    pub disposition: i32,
}

/// Full success chance for a validated action, clamped to
/// [`CHANCE_FLOOR`]..=[`CHANCE_CEILING`].
pub fn success_chance(
    def: &ActionDef,
    actor: &ActorView,
    target: Option<&TargetView>,
    nation: &StateOfTheNation,
) -> i32 {
    let position = i32::from(actor.rank.saturating_sub(def.min_rank)) * RANK_STEP_BONUS;
    let network = (actor.network / 10).clamp(0, NETWORK_BONUS_CAP);
    let standing = (actor.standing / 10).clamp(0, STANDING_BONUS_CAP);
    let world = world_modifier(def.domain, nation);
    let risk = def.risk.chance_modifier();
    let target_mod = target.map_or(0, |t| target_modifier(actor, t));

    (def.base_chance + position + network + standing + world + risk + target_mod)
        .clamp(CHANCE_FLOOR, CHANCE_CEILING)
}

/// Simplified model used by the NPC planner: base plus rank, nothing else.
pub fn simplified_chance(def: &ActionDef, rank: u8) -> i32 {
    (def.base_chance + i32::from(rank) * RANK_STEP_BONUS).clamp(CHANCE_FLOOR, CHANCE_CEILING)
}

/// Domain-specific world-state thresholds. Each term is monotone in the
/// counter it reads.
fn world_modifier(domain: Domain, nation: &StateOfTheNation) -> i32 {
    let mut modifier = 0;
    match domain {
        Domain::Security => {
            if nation.stability < 30 {
                modifier -= 10;
            } else if nation.stability < 50 {
                modifier -= 5;
            }
            if nation.intimidation >= 60 {
                modifier += 5;
            }
        }
        Domain::Diplomacy => {
            if nation.international_standing >= 70 {
                modifier += 5;
            } else if nation.international_standing < 30 {
                modifier -= 5;
            }
            if nation.has_flag(RegimeFlag::AtWar) {
                modifier -= 10;
            }
        }
        Domain::Ministry => {
            if nation.treasury >= 70 {
                modifier += 5;
            } else if nation.treasury < 30 {
                modifier -= 5;
            }
            if nation.stability >= 60 {
                modifier += 5;
            }
        }
    }
    modifier
}

/// Penalize reaching above one's station or at a protected target; reward a
/// favorable disposition.
fn target_modifier(actor: &ActorView, target: &TargetView) -> i32 {
    let seniority_gap = i32::from(target.rank.saturating_sub(actor.rank));
    let protection = (target.protection / 10).clamp(0, 10);
    let disposition = (target.disposition / 10).clamp(-10, 10);
    -seniority_gap * 4 - protection + disposition
}
