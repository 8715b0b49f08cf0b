//! Components describing the officials on the roster.

use bevy_ecs::component::Component;

use crate::model::detention::PsycheView;
use crate::model::{Domain, Fate};

/// Marker: this entity is an official on the roster.
#[derive(Component, Debug)]
pub struct Official;

/// Marker: the player's own official.
#[derive(Component, Debug)]
pub struct Player;

/// Identity and position.
#[derive(Component, Debug, Clone)]
pub struct OfficialCore {
    pub name: String,
    /// Seniority, 1..=10.
    pub rank: u8,
    /// Specialization track.
    pub track: Domain,
    /// Clique membership, for implication sampling.
    pub faction: u64,
}

/// Personality traits, 0..=100, read by the coercive processes.
#[derive(Component, Debug, Clone, Default)]
pub struct Psyche {
    pub loyalty: i32,
    pub paranoia: i32,
    pub ambition: i32,
}

impl Psyche {
    pub fn view(&self) -> PsycheView {
        PsycheView {
            loyalty: self.loyalty,
            paranoia: self.paranoia,
            ambition: self.ambition,
        }
    }
}

/// Political capital feeding the success calculator.
#[derive(Component, Debug, Clone, Default)]
pub struct Influence {
    pub network: i32,
    pub standing: i32,
    /// Personal funds spent on actions with a resource cost.
    pub funds: i32,
}

/// How this official relates to the acting player/NPC world.
#[derive(Component, Debug, Clone, Default)]
pub struct Attitude {
    /// Disposition toward the player, signed.
    pub disposition: i32,
    pub fear: i32,
    /// Patronage shielding this official from being targeted.
    pub protection: i32,
}

/// Current fate. Only the command applicator mutates this.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FateStatus(pub Fate);

impl FateStatus {
    pub fn is_active(&self) -> bool {
        self.0.is_active()
    }
}
