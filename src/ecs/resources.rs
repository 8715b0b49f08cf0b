//! Engine resources: world counters, record stores, RNGs, and the roster.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;
use bevy_ecs::world::World;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::id::IdGenerator;
use crate::model::{
    DetentionRecord, OutcomeRecord, PendingAction, RegimeFlag, TrialRecord,
};

// ---------------------------------------------------------------------------
// World counters
// ---------------------------------------------------------------------------

/// The regime's aggregate counters and flags — the world state every
/// domain's modifiers and effect bundles read and write.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateOfTheNation {
    pub stability: i32,
    pub treasury: i32,
    pub party_standing: i32,
    pub international_standing: i32,
    pub intimidation: i32,
    pub flags: BTreeSet<RegimeFlag>,
}

impl Default for StateOfTheNation {
    fn default() -> Self {
        Self {
            stability: 50,
            treasury: 50,
            party_standing: 50,
            international_standing: 50,
            intimidation: 10,
            flags: BTreeSet::new(),
        }
    }
}

impl StateOfTheNation {
    pub fn has_flag(&self, flag: RegimeFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Apply a signed delta to one counter, clamped to 0..=100.
    pub fn bump(counter: &mut i32, delta: i32) {
        *counter = (*counter + delta).clamp(0, 100);
    }
}

// ---------------------------------------------------------------------------
// Record stores (the typed replacement for a string-keyed side table)
// ---------------------------------------------------------------------------

/// In-flight multi-turn operations and ministry projects. Projects are kept
/// apart because they answer to the concurrent slot cap and the save layout.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingOps {
    pub operations: Vec<PendingAction>,
    pub projects: Vec<PendingAction>,
}

impl PendingOps {
    pub fn active_project_count(&self) -> usize {
        self.projects.iter().filter(|p| !p.resolved).count()
    }

    /// Whether an unresolved record already exists for this (actor, action).
    pub fn has_in_flight(&self, actor: u64, action_id: &str) -> bool {
        self.operations
            .iter()
            .chain(self.projects.iter())
            .any(|p| !p.resolved && p.actor == actor && p.action_id == action_id)
    }

    pub fn all_mut(&mut self) -> impl Iterator<Item = &mut PendingAction> {
        self.operations.iter_mut().chain(self.projects.iter_mut())
    }
}

/// Active and archived detention records.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detentions {
    pub active: Vec<DetentionRecord>,
    pub archive: Vec<DetentionRecord>,
}

impl Detentions {
    pub fn is_detained(&self, official: u64) -> bool {
        self.active.iter().any(|d| d.target == official)
    }

    /// Most recent concluded record for an official, if any.
    pub fn archived_for(&self, official: u64) -> Option<&DetentionRecord> {
        self.archive.iter().rev().find(|d| d.target == official)
    }
}

/// Trials, active and completed. Completed records are immutable and stay in
/// place for the historical record.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trials {
    pub records: Vec<TrialRecord>,
}

impl Trials {
    pub fn is_on_trial(&self, official: u64) -> bool {
        self.records
            .iter()
            .any(|t| t.defendant == official && t.is_active())
    }
}

/// Append-only audit log; the narrative subsystem's feed.
#[derive(Resource, Debug, Clone, Default)]
pub struct OutcomeLog {
    pub entries: Vec<OutcomeRecord>,
}

/// Shared ID source for officials and records.
#[derive(Resource, Debug, Clone, Default)]
pub struct EngineIds(pub IdGenerator);

// ---------------------------------------------------------------------------
// Roster: stable official ids <-> ECS entities
// ---------------------------------------------------------------------------

/// Records and save files refer to officials by stable `u64` id; the roster
/// maps those onto live ECS entities.
#[derive(Resource, Debug, Clone, Default)]
pub struct Roster {
    by_id: BTreeMap<u64, Entity>,
    by_entity: BTreeMap<Entity, u64>,
}

impl Roster {
    pub fn register(&mut self, id: u64, entity: Entity) {
        let prev = self.by_id.insert(id, entity);
        debug_assert!(prev.is_none(), "official id {id} registered twice");
        self.by_entity.insert(entity, id);
    }

    pub fn entity(&self, id: u64) -> Option<Entity> {
        self.by_id.get(&id).copied()
    }

    pub fn id_of(&self, entity: Entity) -> Option<u64> {
        self.by_entity.get(&entity).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.by_id.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Randomness
// ---------------------------------------------------------------------------

/// Master RNG: seeds the per-domain RNGs each tick and serves synchronous
/// player requests between ticks.
#[derive(Resource)]
pub struct EngineRng {
    pub rng: SmallRng,
    pub seed: u64,
}

impl EngineRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
        }
    }
}

macro_rules! subsystem_rng {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Resource)]
        pub struct $name(pub SmallRng);

        impl Default for $name {
            fn default() -> Self {
                Self(SmallRng::seed_from_u64(0))
            }
        }
    };
}

subsystem_rng!(ProcessRng, "RNG for detention/trial advancement.");
subsystem_rng!(PendingRng, "RNG for pending-action resolution rolls.");
subsystem_rng!(PlannerRng, "RNG for NPC plan selection and execution.");

fn derive_subsystem_seed(seed: u64, label: &str, tick: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    label.hash(&mut hasher);
    tick.hash(&mut hasher);
    hasher.finish()
}

/// Exclusive system: re-seed the subsystem RNGs from (master seed, label,
/// turn) so each subsystem's draws replay identically regardless of what the
/// others consumed. Runs in `TurnPhase::PreUpdate`.
pub fn distribute_rng(world: &mut World) {
    let seed = world.resource::<EngineRng>().seed;
    let turn = world.resource::<crate::ecs::clock::TurnClock>().turn;

    world.resource_mut::<ProcessRng>().0 =
        SmallRng::seed_from_u64(derive_subsystem_seed(seed, "processes", turn));
    world.resource_mut::<PendingRng>().0 =
        SmallRng::seed_from_u64(derive_subsystem_seed(seed, "pending", turn));
    world.resource_mut::<PlannerRng>().0 =
        SmallRng::seed_from_u64(derive_subsystem_seed(seed, "planner", turn));
}
