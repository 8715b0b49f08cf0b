//! Gated action-resolution engine for a turn-based regime simulation.
//!
//! The engine owns the action catalogs, eligibility gates, success
//! calculation, multi-turn scheduling, the coercive detention and trial
//! processes, autonomous NPC planning, and versioned save snapshots. It is
//! headless: the interface layer submits actions between turns via
//! [`engine::request_action`] and drives turns by running the
//! [`ecs::TurnTick`] schedule.

pub mod catalog;
pub mod ecs;
pub mod engine;
pub mod error;
pub mod id;
pub mod model;
pub mod save;
pub mod scenario;

pub use catalog::Catalog;
pub use ecs::{TurnTick, build_engine_app, build_engine_app_deterministic};
pub use engine::request_action;
pub use error::EngineError;
pub use id::IdGenerator;
pub use model::{
    ActionDef, Domain, Initiator, Rejection, RequestOutcome, Resolution, RiskTier,
};
pub use save::{SaveState, read_save, restore, snapshot, write_save};
pub use scenario::Scenario;
