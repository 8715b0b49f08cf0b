//! Per-turn systems, grouped by the domain sets they run in.

pub mod pending;
pub mod planner;
pub mod processes;

pub use pending::resolve_pending;
pub use planner::plan_npc_actions;
pub use processes::{advance_detentions, advance_trials};
