use bevy_app::App;
use bevy_ecs::message::MessageRegistry;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs};

use crate::catalog::Catalog;
use crate::engine::Cooldowns;

use super::clock::TurnClock;
use super::commands::{EngineCommand, apply_engine_commands};
use super::resources::{
    Detentions, EngineIds, EngineRng, OutcomeLog, PendingOps, PendingRng, PlannerRng,
    ProcessRng, Roster, StateOfTheNation, Trials, distribute_rng,
};
use super::schedule::{DomainSet, TurnPhase, configure_turn_schedule};
use super::systems::{advance_detentions, advance_trials, plan_npc_actions, resolve_pending};

/// Build a headless engine app with the turn clock, record stores, the
/// standard action catalog, and the command applicator.
///
/// Turns are driven manually:
/// ```no_run
/// # use apparat::ecs::{build_engine_app, TurnTick};
/// let mut app = build_engine_app(42);
/// for _ in 0..10 {
///     app.world_mut().run_schedule(TurnTick);
/// }
/// ```
pub fn build_engine_app(seed: u64) -> App {
    build_engine_app_with_executor(seed, ExecutorKind::MultiThreaded)
}

/// Single-threaded executor: exact RNG consumption order is identical
/// across runs, which replay and the save round-trip tests rely on.
pub fn build_engine_app_deterministic(seed: u64) -> App {
    build_engine_app_with_executor(seed, ExecutorKind::SingleThreaded)
}

pub fn build_engine_app_with_executor(seed: u64, executor: ExecutorKind) -> App {
    let mut app = App::empty();

    app.insert_resource(TurnClock::new(1));
    app.insert_resource(Catalog::standard());
    app.insert_resource(StateOfTheNation::default());
    app.insert_resource(Cooldowns::default());
    app.insert_resource(PendingOps::default());
    app.insert_resource(Detentions::default());
    app.insert_resource(Trials::default());
    app.insert_resource(OutcomeLog::default());
    app.insert_resource(EngineIds::default());
    app.insert_resource(Roster::default());
    app.insert_resource(EngineRng::seeded(seed));

    // Per-subsystem RNGs, reseeded each turn by distribute_rng.
    app.init_resource::<ProcessRng>();
    app.init_resource::<PendingRng>();
    app.init_resource::<PlannerRng>();

    MessageRegistry::register_message::<EngineCommand>(app.world_mut());

    let mut schedule = configure_turn_schedule(executor);
    schedule.add_systems(bevy_ecs::message::message_update_system.in_set(TurnPhase::PreUpdate));
    schedule.add_systems(distribute_rng.in_set(TurnPhase::PreUpdate));
    schedule.add_systems((advance_detentions, advance_trials).chain().in_set(DomainSet::Processes));
    schedule.add_systems(resolve_pending.in_set(DomainSet::Pending));
    schedule.add_systems(plan_npc_actions.in_set(DomainSet::Planner));
    schedule.add_systems(apply_engine_commands.in_set(TurnPhase::PostUpdate));
    app.add_schedule(schedule);
    app
}
