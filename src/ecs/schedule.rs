use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::advance_turn;

/// Schedule label for one game turn.
/// Run manually per turn via `app.world_mut().run_schedule(TurnTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TurnTick;

/// Ordered phases within each turn.
///
/// PreUpdate < Update < PostUpdate < Last. Message rotation and RNG
/// distribution run in PreUpdate, the command applicator in PostUpdate, the
/// clock advance in Last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    PreUpdate,
    Update,
    PostUpdate,
    Last,
}

/// Resolution order within `TurnPhase::Update`. This ordering is part of the
/// engine's observable contract:
///
/// ```text
/// Processes (detentions, trials) → Pending (operations, projects) → Planner (NPCs)
/// ```
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainSet {
    Processes,
    Pending,
    Planner,
}

/// Build a configured `TurnTick` schedule with phase and domain ordering.
pub fn configure_turn_schedule(executor: ExecutorKind) -> Schedule {
    let mut schedule = Schedule::new(TurnTick);
    schedule.set_executor_kind(executor);
    schedule.configure_sets(
        (
            TurnPhase::PreUpdate,
            TurnPhase::Update,
            TurnPhase::PostUpdate,
            TurnPhase::Last,
        )
            .chain(),
    );
    schedule.configure_sets(
        (DomainSet::Processes, DomainSet::Pending, DomainSet::Planner)
            .chain()
            .in_set(TurnPhase::Update),
    );
    schedule.add_systems(advance_turn.in_set(TurnPhase::Last));
    schedule
}
