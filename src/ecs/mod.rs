//! ECS integration: the turn schedule, resources, components, and the
//! command pipeline.

pub mod app;
pub mod clock;
pub mod commands;
pub mod components;
pub mod resources;
pub mod schedule;
pub mod systems;

pub use app::{build_engine_app, build_engine_app_deterministic, build_engine_app_with_executor};
pub use clock::TurnClock;
pub use commands::EngineCommand;
pub use schedule::{DomainSet, TurnPhase, TurnTick};
