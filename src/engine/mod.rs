//! Action resolution: validation, success chances, cooldowns, execution.

pub mod chance;
pub mod cooldown;
pub mod executor;
pub mod validator;

pub use chance::{ActorView, CHANCE_CEILING, CHANCE_FLOOR, TargetView, simplified_chance, success_chance};
pub use cooldown::Cooldowns;
pub use executor::{ChanceModel, request_action};
pub use validator::{Clearance, ProcessLoad, TRACK_TRANSCEND_RANK, validate};
