//! Outcome types for action requests and the engine's audit log.
//!
//! Validation failures are ordinary reportable values, not errors: the
//! caller simply does not get to execute the action.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::Domain;

/// Who initiated an action or process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initiator {
    Player,
    Npc(u64),
}

/// Why an action request was turned down. Carries enough structure for the
/// UI to phrase the refusal; `Display` gives the canonical wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    UnknownAction { action_id: String },
    UnknownOfficial { official: u64 },
    RankTooLow { required: u8, actual: u8 },
    WrongTrack { required: Domain },
    OnCooldown { turns_remaining: u64 },
    TargetRequired,
    TargetUnavailable { target: u64 },
    TargetTooSenior { ceiling: u8, target_rank: u8 },
    InsufficientResources { required: i32, available: i32 },
    SlotLimitReached { cap: usize },
    AlreadyInProgress,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnknownAction { action_id } => {
                write!(f, "no such action: {action_id}")
            }
            Rejection::UnknownOfficial { official } => {
                write!(f, "no such official: {official}")
            }
            Rejection::RankTooLow { required, actual } => {
                write!(f, "rank too low: requires rank {required}, actor holds rank {actual}")
            }
            Rejection::WrongTrack { required } => {
                write!(f, "wrong track: requires the {required:?} track")
            }
            Rejection::OnCooldown { turns_remaining } => {
                write!(f, "on cooldown: available again in {turns_remaining} turn(s)")
            }
            Rejection::TargetRequired => write!(f, "this action requires a target"),
            Rejection::TargetUnavailable { target } => {
                write!(f, "target {target} is no longer available")
            }
            Rejection::TargetTooSenior { ceiling, target_rank } => {
                write!(f, "target too senior: rank {target_rank} exceeds ceiling {ceiling}")
            }
            Rejection::InsufficientResources { required, available } => {
                write!(f, "insufficient resources: requires {required}, holding {available}")
            }
            Rejection::SlotLimitReached { cap } => {
                write!(f, "slot limit reached: at most {cap} concurrent projects")
            }
            Rejection::AlreadyInProgress => {
                write!(f, "an identical action is already in progress")
            }
        }
    }
}

/// Stable key consumed by the narrative subsystem. The engine never
/// produces prose; it only emits `(action, succeeded)` keyed outcomes.
pub fn narrative_key(action_id: &str, succeeded: bool) -> String {
    let suffix = if succeeded { "success" } else { "failure" };
    format!("{action_id}.{suffix}")
}

/// An immediately resolved action outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub succeeded: bool,
    pub chance: i32,
    pub roll: i32,
    pub narrative_key: String,
    pub required_approval: bool,
}

/// Result of a single `request_action` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequestOutcome {
    Rejected { reason: Rejection },
    Resolved(Resolution),
    Scheduled {
        pending_id: u64,
        completes_turn: u64,
        required_approval: bool,
    },
}

impl RequestOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, RequestOutcome::Rejected { .. })
    }
}

/// One entry in the engine's audit log, keyed for the narrative collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub id: u64,
    pub turn: u64,
    pub initiator: Option<Initiator>,
    /// The official the entry is about (target or defendant), if any.
    pub subject: Option<u64>,
    pub key: String,
}
