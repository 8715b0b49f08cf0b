//! Versioned save snapshots.
//!
//! A snapshot captures the engine's own stores: the clock, the nation's
//! counters, cooldown ledgers, pending operations and projects, detentions,
//! and trials. Officials themselves are scenario data and are restored by
//! whoever rebuilds the roster.
//!
//! Decoding is lenient per section: a corrupt or missing section falls back
//! to its default with a logged warning, so one bad record never takes the
//! whole save down with it.

use std::path::Path;

use bevy_ecs::world::World;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ecs::clock::TurnClock;
use crate::ecs::resources::{Detentions, EngineIds, PendingOps, StateOfTheNation, Trials};
use crate::engine::Cooldowns;
use crate::error::EngineError;
use crate::id::IdGenerator;
use crate::model::{PendingAction, TrialRecord};

pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    pub version: u32,
    pub turn: u64,
    #[serde(default)]
    pub nation: StateOfTheNation,
    #[serde(default)]
    pub cooldowns: Cooldowns,
    #[serde(default)]
    pub operations: Vec<PendingAction>,
    #[serde(default)]
    pub projects: Vec<PendingAction>,
    #[serde(default)]
    pub detentions: Detentions,
    #[serde(default)]
    pub trials: Vec<TrialRecord>,
    #[serde(default)]
    pub ids: IdGenerator,
}

/// Capture the engine stores of a running world.
pub fn snapshot(world: &World) -> SaveState {
    let ops = world.resource::<PendingOps>();
    SaveState {
        version: SAVE_VERSION,
        turn: world.resource::<TurnClock>().turn,
        nation: world.resource::<StateOfTheNation>().clone(),
        cooldowns: world.resource::<Cooldowns>().clone(),
        operations: ops.operations.clone(),
        projects: ops.projects.clone(),
        detentions: world.resource::<Detentions>().clone(),
        trials: world.resource::<Trials>().records.clone(),
        ids: world.resource::<EngineIds>().0.clone(),
    }
}

/// Load a snapshot into a world. The ID generator is advanced past every
/// record ID present, so a hand-edited save can never cause a collision.
pub fn restore(world: &mut World, save: SaveState) {
    let mut ids = save.ids;
    for record in save.operations.iter().chain(save.projects.iter()) {
        ids.advance_past(record.id);
    }
    for record in save.detentions.active.iter().chain(save.detentions.archive.iter()) {
        ids.advance_past(record.id);
    }
    for record in &save.trials {
        ids.advance_past(record.id);
    }

    world.insert_resource(TurnClock::new(save.turn));
    world.insert_resource(save.nation);
    world.insert_resource(save.cooldowns);
    world.insert_resource(PendingOps {
        operations: save.operations,
        projects: save.projects,
    });
    world.insert_resource(save.detentions);
    world.insert_resource(Trials { records: save.trials });
    world.insert_resource(EngineIds(ids));
}

pub fn write_save(path: &Path, world: &World) -> Result<(), EngineError> {
    let text = serde_json::to_string_pretty(&snapshot(world))?;
    std::fs::write(path, text)?;
    Ok(())
}

pub fn read_save(path: &Path) -> Result<SaveState, EngineError> {
    let text = std::fs::read_to_string(path)?;
    decode_save(&text)
}

/// Decode a snapshot, section by section. The document must at least be a
/// JSON object; everything below that degrades to defaults with a warning.
pub fn decode_save(text: &str) -> Result<SaveState, EngineError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(map) = value else {
        return Err(serde_json::Error::io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "save snapshot is not a JSON object",
        ))
        .into());
    };

    let version: u32 = section(&map, "version");
    if version > SAVE_VERSION {
        tracing::warn!(version, supported = SAVE_VERSION, "save is from a newer engine");
    }

    Ok(SaveState {
        version,
        turn: section(&map, "turn"),
        nation: section(&map, "nation"),
        cooldowns: section(&map, "cooldowns"),
        operations: section(&map, "operations"),
        projects: section(&map, "projects"),
        detentions: section(&map, "detentions"),
        trials: section(&map, "trials"),
        ids: section(&map, "ids"),
    })
}

fn section<T: DeserializeOwned + Default>(
    map: &serde_json::Map<String, Value>,
    key: &str,
) -> T {
    let Some(value) = map.get(key) else {
        return T::default();
    };
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::warn!(section = key, %err, "save section corrupt, using default");
            T::default()
        }
    }
}
