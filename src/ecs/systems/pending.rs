//! Per-turn sweep over in-flight operations and projects.

use bevy_ecs::message::Messages;
use bevy_ecs::world::World;
use rand::Rng;

use crate::catalog::Catalog;
use crate::ecs::clock::TurnClock;
use crate::ecs::commands::EngineCommand;
use crate::ecs::resources::{EngineIds, OutcomeLog, PendingOps, PendingRng};
use crate::engine::Cooldowns;
use crate::model::outcome::{OutcomeRecord, narrative_key};

/// Roll every due pending action against its frozen chance and apply the
/// matching effect bundle. Each record resolves exactly once; resolved
/// records are kept for the historical record.
pub fn resolve_pending(world: &mut World) {
    let turn = world.resource::<TurnClock>().turn;
    let Some(mut ops) = world.remove_resource::<PendingOps>() else {
        return;
    };
    let Some(mut rng) = world.remove_resource::<PendingRng>() else {
        world.insert_resource(ops);
        return;
    };

    let mut commands = Vec::new();
    let mut log = Vec::new();

    for record in ops.all_mut() {
        if !record.is_due(turn) {
            continue;
        }
        let Some(def) = world.resource::<Catalog>().get(&record.action_id).cloned() else {
            // A save written against an older catalog can carry actions
            // that no longer exist. Conclude the record without effects.
            tracing::warn!(
                action = %record.action_id,
                pending_id = record.id,
                "pending action refers to a vanished catalog entry"
            );
            record.resolved = true;
            log.push((record.initiator, record.target, format!("{}.corrupted", record.action_id)));
            continue;
        };

        let roll = rng.0.random_range(1..=100);
        let succeeded = roll <= record.chance;
        record.resolved = true;
        record.succeeded = Some(succeeded);
        tracing::debug!(
            action = %record.action_id,
            actor = record.actor,
            chance = record.chance,
            roll,
            succeeded,
            "pending action resolved"
        );

        let bundle = if succeeded { def.on_success } else { def.on_failure };
        commands.push(EngineCommand::ApplyEffects {
            bundle,
            initiator: record.initiator,
            target: record.target,
        });
        log.push((
            record.initiator,
            record.target,
            narrative_key(&record.action_id, succeeded),
        ));
    }

    world.insert_resource(ops);
    world.insert_resource(rng);
    world.resource_mut::<Cooldowns>().prune(turn);

    if !commands.is_empty() {
        let mut messages = world.resource_mut::<Messages<EngineCommand>>();
        for command in commands {
            messages.write(command);
        }
    }
    for (initiator, subject, key) in log {
        let id = world.resource_mut::<EngineIds>().0.next_id();
        world.resource_mut::<OutcomeLog>().entries.push(OutcomeRecord {
            id,
            turn,
            initiator: Some(initiator),
            subject,
            key,
        });
    }
}
