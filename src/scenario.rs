//! Fluent scenario builder for tests and examples.
//!
//! Wraps a deterministic engine app, with chained official construction and
//! shortcuts for driving turns and submitting actions.

use bevy_app::App;
use bevy_ecs::entity::Entity;

use crate::ecs::app::build_engine_app_deterministic;
use crate::ecs::clock::TurnClock;
use crate::ecs::components::{
    Attitude, FateStatus, Influence, Official, OfficialCore, Player, Psyche,
};
use crate::ecs::resources::{EngineIds, Roster, StateOfTheNation};
use crate::ecs::schedule::TurnTick;
use crate::engine::request_action;
use crate::model::{Domain, RequestOutcome};

/// Typed reference to an official in a [`Scenario`], enabling chained field
/// mutation. Call [`.id()`](OfficialRef::id) to terminate the chain.
pub struct OfficialRef<'a> {
    scenario: &'a mut Scenario,
    entity: Entity,
    id: u64,
}

impl<'a> OfficialRef<'a> {
    pub fn rank(self, v: u8) -> Self {
        self.core(|c| c.rank = v)
    }

    pub fn track(self, v: Domain) -> Self {
        self.core(|c| c.track = v)
    }

    pub fn faction(self, v: u64) -> Self {
        self.core(|c| c.faction = v)
    }

    pub fn loyalty(self, v: i32) -> Self {
        self.psyche(|p| p.loyalty = v)
    }

    pub fn paranoia(self, v: i32) -> Self {
        self.psyche(|p| p.paranoia = v)
    }

    pub fn ambition(self, v: i32) -> Self {
        self.psyche(|p| p.ambition = v)
    }

    pub fn network(self, v: i32) -> Self {
        self.influence(|i| i.network = v)
    }

    pub fn standing(self, v: i32) -> Self {
        self.influence(|i| i.standing = v)
    }

    pub fn funds(self, v: i32) -> Self {
        self.influence(|i| i.funds = v)
    }

    pub fn disposition(self, v: i32) -> Self {
        self.attitude(|a| a.disposition = v)
    }

    pub fn fear(self, v: i32) -> Self {
        self.attitude(|a| a.fear = v)
    }

    pub fn protection(self, v: i32) -> Self {
        self.attitude(|a| a.protection = v)
    }

    fn core(self, f: impl FnOnce(&mut OfficialCore)) -> Self {
        let world = self.scenario.app.world_mut();
        f(&mut world.get_mut::<OfficialCore>(self.entity).unwrap());
        self
    }

    fn psyche(self, f: impl FnOnce(&mut Psyche)) -> Self {
        let world = self.scenario.app.world_mut();
        f(&mut world.get_mut::<Psyche>(self.entity).unwrap());
        self
    }

    fn influence(self, f: impl FnOnce(&mut Influence)) -> Self {
        let world = self.scenario.app.world_mut();
        f(&mut world.get_mut::<Influence>(self.entity).unwrap());
        self
    }

    fn attitude(self, f: impl FnOnce(&mut Attitude)) -> Self {
        let world = self.scenario.app.world_mut();
        f(&mut world.get_mut::<Attitude>(self.entity).unwrap());
        self
    }

    /// Terminate the chain and return the official's stable ID.
    pub fn id(self) -> u64 {
        self.id
    }
}

/// A deterministic engine app with builder-style setup.
pub struct Scenario {
    app: App,
}

impl Scenario {
    pub fn new() -> Self {
        Self::seeded(42)
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            app: build_engine_app_deterministic(seed),
        }
    }

    /// Add an official: rank 1, security track, neutral traits. Chain
    /// setters to adjust.
    pub fn official(&mut self, name: &str) -> OfficialRef<'_> {
        self.spawn(name, false)
    }

    /// Add the player's own official.
    pub fn player(&mut self, name: &str) -> OfficialRef<'_> {
        self.spawn(name, true)
    }

    fn spawn(&mut self, name: &str, is_player: bool) -> OfficialRef<'_> {
        let world = self.app.world_mut();
        let id = world.resource_mut::<EngineIds>().0.next_id();
        let mut entity = world.spawn((
            Official,
            OfficialCore {
                name: name.to_string(),
                rank: 1,
                track: Domain::Security,
                faction: 0,
            },
            Psyche::default(),
            Influence::default(),
            Attitude::default(),
            FateStatus::default(),
        ));
        if is_player {
            entity.insert(Player);
        }
        let entity = entity.id();
        world.resource_mut::<Roster>().register(id, entity);
        OfficialRef {
            scenario: self,
            entity,
            id,
        }
    }

    /// Adjust the nation's counters and flags.
    pub fn nation(&mut self, f: impl FnOnce(&mut StateOfTheNation)) -> &mut Self {
        f(&mut self.app.world_mut().resource_mut::<StateOfTheNation>());
        self
    }

    /// Run `n` full turns.
    pub fn run_turns(&mut self, n: u64) -> &mut Self {
        for _ in 0..n {
            self.app.world_mut().run_schedule(TurnTick);
        }
        self
    }

    /// Submit a player action between turns.
    pub fn request(&mut self, actor: u64, action_id: &str, target: Option<u64>) -> RequestOutcome {
        request_action(self.app.world_mut(), actor, action_id, target)
    }

    pub fn turn(&self) -> u64 {
        self.app.world().resource::<TurnClock>().turn
    }

    pub fn world(&self) -> &bevy_ecs::world::World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut bevy_ecs::world::World {
        self.app.world_mut()
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}
