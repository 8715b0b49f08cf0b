use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

/// Turn clock. Advances by one at the end of each `TurnTick` run, so every
/// system sees the turn being resolved before it moves on.
///
/// Turn numbers are strictly monotonic; callers that re-run a schedule for
/// an already-advanced turn get the next turn, never a repeat.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct TurnClock {
    pub turn: u64,
}

impl TurnClock {
    pub fn new(start_turn: u64) -> Self {
        Self { turn: start_turn }
    }

    pub fn advance(&mut self) {
        self.turn += 1;
    }
}

/// System registered in `TurnPhase::Last`.
pub fn advance_turn(mut clock: ResMut<TurnClock>) {
    clock.advance();
}
