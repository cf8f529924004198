//! World State
//!
//! Run-level state advanced by the simulation clock.

use bevy_ecs::prelude::*;

/// Resource: global tick counter.
///
/// Advanced exactly once per `tick()`, before any system runs. A flock
/// reset does not restart the counter; the clock keeps running across
/// generations.
#[derive(Resource, Debug, Default)]
pub struct WorldState {
    pub current_tick: u64,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }
}
