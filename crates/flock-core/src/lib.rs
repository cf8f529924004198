//! Core flocking simulation: agent state, neighbor classification,
//! heading steering, and boundary-aware motion integration.
//!
//! The simulation is headless. Renderers and parameter UIs are external
//! collaborators: they read agent snapshots ([`Simulation::agents`] or the
//! serialized [`flock_events::WorldSnapshot`] stream) and hand validated
//! [`SimParams`] back in between ticks.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod output;
pub mod setup;
pub mod sim;
pub mod systems;

pub use components::{Agent, AgentId, Heading, Position, SpeedVar, WorldState};
pub use config::SimParams;
pub use sim::Simulation;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
