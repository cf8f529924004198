//! ECS components and world-level resources for the flock.

pub mod agent;
pub mod world;

pub use agent::{Agent, AgentId, Heading, Position, SpeedVar};
pub use world::WorldState;
