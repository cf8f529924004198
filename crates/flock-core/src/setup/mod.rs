//! Flock Spawning
//!
//! Functions to spawn a fresh generation of agents with randomized
//! position, heading, and speed draw, and to replace a generation
//! wholesale on reset.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::agent::{Agent, AgentId, Heading, Position, SpeedVar};
use crate::config::{BASE_SPEED, SPEED_JITTER};

/// Explicit field values for one agent; the test and scenario hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSeed {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Heading in degrees; normalized on spawn.
    pub theta: f32,
    /// Clamped to the documented speed band on spawn.
    pub speed_var: f32,
}

/// Spawns a single agent from explicit values.
pub fn spawn_agent(world: &mut World, seed: AgentSeed) {
    world.spawn((
        Agent,
        AgentId(seed.id),
        Position::new(seed.x, seed.y),
        Heading::new(seed.theta),
        SpeedVar::new(seed.speed_var),
    ));
}

/// Spawns `n_agents` agents with ids `0..n_agents`, uniform position in
/// `[0, world_side)²`, uniform heading in `[0, 360)`, and the one-time
/// speed draw.
pub fn spawn_flock(world: &mut World, rng: &mut SmallRng, n_agents: u32, world_side: f32) {
    for id in 0..n_agents {
        let seed = AgentSeed {
            id,
            x: rng.gen::<f32>() * world_side,
            y: rng.gen::<f32>() * world_side,
            theta: rng.gen::<f32>() * 360.0,
            speed_var: BASE_SPEED + rng.gen::<f32>() * SPEED_JITTER,
        };
        spawn_agent(world, seed);
    }
    tracing::info!("spawned {} agents in [0, {})²", n_agents, world_side);
}

/// Despawns every agent entity. Returns how many were removed.
pub fn despawn_flock(world: &mut World) -> usize {
    let mut query = world.query_filtered::<Entity, With<Agent>>();
    let entities: Vec<Entity> = query.iter(world).collect();
    let count = entities.len();
    for entity in entities {
        world.despawn(entity);
    }
    count
}

/// Discards the current generation and spawns a fresh one. Never resizes
/// in place.
pub fn reset_flock(world: &mut World, rng: &mut SmallRng, n_agents: u32, world_side: f32) {
    let removed = despawn_flock(world);
    spawn_flock(world, rng, n_agents, world_side);
    tracing::info!("reset flock: {} agents out, {} in", removed, n_agents);
}
