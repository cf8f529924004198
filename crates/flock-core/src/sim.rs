//! Simulation Clock
//!
//! Owns the ECS world and the per-tick schedule, and exposes the small
//! control surface (tick, start/stop, reset, parameter swap) that an
//! external scheduler or UI drives.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use flock_events::{AgentSnapshot, WorldSnapshot};

use crate::components::world::WorldState;
use crate::config::SimParams;
use crate::output::{self, SnapshotGenerator, DEFAULT_SNAPSHOT_INTERVAL};
use crate::setup::{self, AgentSeed};
use crate::systems::{
    apply_heading_noise, build_tick_snapshot, integrate_motion, steer_flock, TickSnapshot,
};
use crate::SimRng;

/// The simulation: agent collection, parameters, and the tick pipeline.
///
/// One `tick()` fully completes before anything else may touch the
/// world; parameter swaps and resets take `&mut self` and therefore can
/// only happen between ticks.
pub struct Simulation {
    world: World,
    schedule: Schedule,
    running: bool,
}

impl Simulation {
    /// Builds a world with a seeded RNG and a randomly placed flock.
    pub fn new(params: SimParams, seed: u64) -> Self {
        let mut sim = Self::empty(params, seed);
        sim.world.resource_scope(|world, mut rng: Mut<SimRng>| {
            setup::spawn_flock(world, &mut rng.0, params.n_agents, params.world_side);
        });
        sim
    }

    /// Builds a world with explicitly placed agents; the scenario and
    /// test entry point.
    pub fn with_agents<I>(params: SimParams, seed: u64, agents: I) -> Self
    where
        I: IntoIterator<Item = AgentSeed>,
    {
        let mut sim = Self::empty(params, seed);
        for agent in agents {
            setup::spawn_agent(&mut sim.world, agent);
        }
        sim
    }

    fn empty(params: SimParams, seed: u64) -> Self {
        let mut world = World::new();
        world.insert_resource(params);
        world.insert_resource(WorldState::new());
        world.insert_resource(TickSnapshot::default());
        world.insert_resource(SnapshotGenerator::new(DEFAULT_SNAPSHOT_INTERVAL));
        world.insert_resource(SimRng(SmallRng::seed_from_u64(seed)));

        // One tick = snapshot, steer, noise, integrate, in that strict
        // order: classification reads only pre-tick state, and positions
        // move only after every heading is settled.
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                build_tick_snapshot,
                steer_flock,
                apply_heading_noise,
                integrate_motion,
            )
                .chain(),
        );

        Self {
            world,
            schedule,
            running: false,
        }
    }

    /// Runs one full tick: classify, blend, noise, integrate, over the
    /// whole flock. A tick over an empty flock is a no-op.
    pub fn tick(&mut self) {
        self.world.resource_mut::<WorldState>().advance_tick();
        self.schedule.run(&mut self.world);
    }

    /// Runs a tick only while started. Returns whether a tick ran.
    pub fn try_tick(&mut self) -> bool {
        if self.running {
            self.tick();
        }
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stopping means no further ticks get scheduled; a tick in progress
    /// is never interrupted.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Discards the current generation and spawns `n_agents` fresh agents
    /// in `[0, world_side)²`. The tick counter keeps running.
    pub fn reset(&mut self, n_agents: u32, world_side: f32) {
        {
            let mut params = self.world.resource_mut::<SimParams>();
            params.n_agents = n_agents;
            params.world_side = world_side;
        }
        self.world.resource_scope(|world, mut rng: Mut<SimRng>| {
            setup::reset_flock(world, &mut rng.0, n_agents, world_side);
        });
    }

    /// Replaces the parameter set wholesale. Validation is the caller's
    /// job; see [`SimParams::validate`].
    pub fn set_params(&mut self, params: SimParams) {
        self.world.insert_resource(params);
        tracing::info!("parameters replaced: {:?}", params);
    }

    pub fn params(&self) -> SimParams {
        *self.world.resource::<SimParams>()
    }

    pub fn current_tick(&self) -> u64 {
        self.world.resource::<WorldState>().current_tick
    }

    pub fn agent_count(&mut self) -> usize {
        output::collect_agent_snapshots(&mut self.world).len()
    }

    /// The per-tick renderer feed: every agent, sorted by id.
    pub fn agents(&mut self) -> Vec<AgentSnapshot> {
        output::collect_agent_snapshots(&mut self.world)
    }

    /// True when the interval snapshot for the current tick is due.
    pub fn should_snapshot(&self) -> bool {
        let tick = self.world.resource::<WorldState>().current_tick;
        self.world
            .resource::<SnapshotGenerator>()
            .should_snapshot(tick)
    }

    pub fn set_snapshot_interval(&mut self, interval: u64) {
        self.world.insert_resource(SnapshotGenerator::new(interval));
    }

    /// Captures a complete world snapshot for serialization.
    pub fn snapshot(&mut self, triggered_by: &str) -> WorldSnapshot {
        output::generate_snapshot(&mut self.world, triggered_by)
    }
}
