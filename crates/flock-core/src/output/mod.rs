//! Snapshot Generation
//!
//! Collects the flock into [`flock_events`] snapshot structs and writes
//! them as JSON for external renderers, at regular tick intervals.

use bevy_ecs::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flock_events::{generate_snapshot_id, AgentSnapshot, WorldSnapshot, WorldStateSnapshot};

use crate::components::agent::{Agent, AgentId, Heading, Position, SpeedVar};
use crate::components::world::WorldState;
use crate::config::SimParams;

/// Snapshot cadence used when the embedder does not choose one.
pub const DEFAULT_SNAPSHOT_INTERVAL: u64 = 50;

/// Resource to track snapshot generation
#[derive(Resource, Debug)]
pub struct SnapshotGenerator {
    next_snapshot_id: u64,
    snapshot_interval: u64,
}

impl SnapshotGenerator {
    pub fn new(snapshot_interval: u64) -> Self {
        Self {
            next_snapshot_id: 1,
            snapshot_interval,
        }
    }

    /// An interval of zero disables interval snapshots entirely.
    pub fn should_snapshot(&self, current_tick: u64) -> bool {
        self.snapshot_interval > 0 && current_tick % self.snapshot_interval == 0
    }

    pub fn next_id(&mut self) -> String {
        let id = generate_snapshot_id(self.next_snapshot_id);
        self.next_snapshot_id += 1;
        id
    }

    pub fn snapshot_count(&self) -> u64 {
        self.next_snapshot_id - 1
    }
}

/// Collects every agent, sorted by id: the per-tick renderer feed.
pub fn collect_agent_snapshots(world: &mut World) -> Vec<AgentSnapshot> {
    let mut query =
        world.query_filtered::<(&AgentId, &Position, &Heading, &SpeedVar), With<Agent>>();
    let mut agents: Vec<AgentSnapshot> = query
        .iter(world)
        .map(|(id, position, heading, speed_var)| AgentSnapshot {
            id: id.0,
            x: position.x,
            y: position.y,
            theta: heading.degrees(),
            speed_var: speed_var.value(),
        })
        .collect();
    agents.sort_by_key(|agent| agent.id);
    agents
}

/// Generate a complete world snapshot
pub fn generate_snapshot(world: &mut World, triggered_by: &str) -> WorldSnapshot {
    let tick = world.resource::<WorldState>().current_tick;
    let side = world.resource::<SimParams>().world_side;
    let snapshot_id = world.resource_mut::<SnapshotGenerator>().next_id();

    let agents = collect_agent_snapshots(world);
    let mut snapshot = WorldSnapshot::new(&snapshot_id, tick, triggered_by);
    snapshot.world = WorldStateSnapshot {
        side,
        agent_count: agents.len(),
    };
    snapshot.agents = agents;

    tracing::debug!("generated {} at tick {}", snapshot.snapshot_id, tick);
    snapshot
}

/// Writes a snapshot into `<output_dir>/snapshots/<id>.json`.
pub fn write_snapshot_to_dir(snapshot: &WorldSnapshot, output_dir: &Path) -> io::Result<PathBuf> {
    let dir = output_dir.join("snapshots");
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{}.json", snapshot.snapshot_id));
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Writes the latest state into `<output_dir>/current_state.json`,
/// overwriting the previous one.
pub fn write_current_state(snapshot: &WorldSnapshot, output_dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("current_state.json");
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&path, json)?;
    Ok(path)
}
