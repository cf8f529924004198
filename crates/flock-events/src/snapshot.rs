//! Snapshot Types
//!
//! Serialization structs for flock state output.
//!
//! Snapshots capture the complete state of the flock at a point in time,
//! used by renderers, analysis tooling, and tests.

use serde::{Deserialize, Serialize};

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// One agent as a renderer sees it.
///
/// `theta` is the heading in degrees, normalized to `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub theta: f32,
    #[serde(default)]
    pub speed_var: f32,
}

/// World-level scalars at snapshot time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldStateSnapshot {
    /// Side length of the square world span.
    pub side: f32,
    pub agent_count: usize,
}

/// Complete state of the flock at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub snapshot_id: String,
    pub tick: u64,
    pub triggered_by: String,
    #[serde(default)]
    pub world: WorldStateSnapshot,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<AgentSnapshot>,
}

impl WorldSnapshot {
    pub fn new(snapshot_id: &str, tick: u64, triggered_by: &str) -> Self {
        Self {
            snapshot_id: snapshot_id.to_string(),
            tick,
            triggered_by: triggered_by.to_string(),
            world: WorldStateSnapshot::default(),
            agents: Vec::new(),
        }
    }
}
