//! Shared snapshot types and serialization for the flock simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The core writes these, external renderers read them.

pub mod snapshot;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export snapshot types
pub use snapshot::{generate_snapshot_id, AgentSnapshot, WorldSnapshot, WorldStateSnapshot};
