//! Sample data fixtures for testing.
//!
//! This module provides ready-made test data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // flock-events = { path = "../flock-events", features = ["test-fixtures"] }
//!
//! use flock_events::fixtures;
//!
//! let snapshot = fixtures::sample_snapshot();
//! ```

use crate::WorldSnapshot;

/// Returns a sample world snapshot from the fixtures file.
///
/// Contains 4 agents in a 128-unit world at tick 120, one of them
/// marginally past the right edge (the documented reflection overshoot).
pub fn sample_snapshot() -> WorldSnapshot {
    let json = include_str!("../tests/fixtures/sample_snapshot.json");
    serde_json::from_str(json).expect("Failed to parse sample_snapshot.json")
}
