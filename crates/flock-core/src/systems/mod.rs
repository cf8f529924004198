//! ECS Systems
//!
//! The per-tick pipeline: snapshot the flock, classify neighbors and
//! steer, add heading noise, integrate motion. The four systems run in
//! that strict order; see [`crate::sim::Simulation`].

pub mod motion;
pub mod perception;
pub mod steering;

// Re-export commonly used systems and helpers
pub use motion::{integrate_motion, reflect_step};
pub use perception::{
    build_tick_snapshot, classify_neighbors, AgentView, Neighborhood, TickSnapshot,
};
pub use steering::{
    apply_heading_noise, blend_heading, circular_mean_deg, desired_direction, steer_flock,
};
