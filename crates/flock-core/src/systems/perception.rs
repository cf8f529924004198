//! Perception System
//!
//! Builds the start-of-tick flock snapshot and classifies, for each
//! reference agent, every other agent into colliders, aligners, or
//! attractors.

use bevy_ecs::prelude::*;

use crate::components::agent::{Agent, AgentId, Heading, Position};
use crate::config::SimParams;

/// Read-only view of one agent as it stood at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Heading in degrees, `[0, 360)`.
    pub theta: f32,
}

impl AgentView {
    pub fn distance_to(&self, other: &AgentView) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Unit heading vector; magnitude 1 by construction.
    pub fn heading_unit(&self) -> (f32, f32) {
        let rad = self.theta.to_radians();
        (rad.cos(), rad.sin())
    }
}

/// Resource: stable snapshot of the whole flock at the start of a tick.
///
/// Every classification and steering decision in a tick reads this, so
/// later agents never observe positions or headings already updated
/// earlier in the same tick.
#[derive(Resource, Debug, Default)]
pub struct TickSnapshot {
    pub agents: Vec<AgentView>,
}

/// System to rebuild the tick snapshot.
/// This runs first, before any heading or position is touched.
pub fn build_tick_snapshot(
    mut snapshot: ResMut<TickSnapshot>,
    query: Query<(&AgentId, &Position, &Heading), With<Agent>>,
) {
    snapshot.agents.clear();
    for (id, position, heading) in query.iter() {
        snapshot.agents.push(AgentView {
            id: id.0,
            x: position.x,
            y: position.y,
            theta: heading.degrees(),
        });
    }
}

/// How the rest of the flock looks from one reference agent.
///
/// A non-empty collider set preempts all social behavior: aligners and
/// attractors are not even computed in that case.
#[derive(Debug, Clone, PartialEq)]
pub enum Neighborhood {
    /// Agents inside the collision radius; direction is irrelevant.
    Avoiding(Vec<AgentView>),
    /// Perceived agents, split at the alignment radius.
    Social {
        aligners: Vec<AgentView>,
        attractors: Vec<AgentView>,
    },
}

/// Classifies every other agent relative to `me`.
///
/// Colliders are all agents strictly closer than `r_coll`, self excluded
/// by id (distance zero is valid). If none, the interaction set is every
/// agent closer than `r_attract` that lies outside the rear blind cone:
/// the cosine of the angle between the heading and the relative position
/// must strictly exceed `cos(π·(180 − blindspot/2)/180)`. The set splits
/// at `r_align`; an agent exactly at `r_align` is an attractor.
pub fn classify_neighbors(
    me: &AgentView,
    flock: &[AgentView],
    params: &SimParams,
) -> Neighborhood {
    let colliders: Vec<AgentView> = flock
        .iter()
        .filter(|other| other.id != me.id && me.distance_to(other) < params.r_coll)
        .copied()
        .collect();
    if !colliders.is_empty() {
        return Neighborhood::Avoiding(colliders);
    }

    let blind = (180.0 - params.blindspot / 2.0).to_radians().cos();
    let (vx, vy) = me.heading_unit();

    let mut aligners = Vec::new();
    let mut attractors = Vec::new();
    for other in flock {
        if other.id == me.id {
            continue;
        }
        let dx = other.x - me.x;
        let dy = other.y - me.y;
        let r = (dx * dx + dy * dy).sqrt();
        // A coincident agent has no bearing and cannot be seen.
        if r == 0.0 || r >= params.r_attract {
            continue;
        }
        let sight = (dx * vx + dy * vy) / r;
        if sight <= blind {
            continue;
        }
        if r < params.r_align {
            aligners.push(*other);
        } else {
            attractors.push(*other);
        }
    }

    Neighborhood::Social {
        aligners,
        attractors,
    }
}
