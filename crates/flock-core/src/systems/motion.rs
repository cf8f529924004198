//! Motion System
//!
//! Advances positions by speed along the heading, reflecting the step at
//! the world edges, then re-derives the stored heading from the realized
//! displacement.

use bevy_ecs::prelude::*;

use crate::components::agent::{Agent, Heading, Position, SpeedVar};
use crate::config::{SimParams, DT};

/// Reflects a candidate step against the `[0, side]` span.
///
/// Only the sign of an offending component flips; the resulting position
/// is never clamped, so a step may land up to its own magnitude outside
/// the span.
pub fn reflect_step(position: Position, mut dx: f32, mut dy: f32, side: f32) -> (f32, f32) {
    let x_new = position.x + dx;
    if x_new < 0.0 || x_new > side {
        dx = -dx;
    }
    let y_new = position.y + dy;
    if y_new < 0.0 || y_new > side {
        dy = -dy;
    }
    (dx, dy)
}

/// System to integrate every agent's motion for one tick.
pub fn integrate_motion(
    params: Res<SimParams>,
    mut query: Query<(&mut Position, &mut Heading, &SpeedVar), With<Agent>>,
) {
    for (mut position, mut heading, speed_var) in query.iter_mut() {
        let phi = heading.radians();
        let step = DT * params.speed * speed_var.value();
        let (dx, dy) = reflect_step(
            *position,
            step * phi.cos(),
            step * phi.sin(),
            params.world_side,
        );
        position.x += dx;
        position.y += dy;
        // The realized displacement is the agent's true motion vector; a
        // reflection turns the recorded heading with it. A zero step
        // carries no direction and leaves the heading alone.
        if dx != 0.0 || dy != 0.0 {
            *heading = Heading::from_radians(dy.atan2(dx));
        }
    }
}
