//! Steering System
//!
//! Turns a neighborhood classification into a wanted direction, blends it
//! into the current heading, and injects heading noise.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::agent::{Agent, AgentId, Heading};
use crate::config::{SimParams, EPSILON};
use crate::SimRng;

use super::perception::{classify_neighbors, AgentView, Neighborhood, TickSnapshot};

/// Circular mean of headings in degrees: `atan2(mean sin, mean cos)`,
/// normalized to `[0, 360)`. Callers guard the empty case.
pub fn circular_mean_deg<I>(headings: I) -> f32
where
    I: IntoIterator<Item = f32>,
{
    let mut sum_cos = 0.0f32;
    let mut sum_sin = 0.0f32;
    for degrees in headings {
        let rad = degrees.to_radians();
        sum_cos += rad.cos();
        sum_sin += rad.sin();
    }
    sum_sin.atan2(sum_cos).to_degrees().rem_euclid(360.0)
}

/// The direction an agent wants to move, as a (possibly non-unit) vector.
pub fn desired_direction(me: &AgentView, neighborhood: &Neighborhood) -> (f32, f32) {
    match neighborhood {
        Neighborhood::Avoiding(colliders) => {
            let n = colliders.len() as f32;
            let cx = colliders.iter().map(|c| c.x).sum::<f32>() / n;
            let cy = colliders.iter().map(|c| c.y).sum::<f32>() / n;
            // Not unit-normalized: the offset from the collider centroid
            // itself sets the strength of the escape response.
            (me.x - cx, me.y - cy)
        }
        Neighborhood::Social {
            aligners,
            attractors,
        } => {
            let theta_orient = if aligners.is_empty() {
                me.theta
            } else {
                circular_mean_deg(aligners.iter().map(|a| a.theta))
            };
            let theta_attract = if attractors.is_empty() {
                me.theta
            } else {
                let n = attractors.len() as f32;
                let cx = attractors.iter().map(|a| a.x).sum::<f32>() / n;
                let cy = attractors.iter().map(|a| a.y).sum::<f32>() / n;
                (cy - me.y).atan2(cx - me.x).to_degrees()
            };
            let orient = theta_orient.to_radians();
            let attract = theta_attract.to_radians();
            (
                0.5 * (orient.cos() + attract.cos()),
                0.5 * (orient.sin() + attract.sin()),
            )
        }
    }
}

/// Blends the wanted direction into the current heading with the fixed
/// smoothing fraction, producing smooth turns rather than instantaneous
/// reorientation.
pub fn blend_heading(current: Heading, wanted: (f32, f32)) -> Heading {
    let rad = current.radians();
    let x = rad.cos() + EPSILON * wanted.0;
    let y = rad.sin() + EPSILON * wanted.1;
    Heading::from_radians(y.atan2(x))
}

/// System to steer every agent from the tick snapshot.
/// All new headings derive from the pre-tick snapshot, never from values
/// already written this tick.
pub fn steer_flock(
    snapshot: Res<TickSnapshot>,
    params: Res<SimParams>,
    mut query: Query<(&AgentId, &mut Heading), With<Agent>>,
) {
    for (id, mut heading) in query.iter_mut() {
        let me = match snapshot.agents.iter().find(|view| view.id == id.0) {
            Some(view) => *view,
            None => continue,
        };
        let neighborhood = classify_neighbors(&me, &snapshot.agents, &params);
        let wanted = desired_direction(&me, &neighborhood);
        *heading = blend_heading(*heading, wanted);
    }
}

/// System to jitter every heading by a uniform draw in
/// `±noise_heading / 2`.
/// One draw per agent regardless of magnitude, so RNG consumption does
/// not depend on the noise setting.
pub fn apply_heading_noise(
    params: Res<SimParams>,
    mut rng: ResMut<SimRng>,
    mut query: Query<&mut Heading, With<Agent>>,
) {
    for mut heading in query.iter_mut() {
        let jitter = (rng.0.gen::<f32>() - 0.5) * params.noise_heading;
        *heading = Heading::new(heading.degrees() + jitter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(id: u32, x: f32, y: f32, theta: f32) -> AgentView {
        AgentView { id, x, y, theta }
    }

    #[test]
    fn test_circular_mean_wraps() {
        let mean = circular_mean_deg([350.0, 10.0].into_iter());
        assert!(mean < 1e-4 || mean > 360.0 - 1e-4, "mean was {}", mean);

        let mean = circular_mean_deg([90.0, 180.0].into_iter());
        assert!((mean - 135.0).abs() < 1e-3);
    }

    #[test]
    fn test_escape_points_away_from_collider_centroid() {
        let me = view(0, 10.0, 10.0, 0.0);
        let neighborhood = Neighborhood::Avoiding(vec![
            view(1, 10.5, 10.0, 0.0),
            view(2, 10.5, 11.0, 0.0),
        ]);

        let (wx, wy) = desired_direction(&me, &neighborhood);
        assert!((wx - (-0.5)).abs() < 1e-6);
        assert!((wy - (-0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_escape_degenerates_on_coincident_colliders() {
        let me = view(0, 10.0, 10.0, 0.0);
        let neighborhood = Neighborhood::Avoiding(vec![view(1, 10.0, 10.0, 90.0)]);

        let (wx, wy) = desired_direction(&me, &neighborhood);
        assert_eq!((wx, wy), (0.0, 0.0));
        // A zero wanted vector leaves the blended heading unchanged.
        let blended = blend_heading(Heading::new(40.0), (wx, wy));
        assert!((blended.degrees() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_social_fallback_keeps_current_heading() {
        let me = view(0, 10.0, 10.0, 77.0);
        let neighborhood = Neighborhood::Social {
            aligners: vec![],
            attractors: vec![],
        };

        let (wx, wy) = desired_direction(&me, &neighborhood);
        let rad = 77.0f32.to_radians();
        assert!((wx - rad.cos()).abs() < 1e-6);
        assert!((wy - rad.sin()).abs() < 1e-6);

        let blended = blend_heading(Heading::new(77.0), (wx, wy));
        assert!((blended.degrees() - 77.0).abs() < 1e-3);
    }

    #[test]
    fn test_attraction_bears_toward_centroid() {
        let me = view(0, 0.0, 0.0, 90.0);
        // Attractor centroid sits due east; orientation falls back to the
        // current 90-degree heading, so the wanted vector splits the
        // difference between east and north.
        let neighborhood = Neighborhood::Social {
            aligners: vec![],
            attractors: vec![view(1, 10.0, 1.0, 0.0), view(2, 10.0, -1.0, 0.0)],
        };

        let (wx, wy) = desired_direction(&me, &neighborhood);
        assert!((wx - 0.5).abs() < 1e-6);
        assert!((wy - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_alignment_steers_toward_mean_heading() {
        let me = view(0, 0.0, 0.0, 0.0);
        let neighborhood = Neighborhood::Social {
            aligners: vec![view(1, 1.0, 0.0, 80.0), view(2, 2.0, 0.0, 100.0)],
            attractors: vec![],
        };

        let blended = blend_heading(Heading::new(0.0), desired_direction(&me, &neighborhood));
        // Pulled from 0 toward the 90/0 average, by the epsilon fraction.
        assert!(blended.degrees() > 0.0 && blended.degrees() < 45.0);
    }

    #[test]
    fn test_blend_is_gradual() {
        // A unit wanted vector at right angles turns the heading by
        // atan(epsilon), not all the way.
        let blended = blend_heading(Heading::new(0.0), (0.0, 1.0));
        let expected = EPSILON.atan().to_degrees();
        assert!((blended.degrees() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_noise_consumes_rng_deterministically() {
        use crate::components::agent::{Position, SpeedVar};
        use rand::rngs::SmallRng;
        use rand::SeedableRng;

        let build = || {
            let mut world = World::new();
            world.insert_resource(SimParams {
                noise_heading: 90.0,
                ..SimParams::default()
            });
            world.insert_resource(SimRng(SmallRng::seed_from_u64(9)));
            for id in 0..4u32 {
                world.spawn((
                    Agent,
                    AgentId(id),
                    Position::new(id as f32, 0.0),
                    Heading::new(0.0),
                    SpeedVar::new(1.0),
                ));
            }
            let mut schedule = Schedule::default();
            schedule.add_systems(apply_heading_noise);
            schedule.run(&mut world);

            let mut headings: Vec<f32> = Vec::new();
            let mut query = world.query::<&Heading>();
            for heading in query.iter(&world) {
                headings.push(heading.degrees());
            }
            headings
        };

        assert_eq!(build(), build());
    }
}
