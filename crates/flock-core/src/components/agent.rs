//! Agent Components
//!
//! Per-agent state: identity, position, heading, and the one-time speed
//! draw.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{SPEED_CEILING, SPEED_FLOOR};

/// Marker component identifying an entity as a flock member
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Agent;

/// Unique identifier for an agent.
///
/// Assigned `0..N-1` at spawn and never reused within a generation; a
/// reset produces a fresh generation with fresh ids.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// An agent's position in world coordinates.
///
/// Nominally inside `[0, side)²`, but a boundary reflection may leave a
/// coordinate past the span by up to one step's magnitude.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Heading in degrees, kept normalized to `[0, 360)`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Heading(f32);

impl Heading {
    pub fn new(degrees: f32) -> Self {
        Self(degrees.rem_euclid(360.0))
    }

    pub fn from_radians(radians: f32) -> Self {
        Self::new(radians.to_degrees())
    }

    pub fn degrees(self) -> f32 {
        self.0
    }

    pub fn radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Unit vector pointing along the heading. Magnitude is 1 by
    /// construction; nothing may rescale it.
    pub fn unit(self) -> (f32, f32) {
        let rad = self.radians();
        (rad.cos(), rad.sin())
    }
}

impl<'de> Deserialize<'de> for Heading {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        f32::deserialize(deserializer).map(Heading::new)
    }
}

/// Per-agent speed multiplier, drawn once at spawn and immutable after.
///
/// Always within `[SPEED_FLOOR, SPEED_CEILING]`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedVar(f32);

impl SpeedVar {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(SPEED_FLOOR, SPEED_CEILING))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl<'de> Deserialize<'de> for SpeedVar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        f32::deserialize(deserializer).map(SpeedVar::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_normalization() {
        assert_eq!(Heading::new(0.0).degrees(), 0.0);
        assert_eq!(Heading::new(360.0).degrees(), 0.0);
        assert_eq!(Heading::new(365.0).degrees(), 5.0);
        assert_eq!(Heading::new(-10.0).degrees(), 350.0);
        assert_eq!(Heading::new(725.0).degrees(), 5.0);
    }

    #[test]
    fn test_heading_unit_vector() {
        let (x, y) = Heading::new(0.0).unit();
        assert!((x - 1.0).abs() < 1e-6);
        assert!(y.abs() < 1e-6);

        let (x, y) = Heading::new(90.0).unit();
        assert!(x.abs() < 1e-6);
        assert!((y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading_deserialize_normalizes() {
        let heading: Heading = serde_json::from_str("-90.0").unwrap();
        assert_eq!(heading.degrees(), 270.0);
    }

    #[test]
    fn test_speed_var_clamping() {
        assert_eq!(SpeedVar::new(1.1).value(), 1.1);
        assert_eq!(SpeedVar::new(0.0).value(), SPEED_FLOOR);
        assert_eq!(SpeedVar::new(9.0).value(), SPEED_CEILING);
    }

    #[test]
    fn test_position_distance() {
        let a = Position::new(1.0, 2.0);
        let b = Position::new(4.0, 6.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-6);
        assert_eq!(a.distance_to(&a), 0.0);
    }
}
