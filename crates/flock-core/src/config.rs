//! Configuration System
//!
//! Tunable simulation parameters, loaded from a TOML file with optional
//! per-field CLI overrides. Range validation happens here, in the external
//! parameter layer; the tick itself never re-validates.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default parameter file path
pub const DEFAULT_PARAMS_PATH: &str = "params.toml";

/// Timestep per tick.
pub const DT: f32 = 1.0;

/// Fraction of the wanted direction blended into the current heading per
/// tick. Fixed, not user-tunable.
pub const EPSILON: f32 = 0.2;

/// Base speed multiplier every agent starts from.
pub const BASE_SPEED: f32 = 1.0;

/// Spread of the one-time per-agent speed draw above `BASE_SPEED`.
pub const SPEED_JITTER: f32 = 0.25;

/// Lower clamp for the per-agent speed multiplier.
pub const SPEED_FLOOR: f32 = 0.5;

/// Upper clamp for the per-agent speed multiplier.
pub const SPEED_CEILING: f32 = 1.5;

/// Accepted range for each tunable parameter, `[lower, upper]` inclusive.
pub const N_AGENTS_RANGE: (f32, f32) = (16.0, 512.0);
pub const WORLD_SIDE_RANGE: (f32, f32) = (128.0, 512.0);
pub const SPEED_RANGE: (f32, f32) = (0.0, 1.0);
pub const NOISE_HEADING_RANGE: (f32, f32) = (0.0, 180.0);
pub const R_COLL_RANGE: (f32, f32) = (0.0, 4.0);
pub const R_ALIGN_RANGE: (f32, f32) = (0.0, 20.0);
pub const R_ATTRACT_RANGE: (f32, f32) = (0.0, 20.0);
pub const BLINDSPOT_RANGE: (f32, f32) = (1.0, 360.0);

/// Tunable simulation parameters, read by every system each tick.
///
/// The resource is replaced wholesale between ticks when a parameter
/// changes; nothing mutates it mid-tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Number of agents in the flock.
    pub n_agents: u32,
    /// Side length of the square world span.
    pub world_side: f32,
    /// Global speed factor applied to every agent.
    pub speed: f32,
    /// Magnitude of the per-tick uniform heading jitter, in degrees.
    pub noise_heading: f32,
    /// Distance under which another agent triggers avoidance.
    pub r_coll: f32,
    /// Distance under which a perceived agent is aligned with.
    pub r_align: f32,
    /// Distance under which another agent is perceivable at all.
    pub r_attract: f32,
    /// Angular width of the rear cone excluded from perception, degrees.
    pub blindspot: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            n_agents: 100,
            world_side: 128.0,
            speed: 0.5,
            noise_heading: 0.0,
            r_coll: 1.0,
            r_align: 5.0,
            r_attract: 15.0,
            blindspot: 120.0,
        }
    }
}

impl SimParams {
    /// Loads parameters from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses parameters from a TOML string. Missing fields take their
    /// default values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Checks every parameter against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("n_agents", self.n_agents as f32, N_AGENTS_RANGE)?;
        check_range("world_side", self.world_side, WORLD_SIDE_RANGE)?;
        check_range("speed", self.speed, SPEED_RANGE)?;
        check_range("noise_heading", self.noise_heading, NOISE_HEADING_RANGE)?;
        check_range("r_coll", self.r_coll, R_COLL_RANGE)?;
        check_range("r_align", self.r_align, R_ALIGN_RANGE)?;
        check_range("r_attract", self.r_attract, R_ATTRACT_RANGE)?;
        check_range("blindspot", self.blindspot, BLINDSPOT_RANGE)?;
        Ok(())
    }
}

fn check_range(param: &'static str, value: f32, range: (f32, f32)) -> Result<(), ConfigError> {
    let (min, max) = range;
    if value < min || value > max || !value.is_finite() {
        return Err(ConfigError::OutOfRange {
            param,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Errors from loading or validating parameters.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the parameter file
    #[error("could not read parameter file: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing the TOML parameter file
    #[error("could not parse parameter file: {0}")]
    Toml(#[from] toml::de::Error),
    /// A parameter is outside its documented range
    #[error("{param} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        param: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        SimParams::default().validate().unwrap();
    }

    #[test]
    fn test_default_radii() {
        let params = SimParams::default();
        assert_eq!(params.n_agents, 100);
        assert_eq!(params.world_side, 128.0);
        assert_eq!(params.r_coll, 1.0);
        assert_eq!(params.r_align, 5.0);
        assert_eq!(params.r_attract, 15.0);
        assert_eq!(params.blindspot, 120.0);
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let params = SimParams::from_toml_str("n_agents = 32\nspeed = 0.25\n").unwrap();
        assert_eq!(params.n_agents, 32);
        assert_eq!(params.speed, 0.25);
        assert_eq!(params.world_side, 128.0);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut params = SimParams::default();
        params.n_agents = 4;
        match params.validate() {
            Err(ConfigError::OutOfRange { param, .. }) => assert_eq!(param, "n_agents"),
            other => panic!("expected OutOfRange, got {:?}", other),
        }

        let mut params = SimParams::default();
        params.blindspot = 0.0;
        assert!(params.validate().is_err());

        let mut params = SimParams::default();
        params.speed = f32::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut params = SimParams::default();
        params.r_coll = 4.0;
        params.noise_heading = 180.0;
        params.blindspot = 360.0;
        params.speed = 0.0;
        params.validate().unwrap();
    }

    #[test]
    fn test_bad_toml_is_rejected() {
        assert!(matches!(
            SimParams::from_toml_str("n_agents = \"many\""),
            Err(ConfigError::Toml(_))
        ));
    }
}
