use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or loading a world configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("a flock needs at least one boid")]
    EmptyFlock,
    #[error("boid {index} has {problem}")]
    InvalidBoid { index: usize, problem: &'static str },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// World and behaviour settings shared by every boid. Immutable once a
/// flock has been built from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Playfield width.
    pub width: f32,
    /// Playfield height.
    pub height: f32,
    /// Distance past an edge a boid may travel before it reappears on the
    /// opposite side. Roughly the size of a boid so it is fully hidden.
    pub boundary_margin: f32,
    /// Length of a boid from nose to tail.
    pub body_length: f32,
    /// Distance travelled per tick.
    pub speed: f32,
    /// Largest heading change allowed in one tick.
    pub change_limit: f32,
    /// Boids closer than this influence each other's heading.
    pub neighbourhood_radius: f32,
    /// Boids closer than this steer away from each other.
    pub separation_distance: f32,
    pub alignment_weight: f32,
    pub separation_weight: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 400.0,
            boundary_margin: 20.0,
            body_length: 20.0,
            speed: 2.0,
            change_limit: 0.2,
            neighbourhood_radius: 200.0,
            separation_distance: 60.0,
            alignment_weight: 1.0,
            separation_weight: 1.0,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("body_length", self.body_length),
            ("change_limit", self.change_limit),
            ("neighbourhood_radius", self.neighbourhood_radius),
            ("separation_distance", self.separation_distance),
        ];
        let non_negative = [
            ("boundary_margin", self.boundary_margin),
            ("speed", self.speed),
            ("alignment_weight", self.alignment_weight),
            ("separation_weight", self.separation_weight),
        ];

        for (field, value) in positive.into_iter().chain(non_negative) {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Loads a config from a JSON file. Missing fields fall back to
    /// [`WorldConfig::default`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }
}
