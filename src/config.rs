//! Steering configuration.
//!
//! Values are loaded from JSON and never rejected: out-of-range settings are
//! reported through [`SteeringConfig::range_warnings`] and logged when an
//! agent is built, but the agent still runs with them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default forward speed in units per second.
pub const DEFAULT_SPEED: f32 = 5.0;
/// Default maximum turn rate in degrees per second.
pub const DEFAULT_TURN_RATE: f32 = 45.0;
/// Default distance at which a waypoint counts as reached.
pub const DEFAULT_ARRIVAL_TOLERANCE: f32 = 1.0;

/// Tunables for a single agent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Forward speed in units per second.
    pub speed: f32,
    /// Maximum angular speed in degrees per second when turning smoothly.
    pub turn_rate: f32,
    /// Distance within which the current waypoint counts as reached.
    pub arrival_tolerance: f32,
    /// Turn at a bounded rate instead of snapping to the target heading.
    pub smooth_turning: bool,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            turn_rate: DEFAULT_TURN_RATE,
            arrival_tolerance: DEFAULT_ARRIVAL_TOLERANCE,
            smooth_turning: false,
        }
    }
}

/// Failure loading a [`SteeringConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying read failure.
        #[source]
        source: std::io::Error,
    },
    /// The contents were not a valid configuration.
    #[error("invalid steering config: {source}")]
    Parse {
        /// Decoder error, with line and column.
        #[from]
        source: serde_json::Error,
    },
}

impl SteeringConfig {
    /// Parses a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields.
    ///
    /// # Examples
    /// ```
    /// use steer::SteeringConfig;
    /// let config = SteeringConfig::from_json_str(r#"{ "speed": 2.5 }"#).unwrap();
    /// assert_eq!(config.speed, 2.5);
    /// assert!(!config.smooth_turning);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let json = fs::read_to_string(file).map_err(|source| ConfigError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Describes every value outside its expected range.
    #[must_use]
    pub fn range_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !(self.speed.is_finite() && self.speed > 0.0) {
            warnings.push(format!("speed {} should be positive", self.speed));
        }
        if !(self.turn_rate.is_finite() && self.turn_rate > 0.0) {
            warnings.push(format!("turn_rate {} should be positive", self.turn_rate));
        }
        if !(self.arrival_tolerance.is_finite() && self.arrival_tolerance >= 0.0) {
            warnings.push(format!(
                "arrival_tolerance {} should not be negative",
                self.arrival_tolerance
            ));
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_object_yields_defaults() {
        let config = SteeringConfig::from_json_str("{}").expect("parse");
        assert_eq!(config, SteeringConfig::default());
    }

    #[rstest]
    fn all_fields_parse() {
        let config = SteeringConfig::from_json_str(
            r#"{ "speed": 3.0, "turn_rate": 90.0, "arrival_tolerance": 0.5, "smooth_turning": true }"#,
        )
        .expect("parse");
        assert_eq!(
            config,
            SteeringConfig {
                speed: 3.0,
                turn_rate: 90.0,
                arrival_tolerance: 0.5,
                smooth_turning: true,
            }
        );
    }

    #[rstest]
    #[case::mistyped(r#"{ "speed": "fast" }"#)]
    #[case::truncated("{ \"speed\": ")]
    fn malformed_json_is_a_parse_error(#[case] json: &str) {
        assert!(matches!(
            SteeringConfig::from_json_str(json),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[rstest]
    fn missing_file_is_an_io_error() {
        let result = SteeringConfig::load("/definitely/not/here/steer.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[rstest]
    fn defaults_raise_no_warnings() {
        assert!(SteeringConfig::default().range_warnings().is_empty());
    }

    #[rstest]
    fn out_of_range_values_are_reported() {
        let config = SteeringConfig {
            speed: 0.0,
            turn_rate: -1.0,
            arrival_tolerance: f32::NAN,
            smooth_turning: true,
        };
        assert_eq!(config.range_warnings().len(), 3);
    }
}
