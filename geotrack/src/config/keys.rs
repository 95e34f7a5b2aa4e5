//! Configuration key access and validation.
//!
//! This module provides a type-safe interface for getting and setting
//! configuration values by key name, with validation via the Specification Pattern.

use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use super::parser::expand_tilde;
use super::settings::ConfigFile;
use crate::coord::DistanceMetric;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
///
/// Each key maps to a specific field in [`ConfigFile`] and knows how to
/// get and set its value with proper validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    // Recorder settings
    RecorderMinDistanceM,
    RecorderDistanceMetric,
    RecorderEventCapacity,

    // Location settings
    LocationDesiredAccuracyM,

    // Replay settings
    ReplayIntervalMs,

    // Logging settings
    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|key| key.name() == lower)
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "recorder.min_distance_m").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::RecorderMinDistanceM => "recorder.min_distance_m",
            ConfigKey::RecorderDistanceMetric => "recorder.distance_metric",
            ConfigKey::RecorderEventCapacity => "recorder.event_capacity",
            ConfigKey::LocationDesiredAccuracyM => "location.desired_accuracy_m",
            ConfigKey::ReplayIntervalMs => "replay.interval_ms",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "recorder").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "min_distance_m").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::RecorderMinDistanceM => config.recorder.min_distance_m.to_string(),
            ConfigKey::RecorderDistanceMetric => config.recorder.distance_metric.to_string(),
            ConfigKey::RecorderEventCapacity => config.recorder.event_capacity.to_string(),
            ConfigKey::LocationDesiredAccuracyM => config.location.desired_accuracy_m.to_string(),
            ConfigKey::ReplayIntervalMs => config.replay.interval_ms.to_string(),
            ConfigKey::LoggingFile => path_to_display(&config.logging.file),
        }
    }

    /// Set the value in a config file.
    ///
    /// Validates the value according to the key's specification before setting.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        self.validate(value)?;
        let value = value.trim();

        match self {
            ConfigKey::RecorderMinDistanceM => {
                config.recorder.min_distance_m = self.parse(value)?;
            }
            ConfigKey::RecorderDistanceMetric => {
                config.recorder.distance_metric = value
                    .parse::<DistanceMetric>()
                    .map_err(|_| self.invalid("must be one of: mercator, haversine"))?;
            }
            ConfigKey::RecorderEventCapacity => {
                config.recorder.event_capacity = self.parse(value)?;
            }
            ConfigKey::LocationDesiredAccuracyM => {
                config.location.desired_accuracy_m = self.parse(value)?;
            }
            ConfigKey::ReplayIntervalMs => {
                config.replay.interval_ms = self.parse(value)?;
            }
            ConfigKey::LoggingFile => {
                config.logging.file = expand_tilde(value);
            }
        }

        Ok(())
    }

    /// Validate a value according to this key's specification.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.specification()
            .is_satisfied_by(value.trim())
            .map_err(|reason| self.invalid(&reason))
    }

    /// Get the validation specification for this key.
    fn specification(&self) -> Box<dyn ValueSpecification> {
        match self {
            ConfigKey::RecorderMinDistanceM => Box::new(NonNegativeNumberSpec),
            ConfigKey::RecorderDistanceMetric => {
                Box::new(OneOfSpec::new(&["mercator", "haversine"]))
            }
            ConfigKey::RecorderEventCapacity => Box::new(PositiveIntegerSpec),
            ConfigKey::LocationDesiredAccuracyM => Box::new(PositiveNumberSpec),
            ConfigKey::ReplayIntervalMs => Box::new(NonNegativeIntegerSpec),
            ConfigKey::LoggingFile => Box::new(PathSpec),
        }
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::RecorderMinDistanceM,
            ConfigKey::RecorderDistanceMetric,
            ConfigKey::RecorderEventCapacity,
            ConfigKey::LocationDesiredAccuracyM,
            ConfigKey::ReplayIntervalMs,
            ConfigKey::LoggingFile,
        ]
    }

    fn parse<T: FromStr>(&self, value: &str) -> Result<T, ConfigKeyError> {
        value
            .parse()
            .map_err(|_| self.invalid("value could not be parsed"))
    }

    fn invalid(&self, reason: &str) -> ConfigKeyError {
        ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason: reason.to_string(),
        }
    }
}

// ============================================================================
// Value Specifications (Specification Pattern)
// ============================================================================

/// Trait for value validation specifications.
trait ValueSpecification {
    /// Check if the value satisfies this specification.
    /// Returns Ok(()) if valid, Err(reason) if invalid.
    fn is_satisfied_by(&self, value: &str) -> Result<(), String>;
}

/// Specification that requires the value to be one of a set of options.
struct OneOfSpec {
    options: &'static [&'static str],
}

impl OneOfSpec {
    fn new(options: &'static [&'static str]) -> Self {
        Self { options }
    }
}

impl ValueSpecification for OneOfSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        let lower = value.to_lowercase();
        if self.options.iter().any(|opt| *opt == lower) {
            Ok(())
        } else {
            Err(format!("must be one of: {}", self.options.join(", ")))
        }
    }
}

/// Specification for integer values of 1 or more.
struct PositiveIntegerSpec;

impl ValueSpecification for PositiveIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(()),
            _ => Err("must be a positive integer".to_string()),
        }
    }
}

/// Specification for integer values of 0 or more.
struct NonNegativeIntegerSpec;

impl ValueSpecification for NonNegativeIntegerSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        value
            .parse::<u64>()
            .map(|_| ())
            .map_err(|_| "must be a non-negative integer".to_string())
    }
}

/// Specification for finite numbers greater than zero.
struct PositiveNumberSpec;

impl ValueSpecification for PositiveNumberSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() && n > 0.0 => Ok(()),
            _ => Err("must be a positive number".to_string()),
        }
    }
}

/// Specification for finite numbers of zero or more.
struct NonNegativeNumberSpec;

impl ValueSpecification for NonNegativeNumberSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(()),
            _ => Err("must be a non-negative number".to_string()),
        }
    }
}

/// Specification for path values (non-empty).
struct PathSpec;

impl ValueSpecification for PathSpec {
    fn is_satisfied_by(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err("must be a valid path".to_string())
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert path to display string, collapsing home dir to ~.
fn path_to_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
