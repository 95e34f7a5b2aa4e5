//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::coord::DistanceMetric;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Track recorder settings
    pub recorder: RecorderSettings,
    /// Location source settings
    pub location: LocationSettings,
    /// Replay settings for the CLI
    pub replay: ReplaySettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Track recorder configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RecorderSettings {
    /// Minimum distance in meters between kept points. 0 keeps every sample.
    pub min_distance_m: f64,
    /// How distance is measured.
    pub distance_metric: DistanceMetric,
    /// Events buffered per observer.
    pub event_capacity: usize,
}

/// Location source configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSettings {
    /// Accuracy requested from the platform, in meters.
    pub desired_accuracy_m: f64,
}

/// Replay configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySettings {
    /// Delay between replayed samples in milliseconds.
    pub interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
