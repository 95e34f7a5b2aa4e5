//! Configuration file handling for ~/.geotrack/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], defaults in
//! [`super::defaults`], parsing in [`super::parser`], and serialization in
//! [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::ConfigFile;
use crate::coord::DistanceMetric;
use crate::recorder::{RecorderConfig, SimplificationFilter};
use crate::source::LocationFeedConfig;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.geotrack/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.geotrack/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Recorder configuration derived from the `[recorder]` section.
    pub fn recorder_config(&self) -> RecorderConfig {
        RecorderConfig {
            filter: self.filter(),
            event_capacity: self.recorder.event_capacity,
        }
    }

    /// Location feed configuration derived from the `[location]` section.
    pub fn location_feed_config(&self) -> LocationFeedConfig {
        LocationFeedConfig {
            desired_accuracy_m: self.location.desired_accuracy_m,
        }
    }

    /// Simplification filter from the `[recorder]` section.
    pub fn filter(&self) -> SimplificationFilter {
        SimplificationFilter::new(self.recorder.min_distance_m, self.recorder.distance_metric)
    }

    /// Distance metric from the `[recorder]` section.
    pub fn distance_metric(&self) -> DistanceMetric {
        self.recorder.distance_metric
    }
}

/// Get the config directory path (~/.geotrack).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".geotrack")
}

/// Get the path to the config file (~/.geotrack/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_REPLAY_INTERVAL_MS;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.recorder.min_distance_m, 10.0);
        assert_eq!(config.recorder.distance_metric, DistanceMetric::Mercator);
        assert_eq!(config.recorder.event_capacity, 64);
        assert_eq!(config.location.desired_accuracy_m, 100.0);
        assert_eq!(config.replay.interval_ms, DEFAULT_REPLAY_INTERVAL_MS);
        assert!(config.logging.file.ends_with("logs/geotrack.log"));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.recorder.min_distance_m = 25.0;
        config.recorder.distance_metric = DistanceMetric::Haversine;
        config.save_to(&config_path).unwrap();

        let loaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(loaded.recorder.min_distance_m, 25.0);
        assert_eq!(loaded.recorder.distance_metric, DistanceMetric::Haversine);
    }

    #[test]
    fn test_derived_component_configs() {
        let mut config = ConfigFile::default();
        config.recorder.min_distance_m = 5.0;
        config.location.desired_accuracy_m = 25.0;

        let recorder = config.recorder_config();
        assert_eq!(recorder.filter.min_distance_m(), 5.0);
        assert_eq!(recorder.event_capacity, 64);

        let feed = config.location_feed_config();
        assert_eq!(feed.desired_accuracy_m, 25.0);
    }

    #[test]
    fn test_config_paths() {
        assert!(config_directory().ends_with(".geotrack"));
        assert!(config_file_path().ends_with(".geotrack/config.ini"));
    }
}
