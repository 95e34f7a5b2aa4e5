//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::coord::DistanceMetric;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [recorder] section
    if let Some(section) = ini.section(Some("recorder")) {
        if let Some(v) = section.get("min_distance_m") {
            config.recorder.min_distance_m = parse_non_negative("recorder", "min_distance_m", v)?;
        }
        if let Some(v) = section.get("distance_metric") {
            config.recorder.distance_metric =
                v.parse::<DistanceMetric>()
                    .map_err(|_| ConfigFileError::InvalidValue {
                        section: "recorder".to_string(),
                        key: "distance_metric".to_string(),
                        value: v.to_string(),
                        reason: "must be one of: mercator, haversine".to_string(),
                    })?;
        }
        if let Some(v) = section.get("event_capacity") {
            config.recorder.event_capacity = parse_positive("recorder", "event_capacity", v)?;
        }
    }

    // [location] section
    if let Some(section) = ini.section(Some("location")) {
        if let Some(v) = section.get("desired_accuracy_m") {
            let accuracy = parse_non_negative("location", "desired_accuracy_m", v)?;
            if accuracy == 0.0 {
                return Err(invalid(
                    "location",
                    "desired_accuracy_m",
                    v,
                    "must be a positive number",
                ));
            }
            config.location.desired_accuracy_m = accuracy;
        }
    }

    // [replay] section
    if let Some(section) = ini.section(Some("replay")) {
        if let Some(v) = section.get("interval_ms") {
            config.replay.interval_ms = parse_value(
                "replay",
                "interval_ms",
                v,
                "must be a non-negative integer (milliseconds)",
            )?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_value<T: FromStr>(
    section: &str,
    key: &str,
    value: &str,
    reason: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, reason))
}

/// Parse a finite number that is zero or greater.
fn parse_non_negative(section: &str, key: &str, value: &str) -> Result<f64, ConfigFileError> {
    let reason = "must be a non-negative number";
    let n: f64 = parse_value(section, key, value, reason)?;
    if n.is_finite() && n >= 0.0 {
        Ok(n)
    } else {
        Err(invalid(section, key, value, reason))
    }
}

/// Parse an integer that is 1 or greater.
fn parse_positive(section: &str, key: &str, value: &str) -> Result<usize, ConfigFileError> {
    let reason = "must be a positive integer";
    let n: usize = parse_value(section, key, value, reason)?;
    if n > 0 {
        Ok(n)
    } else {
        Err(invalid(section, key, value, reason))
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
