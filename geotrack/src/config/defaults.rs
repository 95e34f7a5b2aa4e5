//! Default configuration values.
//!
//! Constants used by `ConfigFile::default()` and by the parser when a key is
//! absent.

use crate::coord::DistanceMetric;
use crate::recorder::{DEFAULT_EVENT_CAPACITY, DEFAULT_MIN_DISTANCE_M};
use crate::source::DEFAULT_DESIRED_ACCURACY_M;

use super::settings::{
    ConfigFile, LocationSettings, LoggingSettings, RecorderSettings, ReplaySettings,
};

/// Default delay between replayed samples (milliseconds).
pub const DEFAULT_REPLAY_INTERVAL_MS: u64 = 100;

/// Default log file name.
pub const DEFAULT_LOG_FILE_NAME: &str = "geotrack.log";

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = super::file::config_directory();

        Self {
            recorder: RecorderSettings {
                min_distance_m: DEFAULT_MIN_DISTANCE_M,
                distance_metric: DistanceMetric::default(),
                event_capacity: DEFAULT_EVENT_CAPACITY,
            },
            location: LocationSettings {
                desired_accuracy_m: DEFAULT_DESIRED_ACCURACY_M,
            },
            replay: ReplaySettings {
                interval_ms: DEFAULT_REPLAY_INTERVAL_MS,
            },
            logging: LoggingSettings {
                file: config_dir.join("logs").join(DEFAULT_LOG_FILE_NAME),
            },
        }
    }
}
