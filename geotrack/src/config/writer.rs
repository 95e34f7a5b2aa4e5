//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[recorder]
; Minimum distance in meters between recorded points.
; Samples closer than this to the last point are dropped. 0 keeps every sample.
min_distance_m = {}
; How distances are measured:
;   mercator  - planar distance on the Web Mercator projection (map distance)
;   haversine - great-circle distance on a spherical Earth
distance_metric = {}
; Change notifications buffered per observer
event_capacity = {}

[location]
; Accuracy requested from the location service, in meters
desired_accuracy_m = {}

[replay]
; Delay between samples when replaying a coordinate file (milliseconds)
interval_ms = {}

[logging]
; Log file path (cleared at the start of each session)
file = {}
"#,
        config.recorder.min_distance_m,
        config.recorder.distance_metric,
        config.recorder.event_capacity,
        config.location.desired_accuracy_m,
        config.replay.interval_ms,
        config.logging.file.display(),
    )
}
