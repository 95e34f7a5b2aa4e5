//! Configuration for GeoTrack.
//!
//! User settings live in `~/.geotrack/config.ini`. The file is optional;
//! missing keys fall back to defaults.
//!
//! - `settings` - one struct per `[section]`
//! - `defaults` - default values and `ConfigFile::default()`
//! - `parser` - INI → `ConfigFile`
//! - `writer` - `ConfigFile` → commented INI
//! - `keys` - typed get/set by `section.key` name
//!
//! # Example
//!
//! ```
//! use geotrack::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! let recorder_config = config.recorder_config();
//! assert_eq!(recorder_config.filter.min_distance_m(), 10.0);
//! ```

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{ConfigFile, LocationSettings, LoggingSettings, RecorderSettings, ReplaySettings};
