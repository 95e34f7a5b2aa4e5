//! GeoTrack - GPS track recording
//!
//! Records a track from a live stream of location samples, dropping samples
//! that are too close to the last recorded point.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use geotrack::coord::Coordinate;
//! use geotrack::recorder::TrackRecorder;
//! use geotrack::source::LocationFeed;
//!
//! let feed = Arc::new(LocationFeed::with_defaults());
//! let recorder = TrackRecorder::new(feed.clone());
//!
//! recorder.set_recording(true)?;
//! feed.publish(Some(Coordinate::new(53.630278, 9.988333)));
//! ```
//!
//! # Modules
//!
//! - [`coord`] - coordinates and distance
//! - [`source`] - location sources and the push-based `LocationFeed`
//! - [`recorder`] - track model, filter and the recording state machine
//! - [`config`] - `~/.geotrack/config.ini`
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod coord;
pub mod logging;
pub mod recorder;
pub mod source;

/// Version of the GeoTrack library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
