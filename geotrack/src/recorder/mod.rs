//! Track recording.
//!
//! The recorder is a two-state machine (Idle/Recording) that consumes a
//! location stream while recording and appends the samples that pass a
//! distance filter to an in-memory track.
//!
//! # Usage
//!
//! ```ignore
//! use geotrack::recorder::{TrackRecorder, RecorderEvent};
//! use geotrack::source::LocationFeed;
//!
//! let feed = Arc::new(LocationFeed::with_defaults());
//! let recorder = TrackRecorder::new(feed.clone());
//!
//! recorder.set_recording(true)?;
//! feed.publish(Some(Coordinate::new(53.63, 9.99)));
//! // ...
//! recorder.set_recording(false)?;
//!
//! for point in recorder.track().iter() {
//!     println!("{}", point.coordinate);
//! }
//! ```
//!
//! # Components
//!
//! - `track` - `Track` and `TrackPoint`
//! - `filter` - `SimplificationFilter`, the keep/discard rule
//! - `state` - `RecorderState` and `RecorderEvent`
//! - `subscription` - cancellable consumer task for a location stream
//! - `machine` - `TrackRecorder`, the state machine
//! - `provider` - `TrackProvider` and `TrackBroadcaster` traits for renderers
//! - `logger` - periodic DEBUG logging of the track

mod filter;
mod logger;
mod machine;
mod provider;
mod state;
mod subscription;
mod track;

pub use filter::{SimplificationFilter, DEFAULT_MIN_DISTANCE_M};
pub use logger::{spawn_track_logger, DEFAULT_LOG_INTERVAL};
pub use machine::{RecorderConfig, RecorderError, TrackRecorder, DEFAULT_EVENT_CAPACITY};
pub use provider::{TrackBroadcaster, TrackProvider};
pub use state::{RecorderEvent, RecorderState};
pub use subscription::Subscription;
pub use track::{Track, TrackPoint};
