//! Read-only access to the recorder for rendering layers.
//!
//! - [`TrackProvider`] - Query API (pull)
//! - [`TrackBroadcaster`] - Subscription API (push)

use std::sync::Arc;

use tokio::sync::broadcast;

use super::machine::TrackRecorder;
use super::state::{RecorderEvent, RecorderState};
use super::track::Track;

/// Trait for querying the recorded track (pull API).
pub trait TrackProvider: Send + Sync {
    /// Current recorder state.
    fn state(&self) -> RecorderState;

    /// Snapshot of the recorded track.
    fn track(&self) -> Track;

    /// Number of recorded points.
    fn point_count(&self) -> usize;

    /// True while recording (convenience method).
    fn is_recording(&self) -> bool {
        self.state().is_recording()
    }
}

/// Trait for subscribing to recorder changes (push API).
pub trait TrackBroadcaster: Send + Sync {
    /// Subscribe to state and track changes.
    fn subscribe(&self) -> broadcast::Receiver<RecorderEvent>;
}

impl TrackProvider for TrackRecorder {
    fn state(&self) -> RecorderState {
        TrackRecorder::state(self)
    }

    fn track(&self) -> Track {
        TrackRecorder::track(self)
    }

    fn point_count(&self) -> usize {
        TrackRecorder::point_count(self)
    }
}

impl TrackBroadcaster for TrackRecorder {
    fn subscribe(&self) -> broadcast::Receiver<RecorderEvent> {
        TrackRecorder::subscribe(self)
    }
}

// Allow Arc<TrackRecorder> to be handed to renderers directly
impl TrackProvider for Arc<TrackRecorder> {
    fn state(&self) -> RecorderState {
        (**self).state()
    }

    fn track(&self) -> Track {
        (**self).track()
    }

    fn point_count(&self) -> usize {
        (**self).point_count()
    }
}

impl TrackBroadcaster for Arc<TrackRecorder> {
    fn subscribe(&self) -> broadcast::Receiver<RecorderEvent> {
        (**self).subscribe()
    }
}
