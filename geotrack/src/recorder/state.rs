//! Recorder state and change notifications.

use crate::coord::Coordinate;

use super::track::TrackPoint;

/// Operating state of the track recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    /// Not consuming location samples.
    #[default]
    Idle,
    /// Consuming samples and appending kept ones to the track.
    Recording,
}

impl RecorderState {
    /// Returns true in the `Recording` state.
    #[inline]
    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }
}

impl From<bool> for RecorderState {
    fn from(recording: bool) -> Self {
        if recording {
            Self::Recording
        } else {
            Self::Idle
        }
    }
}

impl std::fmt::Display for RecorderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Recording => write!(f, "Recording"),
        }
    }
}

/// Change notification pushed to observers.
///
/// Every sample processed while recording produces exactly one of
/// `PointAdded` or `SampleDiscarded`.
#[derive(Debug, Clone, PartialEq)]
pub enum RecorderEvent {
    /// The recorder switched state.
    StateChanged(RecorderState),
    /// A sample was kept and appended to the track.
    PointAdded(TrackPoint),
    /// A sample was too close to the last point and was dropped.
    SampleDiscarded(Coordinate),
}
