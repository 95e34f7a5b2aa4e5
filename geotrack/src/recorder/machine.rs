//! Track recorder state machine.
//!
//! The recorder owns the track and its state. A single command,
//! [`TrackRecorder::set_recording`], drives the transitions:
//!
//! - **Idle → Recording** opens a stream on the location source, activates the
//!   source and spawns one consumer task for it.
//! - **Recording → Idle** cancels that task and deactivates the source.
//!
//! Requests for the state the recorder is already in change nothing.
//!
//! All mutation goes through one mutex. Each subscription is tagged with a
//! session number, and samples are only appended while their session is the
//! current one, so once `stop()` returns nothing more is added to the track
//! even if the cancelled task was still handling a sample.
//!
//! Commands are serialized by a second lock. The location source is called
//! while only that lock is held, so a source may read recorder state from
//! `locations()` or `set_active()`.

use std::ops::ControlFlow;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tracing::{debug, info, trace};

use super::filter::SimplificationFilter;
use super::state::{RecorderEvent, RecorderState};
use super::subscription::Subscription;
use super::track::{Track, TrackPoint};
use crate::coord::Coordinate;
use crate::source::LocationSource;

/// Default capacity of the event broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Configuration for the track recorder.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Filter applied to every incoming sample.
    pub filter: SimplificationFilter,

    /// Events buffered per observer before the oldest are dropped.
    pub event_capacity: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            filter: SimplificationFilter::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

/// Errors returned by recorder commands.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    /// Recording was requested outside a Tokio runtime.
    #[error("Recording requires a running Tokio runtime")]
    NoRuntime,
}

/// Mutable recorder state, guarded by one lock.
struct RecorderInner {
    state: RecorderState,
    track: Track,
    /// Incremented on every start; identifies the live subscription.
    session: u64,
    subscription: Option<Subscription>,
}

/// State shared with the consumer task.
struct RecorderShared {
    inner: Mutex<RecorderInner>,
    events: broadcast::Sender<RecorderEvent>,
    filter: SimplificationFilter,
}

impl RecorderShared {
    /// Process one sample delivered by the subscription for `session`.
    fn ingest(&self, session: u64, coordinate: Coordinate) -> ControlFlow<()> {
        let mut inner = self.inner.lock();

        if inner.session != session || !inner.state.is_recording() {
            trace!(session, current = inner.session, "Sample from stale subscription ignored");
            return ControlFlow::Break(());
        }

        if self.filter.should_keep(&coordinate, &inner.track) {
            let point = TrackPoint::new(coordinate);
            inner.track.push(point.clone());
            debug!(
                lat = format!("{:.6}", coordinate.latitude),
                lon = format!("{:.6}", coordinate.longitude),
                points = inner.track.len(),
                "Track point added"
            );
            self.notify(RecorderEvent::PointAdded(point));
        } else {
            trace!(
                lat = format!("{:.6}", coordinate.latitude),
                lon = format!("{:.6}", coordinate.longitude),
                min_distance_m = self.filter.min_distance_m(),
                "Sample discarded (too close to last point)"
            );
            self.notify(RecorderEvent::SampleDiscarded(coordinate));
        }

        ControlFlow::Continue(())
    }

    fn notify(&self, event: RecorderEvent) {
        // No observers is fine
        let _ = self.events.send(event);
    }
}

/// Records a GPS track from a location source.
///
/// # Usage
///
/// ```ignore
/// let feed = Arc::new(LocationFeed::with_defaults());
/// let recorder = TrackRecorder::new(feed.clone());
///
/// let mut events = recorder.subscribe();
/// recorder.set_recording(true)?;
/// feed.publish(Some(Coordinate::new(53.63, 9.99)));
///
/// while let Ok(event) = events.recv().await {
///     // re-render
/// }
/// ```
pub struct TrackRecorder {
    shared: Arc<RecorderShared>,
    source: Arc<dyn LocationSource>,
    /// Held for the whole of a transition, source calls included.
    transition: Mutex<()>,
}

impl TrackRecorder {
    /// Create an idle recorder with an empty track.
    pub fn new(source: Arc<dyn LocationSource>) -> Self {
        Self::with_config(source, RecorderConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(source: Arc<dyn LocationSource>, config: RecorderConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            shared: Arc::new(RecorderShared {
                inner: Mutex::new(RecorderInner {
                    state: RecorderState::Idle,
                    track: Track::new(),
                    session: 0,
                    subscription: None,
                }),
                events,
                filter: config.filter,
            }),
            source,
            transition: Mutex::new(()),
        }
    }

    /// Switch recording on or off.
    ///
    /// Returns `Ok(true)` if the state changed and `Ok(false)` if the recorder
    /// was already in the requested state. Starting requires a Tokio runtime;
    /// stopping never fails.
    pub fn set_recording(&self, recording: bool) -> Result<bool, RecorderError> {
        let _transition = self.transition.lock();
        let requested = RecorderState::from(recording);

        if self.state() == requested {
            debug!(state = %requested, "Recorder already in requested state");
            return Ok(false);
        }

        match requested {
            RecorderState::Recording => self.begin()?,
            RecorderState::Idle => self.end(),
        }

        Ok(true)
    }

    /// Start recording. Equivalent to `set_recording(true)`.
    pub fn start(&self) -> Result<bool, RecorderError> {
        self.set_recording(true)
    }

    /// Stop recording. Equivalent to `set_recording(false)`.
    pub fn stop(&self) -> bool {
        // Stopping never needs the runtime
        self.set_recording(false).unwrap_or(false)
    }

    /// Flip between recording and idle. Returns the new state.
    pub fn toggle(&self) -> Result<RecorderState, RecorderError> {
        let target = !self.is_recording();
        self.set_recording(target)?;
        Ok(self.state())
    }

    /// Current state.
    pub fn state(&self) -> RecorderState {
        self.shared.inner.lock().state
    }

    /// True while recording.
    pub fn is_recording(&self) -> bool {
        self.state().is_recording()
    }

    /// Snapshot of the recorded track.
    pub fn track(&self) -> Track {
        self.shared.inner.lock().track.clone()
    }

    /// Number of recorded points.
    pub fn point_count(&self) -> usize {
        self.shared.inner.lock().track.len()
    }

    /// Most recently recorded point.
    pub fn last_point(&self) -> Option<TrackPoint> {
        self.shared.inner.lock().track.last().cloned()
    }

    /// Session number of the live subscription, if recording.
    pub fn active_session(&self) -> Option<u64> {
        self.shared
            .inner
            .lock()
            .subscription
            .as_ref()
            .map(Subscription::session)
    }

    /// The filter applied to incoming samples.
    pub fn filter(&self) -> SimplificationFilter {
        self.shared.filter
    }

    /// Subscribe to state and track changes.
    pub fn subscribe(&self) -> broadcast::Receiver<RecorderEvent> {
        self.shared.events.subscribe()
    }

    fn begin(&self) -> Result<(), RecorderError> {
        let runtime = Handle::try_current().map_err(|_| RecorderError::NoRuntime)?;

        // Open the stream before activating so the first fix is not missed
        let stream = self.source.locations();

        {
            let mut inner = self.shared.inner.lock();
            inner.session += 1;
            let session = inner.session;

            let sink: Weak<RecorderShared> = Arc::downgrade(&self.shared);
            let subscription =
                Subscription::spawn(&runtime, session, stream, move |coordinate| {
                    match sink.upgrade() {
                        Some(shared) => shared.ingest(session, coordinate),
                        None => ControlFlow::Break(()),
                    }
                });

            inner.subscription = Some(subscription);
            inner.state = RecorderState::Recording;

            info!(
                session,
                points = inner.track.len(),
                min_distance_m = self.shared.filter.min_distance_m(),
                metric = %self.shared.filter.metric(),
                "Track recording started"
            );
            // Under the lock so it precedes any point from this session
            self.shared
                .notify(RecorderEvent::StateChanged(RecorderState::Recording));
        }

        self.source.set_active(true);
        Ok(())
    }

    fn end(&self) {
        let subscription = {
            let mut inner = self.shared.inner.lock();
            inner.state = RecorderState::Idle;

            info!(
                session = inner.session,
                points = inner.track.len(),
                "Track recording stopped"
            );
            self.shared
                .notify(RecorderEvent::StateChanged(RecorderState::Idle));
            inner.subscription.take()
        };

        if let Some(subscription) = subscription {
            subscription.cancel();
        }
        self.source.set_active(false);
    }
}

impl Drop for TrackRecorder {
    fn drop(&mut self) {
        let subscription = {
            let mut inner = self.shared.inner.lock();
            inner.state = RecorderState::Idle;
            inner.subscription.take()
        };

        if let Some(subscription) = subscription {
            subscription.cancel();
            self.source.set_active(false);
            debug!("Track recorder dropped while recording");
        }
    }
}
