//! Push-based location source fed by a platform adapter.
//!
//! # Example
//!
//! ```ignore
//! let feed = Arc::new(LocationFeed::new(LocationFeedConfig::default()));
//! feed.set_authorization_status(AuthorizationStatus::AuthorizedWhenInUse);
//!
//! // From the platform's location callback:
//! feed.publish(Some(Coordinate::new(53.63, 9.99)));
//! ```

use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use super::authorization::AuthorizationStatus;
use super::{LocationSource, LocationStream};
use crate::coord::Coordinate;

/// Default accuracy hint passed to the platform, in meters.
pub const DEFAULT_DESIRED_ACCURACY_M: f64 = 100.0;

/// Location feed configuration.
#[derive(Debug, Clone)]
pub struct LocationFeedConfig {
    /// Accuracy the platform should aim for, in meters.
    pub desired_accuracy_m: f64,
}

impl Default for LocationFeedConfig {
    fn default() -> Self {
        Self {
            desired_accuracy_m: DEFAULT_DESIRED_ACCURACY_M,
        }
    }
}

struct FeedState {
    active: bool,
    authorization: AuthorizationStatus,
    location: Option<Coordinate>,
    /// One queue per open stream. Unbounded so a slow reader never loses
    /// samples; closed readers are pruned on the next send.
    subscribers: Vec<mpsc::UnboundedSender<Option<Coordinate>>>,
    closed: bool,
}

impl FeedState {
    fn broadcast(&mut self, location: Option<Coordinate>) {
        self.subscribers.retain(|tx| tx.send(location).is_ok());
    }
}

/// Location source that platform code publishes fixes into.
///
/// Samples are only accepted while the feed is active and access has not been
/// refused. Deactivating clears the current location.
pub struct LocationFeed {
    state: Mutex<FeedState>,
    config: LocationFeedConfig,
}

impl LocationFeed {
    /// Create an inactive feed with undetermined authorization.
    pub fn new(config: LocationFeedConfig) -> Self {
        Self {
            state: Mutex::new(FeedState {
                active: false,
                authorization: AuthorizationStatus::default(),
                location: None,
                subscribers: Vec::new(),
                closed: false,
            }),
            config,
        }
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(LocationFeedConfig::default())
    }

    /// Accuracy the platform should aim for, in meters.
    pub fn desired_accuracy_m(&self) -> f64 {
        self.config.desired_accuracy_m
    }

    /// Whether the feed is currently producing samples.
    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }

    /// Last accepted location.
    pub fn current_location(&self) -> Option<Coordinate> {
        self.state.lock().location
    }

    /// Current authorization status.
    pub fn authorization_status(&self) -> AuthorizationStatus {
        self.state.lock().authorization
    }

    /// Whether location access is granted (`None` while undetermined).
    pub fn is_authorized(&self) -> Option<bool> {
        self.authorization_status().is_authorized()
    }

    /// Record a change of authorization reported by the platform.
    pub fn set_authorization_status(&self, status: AuthorizationStatus) {
        let mut state = self.state.lock();
        if state.authorization != status {
            info!(from = %state.authorization, to = %status, "Location authorization changed");
            state.authorization = status;
        }
    }

    /// Publish a location update.
    ///
    /// Returns true if the update was accepted and forwarded to subscribers.
    pub fn publish(&self, location: Option<Coordinate>) -> bool {
        let mut state = self.state.lock();

        if !state.active {
            trace!("Location update ignored (feed inactive)");
            return false;
        }
        if state.authorization.is_authorized() == Some(false) {
            trace!(
                authorization = %state.authorization,
                "Location update ignored (not authorized)"
            );
            return false;
        }
        if state.closed {
            trace!("Location update ignored (feed closed)");
            return false;
        }

        state.location = location;
        state.broadcast(location);
        true
    }

    /// Close the feed, ending every open stream.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if !state.closed {
            state.closed = true;
            // Dropping the senders ends each stream after its queued samples
            state.subscribers.clear();
            debug!("Location feed closed");
        }
    }
}

impl LocationSource for LocationFeed {
    fn locations(&self) -> LocationStream {
        let mut state = self.state.lock();
        if state.closed {
            return stream::empty().boxed();
        }

        // Queue the current value under the lock so it always precedes
        // the live updates.
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(state.location);
        state.subscribers.push(tx);
        trace!(subscribers = state.subscribers.len(), "Location stream opened");

        stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|sample| (sample, rx))
        })
        .boxed()
    }

    fn set_active(&self, active: bool) {
        let mut state = self.state.lock();
        if state.active == active {
            return;
        }

        state.active = active;
        info!(
            active,
            desired_accuracy_m = self.config.desired_accuracy_m,
            "Location feed active state changed"
        );

        if !active && state.location.take().is_some() {
            state.broadcast(None);
        }
    }
}
