//! Location sources.
//!
//! The recorder never talks to a GPS receiver directly. It consumes a
//! [`LocationStream`] obtained from a [`LocationSource`], and toggles the
//! source on and off with [`LocationSource::set_active`] as recording starts
//! and stops.
//!
//! Platform integrations (CoreLocation, Android's fused provider, gpsd, a
//! replay file) push fixes into a [`LocationFeed`], which implements the
//! trait with published-property semantics: each new stream first yields the
//! current location, then every later update.
//!
//! A source that is unauthorized or has no sensor simply yields nothing.
//! Errors are never surfaced through the stream.

mod authorization;
mod feed;

use std::sync::Arc;

use futures::stream::BoxStream;

use crate::coord::Coordinate;

pub use authorization::AuthorizationStatus;
pub use feed::{LocationFeed, LocationFeedConfig, DEFAULT_DESIRED_ACCURACY_M};

/// Asynchronous sequence of location samples.
///
/// `None` means "no current fix" and is skipped by consumers.
pub type LocationStream = BoxStream<'static, Option<Coordinate>>;

/// A provider of location samples.
///
/// The recorder calls both methods from inside its start and stop commands,
/// after releasing its state lock. Implementations may read recorder state
/// there but must not start or stop the recorder from the same call.
pub trait LocationSource: Send + Sync {
    /// Open a new stream of samples.
    ///
    /// Each call returns an independent stream. Dropping the stream
    /// unsubscribes.
    fn locations(&self) -> LocationStream;

    /// Start or stop producing samples.
    fn set_active(&self, active: bool);
}

// Allow Arc<T> to be used wherever a source is expected
impl<T: LocationSource + ?Sized> LocationSource for Arc<T> {
    fn locations(&self) -> LocationStream {
        (**self).locations()
    }

    fn set_active(&self, active: bool) {
        (**self).set_active(active)
    }
}
