//! Periodic track logging daemon.
//!
//! Logs the recorder state, point count and last position at DEBUG level at a
//! fixed interval. Useful when replaying recordings or debugging a source.
//!
//! # Usage
//!
//! ```ignore
//! use geotrack::recorder::{spawn_track_logger, DEFAULT_LOG_INTERVAL};
//! use tokio_util::sync::CancellationToken;
//!
//! let cancellation = CancellationToken::new();
//! let handle = spawn_track_logger(recorder.clone(), cancellation.clone(), DEFAULT_LOG_INTERVAL);
//! ```

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::provider::TrackProvider;

/// Default logging interval (20 seconds).
pub const DEFAULT_LOG_INTERVAL: Duration = Duration::from_secs(20);

/// Spawns a background task that periodically logs the track.
///
/// Stops when `cancellation` is triggered. Callers should check that DEBUG is
/// enabled before spawning:
///
/// ```ignore
/// if tracing::enabled!(tracing::Level::DEBUG) {
///     spawn_track_logger(recorder, cancel, Duration::from_secs(20));
/// }
/// ```
pub fn spawn_track_logger<P>(
    provider: P,
    cancellation: CancellationToken,
    interval: Duration,
) -> JoinHandle<()>
where
    P: TrackProvider + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    log_track(&provider);
                }
                _ = cancellation.cancelled() => {
                    tracing::debug!("Track logger stopped");
                    break;
                }
            }
        }
    })
}

/// Logs the current track summary at DEBUG level.
fn log_track<P: TrackProvider>(provider: &P) {
    let track = provider.track();

    match track.last() {
        Some(last) => tracing::debug!(
            state = %provider.state(),
            points = track.len(),
            lat = format!("{:.5}", last.coordinate.latitude),
            lon = format!("{:.5}", last.coordinate.longitude),
            "Track update"
        ),
        None => tracing::debug!(state = %provider.state(), "Track update (no points)"),
    }
}
