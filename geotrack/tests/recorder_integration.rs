//! Integration tests for the track recorder.
//!
//! These tests drive the recorder end to end through a `LocationFeed`:
//! - Samples → Filter → Track (ordering, thinning, first point)
//! - Start/stop transitions and their effect on subscriptions
//! - Authorization and inactive-source behavior
//!
//! Run with: `cargo test --test recorder_integration`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use geotrack::coord::{Coordinate, DistanceMetric};
use geotrack::recorder::{
    RecorderConfig, RecorderEvent, RecorderState, SimplificationFilter, TrackBroadcaster,
    TrackProvider, TrackRecorder, DEFAULT_MIN_DISTANCE_M,
};
use geotrack::source::{AuthorizationStatus, LocationFeed, LocationSource, LocationStream};

// ============================================================================
// Test Helpers
// ============================================================================

/// Create an authorized feed and a recorder reading from it.
fn create_recorder() -> (Arc<TrackRecorder>, Arc<LocationFeed>) {
    let feed = Arc::new(LocationFeed::with_defaults());
    feed.set_authorization_status(AuthorizationStatus::AuthorizedWhenInUse);
    let recorder = Arc::new(TrackRecorder::new(feed.clone()));
    (recorder, feed)
}

/// Wait until `count` samples have been either added or discarded.
async fn wait_for_samples(rx: &mut broadcast::Receiver<RecorderEvent>, count: usize) {
    let result = tokio::time::timeout(Duration::from_secs(5), async {
        let mut seen = 0;
        while seen < count {
            match rx.recv().await {
                Ok(RecorderEvent::PointAdded(_)) | Ok(RecorderEvent::SampleDiscarded(_)) => {
                    seen += 1
                }
                Ok(RecorderEvent::StateChanged(_)) => {}
                Err(broadcast::error::RecvError::Lagged(n)) => seen += n as usize,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
    .await;
    assert!(result.is_ok(), "timed out waiting for {} samples", count);
}

/// Let spawned tasks run for a moment.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

fn coords(recorder: &TrackRecorder) -> Vec<Coordinate> {
    recorder.track().coordinates().collect()
}

/// Location source that counts how many streams were opened.
struct CountingSource {
    inner: Arc<LocationFeed>,
    opened: AtomicUsize,
}

impl CountingSource {
    fn new(inner: Arc<LocationFeed>) -> Self {
        Self {
            inner,
            opened: AtomicUsize::new(0),
        }
    }

    fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl LocationSource for CountingSource {
    fn locations(&self) -> LocationStream {
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.inner.locations()
    }

    fn set_active(&self, active: bool) {
        self.inner.set_active(active);
    }
}

// ============================================================================
// Filtering
// ============================================================================

#[tokio::test]
async fn test_ten_meter_scenario() {
    let (recorder, feed) = create_recorder();
    let mut events = recorder.subscribe();
    recorder.set_recording(true).unwrap();

    feed.publish(Some(Coordinate::new(0.0, 0.0)));
    feed.publish(Some(Coordinate::new(0.0, 0.00005)));
    feed.publish(Some(Coordinate::new(0.0, 0.0001)));
    wait_for_samples(&mut events, 3).await;

    assert_eq!(
        coords(&recorder),
        vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0001)]
    );
}

#[tokio::test]
async fn test_track_is_ordered_thinned_subsequence() {
    let (recorder, feed) = create_recorder();
    let mut events = recorder.subscribe();
    recorder.start().unwrap();

    // Walk east in uneven steps, several of them under the threshold
    let steps = [0.0, 0.00002, 0.00012, 0.00013, 0.00028, 0.00030, 0.00031, 0.00045];
    let samples: Vec<Coordinate> = steps
        .iter()
        .map(|lon| Coordinate::new(47.0, 8.0 + lon))
        .collect();
    for sample in &samples {
        feed.publish(Some(*sample));
    }
    wait_for_samples(&mut events, samples.len()).await;

    let track = coords(&recorder);
    assert!(!track.is_empty());
    assert_eq!(track[0], samples[0], "first sample is always kept");

    // Subsequence of the input, in arrival order
    let mut remaining = samples.iter();
    for point in &track {
        assert!(
            remaining.any(|s| s == point),
            "{} is not in input order",
            point
        );
    }

    // Consecutive kept points are farther apart than the threshold
    for pair in track.windows(2) {
        let d = pair[0].distance_to(&pair[1], DistanceMetric::Mercator);
        assert!(d > DEFAULT_MIN_DISTANCE_M, "points only {:.2} m apart", d);
    }
    assert!(track.len() < samples.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_burst_reaches_filter_in_full() {
    let (recorder, feed) = create_recorder();
    let mut events = recorder.subscribe();
    recorder.start().unwrap();

    // 0.001° of longitude at the equator is about 111 m, so every sample is kept
    let count = 300;
    for i in 0..count {
        assert!(feed.publish(Some(Coordinate::new(0.0, i as f64 * 0.001))));
    }
    wait_for_samples(&mut events, count).await;
    recorder.stop();

    let track = coords(&recorder);
    assert_eq!(track.len(), count);
    for (i, point) in track.iter().enumerate() {
        assert_eq!(*point, Coordinate::new(0.0, i as f64 * 0.001));
    }
}

#[tokio::test]
async fn test_no_fix_samples_are_skipped() {
    let (recorder, feed) = create_recorder();
    let mut events = recorder.subscribe();
    recorder.start().unwrap();

    feed.publish(None);
    feed.publish(Some(Coordinate::new(1.0, 1.0)));
    feed.publish(None);
    feed.publish(Some(Coordinate::new(1.0, 1.001)));
    wait_for_samples(&mut events, 2).await;

    assert_eq!(
        coords(&recorder),
        vec![Coordinate::new(1.0, 1.0), Coordinate::new(1.0, 1.001)]
    );
}

#[tokio::test]
async fn test_unfiltered_recorder_keeps_everything() {
    let feed = Arc::new(LocationFeed::with_defaults());
    let config = RecorderConfig {
        filter: SimplificationFilter::unfiltered(),
        ..Default::default()
    };
    let recorder = TrackRecorder::with_config(feed.clone(), config);
    let mut events = recorder.subscribe();
    recorder.start().unwrap();

    for _ in 0..4 {
        feed.publish(Some(Coordinate::new(0.0, 0.0)));
    }
    wait_for_samples(&mut events, 4).await;

    assert_eq!(recorder.point_count(), 4);
}

// ============================================================================
// Transitions
// ============================================================================

#[tokio::test]
async fn test_cancel_immediately_after_start() {
    let (recorder, feed) = create_recorder();
    recorder.start().unwrap();

    // The consumer task has not run yet on this single-threaded runtime
    feed.publish(Some(Coordinate::new(0.0, 0.0)));
    feed.publish(Some(Coordinate::new(0.0, 1.0)));
    recorder.stop();
    settle().await;

    assert_eq!(recorder.state(), RecorderState::Idle);
    assert!(recorder.track().is_empty());
}

#[tokio::test]
async fn test_stop_then_start_without_samples_keeps_track() {
    let (recorder, feed) = create_recorder();
    let mut events = recorder.subscribe();
    recorder.start().unwrap();
    feed.publish(Some(Coordinate::new(52.5, 13.4)));
    wait_for_samples(&mut events, 1).await;

    let before = recorder.track();
    recorder.stop();
    recorder.start().unwrap();
    settle().await;

    assert_eq!(recorder.track(), before);
}

#[tokio::test]
async fn test_no_samples_after_stop() {
    let (recorder, feed) = create_recorder();
    let mut events = recorder.subscribe();
    recorder.start().unwrap();
    feed.publish(Some(Coordinate::new(0.0, 0.0)));
    wait_for_samples(&mut events, 1).await;

    recorder.stop();
    assert!(!feed.publish(Some(Coordinate::new(0.0, 1.0))));
    settle().await;

    assert_eq!(recorder.point_count(), 1);
}

#[tokio::test]
async fn test_restart_appends_to_same_track() {
    let (recorder, feed) = create_recorder();
    let mut events = recorder.subscribe();

    recorder.start().unwrap();
    feed.publish(Some(Coordinate::new(0.0, 0.0)));
    wait_for_samples(&mut events, 1).await;
    recorder.stop();

    recorder.start().unwrap();
    feed.publish(Some(Coordinate::new(0.0, 0.0001)));
    wait_for_samples(&mut events, 1).await;
    recorder.stop();

    assert_eq!(
        coords(&recorder),
        vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0001)]
    );
}

#[tokio::test]
async fn test_redundant_toggles_open_one_stream() {
    let feed = Arc::new(LocationFeed::with_defaults());
    let source = Arc::new(CountingSource::new(feed.clone()));
    let recorder = TrackRecorder::new(source.clone());
    let mut events = recorder.subscribe();

    assert!(recorder.set_recording(true).unwrap());
    assert!(!recorder.set_recording(true).unwrap());
    assert!(!recorder.set_recording(true).unwrap());
    assert_eq!(source.opened(), 1);

    // A single consumer means a single point per sample
    feed.publish(Some(Coordinate::new(10.0, 10.0)));
    wait_for_samples(&mut events, 1).await;
    settle().await;
    assert_eq!(recorder.point_count(), 1);

    assert!(recorder.set_recording(false).unwrap());
    assert!(!recorder.set_recording(false).unwrap());
    assert_eq!(source.opened(), 1);
}

#[tokio::test]
async fn test_state_changes_are_broadcast() {
    let (recorder, _feed) = create_recorder();
    let mut events = recorder.subscribe();

    recorder.toggle().unwrap();
    recorder.toggle().unwrap();

    assert_eq!(
        events.recv().await.unwrap(),
        RecorderEvent::StateChanged(RecorderState::Recording)
    );
    assert_eq!(
        events.recv().await.unwrap(),
        RecorderEvent::StateChanged(RecorderState::Idle)
    );
}

// ============================================================================
// Source Behavior
// ============================================================================

#[tokio::test]
async fn test_denied_authorization_records_nothing() {
    let feed = Arc::new(LocationFeed::with_defaults());
    feed.set_authorization_status(AuthorizationStatus::Denied);
    let recorder = TrackRecorder::new(feed.clone());
    recorder.start().unwrap();

    assert!(!feed.publish(Some(Coordinate::new(0.0, 0.0))));
    settle().await;

    assert!(recorder.is_recording());
    assert!(recorder.track().is_empty());
}

#[tokio::test]
async fn test_closed_source_leaves_recorder_recording() {
    let (recorder, feed) = create_recorder();
    let mut events = recorder.subscribe();
    recorder.start().unwrap();
    feed.publish(Some(Coordinate::new(0.0, 0.0)));
    wait_for_samples(&mut events, 1).await;

    feed.close();
    settle().await;

    assert!(recorder.is_recording());
    assert_eq!(recorder.point_count(), 1);
    assert!(recorder.stop());
}

#[tokio::test]
async fn test_provider_view_matches_recorder() {
    let (recorder, feed) = create_recorder();
    let provider: Arc<dyn TrackProvider> = Arc::new(recorder.clone());
    let mut events = recorder.subscribe();

    recorder.start().unwrap();
    feed.publish(Some(Coordinate::new(-33.86, 151.21)));
    wait_for_samples(&mut events, 1).await;

    assert!(provider.is_recording());
    assert_eq!(provider.point_count(), 1);
    assert_eq!(provider.track(), recorder.track());
}
