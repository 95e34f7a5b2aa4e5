//! `geotrack record` command.
//!
//! Reads coordinate samples from a file (or stdin), publishes them through a
//! [`LocationFeed`] while the recorder is recording, then stops and prints
//! the simplified track.
//!
//! Input format, one sample per line:
//!
//! ```text
//! # comment
//! 53.630278, 9.988333
//! -
//! ```
//!
//! A `-` line is a sample without a fix. Blank lines are ignored.

use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use geotrack::coord::{Coordinate, DistanceMetric};
use geotrack::recorder::{
    spawn_track_logger, RecorderConfig, RecorderEvent, SimplificationFilter, Track,
    TrackRecorder, DEFAULT_LOG_INTERVAL,
};
use geotrack::source::{AuthorizationStatus, LocationFeed, LocationFeedConfig};

use super::common::MetricArg;
use crate::error::CliError;
use crate::runner::CliRunner;

/// How long to wait for the recorder to catch up after the last sample.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Arguments for the record command.
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Sample file with one `lat,lon` per line, or `-` for stdin
    pub input: String,

    /// Delay between samples in milliseconds (default: replay.interval_ms)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Minimum distance between track points in meters; 0 or less keeps every
    /// sample (default: recorder.min_distance_m)
    #[arg(long, allow_negative_numbers = true)]
    pub min_distance: Option<f64>,

    /// Distance metric (default: recorder.distance_metric)
    #[arg(long, value_enum)]
    pub metric: Option<MetricArg>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Mirror log output to stdout
    #[arg(long)]
    pub log_stdout: bool,
}

impl RecordArgs {
    /// The configured filter with command-line overrides applied.
    fn filter(&self, base: SimplificationFilter) -> SimplificationFilter {
        SimplificationFilter::new(
            self.min_distance.unwrap_or(base.min_distance_m()),
            self.metric.map(DistanceMetric::from).unwrap_or(base.metric()),
        )
    }
}

/// Outcome of replaying a sample file.
#[derive(Debug)]
pub struct ReplaySummary {
    /// The recorded track.
    pub track: Track,
    /// Lines that produced a sample, including no-fix samples.
    pub samples: usize,
    /// Samples with a fix that the feed accepted.
    pub fixes: usize,
    /// Fixes the recorder processed before stopping.
    pub processed: usize,
    /// Metric used by the filter.
    pub metric: DistanceMetric,
}

impl ReplaySummary {
    /// Fixes dropped by the filter.
    pub fn discarded(&self) -> usize {
        self.processed.saturating_sub(self.track.len())
    }
}

/// Run the record command.
pub fn run(args: RecordArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.verbose, args.log_stdout)?;
    runner.log_startup("record");
    let config = runner.config();

    let samples = read_samples(&args.input)?;

    let recorder_config = RecorderConfig {
        filter: args.filter(config.filter()),
        ..config.recorder_config()
    };
    let interval = Duration::from_millis(args.interval_ms.unwrap_or(config.replay.interval_ms));

    let runtime = tokio::runtime::Runtime::new().map_err(CliError::Runtime)?;
    let summary = runtime.block_on(replay(
        &samples,
        recorder_config,
        config.location_feed_config(),
        interval,
    ))?;

    print_summary(&summary);
    Ok(())
}

/// Read and parse samples from a file path or `-` for stdin.
fn read_samples(input: &str) -> Result<Vec<Option<Coordinate>>, CliError> {
    let text = if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|error| CliError::FileRead {
                path: "<stdin>".to_string(),
                error,
            })?;
        text
    } else {
        std::fs::read_to_string(input).map_err(|error| CliError::FileRead {
            path: input.to_string(),
            error,
        })?
    };

    parse_samples(&text)
}

/// Parse sample lines.
pub fn parse_samples(text: &str) -> Result<Vec<Option<Coordinate>>, CliError> {
    let mut samples = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == "-" {
            samples.push(None);
            continue;
        }

        let invalid = || CliError::InvalidSample {
            line: index + 1,
            content: line.to_string(),
        };

        let (lat, lon) = line.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| invalid())?;
        samples.push(Some(Coordinate::new(latitude, longitude)));
    }

    Ok(samples)
}

/// Publish `samples` through a feed into a fresh recorder and return the track.
pub async fn replay(
    samples: &[Option<Coordinate>],
    recorder_config: RecorderConfig,
    feed_config: LocationFeedConfig,
    interval: Duration,
) -> Result<ReplaySummary, CliError> {
    let metric = recorder_config.filter.metric();

    let feed = Arc::new(LocationFeed::new(feed_config));
    feed.set_authorization_status(AuthorizationStatus::AuthorizedWhenInUse);

    let recorder = Arc::new(TrackRecorder::with_config(feed.clone(), recorder_config));
    let mut events = recorder.subscribe();

    let cancellation = CancellationToken::new();
    let logger = spawn_track_logger(recorder.clone(), cancellation.clone(), DEFAULT_LOG_INTERVAL);

    recorder.start()?;

    let mut fixes = 0;
    for (i, sample) in samples.iter().enumerate() {
        if i > 0 {
            if interval.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(interval).await;
            }
        }
        if feed.publish(*sample) && sample.is_some() {
            fixes += 1;
        }
    }

    let processed = drain_events(&mut events, fixes).await;
    if processed < fixes {
        warn!(fixes, processed, "Recorder did not process every sample before stop");
    }

    recorder.stop();
    cancellation.cancel();
    let _ = logger.await;

    let track = recorder.track();
    info!(
        samples = samples.len(),
        fixes,
        points = track.len(),
        "Replay complete"
    );

    Ok(ReplaySummary {
        track,
        samples: samples.len(),
        fixes,
        processed,
        metric,
    })
}

/// Count processed samples until `expected` is reached or the wait times out.
async fn drain_events(rx: &mut broadcast::Receiver<RecorderEvent>, expected: usize) -> usize {
    let mut processed = 0;

    let _ = tokio::time::timeout(DRAIN_TIMEOUT, async {
        while processed < expected {
            match rx.recv().await {
                Ok(RecorderEvent::PointAdded(_)) | Ok(RecorderEvent::SampleDiscarded(_)) => {
                    processed += 1;
                }
                Ok(RecorderEvent::StateChanged(_)) => {}
                Err(RecvError::Lagged(skipped)) => processed += skipped as usize,
                Err(RecvError::Closed) => break,
            }
        }
    })
    .await;

    processed.min(expected)
}

fn print_summary(summary: &ReplaySummary) {
    for point in summary.track.iter() {
        println!("{}", point.coordinate);
    }

    // Comment lines so the output can be fed back in
    println!(
        "# samples: {}, fixes: {}, kept: {}, discarded: {}",
        summary.samples,
        summary.fixes,
        summary.track.len(),
        summary.discarded()
    );
    println!(
        "# length: {:.1} m ({})",
        summary.track.length_m(summary.metric),
        summary.metric
    );
}
