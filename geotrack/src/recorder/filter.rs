//! Distance-based track simplification.
//!
//! A live GPS stream keeps emitting fixes even when the device is standing
//! still. The filter keeps a candidate only if it is farther than a minimum
//! distance from the last kept point, so the track follows the path travelled
//! without piling up near-duplicates.

use crate::coord::{Coordinate, DistanceMetric};

use super::track::Track;

/// Default minimum distance between kept points, in meters.
pub const DEFAULT_MIN_DISTANCE_M: f64 = 10.0;

/// Decides which incoming samples are appended to a track.
///
/// The decision depends only on the candidate and the track's last point:
/// there is no hysteresis and discarded samples are never reconsidered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplificationFilter {
    min_distance_m: f64,
    metric: DistanceMetric,
}

impl Default for SimplificationFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DISTANCE_M, DistanceMetric::default())
    }
}

impl SimplificationFilter {
    /// Create a filter with the given threshold and metric.
    ///
    /// A threshold of zero or less disables filtering.
    pub fn new(min_distance_m: f64, metric: DistanceMetric) -> Self {
        Self {
            min_distance_m,
            metric,
        }
    }

    /// A filter that keeps every sample.
    pub fn unfiltered() -> Self {
        Self::new(0.0, DistanceMetric::default())
    }

    /// Minimum distance in meters a candidate must exceed to be kept.
    pub fn min_distance_m(&self) -> f64 {
        self.min_distance_m
    }

    /// Metric used to compare candidates with the last point.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// True when samples can be discarded at all.
    pub fn is_enabled(&self) -> bool {
        self.min_distance_m > 0.0
    }

    /// Returns true if `candidate` should be appended to `track`.
    ///
    /// The first point of an empty track is always kept. Otherwise the
    /// candidate must be strictly farther than the threshold from the last
    /// point. A candidate whose distance is not a number never qualifies.
    pub fn should_keep(&self, candidate: &Coordinate, track: &Track) -> bool {
        let Some(last) = track.last() else {
            return true;
        };

        if !self.is_enabled() {
            return true;
        }

        candidate.distance_to(&last.coordinate, self.metric) > self.min_distance_m
    }
}


/// Property-based tests for the filter applied over whole sample sequences.
#[cfg(test)]
mod proptests {
    use super::super::track::TrackPoint;
    use super::*;
    use proptest::prelude::*;

    /// A walk of small random steps, so some samples land inside the
    /// threshold and some outside.
    fn walk() -> impl Strategy<Value = Vec<Coordinate>> {
        (
            -80.0f64..80.0,
            -179.0f64..179.0,
            prop::collection::vec((-0.0003f64..0.0003, -0.0003f64..0.0003), 1..60),
        )
            .prop_map(|(lat, lon, steps)| {
                let mut current = Coordinate::new(lat, lon);
                let mut samples = vec![current];
                for (dlat, dlon) in steps {
                    current = Coordinate::new(current.latitude + dlat, current.longitude + dlon);
                    samples.push(current);
                }
                samples
            })
    }

    fn any_metric() -> impl Strategy<Value = DistanceMetric> {
        prop_oneof![Just(DistanceMetric::Mercator), Just(DistanceMetric::Haversine)]
    }

    /// Feed `samples` through the filter the way the recorder does.
    fn record(filter: &SimplificationFilter, samples: &[Coordinate]) -> Track {
        let mut track = Track::new();
        for sample in samples {
            if filter.should_keep(sample, &track) {
                track.push(TrackPoint::new(*sample));
            }
        }
        track
    }

    proptest! {
        /// The first sample of any sequence is kept.
        #[test]
        fn prop_first_sample_kept(samples in walk(), metric in any_metric()) {
            let filter = SimplificationFilter::new(DEFAULT_MIN_DISTANCE_M, metric);
            let track = record(&filter, &samples);
            prop_assert_eq!(track.points()[0].coordinate, samples[0]);
        }

        /// The track is a subsequence of the input, in arrival order.
        #[test]
        fn prop_track_is_ordered_subsequence(samples in walk(), metric in any_metric()) {
            let filter = SimplificationFilter::new(DEFAULT_MIN_DISTANCE_M, metric);
            let track = record(&filter, &samples);

            prop_assert!(track.len() <= samples.len());
            let mut remaining = samples.iter();
            for point in &track {
                prop_assert!(
                    remaining.any(|s| *s == point.coordinate),
                    "{} out of order",
                    point.coordinate
                );
            }
        }

        /// Consecutive track points are farther apart than the threshold.
        #[test]
        fn prop_consecutive_points_exceed_threshold(
            samples in walk(),
            min_distance_m in 0.5f64..30.0,
            metric in any_metric(),
        ) {
            let filter = SimplificationFilter::new(min_distance_m, metric);
            let track = record(&filter, &samples);

            for pair in track.points().windows(2) {
                let d = pair[1].coordinate.distance_to(&pair[0].coordinate, metric);
                prop_assert!(d > min_distance_m, "{} <= {}", d, min_distance_m);
            }
        }

        /// Asking twice with the same track gives the same answer.
        #[test]
        fn prop_should_keep_is_idempotent(
            samples in walk(),
            lat in -80.0f64..80.0,
            lon in -179.0f64..179.0,
            metric in any_metric(),
        ) {
            let filter = SimplificationFilter::new(DEFAULT_MIN_DISTANCE_M, metric);
            let track = record(&filter, &samples);
            let before = track.clone();
            let candidate = Coordinate::new(lat, lon);

            let first = filter.should_keep(&candidate, &track);
            let second = filter.should_keep(&candidate, &track);
            prop_assert_eq!(first, second);
            prop_assert_eq!(track, before);
        }

        /// Without a threshold every sample is kept.
        #[test]
        fn prop_unfiltered_keeps_all(samples in walk()) {
            let track = record(&SimplificationFilter::unfiltered(), &samples);
            prop_assert_eq!(track.len(), samples.len());
        }
    }
}
