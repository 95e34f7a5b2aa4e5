//! Track model: an append-only, ordered list of recorded points.

use uuid::Uuid;

use crate::coord::{Coordinate, DistanceMetric};

/// A single recorded position.
///
/// The `id` only gives renderers a stable identity for list diffing; it has no
/// meaning for ordering or equality of positions.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    /// Random identifier assigned at creation.
    pub id: Uuid,
    /// Recorded position.
    pub coordinate: Coordinate,
}

impl TrackPoint {
    /// Create a point with a fresh identifier.
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinate,
        }
    }
}

/// Recorded track.
///
/// Points are kept in recording order. Once appended a point is never
/// modified, removed or reordered; only the recorder can append.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    points: Vec<TrackPoint>,
}

impl Track {
    /// Create an empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// All points in recording order.
    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    /// The most recently recorded point.
    pub fn last(&self) -> Option<&TrackPoint> {
        self.points.last()
    }

    /// Number of recorded points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over points in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, TrackPoint> {
        self.points.iter()
    }

    /// Iterate over recorded coordinates in recording order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.points.iter().map(|p| p.coordinate)
    }

    /// Sum of the distances between consecutive points, in meters.
    pub fn length_m(&self, metric: DistanceMetric) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].coordinate.distance_to(&pair[1].coordinate, metric))
            .sum()
    }

    pub(crate) fn push(&mut self, point: TrackPoint) {
        self.points.push(point);
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a TrackPoint;
    type IntoIter = std::slice::Iter<'a, TrackPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_track_is_empty() {
        let track = Track::new();
        assert!(track.is_empty());
        assert_eq!(track.len(), 0);
        assert!(track.last().is_none());
        assert_eq!(track.length_m(DistanceMetric::Mercator), 0.0);
    }

    #[test]
    fn test_push_preserves_order() {
        let mut track = Track::new();
        track.push(TrackPoint::new(Coordinate::new(1.0, 1.0)));
        track.push(TrackPoint::new(Coordinate::new(2.0, 2.0)));
        track.push(TrackPoint::new(Coordinate::new(3.0, 3.0)));

        let lats: Vec<f64> = track.coordinates().map(|c| c.latitude).collect();
        assert_eq!(lats, vec![1.0, 2.0, 3.0]);
        assert_eq!(track.last().map(|p| p.coordinate.latitude), Some(3.0));
    }

    #[test]
    fn test_point_ids_are_unique() {
        let c = Coordinate::new(10.0, 20.0);
        let a = TrackPoint::new(c);
        let b = TrackPoint::new(c);
        assert_ne!(a.id, b.id);
        assert_eq!(a.coordinate, b.coordinate);
    }

    #[test]
    fn test_length_sums_segments() {
        let mut track = Track::new();
        track.push(TrackPoint::new(Coordinate::new(0.0, 0.0)));
        track.push(TrackPoint::new(Coordinate::new(0.0, 0.0001)));
        track.push(TrackPoint::new(Coordinate::new(0.0, 0.0002)));

        let length = track.length_m(DistanceMetric::Mercator);
        assert!((length - 22.264).abs() < 0.01, "got {}", length);
    }
}
