//! Coordinate type definitions

use std::fmt;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// A geographic position in decimal degrees.
///
/// No range validation is performed: values outside -90..90 / -180..180 are
/// carried through unchanged, exactly as the location source reported them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Distance in meters to `other` using the given metric.
    #[inline]
    pub fn distance_to(&self, other: &Coordinate, metric: DistanceMetric) -> f64 {
        super::distance_m(*self, *other, metric)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// How the distance between two coordinates is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Euclidean distance between spherical Web Mercator projections, scaled
    /// back to ground meters at the mean latitude. Accurate at short range.
    #[default]
    Mercator,
    /// Great-circle distance on a spherical Earth.
    Haversine,
}

impl DistanceMetric {
    /// Convert metric to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mercator => "mercator",
            Self::Haversine => "haversine",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DistanceMetric {
    type Err = ();

    /// Parse a metric from a string (case-insensitive).
    ///
    /// Valid values: "mercator", "haversine"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mercator" => Ok(Self::Mercator),
            "haversine" => Ok(Self::Haversine),
            _ => Err(()),
        }
    }
}
