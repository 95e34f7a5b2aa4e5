//! Common types shared across CLI commands.

use clap::ValueEnum;
use geotrack::coord::DistanceMetric;

/// Distance metric selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum MetricArg {
    /// Web Mercator planar distance, scaled to ground meters
    Mercator,
    /// Great-circle distance
    Haversine,
}

impl From<MetricArg> for DistanceMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Mercator => DistanceMetric::Mercator,
            MetricArg::Haversine => DistanceMetric::Haversine,
        }
    }
}
