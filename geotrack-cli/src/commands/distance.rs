//! `geotrack distance` command.

use clap::Args;
use geotrack::coord::{Coordinate, DistanceMetric};

use super::common::MetricArg;
use crate::error::CliError;

/// Arguments for the distance command.
#[derive(Debug, Args)]
pub struct DistanceArgs {
    /// Latitude of the first point in decimal degrees
    #[arg(allow_negative_numbers = true)]
    pub lat1: f64,

    /// Longitude of the first point in decimal degrees
    #[arg(allow_negative_numbers = true)]
    pub lon1: f64,

    /// Latitude of the second point in decimal degrees
    #[arg(allow_negative_numbers = true)]
    pub lat2: f64,

    /// Longitude of the second point in decimal degrees
    #[arg(allow_negative_numbers = true)]
    pub lon2: f64,

    /// Distance metric
    #[arg(long, value_enum, default_value = "mercator")]
    pub metric: MetricArg,
}

impl DistanceArgs {
    fn distance_m(&self) -> f64 {
        let a = Coordinate::new(self.lat1, self.lon1);
        let b = Coordinate::new(self.lat2, self.lon2);
        a.distance_to(&b, DistanceMetric::from(self.metric))
    }
}

/// Print the distance between the two coordinates.
pub fn run(args: DistanceArgs) -> Result<(), CliError> {
    println!("{:.3} m", args.distance_m());
    Ok(())
}
