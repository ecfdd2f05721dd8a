//! Statistics derived from a historical track followed by its predicted continuation.
//!
//! Both figures are coarse by design of the dashboard: `avg_speed` is a mean
//! step length in degree space, `total_distance_km` an equirectangular sum at
//! 111 km per degree.

use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};

/// Kilometres per degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryStats {
    /// Degree-space path length divided by the number of predicted steps.
    pub avg_speed: f64,
    pub total_distance_km: f64,
}

fn planar_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = b.latitude - a.latitude;
    let d_lon = b.longitude - a.longitude;
    (d_lat * d_lat + d_lon * d_lon).sqrt()
}

fn equirectangular_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let mean_lat = ((a.latitude + b.latitude) / 2.0).to_radians();
    let d_lat = (b.latitude - a.latitude) * KM_PER_DEGREE;
    let d_lon = (b.longitude - a.longitude) * KM_PER_DEGREE * mean_lat.cos();
    (d_lat * d_lat + d_lon * d_lon).sqrt()
}

impl TrajectoryStats {
    /// Compute both statistics over `historical ++ predicted`.
    ///
    /// Returns zeros when nothing was predicted.
    pub fn compute(historical: &[Coordinate], predicted: &[Coordinate]) -> Self {
        if predicted.is_empty() {
            return Self::default();
        }
        let all: Vec<&Coordinate> = historical.iter().chain(predicted.iter()).collect();
        let (planar, km) = all.windows(2).fold((0.0, 0.0), |(planar, km), pair| {
            (
                planar + planar_distance(pair[0], pair[1]),
                km + equirectangular_km(pair[0], pair[1]),
            )
        });
        TrajectoryStats {
            avg_speed: planar / predicted.len().max(1) as f64,
            total_distance_km: km,
        }
    }
}
