//! Coordinates, validation and track geometry for the disaster-risk dashboards.
//!
//! This crate provides:
//! - `coordinate`: `Coordinate` / `TrackPoint` and the three accepted wire shapes
//! - `validate`: text-input validation for latitude/longitude pairs
//! - `distance`: haversine distance and nearest-point resolution
//! - `trajectory`: derived statistics over historical + predicted tracks

pub mod coordinate;
pub mod distance;
pub mod trajectory;
pub mod validate;

pub use coordinate::{Coordinate, CoordinateConvention, CoordinateInput, TrackPoint};
pub use distance::{haversine_km, nearest, Located};
pub use trajectory::TrajectoryStats;
pub use validate::{validate, ValidationError};
