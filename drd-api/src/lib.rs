//! Wire models and HTTP client for the disaster-risk prediction backends.
//!
//! Every backend response passes through [`normalize`] before it reaches a
//! workflow, so optional or renamed fields (`intensity_knots` vs
//! `intensity_value`, `predicted_track` vs `predicted_points`) never leak past
//! this crate. The reqwest client lives behind the `api` feature.

pub mod config;
pub mod deadline;
pub mod error;
pub mod models;
pub mod normalize;
pub mod service;

#[cfg(feature = "api")]
pub mod client;

pub use config::ApiConfig;
pub use error::ApiError;
pub use models::{
    EarthquakeRequest, FloodPrediction, FloodStationInfo, FloodStatus, IntensityResult,
    LandslideResult, Station, StationInfo, TrackRequest, Upload,
};
pub use service::PredictionService;

#[cfg(feature = "api")]
pub use client::HttpPredictionClient;
