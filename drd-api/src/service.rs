//! The prediction backends as seen by the workflows.

use crate::error::ApiError;
use crate::models::{
    EarthquakeRequest, FloodPrediction, IntensityResult, LandslideResult, PredictedTrack, Station,
    StationInfo, TrackRequest, Upload,
};
use async_trait::async_trait;

/// All external prediction calls the dashboards make.
///
/// Implementations return already-normalized models. Futures are not `Send`
/// because the browser fetch backend is single-threaded.
#[async_trait(?Send)]
pub trait PredictionService {
    /// `POST /api/intensity/predict` with multipart field `file`.
    async fn predict_intensity(&self, image: &Upload) -> Result<IntensityResult, ApiError>;

    /// `POST /api/track/predict`.
    async fn predict_track(&self, request: &TrackRequest) -> Result<PredictedTrack, ApiError>;

    /// `GET /flood/stations`.
    async fn flood_stations(&self) -> Result<Vec<Station>, ApiError>;

    /// `POST /flood/predict`.
    async fn predict_flood(&self, station: &StationInfo) -> Result<FloodPrediction, ApiError>;

    /// `POST /earthquake/predict`, returning the risk level label.
    async fn predict_earthquake(&self, request: &EarthquakeRequest) -> Result<String, ApiError>;

    /// `POST /predict_all` with a `.h5`/`.hdf5` archive.
    async fn predict_landslide(&self, archive: &Upload) -> Result<LandslideResult, ApiError>;
}
