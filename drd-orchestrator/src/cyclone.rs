//! Two-stage cyclone workflow: satellite-image intensity, then track forecast.
//!
//! ```text
//! Idle --begin_intensity--> IntensityPending --ok--> IntensityReady
//!                                            --err-> (previous phase)
//! IntensityReady --begin_track--> TrackPending --ok--> TrackReady
//!                                              --err-> IntensityReady
//! ```
//!
//! Intensity and track requests have separate slots and loading flags, so
//! both can be in flight at once.

use crate::coordinates::{CoordinateList, MIN_TRACK_POINTS};
use crate::slot::{Generation, RequestSlot};
use chrono::{Datelike, Local};
use drd_api::{ApiError, IntensityResult, TrackRequest, Upload};
use drd_geo::coordinate::parse_coordinate_list;
use drd_geo::{validate, Coordinate, TrackPoint, TrajectoryStats, ValidationError};
use thiserror::Error;

/// Storm speed sent with a track request before any intensity is known.
pub const DEFAULT_STORM_SPEED: f64 = 15.0;
pub const DEFAULT_NUM_STEPS: u32 = 3;
pub const MAX_NUM_STEPS: u32 = 10;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycloneError {
    #[error("Please select an image first")]
    NoImage,

    #[error(transparent)]
    InvalidCoordinate(#[from] ValidationError),

    /// Coordinate and forecast controls stay locked until an intensity exists
    #[error("Run an intensity prediction before entering track details")]
    Locked,

    #[error("At least 3 coordinate points required")]
    TooFewPoints,

    #[error("Please provide either a satellite image or at least 3 coordinate points")]
    NothingToPredict,

    #[error("Please select a valid month (1-12)")]
    InvalidMonth,

    #[error("Forecast steps must be between 1 and 10")]
    InvalidSteps,

    #[error("Intensity prediction failed: {0}")]
    IntensityFailed(ApiError),

    #[error("Track prediction failed: {0}")]
    TrackFailed(ApiError),
}

/// Whether track inputs wait for an intensity result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gating {
    /// Dashboard mode: coordinates, month and steps unlock after intensity.
    IntensityFirst,
    /// Stand-alone track predictor: always unlocked.
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclonePhase {
    Idle,
    IntensityPending,
    IntensityReady,
    TrackPending,
    TrackReady,
}

/// Forecast plus statistics computed here from the submitted history.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackResult {
    pub predicted_positions: Vec<TrackPoint>,
    pub trajectory_stats: TrajectoryStats,
}

#[derive(Debug, Clone)]
pub struct IntensityTicket {
    generation: Generation,
    pub image: Upload,
}

#[derive(Debug, Clone)]
pub struct TrackTicket {
    generation: Generation,
    /// Also the historical snapshot the statistics are computed against.
    pub request: TrackRequest,
}

/// Requests issued by one press of the combined "predict" button.
#[derive(Debug, Clone)]
pub struct CombinedTickets {
    pub intensity: Option<IntensityTicket>,
    pub track: Option<TrackTicket>,
}

#[derive(Debug, Clone)]
pub struct CycloneWorkflow {
    gating: Gating,
    image: Option<Upload>,
    coordinates: CoordinateList,
    month: Option<u32>,
    num_steps: u32,
    storm_dir: Option<f64>,
    intensity: RequestSlot<IntensityResult>,
    track: RequestSlot<TrackResult>,
    predicted_storm_speed: Option<f64>,
    error: Option<String>,
}

impl CycloneWorkflow {
    pub fn new(gating: Gating) -> Self {
        Self {
            gating,
            image: None,
            coordinates: CoordinateList::new(),
            month: None,
            num_steps: DEFAULT_NUM_STEPS,
            storm_dir: None,
            intensity: RequestSlot::new(),
            track: RequestSlot::new(),
            predicted_storm_speed: None,
            error: None,
        }
    }

    /// Record `e` as the visible error and hand it back.
    fn fail(&mut self, e: CycloneError) -> CycloneError {
        log::warn!("cyclone workflow: {}", e);
        self.error = Some(e.to_string());
        e
    }

    fn unlocked(&self) -> Result<(), CycloneError> {
        match self.gating {
            Gating::IntensityFirst if self.intensity.value().is_none() => Err(CycloneError::Locked),
            _ => Ok(()),
        }
    }

    /// Coordinate entry, month and step controls are usable.
    pub fn track_inputs_enabled(&self) -> bool {
        self.unlocked().is_ok()
    }

    pub fn select_image(&mut self, image: Option<Upload>) {
        self.image = image;
        self.error = None;
    }

    /// Validate and append a typed coordinate.
    pub fn add_coordinate(&mut self, lat_text: &str, lon_text: &str) -> Result<Coordinate, CycloneError> {
        if let Err(e) = self.unlocked() {
            return Err(self.fail(e));
        }
        let coordinate = validate(lat_text, lon_text).map_err(|e| self.fail(e.into()))?;
        self.coordinates.add(coordinate);
        self.error = None;
        Ok(coordinate)
    }

    pub fn remove_coordinate(&mut self, index: usize) -> Option<Coordinate> {
        self.coordinates.remove_at(index)
    }

    /// Replace the list wholesale, e.g. from a saved path. Not re-validated.
    pub fn replace_coordinates(&mut self, coordinates: Vec<Coordinate>) -> Result<(), CycloneError> {
        if let Err(e) = self.unlocked() {
            return Err(self.fail(e));
        }
        self.coordinates.replace(coordinates);
        self.error = None;
        Ok(())
    }

    /// Replace the list from pasted JSON in any accepted coordinate shape.
    pub fn import_coordinates(&mut self, json: &str) -> Result<usize, CycloneError> {
        if let Err(e) = self.unlocked() {
            return Err(self.fail(e));
        }
        let coordinates = parse_coordinate_list(json).map_err(|e| self.fail(e.into()))?;
        let count = coordinates.len();
        self.coordinates.replace(coordinates);
        self.error = None;
        Ok(count)
    }

    pub fn set_month(&mut self, month: Option<u32>) -> Result<(), CycloneError> {
        if let Err(e) = self.unlocked() {
            return Err(self.fail(e));
        }
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(self.fail(CycloneError::InvalidMonth));
            }
        }
        self.month = month;
        Ok(())
    }

    pub fn set_num_steps(&mut self, steps: u32) -> Result<(), CycloneError> {
        if let Err(e) = self.unlocked() {
            return Err(self.fail(e));
        }
        if !(1..=MAX_NUM_STEPS).contains(&steps) {
            return Err(self.fail(CycloneError::InvalidSteps));
        }
        self.num_steps = steps;
        Ok(())
    }

    /// Heading in degrees; `None` lets the backend derive it.
    pub fn set_storm_dir(&mut self, storm_dir: Option<f64>) {
        self.storm_dir = storm_dir;
    }

    pub fn begin_intensity(&mut self) -> Result<IntensityTicket, CycloneError> {
        let Some(image) = self.image.clone() else {
            return Err(self.fail(CycloneError::NoImage));
        };
        self.error = None;
        let generation = self.intensity.begin();
        log::debug!("intensity request issued for {}", image.file_name);
        Ok(IntensityTicket { generation, image })
    }

    /// Apply an intensity outcome. Returns false when the ticket was stale.
    pub fn finish_intensity(
        &mut self,
        ticket: IntensityTicket,
        outcome: Result<IntensityResult, ApiError>,
    ) -> bool {
        if !self.intensity.settle(ticket.generation) {
            return false;
        }
        match outcome {
            Ok(result) => {
                log::debug!("intensity ready: {} kt", result.intensity_value);
                self.predicted_storm_speed = Some(result.intensity_value);
                self.intensity.set(result);
            }
            Err(e) => {
                self.fail(CycloneError::IntensityFailed(e));
            }
        }
        true
    }

    fn check_track_preconditions(&self) -> Result<(), CycloneError> {
        self.unlocked()?;
        if self.coordinates.count() < MIN_TRACK_POINTS {
            return Err(CycloneError::TooFewPoints);
        }
        Ok(())
    }

    fn issue_track(&mut self) -> TrackTicket {
        let request = TrackRequest {
            coordinates: self.coordinates.to_vec(),
            month: self.forecast_month(),
            num_steps: self.num_steps,
            storm_speed: self.storm_speed(),
            storm_dir: self.storm_dir,
        };
        let generation = self.track.begin();
        log::debug!(
            "track request issued: {} points, speed {}",
            request.coordinates.len(),
            request.storm_speed
        );
        TrackTicket {
            generation,
            request,
        }
    }

    pub fn begin_track(&mut self) -> Result<TrackTicket, CycloneError> {
        if let Err(e) = self.check_track_preconditions() {
            return Err(self.fail(e));
        }
        self.error = None;
        Ok(self.issue_track())
    }

    /// Apply a track outcome. Returns false when the ticket was stale.
    pub fn finish_track(
        &mut self,
        ticket: TrackTicket,
        outcome: Result<Vec<TrackPoint>, ApiError>,
    ) -> bool {
        if !self.track.settle(ticket.generation) {
            return false;
        }
        match outcome {
            Ok(points) => {
                let predicted: Vec<Coordinate> = points.iter().map(TrackPoint::position).collect();
                let trajectory_stats =
                    TrajectoryStats::compute(&ticket.request.coordinates, &predicted);
                self.track.set(TrackResult {
                    predicted_positions: points,
                    trajectory_stats,
                });
            }
            Err(e) => {
                self.fail(CycloneError::TrackFailed(e));
            }
        }
        true
    }

    /// Issue whatever the current inputs allow: intensity when an image is
    /// selected, track when there are enough coordinates.
    pub fn begin_combined(&mut self) -> Result<CombinedTickets, CycloneError> {
        let wants_track = self.coordinates.count() >= MIN_TRACK_POINTS;
        if self.image.is_none() && !wants_track {
            return Err(self.fail(CycloneError::NothingToPredict));
        }
        if wants_track {
            if let Err(e) = self.check_track_preconditions() {
                return Err(self.fail(e));
            }
        }
        self.error = None;
        let intensity = match self.image.clone() {
            Some(image) => Some(IntensityTicket {
                generation: self.intensity.begin(),
                image,
            }),
            None => None,
        };
        let track = wants_track.then(|| self.issue_track());
        Ok(CombinedTickets { intensity, track })
    }

    /// Empty the coordinate list together with everything derived from it.
    /// An in-flight track response is discarded when it lands.
    pub fn clear(&mut self) {
        self.coordinates.clear();
        self.track.clear();
        self.error = None;
    }

    /// Back to `Idle`, forgetting the image and intensity too.
    pub fn reset(&mut self) {
        self.clear();
        self.intensity.clear();
        self.image = None;
        self.predicted_storm_speed = None;
        self.month = None;
        self.num_steps = DEFAULT_NUM_STEPS;
        self.storm_dir = None;
    }

    pub fn phase(&self) -> CyclonePhase {
        if self.track.is_loading() {
            CyclonePhase::TrackPending
        } else if self.intensity.is_loading() {
            CyclonePhase::IntensityPending
        } else if self.track.value().is_some() {
            CyclonePhase::TrackReady
        } else if self.intensity.value().is_some() {
            CyclonePhase::IntensityReady
        } else {
            CyclonePhase::Idle
        }
    }

    pub fn gating(&self) -> Gating {
        self.gating
    }

    pub fn image(&self) -> Option<&Upload> {
        self.image.as_ref()
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        self.coordinates.as_slice()
    }

    pub fn intensity(&self) -> Option<&IntensityResult> {
        self.intensity.value()
    }

    pub fn track(&self) -> Option<&TrackResult> {
        self.track.value()
    }

    pub fn intensity_loading(&self) -> bool {
        self.intensity.is_loading()
    }

    pub fn track_loading(&self) -> bool {
        self.track.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn num_steps(&self) -> u32 {
        self.num_steps
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    /// Selected month, or the current calendar month.
    pub fn forecast_month(&self) -> u32 {
        self.month.unwrap_or_else(|| Local::now().month())
    }

    /// Last non-zero intensity, or [`DEFAULT_STORM_SPEED`].
    pub fn storm_speed(&self) -> f64 {
        self.predicted_storm_speed
            .filter(|s| *s > 0.0)
            .unwrap_or(DEFAULT_STORM_SPEED)
    }

    /// Most recent historical point.
    pub fn current_position(&self) -> Option<Coordinate> {
        self.coordinates.last()
    }

    /// Intensity in knots for map styling; zero counts as unknown.
    pub fn intensity_knots(&self) -> Option<f64> {
        self.intensity
            .value()
            .map(|r| r.intensity_value)
            .filter(|v| *v > 0.0)
    }

    pub fn predicted_positions(&self) -> &[TrackPoint] {
        self.track
            .value()
            .map(|t| t.predicted_positions.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for CycloneWorkflow {
    fn default() -> Self {
        Self::new(Gating::IntensityFirst)
    }
}
