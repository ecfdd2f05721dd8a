//! Station-based flood workflow.
//!
//! `NoSelection --select_station--> Predicting --ok--> Resolved`, with a
//! failed prediction falling back to `NoSelection`. "Use my location" only
//! nominates a candidate station; predicting it takes an explicit
//! [`FloodWorkflow::confirm_candidate`].

use crate::geolocation::GeolocationError;
use crate::slot::{Generation, RequestSlot};
use drd_api::{ApiError, FloodPrediction, Station, StationInfo};
use drd_geo::{nearest, Coordinate};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FloodError {
    #[error("Failed to load station data")]
    StationsFailed(ApiError),

    #[error("Station data not loaded yet. Please try again.")]
    StationsNotLoaded,

    /// Server-provided detail when there is one
    #[error("{}", prediction_failure(.0))]
    PredictionFailed(ApiError),

    #[error("No station found nearby")]
    NoStationNearby,

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    #[error("No nearby station to confirm")]
    NoCandidate,
}

fn prediction_failure(e: &ApiError) -> &str {
    e.detail().unwrap_or("Prediction failed. Please try again.")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodPhase {
    NoSelection,
    Predicting,
    Resolved,
}

#[derive(Debug, Clone)]
pub struct StationsTicket {
    generation: Generation,
}

/// A prediction request for exactly one station.
#[derive(Debug, Clone)]
pub struct FloodTicket {
    generation: Generation,
    /// Sent verbatim as the request body.
    pub info: StationInfo,
}

#[derive(Debug, Clone)]
pub struct LocateTicket {
    generation: Generation,
}

#[derive(Debug, Clone, Default)]
pub struct FloodWorkflow {
    stations: RequestSlot<Vec<Station>>,
    prediction: RequestSlot<FloodPrediction>,
    /// Value is the nearest-station candidate; loading means "locating".
    locate: RequestSlot<StationInfo>,
    selected: Option<StationInfo>,
    error: Option<String>,
}

impl FloodWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, e: FloodError) -> FloodError {
        log::warn!("flood workflow: {}", e);
        self.error = Some(e.to_string());
        e
    }

    pub fn begin_stations(&mut self) -> StationsTicket {
        StationsTicket {
            generation: self.stations.begin(),
        }
    }

    pub fn finish_stations(
        &mut self,
        ticket: StationsTicket,
        outcome: Result<Vec<Station>, ApiError>,
    ) -> Result<(), FloodError> {
        if !self.stations.settle(ticket.generation) {
            return Ok(());
        }
        match outcome {
            Ok(stations) => {
                log::info!("loaded {} flood stations", stations.len());
                self.stations.set(stations);
                Ok(())
            }
            Err(e) => Err(self.fail(FloodError::StationsFailed(e))),
        }
    }

    /// Select `station` and issue its prediction, discarding the last result.
    pub fn select_station(&mut self, station: &StationInfo) -> FloodTicket {
        let info = station.clone();
        self.selected = Some(info.clone());
        self.prediction.clear();
        self.error = None;
        let generation = self.prediction.begin();
        log::debug!("predicting flood risk for {}", info.name);
        FloodTicket { generation, info }
    }

    /// Apply a prediction outcome. Returns false when the ticket was stale.
    pub fn finish_prediction(
        &mut self,
        ticket: FloodTicket,
        outcome: Result<FloodPrediction, ApiError>,
    ) -> bool {
        if !self.prediction.settle(ticket.generation) {
            return false;
        }
        match outcome {
            Ok(prediction) => {
                log::debug!("{}: {:?}", ticket.info.name, prediction.status);
                self.prediction.set(prediction);
            }
            Err(e) => {
                self.selected = None;
                self.fail(FloodError::PredictionFailed(e));
            }
        }
        true
    }

    /// Back to `NoSelection`. An in-flight prediction is discarded when it lands.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.prediction.clear();
        self.error = None;
    }

    pub fn begin_locate(&mut self) -> LocateTicket {
        self.error = None;
        LocateTicket {
            generation: self.locate.begin(),
        }
    }

    /// Resolve a device position to the nearest catalog station and hold it
    /// as the candidate. Never predicts.
    pub fn finish_locate(
        &mut self,
        ticket: LocateTicket,
        outcome: Result<Coordinate, GeolocationError>,
    ) -> Result<Option<StationInfo>, FloodError> {
        if !self.locate.settle(ticket.generation) {
            return Ok(None);
        }
        let position = outcome.map_err(|e| self.fail(e.into()))?;
        let Some(stations) = self.stations.value() else {
            return Err(self.fail(FloodError::StationsNotLoaded));
        };
        let Some(station) = nearest(&position, stations) else {
            return Err(self.fail(FloodError::NoStationNearby));
        };
        let mut candidate = station.info();
        candidate.name = station.located_name().to_string();
        log::debug!("nearest station to {:?} is {}", position, candidate.name);
        self.locate.set(candidate.clone());
        Ok(Some(candidate))
    }

    /// Predict the candidate found by the last locate, through the same path
    /// as a station click.
    pub fn confirm_candidate(&mut self) -> Result<FloodTicket, FloodError> {
        let Some(candidate) = self.locate.take() else {
            return Err(self.fail(FloodError::NoCandidate));
        };
        Ok(self.select_station(&candidate))
    }

    pub fn phase(&self) -> FloodPhase {
        if self.prediction.is_loading() {
            FloodPhase::Predicting
        } else if self.prediction.value().is_some() {
            FloodPhase::Resolved
        } else {
            FloodPhase::NoSelection
        }
    }

    pub fn stations(&self) -> &[Station] {
        self.stations.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn stations_loading(&self) -> bool {
        self.stations.is_loading()
    }

    pub fn selected(&self) -> Option<&StationInfo> {
        self.selected.as_ref()
    }

    pub fn candidate(&self) -> Option<&StationInfo> {
        self.locate.value()
    }

    pub fn prediction(&self) -> Option<&FloodPrediction> {
        self.prediction.value()
    }

    pub fn loading(&self) -> bool {
        self.prediction.is_loading()
    }

    pub fn locating(&self) -> bool {
        self.locate.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Where the map should fly: the selected station, else the candidate.
    pub fn focus(&self) -> Option<Coordinate> {
        self.selected
            .as_ref()
            .or(self.locate.value())
            .map(StationInfo::position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drd_api::FloodStatus;

    fn station(name: &str, lat: f64, lon: f64) -> Station {
        Station {
            name: name.into(),
            station_name: String::new(),
            latitude: lat,
            longitude: lon,
            state: "Assam".into(),
            district: "Kamrup".into(),
            basin: "Brahmaputra".into(),
            river: "Brahmaputra".into(),
        }
    }

    fn loaded() -> FloodWorkflow {
        let mut wf = FloodWorkflow::new();
        let t = wf.begin_stations();
        wf.finish_stations(t, Ok(vec![station("A", 0.0, 0.0), station("B", 10.0, 10.0)]))
            .unwrap();
        wf
    }

    fn danger() -> FloodPrediction {
        FloodPrediction {
            status: FloodStatus::Danger,
            probability: 0.91,
            ..Default::default()
        }
    }

    #[test]
    fn test_select_predict_resolve() {
        let mut wf = loaded();
        let info = wf.stations()[1].info();
        let t = wf.select_station(&info);
        assert_eq!(t.info, info);
        assert_eq!(wf.phase(), FloodPhase::Predicting);
        assert!(wf.finish_prediction(t, Ok(danger())));
        assert_eq!(wf.phase(), FloodPhase::Resolved);
        assert_eq!(wf.prediction().unwrap().status, FloodStatus::Danger);
    }

    #[test]
    fn test_failure_returns_to_no_selection_with_detail() {
        let mut wf = loaded();
        let t = wf.select_station(&wf.stations()[0].info());
        wf.finish_prediction(
            t,
            Err(ApiError::Status {
                status: 404,
                detail: Some("Station not found".into()),
            }),
        );
        assert_eq!(wf.phase(), FloodPhase::NoSelection);
        assert!(wf.selected().is_none());
        assert!(!wf.loading());
        assert_eq!(wf.error(), Some("Station not found"));
    }

    #[test]
    fn test_failure_without_detail_uses_fallback() {
        let mut wf = loaded();
        let t = wf.select_station(&wf.stations()[0].info());
        wf.finish_prediction(t, Err(ApiError::Timeout(30000)));
        assert_eq!(wf.error(), Some("Prediction failed. Please try again."));
    }

    #[test]
    fn test_clear_selection_discards_in_flight() {
        let mut wf = loaded();
        let t = wf.select_station(&wf.stations()[0].info());
        wf.clear_selection();
        assert!(!wf.finish_prediction(t, Ok(danger())));
        assert_eq!(wf.phase(), FloodPhase::NoSelection);
        assert!(wf.prediction().is_none());
    }

    #[test]
    fn test_newer_selection_wins() {
        let mut wf = loaded();
        let first = wf.select_station(&wf.stations()[0].info());
        let second = wf.select_station(&wf.stations()[1].info());
        assert!(!wf.finish_prediction(first, Ok(danger())));
        assert_eq!(wf.phase(), FloodPhase::Predicting);
        assert!(wf.finish_prediction(second, Ok(FloodPrediction::default())));
        assert_eq!(wf.selected().unwrap().name, "B");
    }

    #[test]
    fn test_locate_sets_candidate_without_predicting() {
        let mut wf = loaded();
        let t = wf.begin_locate();
        assert!(wf.locating());
        let candidate = wf.finish_locate(t, Ok(Coordinate::new(1.0, 1.0))).unwrap();
        assert_eq!(candidate.unwrap().name, "A");
        assert!(!wf.locating());
        assert_eq!(wf.phase(), FloodPhase::NoSelection);
        assert_eq!(wf.focus(), Some(Coordinate::new(0.0, 0.0)));

        let ticket = wf.confirm_candidate().unwrap();
        assert_eq!(ticket.info.name, "A");
        assert_eq!(wf.phase(), FloodPhase::Predicting);
        assert!(wf.candidate().is_none());
    }

    #[test]
    fn test_locate_errors() {
        let mut wf = FloodWorkflow::new();
        let t = wf.begin_locate();
        assert_eq!(
            wf.finish_locate(t, Ok(Coordinate::new(1.0, 1.0))),
            Err(FloodError::StationsNotLoaded)
        );

        let t = wf.begin_stations();
        wf.finish_stations(t, Ok(vec![])).unwrap();
        let t = wf.begin_locate();
        assert_eq!(
            wf.finish_locate(t, Ok(Coordinate::new(1.0, 1.0))),
            Err(FloodError::NoStationNearby)
        );
        assert_eq!(wf.error(), Some("No station found nearby"));

        let t = wf.begin_locate();
        assert!(wf.finish_locate(t, Err(GeolocationError::PermissionDenied)).is_err());
        assert_eq!(wf.error(), Some("Location permission was denied."));
        assert!(!wf.locating());
    }

    #[test]
    fn test_confirm_without_candidate() {
        let mut wf = loaded();
        assert_eq!(wf.confirm_candidate().unwrap_err(), FloodError::NoCandidate);
        assert_eq!(wf.phase(), FloodPhase::NoSelection);
    }

    #[test]
    fn test_stations_failure_message() {
        let mut wf = FloodWorkflow::new();
        let t = wf.begin_stations();
        assert!(wf.finish_stations(t, Err(ApiError::Transport("refused".into()))).is_err());
        assert_eq!(wf.error(), Some("Failed to load station data"));
        assert!(!wf.stations_loading());
        assert!(wf.stations().is_empty());
    }

    #[test]
    fn test_located_candidate_uses_gauge_name() {
        let mut gauge = station("Guwahati", 0.5, 0.5);
        gauge.station_name = "Guwahati D.C. Court".into();
        let mut unnamed = station("", 20.0, 20.0);
        unnamed.station_name.clear();

        let mut wf = FloodWorkflow::new();
        let t = wf.begin_stations();
        wf.finish_stations(t, Ok(vec![gauge, unnamed])).unwrap();

        let t = wf.begin_locate();
        let candidate = wf.finish_locate(t, Ok(Coordinate::new(1.0, 1.0))).unwrap().unwrap();
        assert_eq!(candidate.name, "Guwahati D.C. Court");

        let t = wf.begin_locate();
        let candidate = wf.finish_locate(t, Ok(Coordinate::new(19.0, 19.0))).unwrap().unwrap();
        assert_eq!(candidate.name, "Nearest Station");
    }
}
