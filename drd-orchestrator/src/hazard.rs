//! One-shot earthquake and landslide predictions.

use crate::slot::{Generation, RequestSlot};
use chrono::{Datelike, Local};
use drd_api::{ApiError, EarthquakeRequest, LandslideResult, Upload};
use drd_geo::Coordinate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HazardError {
    #[error("Please enter a valid latitude (-90 to 90).")]
    InvalidLatitude,

    #[error("Please enter a valid longitude (-180 to 180).")]
    InvalidLongitude,

    #[error("Please enter a valid depth (>= 0).")]
    InvalidDepth,

    #[error("Please enter a valid year.")]
    InvalidYear,

    #[error("Please select a valid month.")]
    InvalidMonth,

    #[error("Please select a .h5 or .hdf5 file")]
    UnsupportedFile,

    #[error("Upload .h5 file first!")]
    NoFile,

    #[error("Prediction failed: {}", failure_text(.0))]
    LandslideFailed(ApiError),
}

/// Server message when the backend sent one, else the transport error.
fn failure_text(e: &ApiError) -> String {
    e.detail().map(str::to_string).unwrap_or_else(|| e.to_string())
}

/// Raw text of the earthquake form fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EarthquakeForm {
    pub latitude: String,
    pub longitude: String,
    pub depth: String,
    /// Blank means the current year.
    pub year: String,
    pub month: String,
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl EarthquakeForm {
    /// Validated position, for placing the map marker before predicting.
    pub fn position(&self) -> Result<Coordinate, HazardError> {
        let latitude = parse_finite(&self.latitude)
            .filter(|v| (-90.0..=90.0).contains(v))
            .ok_or(HazardError::InvalidLatitude)?;
        let longitude = parse_finite(&self.longitude)
            .filter(|v| (-180.0..=180.0).contains(v))
            .ok_or(HazardError::InvalidLongitude)?;
        Ok(Coordinate::new(latitude, longitude))
    }

    pub fn to_request(&self) -> Result<EarthquakeRequest, HazardError> {
        let position = self.position()?;
        let depth = parse_finite(&self.depth)
            .filter(|v| *v >= 0.0)
            .ok_or(HazardError::InvalidDepth)?;
        let year = match self.year.trim() {
            "" => Local::now().year(),
            text => text.parse::<i32>().map_err(|_| HazardError::InvalidYear)?,
        };
        let month = self
            .month
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or(HazardError::InvalidMonth)?;
        Ok(EarthquakeRequest {
            latitude: position.latitude,
            longitude: position.longitude,
            depth,
            year,
            month,
        })
    }

    pub fn set_position(&mut self, position: Coordinate) {
        self.latitude = position.latitude.to_string();
        self.longitude = position.longitude.to_string();
    }
}

#[derive(Debug, Clone)]
pub struct EarthquakeTicket {
    generation: Generation,
    pub request: EarthquakeRequest,
}

#[derive(Debug, Clone, Default)]
pub struct EarthquakeWorkflow {
    pub form: EarthquakeForm,
    result: RequestSlot<String>,
    error: Option<String>,
}

impl EarthquakeWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Result<EarthquakeTicket, HazardError> {
        let request = self.form.to_request().map_err(|e| {
            self.error = Some(e.to_string());
            e
        })?;
        self.error = None;
        self.result.clear();
        Ok(EarthquakeTicket {
            generation: self.result.begin(),
            request,
        })
    }

    /// Turn the outcome into the result line shown under the form.
    pub fn finish(&mut self, ticket: EarthquakeTicket, outcome: Result<String, ApiError>) -> bool {
        if !self.result.settle(ticket.generation) {
            return false;
        }
        let text = match outcome {
            Ok(level) => format!("Risk Level: {}", level),
            Err(ApiError::Server(message)) => format!("Error: {}", message),
            Err(e) => {
                log::warn!("earthquake prediction failed: {}", e);
                "Error: Unable to connect to server.".to_string()
            }
        };
        self.result.set(text);
        true
    }

    /// Empty the form and forget the result.
    pub fn clear(&mut self) {
        self.form = EarthquakeForm::default();
        self.result.clear();
        self.error = None;
    }

    pub fn result(&self) -> Option<&str> {
        self.result.value().map(String::as_str)
    }

    pub fn loading(&self) -> bool {
        self.result.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct LandslideTicket {
    generation: Generation,
    pub archive: Upload,
}

#[derive(Debug, Clone, Default)]
pub struct LandslideWorkflow {
    file: Option<Upload>,
    result: RequestSlot<LandslideResult>,
    error: Option<String>,
}

impl LandslideWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept only HDF5 archives. A rejected file leaves no selection.
    pub fn select_file(&mut self, file: Upload) -> Result<(), HazardError> {
        match file.extension().as_deref() {
            Some("h5") | Some("hdf5") => {
                self.file = Some(file);
                self.error = None;
                Ok(())
            }
            _ => {
                self.file = None;
                self.error = Some(HazardError::UnsupportedFile.to_string());
                Err(HazardError::UnsupportedFile)
            }
        }
    }

    pub fn begin(&mut self) -> Result<LandslideTicket, HazardError> {
        let Some(archive) = self.file.clone() else {
            self.error = Some(HazardError::NoFile.to_string());
            return Err(HazardError::NoFile);
        };
        self.error = None;
        self.result.clear();
        Ok(LandslideTicket {
            generation: self.result.begin(),
            archive,
        })
    }

    pub fn finish(
        &mut self,
        ticket: LandslideTicket,
        outcome: Result<LandslideResult, ApiError>,
    ) -> bool {
        if !self.result.settle(ticket.generation) {
            return false;
        }
        match outcome {
            Ok(result) => {
                log::debug!("landslide risk {}", result.summary());
                self.result.set(result);
            }
            Err(e) => {
                let e = HazardError::LandslideFailed(e);
                log::warn!("{}", e);
                self.error = Some(e.to_string());
            }
        }
        true
    }

    pub fn reset(&mut self) {
        self.file = None;
        self.result.clear();
        self.error = None;
    }

    /// Label for the file picker.
    pub fn file_label(&self) -> &str {
        self.file
            .as_ref()
            .map(|f| f.file_name.as_str())
            .unwrap_or("Choose .h5 file")
    }

    pub fn result(&self) -> Option<&LandslideResult> {
        self.result.value()
    }

    pub fn loading(&self) -> bool {
        self.result.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EarthquakeForm {
        EarthquakeForm {
            latitude: "28.6".into(),
            longitude: "77.2".into(),
            depth: "10".into(),
            year: "2024".into(),
            month: "3".into(),
        }
    }

    #[test]
    fn test_form_to_request() {
        let req = form().to_request().unwrap();
        assert_eq!(req.latitude, 28.6);
        assert_eq!(req.depth, 10.0);
        assert_eq!(req.year, 2024);
        assert_eq!(req.month, 3);
    }

    #[test]
    fn test_form_validation_order() {
        let mut f = form();
        f.latitude = "91".into();
        f.depth = "-1".into();
        assert_eq!(f.to_request(), Err(HazardError::InvalidLatitude));
        f.latitude = "10".into();
        assert_eq!(f.to_request(), Err(HazardError::InvalidDepth));
        f.depth = "0".into();
        f.month = "13".into();
        assert_eq!(f.to_request(), Err(HazardError::InvalidMonth));
        f.month = "12".into();
        f.longitude = "abc".into();
        assert_eq!(f.to_request(), Err(HazardError::InvalidLongitude));
    }

    #[test]
    fn test_blank_year_defaults_to_current() {
        let mut f = form();
        f.year = "  ".into();
        assert_eq!(f.to_request().unwrap().year, Local::now().year());
        f.year = "twenty".into();
        assert_eq!(f.to_request(), Err(HazardError::InvalidYear));
    }

    #[test]
    fn test_earthquake_result_texts() {
        let mut wf = EarthquakeWorkflow::new();
        wf.form = form();

        let t = wf.begin().unwrap();
        assert!(wf.loading());
        wf.finish(t, Ok("High".into()));
        assert_eq!(wf.result(), Some("Risk Level: High"));

        let t = wf.begin().unwrap();
        assert_eq!(wf.result(), None);
        wf.finish(t, Err(ApiError::Server("model not loaded".into())));
        assert_eq!(wf.result(), Some("Error: model not loaded"));

        let t = wf.begin().unwrap();
        wf.finish(t, Err(ApiError::Transport("connection refused".into())));
        assert_eq!(wf.result(), Some("Error: Unable to connect to server."));
        assert!(!wf.loading());
    }

    #[test]
    fn test_earthquake_invalid_form_issues_nothing() {
        let mut wf = EarthquakeWorkflow::new();
        assert!(wf.begin().is_err());
        assert!(!wf.loading());
        assert_eq!(wf.error(), Some("Please enter a valid latitude (-90 to 90)."));
    }

    #[test]
    fn test_landslide_file_filter() {
        let mut wf = LandslideWorkflow::new();
        assert_eq!(
            wf.select_file(Upload::new("scene.tif", vec![1])),
            Err(HazardError::UnsupportedFile)
        );
        assert_eq!(wf.file_label(), "Choose .h5 file");
        wf.select_file(Upload::new("Patch_07.HDF5", vec![1])).unwrap();
        assert_eq!(wf.file_label(), "Patch_07.HDF5");
    }

    #[test]
    fn test_landslide_requires_file() {
        let mut wf = LandslideWorkflow::new();
        assert_eq!(wf.begin().unwrap_err(), HazardError::NoFile);
        assert_eq!(wf.error(), Some("Upload .h5 file first!"));
    }

    #[test]
    fn test_landslide_failure_message() {
        let mut wf = LandslideWorkflow::new();
        wf.select_file(Upload::new("patch.h5", vec![1, 2])).unwrap();
        let t = wf.begin().unwrap();
        wf.finish(t, Err(ApiError::Server("Unknown error".into())));
        assert_eq!(wf.error(), Some("Prediction failed: Unknown error"));
        assert!(wf.result().is_none());
        assert!(!wf.loading());
    }
}
