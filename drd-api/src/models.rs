//! Request and response models shared with the prediction backends.
//!
//! Response structs default every field so a partially filled body still
//! renders instead of failing the whole call.

use drd_geo::{Coordinate, Located, TrackPoint};
use serde::{Deserialize, Deserializer, Serialize};

/// Read an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A numeric series where both the list and its gaps may be `null`.
fn series<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Option<f64>>>::deserialize(deserializer)?;
    Ok(values.into_iter().flatten().flatten().collect())
}

/// A file picked by the user, ready for a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            mime: None,
        }
    }

    /// Lower-cased extension without the dot.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// Normalized outcome of an intensity prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntensityResult {
    /// Maximum sustained wind in knots.
    pub intensity_value: f64,
    pub category: String,
    pub risk_level: String,
}

/// Body of `POST /api/track/predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRequest {
    pub coordinates: Vec<Coordinate>,
    pub month: u32,
    pub num_steps: u32,
    pub storm_speed: f64,
    /// Left out so the backend derives the heading from the coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storm_dir: Option<f64>,
}

/// A river gauge from the flood station catalog.
///
/// Text fields tolerate `null`; a row without a numeric position does not
/// decode and is dropped by [`crate::normalize::stations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub station_name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub district: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub basin: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub river: String,
}

impl Station {
    /// Catalog entries carry either `name` or `station_name`.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.station_name
        } else {
            &self.name
        }
    }

    /// Name shown for a station found by geolocation, where the gauge's
    /// `station_name` wins over the catalog `name`.
    pub fn located_name(&self) -> &str {
        [self.station_name.as_str(), self.name.as_str()]
            .into_iter()
            .find(|n| !n.is_empty())
            .unwrap_or("Nearest Station")
    }

    /// The subset of fields submitted to `POST /flood/predict`.
    pub fn info(&self) -> StationInfo {
        StationInfo {
            name: self.display_name().to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
            state: self.state.clone(),
            district: self.district.clone(),
            basin: self.basin.clone(),
            river: self.river.clone(),
        }
    }
}

impl Located for Station {
    fn position(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Flood prediction request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationInfo {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub state: String,
    pub district: String,
    pub basin: String,
    pub river: String,
}

impl StationInfo {
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloodStatus {
    Danger,
    Warning,
    Safe,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Station echo inside a flood prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloodStationInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub river: String,
    #[serde(deserialize_with = "null_as_default")]
    pub district: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
}

/// Body of a successful `POST /flood/predict`. Missing or `null` fields
/// take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloodPrediction {
    #[serde(deserialize_with = "null_as_default")]
    pub status: FloodStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub prediction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub probability: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub current_water_level: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub warning_level: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub danger_level: f64,
    #[serde(deserialize_with = "series")]
    pub water_levels: Vec<f64>,
    #[serde(deserialize_with = "series")]
    pub rainfall_data: Vec<f64>,
    pub station_info: Option<FloodStationInfo>,
    pub chart_image: Option<String>,
    pub is_mock: Option<bool>,
}

/// Body of `POST /earthquake/predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
    pub year: i32,
    pub month: u32,
}

/// Body of a successful `POST /predict_all`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandslideResult {
    #[serde(deserialize_with = "null_as_default")]
    pub risk_percent: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub risk_level: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rgb_png: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mask_png: String,
    #[serde(deserialize_with = "null_as_default")]
    pub overlay_png: String,
}

impl LandslideResult {
    fn data_url(b64: &str) -> String {
        format!("data:image/png;base64,{}", b64)
    }

    pub fn rgb_data_url(&self) -> String {
        Self::data_url(&self.rgb_png)
    }

    pub fn mask_data_url(&self) -> String {
        Self::data_url(&self.mask_png)
    }

    pub fn overlay_data_url(&self) -> String {
        Self::data_url(&self.overlay_png)
    }

    /// e.g. `"42.5% (Moderate)"`
    pub fn summary(&self) -> String {
        format!("{}% ({})", self.risk_percent, self.risk_level)
    }
}

/// Predicted positions as returned by the track backend, already normalized.
pub type PredictedTrack = Vec<TrackPoint>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn station() -> Station {
        serde_json::from_value(json!({
            "name": "Jamshedpur",
            "latitude": 22.8,
            "longitude": 86.2,
            "state": "Jharkhand",
            "district": "East Singhbhum",
            "basin": "Subarnarekha",
            "river": "Subarnarekha",
            "station_code": "XYZ-001"
        }))
        .unwrap()
    }

    #[test]
    fn test_station_info_has_exactly_the_payload_fields() {
        let body = serde_json::to_value(station().info()).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Jamshedpur",
                "latitude": 22.8,
                "longitude": 86.2,
                "state": "Jharkhand",
                "district": "East Singhbhum",
                "basin": "Subarnarekha",
                "river": "Subarnarekha"
            })
        );
    }

    #[test]
    fn test_display_name_falls_back_to_station_name() {
        let s: Station = serde_json::from_value(json!({
            "station_name": "Bhagalpur",
            "latitude": 25.2,
            "longitude": 87.0
        }))
        .unwrap();
        assert_eq!(s.display_name(), "Bhagalpur");
        assert_eq!(s.info().name, "Bhagalpur");
        assert_eq!(s.info().basin, "");
    }

    #[test]
    fn test_flood_prediction_tolerates_partial_body() {
        let p: FloodPrediction = serde_json::from_value(json!({
            "status": "Warning",
            "probability": 0.61
        }))
        .unwrap();
        assert_eq!(p.status, FloodStatus::Warning);
        assert_eq!(p.water_levels, Vec::<f64>::new());
        assert!(p.station_info.is_none());
    }

    #[test]
    fn test_flood_status_unknown_label() {
        let p: FloodPrediction = serde_json::from_value(json!({"status": "Elevated"})).unwrap();
        assert_eq!(p.status, FloodStatus::Unknown);
    }

    #[test]
    fn test_track_request_omits_storm_dir() {
        let req = TrackRequest {
            coordinates: vec![Coordinate::new(10.0, 80.0)],
            month: 10,
            num_steps: 3,
            storm_speed: 15.0,
            storm_dir: None,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert!(body.get("storm_dir").is_none());
        assert_eq!(body["coordinates"][0], json!({"latitude": 10.0, "longitude": 80.0}));
    }

    #[test]
    fn test_upload_extension() {
        assert_eq!(Upload::new("scene.HDF5", vec![]).extension().as_deref(), Some("hdf5"));
        assert_eq!(Upload::new("noext", vec![]).extension(), None);
    }

    #[test]
    fn test_located_name_prefers_station_name() {
        let mut s = station();
        s.station_name = "Jamshedpur Gauge".into();
        assert_eq!(s.located_name(), "Jamshedpur Gauge");
        s.station_name.clear();
        assert_eq!(s.located_name(), "Jamshedpur");
        s.name.clear();
        assert_eq!(s.located_name(), "Nearest Station");
    }

    #[test]
    fn test_station_text_fields_accept_null() {
        let s: Station = serde_json::from_value(json!({
            "name": "Ghatshila",
            "latitude": 22.6,
            "longitude": 86.5,
            "state": null,
            "basin": null
        }))
        .unwrap();
        assert_eq!(s.state, "");
        assert_eq!(s.basin, "");
    }

    #[test]
    fn test_station_without_position_does_not_decode() {
        let row = json!({"name": "Broken", "latitude": null, "longitude": 86.0});
        assert!(serde_json::from_value::<Station>(row).is_err());
    }

    #[test]
    fn test_flood_prediction_null_numbers_default() {
        let p: FloodPrediction = serde_json::from_value(json!({
            "status": "Danger",
            "probability": 0.9,
            "current_water_level": null,
            "warning_level": null,
            "prediction": null,
            "water_levels": [131.2, null, 131.8],
            "rainfall_data": null
        }))
        .unwrap();
        assert_eq!(p.status, FloodStatus::Danger);
        assert_eq!(p.probability, 0.9);
        assert_eq!(p.current_water_level, 0.0);
        assert_eq!(p.warning_level, 0.0);
        assert_eq!(p.prediction, "");
        assert_eq!(p.water_levels, vec![131.2, 131.8]);
        assert!(p.rainfall_data.is_empty());
    }

    #[test]
    fn test_flood_null_status_is_unknown() {
        let p: FloodPrediction = serde_json::from_value(json!({"status": null})).unwrap();
        assert_eq!(p.status, FloodStatus::Unknown);
    }

    #[test]
    fn test_landslide_null_fields_default() {
        let r: LandslideResult =
            serde_json::from_value(json!({"risk_percent": null, "risk_level": "High", "rgb_png": null}))
                .unwrap();
        assert_eq!(r.risk_percent, 0.0);
        assert_eq!(r.summary(), "0% (High)");
        assert_eq!(r.rgb_data_url(), "data:image/png;base64,");
    }
}
