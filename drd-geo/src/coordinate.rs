//! Geographic points and the shapes they travel in.
//!
//! Internally every point is a `Coordinate { latitude, longitude }`. Users and
//! collaborators exchange points in three shapes, all of which are accepted on
//! ingestion:
//!
//! - `[lat, lon]` arrays
//! - `{ "latitude": .., "longitude": .. }` objects
//! - `{ "lat": .., "lon": .. }` objects

use crate::validate::{check_range, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// True when both components lie within the valid degree ranges.
    pub fn in_range(&self) -> bool {
        check_range(self.latitude, self.longitude).is_ok()
    }

    /// Within `tolerance` degrees on both axes.
    pub fn near(&self, other: &Coordinate, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() < tolerance
            && (self.longitude - other.longitude).abs() < tolerance
    }
}

/// A point produced by the track-prediction collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// 1-based forecast step, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<u32>,
    /// Model confidence in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl TrackPoint {
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl From<Coordinate> for TrackPoint {
    fn from(c: Coordinate) -> Self {
        TrackPoint {
            latitude: c.latitude,
            longitude: c.longitude,
            step: None,
            confidence: None,
        }
    }
}

/// Any of the three incoming coordinate shapes.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Pair([f64; 2]),
    Long { latitude: f64, longitude: f64 },
    Short { lat: f64, lon: f64 },
}

impl From<CoordinateInput> for Coordinate {
    fn from(input: CoordinateInput) -> Self {
        match input {
            CoordinateInput::Pair([lat, lon]) => Coordinate::new(lat, lon),
            CoordinateInput::Long {
                latitude,
                longitude,
            } => Coordinate::new(latitude, longitude),
            CoordinateInput::Short { lat, lon } => Coordinate::new(lat, lon),
        }
    }
}

/// Parse a user-supplied JSON list of points in any accepted shape.
///
/// Every point is range-checked; the first bad point rejects the whole list.
pub fn parse_coordinate_list(json: &str) -> Result<Vec<Coordinate>, ValidationError> {
    let inputs: Vec<CoordinateInput> =
        serde_json::from_str(json).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    inputs
        .into_iter()
        .map(Coordinate::from)
        .map(|c| check_range(c.latitude, c.longitude).map(|_| c))
        .collect()
}

/// Outgoing pairing convention expected by a given collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateConvention {
    /// `[lat, lon]`, used by the map library.
    Pair,
    /// `{latitude, longitude}`, used by the track-prediction API.
    Long,
    /// `{lat, lon}`.
    Short,
}

impl CoordinateConvention {
    pub fn encode(self, coordinate: &Coordinate) -> Value {
        match self {
            CoordinateConvention::Pair => json!([coordinate.latitude, coordinate.longitude]),
            CoordinateConvention::Long => json!({
                "latitude": coordinate.latitude,
                "longitude": coordinate.longitude,
            }),
            CoordinateConvention::Short => json!({
                "lat": coordinate.latitude,
                "lon": coordinate.longitude,
            }),
        }
    }

    pub fn encode_all(self, coordinates: &[Coordinate]) -> Value {
        Value::Array(coordinates.iter().map(|c| self.encode(c)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_three_shapes() {
        let json = r#"[[10.5, 80.25], {"latitude": 11.0, "longitude": 81.0}, {"lat": 12.0, "lon": 82.5}]"#;
        let coords = parse_coordinate_list(json).unwrap();
        assert_eq!(
            coords,
            vec![
                Coordinate::new(10.5, 80.25),
                Coordinate::new(11.0, 81.0),
                Coordinate::new(12.0, 82.5),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_out_of_range_point() {
        let json = r#"[[10.0, 80.0], {"lat": 95.0, "lon": 82.0}]"#;
        assert!(matches!(
            parse_coordinate_list(json),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_shape() {
        let json = r#"[{"x": 1.0, "y": 2.0}]"#;
        assert!(matches!(
            parse_coordinate_list(json),
            Err(ValidationError::Malformed(_))
        ));
    }

    #[test]
    fn test_encode_conventions() {
        let c = Coordinate::new(15.5, 88.0);
        assert_eq!(CoordinateConvention::Pair.encode(&c), json!([15.5, 88.0]));
        assert_eq!(
            CoordinateConvention::Long.encode(&c),
            json!({"latitude": 15.5, "longitude": 88.0})
        );
        assert_eq!(
            CoordinateConvention::Short.encode(&c),
            json!({"lat": 15.5, "lon": 88.0})
        );
    }

    #[test]
    fn test_track_point_optional_fields_skip() {
        let p = TrackPoint::from(Coordinate::new(1.0, 2.0));
        let v = serde_json::to_value(p).unwrap();
        assert_eq!(v, json!({"latitude": 1.0, "longitude": 2.0}));
    }
}
