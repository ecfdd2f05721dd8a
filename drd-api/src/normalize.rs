//! Map loosely shaped backend bodies onto the canonical models.
//!
//! The backends have shipped several response shapes over time. Missing
//! fields fall back to neutral defaults (`0`, `"Unknown"`, empty lists) so the
//! dashboard degrades instead of erroring.

use crate::models::{IntensityResult, PredictedTrack, Station};
use drd_geo::{Coordinate, CoordinateInput, Located, TrackPoint};
use serde_json::Value;

const UNKNOWN: &str = "Unknown";

/// First key holding a positive number.
fn first_number(obj: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_f64))
        .find(|v| *v > 0.0 && v.is_finite())
}

/// First key holding a non-empty string.
fn first_text(obj: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Normalize an intensity response.
///
/// The backend wraps its fields in `data` (`{status, data: {...}, metadata}`);
/// older builds returned them flat. Both are accepted.
pub fn intensity(body: &Value) -> IntensityResult {
    let fields = match body.get("data") {
        Some(data) if data.is_object() => data,
        _ => body,
    };
    IntensityResult {
        intensity_value: first_number(fields, &["intensity_knots", "intensity_value"]).unwrap_or(0.0),
        category: first_text(fields, &["intensity_category", "category"])
            .unwrap_or_else(|| UNKNOWN.to_string()),
        risk_level: first_text(fields, &["risk_level"]).unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

fn track_point(value: &Value) -> Option<TrackPoint> {
    let position: Coordinate = serde_json::from_value::<CoordinateInput>(value.clone())
        .ok()?
        .into();
    Some(TrackPoint {
        latitude: position.latitude,
        longitude: position.longitude,
        step: value
            .get("step")
            .and_then(Value::as_u64)
            .and_then(|s| u32::try_from(s).ok()),
        confidence: value.get("confidence").and_then(Value::as_f64),
    })
}

/// Normalize a track response, reading `predicted_track` or `predicted_points`.
///
/// Elements that carry no usable position are dropped.
pub fn predicted_track(body: &Value) -> PredictedTrack {
    let items = ["predicted_track", "predicted_points"]
        .iter()
        .filter_map(|k| body.get(*k).and_then(Value::as_array))
        .find(|a| !a.is_empty());
    let Some(items) = items else {
        log::warn!("track response carried no predicted positions");
        return Vec::new();
    };
    let points: PredictedTrack = items.iter().filter_map(track_point).collect();
    if points.len() != items.len() {
        log::warn!(
            "dropped {} unreadable predicted positions",
            items.len() - points.len()
        );
    }
    points
}

/// Normalize the flood station catalog, read from `stations` or a bare array.
///
/// Rows that do not decode or sit outside valid coordinate ranges are dropped,
/// so one bad row never costs the whole catalog.
pub fn stations(body: &Value) -> Vec<Station> {
    let rows = body
        .get("stations")
        .and_then(Value::as_array)
        .or_else(|| body.as_array());
    let Some(rows) = rows else {
        log::warn!("station response carried no stations");
        return Vec::new();
    };
    let stations: Vec<Station> = rows
        .iter()
        .filter_map(|row| serde_json::from_value::<Station>(row.clone()).ok())
        .filter(|s| s.position().in_range())
        .collect();
    if stations.len() != rows.len() {
        log::warn!(
            "dropped {} station rows without a usable position",
            rows.len() - stations.len()
        );
    }
    stations
}

/// Text the server put in an error body, under `detail`, `error` or `message`.
pub fn error_detail(body: &Value) -> Option<String> {
    first_text(body, &["detail", "error", "message"])
}
