//! Colour tables for markers, pins and badges.

use drd_api::FloodStatus;

pub const HISTORICAL_TRACK_COLOR: &str = "#3b82f6";
pub const PREDICTED_TRACK_COLOR: &str = "#ef4444";
pub const PREDICTED_TRACK_DASH: &str = "10, 5";
pub const STATION_FILL: &str = "#10B981";
pub const EARTHQUAKE_COLOR: &str = "#f97316";

/// Marker colour for a storm of `knots`; `None` or zero is unknown.
pub fn intensity_color(knots: Option<f64>) -> &'static str {
    match knots {
        None => "#3b82f6",
        Some(k) if k == 0.0 => "#3b82f6",
        Some(k) if k < 34.0 => "#10b981",
        Some(k) if k < 64.0 => "#f59e0b",
        Some(k) if k < 96.0 => "#f97316",
        Some(k) if k < 112.0 => "#ef4444",
        Some(k) if k < 135.0 => "#dc2626",
        Some(_) => "#991b1b",
    }
}

pub fn flood_status_color(status: FloodStatus) -> &'static str {
    match status {
        FloodStatus::Danger => "#EF4444",
        FloodStatus::Warning => "#F59E0B",
        FloodStatus::Safe | FloodStatus::Unknown => "#10B981",
    }
}

/// Badge colour for a risk label such as `"Very High"`.
pub fn risk_level_color(level: &str) -> &'static str {
    match level {
        "Extreme" => "#991b1b",
        "Very High" => "#dc2626",
        "High" => "#ef4444",
        "Moderate" => "#f59e0b",
        _ => "#10b981",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_bands() {
        assert_eq!(intensity_color(None), "#3b82f6");
        assert_eq!(intensity_color(Some(0.0)), "#3b82f6");
        assert_eq!(intensity_color(Some(20.0)), "#10b981");
        assert_eq!(intensity_color(Some(34.0)), "#f59e0b");
        assert_eq!(intensity_color(Some(63.9)), "#f59e0b");
        assert_eq!(intensity_color(Some(64.0)), "#f97316");
        assert_eq!(intensity_color(Some(100.0)), "#ef4444");
        assert_eq!(intensity_color(Some(112.0)), "#dc2626");
        assert_eq!(intensity_color(Some(135.0)), "#991b1b");
    }

    #[test]
    fn test_flood_status_colors() {
        assert_eq!(flood_status_color(FloodStatus::Danger), "#EF4444");
        assert_eq!(flood_status_color(FloodStatus::Warning), "#F59E0B");
        assert_eq!(flood_status_color(FloodStatus::Safe), "#10B981");
        assert_eq!(flood_status_color(FloodStatus::Unknown), "#10B981");
    }

    #[test]
    fn test_risk_badges() {
        assert_eq!(risk_level_color("Very High"), "#dc2626");
        assert_eq!(risk_level_color("Low"), "#10b981");
    }
}
