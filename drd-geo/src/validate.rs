//! Latitude/longitude text validation.

use crate::coordinate::Coordinate;
use thiserror::Error;

/// Why a coordinate was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// One of the inputs is not a finite decimal number
    #[error("Please enter valid numbers")]
    NotANumber,

    /// Latitude outside [-90, 90] or longitude outside [-180, 180]
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    OutOfRange { latitude: f64, longitude: f64 },

    /// A coordinate list could not be decoded at all
    #[error("Invalid coordinate list: {0}")]
    Malformed(String),
}

fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn check_range(latitude: f64, longitude: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            latitude,
            longitude,
        })
    }
}

/// Validate a latitude/longitude pair typed by the user.
///
/// Values are kept exactly as parsed; nothing is rounded.
pub fn validate(lat_text: &str, lon_text: &str) -> Result<Coordinate, ValidationError> {
    let (latitude, longitude) = match (parse_finite(lat_text), parse_finite(lon_text)) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return Err(ValidationError::NotANumber),
    };
    check_range(latitude, longitude)?;
    Ok(Coordinate::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pair() {
        let c = validate("13.0827", " 80.2707 ").unwrap();
        assert_eq!(c, Coordinate::new(13.0827, 80.2707));
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert!(validate("90", "180").is_ok());
        assert!(validate("-90", "-180").is_ok());
    }

    #[test]
    fn test_out_of_range() {
        for (lat, lon) in [("90.0001", "0"), ("-91", "0"), ("0", "180.5"), ("0", "-181"), ("200", "500")] {
            assert!(
                matches!(validate(lat, lon), Err(ValidationError::OutOfRange { .. })),
                "{lat},{lon} should be out of range"
            );
        }
    }

    #[test]
    fn test_not_a_number() {
        for (lat, lon) in [("abc", "10"), ("10", ""), ("", ""), ("NaN", "1"), ("inf", "1"), ("1", "-inf"), ("12,5", "3")] {
            assert_eq!(validate(lat, lon), Err(ValidationError::NotANumber), "{lat},{lon}");
        }
    }

    #[test]
    fn test_not_a_number_wins_over_range() {
        assert_eq!(validate("500", "x"), Err(ValidationError::NotANumber));
    }
}
