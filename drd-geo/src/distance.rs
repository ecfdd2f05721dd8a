//! Great-circle distance and nearest-point resolution.

use crate::coordinate::Coordinate;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Anything with a fixed position on the map.
pub trait Located {
    fn position(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn position(&self) -> Coordinate {
        *self
    }
}

/// Haversine distance between two points in kilometres.
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Return the candidate closest to `point`, or `None` for an empty slice.
///
/// Ties keep the first candidate encountered.
pub fn nearest<'a, T: Located>(point: &Coordinate, candidates: &'a [T]) -> Option<&'a T> {
    let mut best: Option<(&T, f64)> = None;
    for candidate in candidates {
        let d = haversine_km(point, &candidate.position());
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((candidate, d)),
        }
    }
    best.map(|(c, _)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_one_degree_at_equator() {
        let d = haversine_km(&Coordinate::new(0.0, 0.0), &Coordinate::new(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_haversine_zero() {
        let p = Coordinate::new(22.5, 78.0);
        assert_eq!(haversine_km(&p, &p), 0.0);
    }

    #[test]
    fn test_nearest_picks_closest() {
        let stations = [Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 10.0)];
        let found = nearest(&Coordinate::new(1.0, 1.0), &stations).unwrap();
        assert_eq!(*found, Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let stations = [Coordinate::new(0.0, 1.0), Coordinate::new(0.0, -1.0)];
        let found = nearest(&Coordinate::new(0.0, 0.0), &stations).unwrap();
        assert!(std::ptr::eq(found, &stations[0]));
    }

    #[test]
    fn test_nearest_empty() {
        let stations: [Coordinate; 0] = [];
        assert!(nearest(&Coordinate::new(0.0, 0.0), &stations).is_none());
    }
}
