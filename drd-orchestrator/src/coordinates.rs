//! Ordered list of historical track points.

use drd_geo::Coordinate;

/// Fewest historical points the track model accepts.
pub const MIN_TRACK_POINTS: usize = 3;

/// Historical positions in track order. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateList {
    points: Vec<Coordinate>,
}

impl CoordinateList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, coordinate: Coordinate) {
        self.points.push(coordinate);
    }

    /// Remove the point at `index`, keeping the others in order.
    /// Out-of-range indexes are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Coordinate> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn replace(&mut self, points: Vec<Coordinate>) {
        self.points = points;
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enough points for a track prediction.
    pub fn is_trackable(&self) -> bool {
        self.points.len() >= MIN_TRACK_POINTS
    }

    pub fn last(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn to_vec(&self) -> Vec<Coordinate> {
        self.points.clone()
    }
}
