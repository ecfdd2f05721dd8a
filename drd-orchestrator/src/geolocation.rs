//! Device location as a capability.

use async_trait::async_trait;
use drd_geo::Coordinate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Geolocation is not supported by your browser.")]
    Unsupported,

    #[error("Location permission was denied.")]
    PermissionDenied,

    #[error("Unable to retrieve your location.")]
    Unavailable,
}

/// One-shot position lookup. Never retried by the workflows.
#[async_trait(?Send)]
pub trait Geolocator {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError>;
}

/// Always answers with the same outcome. Useful for native builds and tests.
#[derive(Debug, Clone)]
pub struct FixedGeolocator(pub Result<Coordinate, GeolocationError>);

#[async_trait(?Send)]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        self.0.clone()
    }
}
