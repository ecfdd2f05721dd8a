//! `navigator.geolocation` as a [`Geolocator`].

use async_trait::async_trait;
use drd_geo::Coordinate;
use drd_orchestrator::{GeolocationError, Geolocator};

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserGeolocator;

#[async_trait(?Send)]
impl Geolocator for BrowserGeolocator {
    async fn current_position(&self) -> Result<Coordinate, GeolocationError> {
        current_position().await
    }
}

#[cfg(target_arch = "wasm32")]
async fn current_position() -> Result<Coordinate, GeolocationError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{GeolocationPosition, GeolocationPositionError};

    let window = web_sys::window().ok_or(GeolocationError::Unsupported)?;
    let geolocation = window
        .navigator()
        .geolocation()
        .map_err(|_| GeolocationError::Unsupported)?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        if geolocation
            .get_current_position_with_error_callback(&resolve, Some(&reject))
            .is_err()
        {
            let _ = reject.call1(&JsValue::NULL, &JsValue::NULL);
        }
    });

    match JsFuture::from(promise).await {
        Ok(value) => {
            let position: GeolocationPosition = value.unchecked_into();
            let coords = position.coords();
            Ok(Coordinate::new(coords.latitude(), coords.longitude()))
        }
        Err(err) => {
            let code = err
                .dyn_into::<GeolocationPositionError>()
                .map(|e| e.code())
                .unwrap_or(0);
            log::warn!("geolocation failed with code {}", code);
            if code == GeolocationPositionError::PERMISSION_DENIED {
                Err(GeolocationError::PermissionDenied)
            } else {
                Err(GeolocationError::Unavailable)
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn current_position() -> Result<Coordinate, GeolocationError> {
    Err(GeolocationError::Unsupported)
}
