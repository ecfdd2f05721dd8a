//! reqwest-backed [`PredictionService`].
//!
//! Works on native targets and in the browser (reqwest's fetch backend). Every
//! call, body read included, runs inside [`deadline::within`], so a backend
//! that never answers fails with [`ApiError::Timeout`] on both.

use crate::config::ApiConfig;
use crate::deadline;
use crate::error::ApiError;
use crate::models::{
    EarthquakeRequest, FloodPrediction, IntensityResult, LandslideResult, PredictedTrack, Station,
    StationInfo, TrackRequest, Upload,
};
use crate::normalize;
use crate::service::PredictionService;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::Value;

/// HTTP client for all prediction backends.
#[derive(Clone)]
pub struct HttpPredictionClient {
    client: Client,
    config: ApiConfig,
}

impl HttpPredictionClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout);
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn file_form(upload: &Upload) -> Result<Form, ApiError> {
        let mut part = Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
        if let Some(mime) = &upload.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| ApiError::Transport(e.to_string()))?;
        }
        Ok(Form::new().part("file", part))
    }

    /// Turn a non-2xx response into [`ApiError::Status`], keeping the
    /// server's explanation when the body has one.
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| normalize::error_detail(&body));
        warn!("backend answered {}: {:?}", status, detail);
        Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        })
    }

    async fn json_body(response: Response) -> Result<Value, ApiError> {
        let response = Self::check(response).await?;
        Ok(response.json::<Value>().await?)
    }

    async fn fetch_intensity(&self, image: &Upload) -> Result<IntensityResult, ApiError> {
        let url = self.config.url("/api/intensity/predict");
        debug!("POST {} ({} bytes)", url, image.bytes.len());
        let response = self
            .client
            .post(&url)
            .multipart(Self::file_form(image)?)
            .send()
            .await?;
        let body = Self::json_body(response).await?;
        Ok(normalize::intensity(&body))
    }

    async fn fetch_track(&self, request: &TrackRequest) -> Result<PredictedTrack, ApiError> {
        let url = self.config.url("/api/track/predict");
        debug!("POST {} with {} coordinates", url, request.coordinates.len());
        let response = self.client.post(&url).json(request).send().await?;
        let body = Self::json_body(response).await?;
        Ok(normalize::predicted_track(&body))
    }

    async fn fetch_stations(&self) -> Result<Vec<Station>, ApiError> {
        let url = self.config.flood_url("/stations");
        debug!("GET {}", url);
        let body = Self::json_body(self.client.get(&url).send().await?).await?;
        Ok(normalize::stations(&body))
    }

    async fn fetch_flood(&self, station: &StationInfo) -> Result<FloodPrediction, ApiError> {
        let url = self.config.flood_url("/predict");
        debug!("POST {} for {}", url, station.name);
        let body = Self::json_body(self.client.post(&url).json(station).send().await?).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    async fn fetch_earthquake(&self, request: &EarthquakeRequest) -> Result<String, ApiError> {
        let url = self.config.url("/earthquake/predict");
        debug!("POST {}", url);
        // The earthquake backend reports failures in the body, sometimes with a 2xx.
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;
        if let Some(error) = body.get("error").and_then(Value::as_str) {
            return Err(ApiError::Server(error.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: normalize::error_detail(&body),
            });
        }
        body.get("risk_level")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ApiError::Malformed("missing risk_level".to_string()))
    }

    async fn fetch_landslide(&self, archive: &Upload) -> Result<LandslideResult, ApiError> {
        let url = self.config.url("/predict_all");
        debug!("POST {} ({} bytes)", url, archive.bytes.len());
        let response = self
            .client
            .post(&url)
            .multipart(Self::file_form(archive)?)
            .send()
            .await?;
        let status = response.status();
        let body: Value = response.json().await?;
        if !status.is_success() {
            let message = normalize::error_detail(&body).unwrap_or_else(|| "Unknown error".to_string());
            return Err(ApiError::Server(message));
        }
        serde_json::from_value(body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

#[async_trait(?Send)]
impl PredictionService for HttpPredictionClient {
    async fn predict_intensity(&self, image: &Upload) -> Result<IntensityResult, ApiError> {
        deadline::within(self.config.timeout, self.fetch_intensity(image)).await
    }

    async fn predict_track(&self, request: &TrackRequest) -> Result<PredictedTrack, ApiError> {
        deadline::within(self.config.timeout, self.fetch_track(request)).await
    }

    async fn flood_stations(&self) -> Result<Vec<Station>, ApiError> {
        deadline::within(self.config.timeout, self.fetch_stations()).await
    }

    async fn predict_flood(&self, station: &StationInfo) -> Result<FloodPrediction, ApiError> {
        deadline::within(self.config.timeout, self.fetch_flood(station)).await
    }

    async fn predict_earthquake(&self, request: &EarthquakeRequest) -> Result<String, ApiError> {
        deadline::within(self.config.timeout, self.fetch_earthquake(request)).await
    }

    async fn predict_landslide(&self, archive: &Upload) -> Result<LandslideResult, ApiError> {
        deadline::within(self.config.timeout, self.fetch_landslide(archive)).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// Serve one canned response on a local port and return its base URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut content_length = 0usize;
            let mut chunked = false;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(value) = lower.strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
                if lower.starts_with("transfer-encoding:") && lower.contains("chunked") {
                    chunked = true;
                }
            }
            if chunked {
                // Drain up to the terminating zero-length chunk and its blank line.
                let mut line = Vec::new();
                while reader.read_until(b'\n', &mut line).unwrap() > 0 {
                    if line == b"0\r\n" {
                        line.clear();
                        reader.read_until(b'\n', &mut line).unwrap();
                        break;
                    }
                    line.clear();
                }
            } else {
                let mut request_body = vec![0u8; content_length];
                reader.read_exact(&mut request_body).unwrap();
            }
            let mut stream = reader.into_inner();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base: &str) -> HttpPredictionClient {
        HttpPredictionClient::new(ApiConfig::with_base(base)).unwrap()
    }

    fn station() -> StationInfo {
        StationInfo {
            name: "Dhaka".to_string(),
            latitude: 23.7,
            longitude: 90.4,
            state: String::new(),
            district: String::new(),
            basin: String::new(),
            river: "Buriganga".to_string(),
        }
    }

    fn quake() -> EarthquakeRequest {
        EarthquakeRequest {
            latitude: 35.0,
            longitude: 139.0,
            depth: 10.0,
            year: 2024,
            month: 5,
        }
    }

    #[tokio::test]
    async fn test_non_success_status_keeps_detail() {
        let base = serve_once("404 Not Found", r#"{"detail": "Station not found"}"#);
        let outcome = client_for(&base).predict_flood(&station()).await;
        assert_eq!(
            outcome,
            Err(ApiError::Status {
                status: 404,
                detail: Some("Station not found".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_earthquake_error_body_is_server_error() {
        let base = serve_once("200 OK", r#"{"error": "Model not loaded"}"#);
        let outcome = client_for(&base).predict_earthquake(&quake()).await;
        assert_eq!(outcome, Err(ApiError::Server("Model not loaded".to_string())));
    }

    #[tokio::test]
    async fn test_earthquake_risk_level() {
        let base = serve_once("200 OK", r#"{"risk_level": "High"}"#);
        let outcome = client_for(&base).predict_earthquake(&quake()).await;
        assert_eq!(outcome, Ok("High".to_string()));
    }

    #[tokio::test]
    async fn test_earthquake_without_risk_level_is_malformed() {
        let base = serve_once("200 OK", r#"{"status": "ok"}"#);
        let outcome = client_for(&base).predict_earthquake(&quake()).await;
        assert!(matches!(outcome, Err(ApiError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_landslide_failure_without_detail() {
        let base = serve_once("500 Internal Server Error", "{}");
        let archive = Upload {
            file_name: "tile.h5".to_string(),
            mime: None,
            bytes: vec![1, 2, 3],
        };
        let outcome = client_for(&base).predict_landslide(&archive).await;
        assert_eq!(outcome, Err(ApiError::Server("Unknown error".to_string())));
    }

    #[tokio::test]
    async fn test_station_catalog_drops_null_rows() {
        let base = serve_once(
            "200 OK",
            r#"{"stations": [
                {"name": "Dhaka", "latitude": 23.7, "longitude": 90.4, "river": null},
                {"name": "Lost", "latitude": null, "longitude": 90.0}
            ]}"#,
        );
        let stations = client_for(&base).flood_stations().await.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Dhaka");
        assert_eq!(stations[0].river, "");
    }

    #[tokio::test]
    async fn test_silent_backend_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let held = thread::spawn(move || {
            let accepted = listener.accept();
            thread::sleep(Duration::from_millis(500));
            drop(accepted);
        });
        let mut config = ApiConfig::with_base(&base);
        config.timeout = Duration::from_millis(100);
        let outcome = HttpPredictionClient::new(config)
            .unwrap()
            .predict_earthquake(&quake())
            .await;
        assert_eq!(outcome, Err(ApiError::Timeout(100)));
        held.join().unwrap();
    }
}
