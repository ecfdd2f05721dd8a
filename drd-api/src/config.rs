//! Backend locations and request limits.

use std::time::Duration;

/// Backend used when nothing overrides it.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Client-side timeout applied to every JSON and multipart call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the prediction backends live.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Intensity, track, earthquake and landslide endpoints hang off this.
    pub base_url: String,
    /// Flood endpoints (`/stations`, `/predict`) hang off this.
    pub flood_base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    /// Uses `DRD_API_BASE` when it was set at compile time, which is the only
    /// way to configure a browser build.
    fn default() -> Self {
        Self::with_base(option_env!("DRD_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }
}

impl ApiConfig {
    pub fn with_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            flood_base_url: format!("{}/flood", base),
            base_url: base,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Read `DRD_API_BASE` and `DRD_FLOOD_BASE` from the process environment,
    /// falling back to [`ApiConfig::default`].
    pub fn from_env() -> Self {
        let mut config = std::env::var("DRD_API_BASE")
            .ok()
            .map(|base| Self::with_base(&base))
            .unwrap_or_default();
        if let Ok(flood) = std::env::var("DRD_FLOOD_BASE") {
            config.flood_base_url = flood.trim_end_matches('/').to_string();
        }
        config
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn flood_url(&self, path: &str) -> String {
        format!("{}{}", self.flood_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_trims_and_derives_flood() {
        let config = ApiConfig::with_base("https://risk.example.org/");
        assert_eq!(config.url("/api/intensity/predict"), "https://risk.example.org/api/intensity/predict");
        assert_eq!(config.flood_url("/stations"), "https://risk.example.org/flood/stations");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
