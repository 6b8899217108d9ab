//! IP-based position source

use std::time::Duration;

use application::{PositionError, PositionOptions, PositionPort};
use async_trait::async_trait;
use domain::GeoPosition;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::IpLookupConfig;

/// Geolocation endpoint response structures
mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct IpLookupResponse {
        pub latitude: Option<f64>,
        pub longitude: Option<f64>,

        /// ipapi.co reports failures as `{"error": true, "reason": ...}`
        /// with a 200 status
        #[serde(default)]
        pub error: bool,

        #[serde(default)]
        pub reason: Option<String>,
    }
}

/// Position source backed by an IP-geolocation endpoint.
///
/// Keeps the last successful fix and serves it only when the caller's
/// `max_age_ms` permits a cached reading; `max_age_ms == 0` always
/// fetches fresh.
#[derive(Debug)]
pub struct IpLookupPositionSource {
    client: Client,
    config: IpLookupConfig,
    last_fix: Mutex<Option<GeoPosition>>,
}

impl IpLookupPositionSource {
    /// Create a new IP-based position source
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` if the HTTP client cannot be initialized.
    pub fn new(config: IpLookupConfig) -> Result<Self, PositionError> {
        let client = Client::builder().build().map_err(|e| {
            warn!(error = %e, "Failed to build HTTP client for IP lookup");
            PositionError::Unavailable
        })?;

        Ok(Self {
            client,
            config,
            last_fix: Mutex::new(None),
        })
    }

    /// Create a source with default configuration
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, PositionError> {
        Self::new(IpLookupConfig::default())
    }

    async fn cached_fix(&self, max_age_ms: u64) -> Option<GeoPosition> {
        if max_age_ms == 0 {
            return None;
        }
        let last = self.last_fix.lock().await;
        last.filter(|fix| !fix.is_older_than_ms(max_age_ms))
    }
}

#[async_trait]
impl PositionPort for IpLookupPositionSource {
    #[instrument(skip(self, options), fields(timeout_ms = options.timeout_ms))]
    async fn acquire(&self, options: &PositionOptions) -> Result<GeoPosition, PositionError> {
        if let Some(fix) = self.cached_fix(options.max_age_ms).await {
            debug!(age_ms = fix.age().num_milliseconds(), "Serving cached position fix");
            return Ok(fix);
        }

        if options.high_accuracy {
            debug!("High accuracy requested; IP lookup is city-level at best");
        }

        let response = self
            .client
            .get(&self.config.base_url)
            .timeout(Duration::from_millis(options.timeout_ms))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PositionError::TimedOut
                } else {
                    warn!(error = %e, "IP lookup request failed");
                    PositionError::Unavailable
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            warn!(%status, "IP lookup refused the request");
            return Err(PositionError::PermissionDenied);
        }
        if !status.is_success() {
            warn!(%status, "IP lookup returned an error status");
            return Err(PositionError::Unavailable);
        }

        let body: api::IpLookupResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                PositionError::TimedOut
            } else {
                warn!(error = %e, "Failed to parse IP lookup response");
                PositionError::Unavailable
            }
        })?;

        if body.error {
            warn!(reason = body.reason.as_deref(), "IP lookup reported an error");
            return Err(PositionError::Unavailable);
        }

        let (Some(latitude), Some(longitude)) = (body.latitude, body.longitude) else {
            warn!("IP lookup response carried no coordinates");
            return Err(PositionError::Unavailable);
        };

        let fix = GeoPosition::new(latitude, longitude, self.config.accuracy_meters)
            .map_err(|_| PositionError::Unavailable)?;

        debug!(
            lat = fix.latitude(),
            lon = fix.longitude(),
            accuracy_m = fix.accuracy_meters(),
            "Acquired network position fix"
        );

        *self.last_fix.lock().await = Some(fix);
        Ok(fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_creation() {
        assert!(IpLookupPositionSource::with_defaults().is_ok());
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{"latitude": 52.52, "longitude": 13.405, "city": "Berlin"}"#;
        let response: api::IpLookupResponse = serde_json::from_str(json).expect("parses");
        assert_eq!(response.latitude, Some(52.52));
        assert_eq!(response.longitude, Some(13.405));
        assert!(!response.error);
    }

    #[test]
    fn test_error_response_parsing() {
        let json = r#"{"error": true, "reason": "RateLimited"}"#;
        let response: api::IpLookupResponse = serde_json::from_str(json).expect("parses");
        assert!(response.error);
        assert_eq!(response.reason.as_deref(), Some("RateLimited"));
        assert!(response.latitude.is_none());
    }
}
