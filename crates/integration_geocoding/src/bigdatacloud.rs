//! BigDataCloud reverse-geocoding client
//!
//! Keyless last-resort provider. The client-side endpoint returns empty
//! strings rather than omitting fields, so ranking treats blank names as
//! absent. Populates locality- and region-level names only.

use std::time::Duration;

use async_trait::async_trait;
use domain::{GeoPosition, Specificity};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{GeocodeError, GeocodingConfig, PlaceCandidate, provider::GeocodeProvider, rank};

const PROVIDER: &str = "bigdatacloud";

/// BigDataCloud API response structures
mod api {
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReverseGeocodeResponse {
        #[serde(default)]
        pub city: Option<String>,

        #[serde(default)]
        pub locality: Option<String>,

        #[serde(default)]
        pub principal_subdivision: Option<String>,
    }
}

/// BigDataCloud reverse-geocoding client
#[derive(Debug)]
pub struct BigDataCloudClient {
    client: Client,
    base_url: String,
    locality_language: String,
}

impl BigDataCloudClient {
    /// Create a new BigDataCloud client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodeError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.bigdatacloud_base_url.clone(),
            locality_language: config.locality_language.clone(),
        })
    }

    /// Build the API URL
    fn build_url(&self, position: &GeoPosition) -> String {
        format!(
            "{}/data/reverse-geocode-client?latitude={}&longitude={}&localityLanguage={}",
            self.base_url,
            position.latitude(),
            position.longitude(),
            self.locality_language
        )
    }

    fn extract_candidate(response: api::ReverseGeocodeResponse) -> PlaceCandidate {
        let fields = [
            (Specificity::Locality, response.city),
            (Specificity::Locality, response.locality),
            (Specificity::Region, response.principal_subdivision),
        ];

        rank::most_specific(fields).map_or_else(
            || PlaceCandidate::empty(PROVIDER),
            |(name, specificity)| PlaceCandidate::found(name, specificity, PROVIDER),
        )
    }
}

#[async_trait]
impl GeocodeProvider for BigDataCloudClient {
    #[instrument(skip(self, position), fields(provider = PROVIDER))]
    async fn reverse(&self, position: &GeoPosition) -> Result<PlaceCandidate, GeocodeError> {
        let url = self.build_url(position);

        debug!(
            lat = position.latitude(),
            lon = position.longitude(),
            "Sending BigDataCloud reverse request"
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                GeocodeError::Timeout
            } else if e.is_connect() {
                GeocodeError::ConnectionFailed(e.to_string())
            } else {
                GeocodeError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(GeocodeError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(GeocodeError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: api::ReverseGeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::ParseError(e.to_string()))?;

        Ok(Self::extract_candidate(api_response))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
