//! Google Maps Geocoding API client
//!
//! Keyed primary provider. Requests are filtered to locality,
//! administrative-area-2 and administrative-area-1 results; the winning
//! result's address components are then ranked by specificity. Without an
//! API key the client short-circuits to an empty candidate and issues no
//! request at all.

use std::time::Duration;

use async_trait::async_trait;
use domain::{GeoPosition, Specificity};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{GeocodeError, GeocodingConfig, PlaceCandidate, provider::GeocodeProvider, rank};

const PROVIDER: &str = "google";

/// Google Maps Geocoding API response structures
mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct GeocodeResponse {
        #[serde(default)]
        pub status: String,

        #[serde(default)]
        pub results: Vec<GeocodeResult>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodeResult {
        /// Result-level types (e.g. "locality")
        #[serde(default)]
        pub types: Vec<String>,

        #[serde(default)]
        pub address_components: Vec<AddressComponent>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AddressComponent {
        #[serde(default)]
        pub long_name: String,

        #[serde(default)]
        pub types: Vec<String>,
    }
}

/// Google Maps Geocoding API client
#[derive(Debug)]
pub struct GoogleMapsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleMapsClient {
    /// Create a new Google Maps client
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
            base_url: config.google_base_url.clone(),
            api_key: config.google_api_key.clone(),
        })
    }

    /// Build the API URL
    fn build_url(&self, position: &GeoPosition, key: &str) -> String {
        format!(
            "{}/maps/api/geocode/json?latlng={},{}&key={}&result_type=locality|administrative_area_level_2|administrative_area_level_1",
            self.base_url,
            position.latitude(),
            position.longitude(),
            key
        )
    }

    fn component_specificity(types: &[String]) -> Option<Specificity> {
        if types.iter().any(|t| t == "locality") {
            Some(Specificity::Locality)
        } else if types.iter().any(|t| t == "administrative_area_level_2") {
            Some(Specificity::District)
        } else if types.iter().any(|t| t == "administrative_area_level_1") {
            Some(Specificity::Region)
        } else {
            None
        }
    }

    /// Extract the best candidate from an API response.
    ///
    /// Picks the most specific result (a locality result over an
    /// administrative-area one), then ranks that result's address
    /// components.
    fn extract_candidate(response: &api::GeocodeResponse) -> PlaceCandidate {
        let result = response
            .results
            .iter()
            .find(|r| r.types.iter().any(|t| t == "locality"))
            .or_else(|| {
                response
                    .results
                    .iter()
                    .find(|r| r.types.iter().any(|t| t == "administrative_area_level_2"))
            })
            .or_else(|| response.results.first());

        let Some(result) = result else {
            return PlaceCandidate::empty(PROVIDER);
        };

        let fields = result.address_components.iter().filter_map(|component| {
            Self::component_specificity(&component.types)
                .map(|specificity| (specificity, Some(component.long_name.clone())))
        });

        rank::most_specific(fields).map_or_else(
            || PlaceCandidate::empty(PROVIDER),
            |(name, specificity)| PlaceCandidate::found(name, specificity, PROVIDER),
        )
    }
}

#[async_trait]
impl GeocodeProvider for GoogleMapsClient {
    #[instrument(skip(self, position), fields(provider = PROVIDER))]
    async fn reverse(&self, position: &GeoPosition) -> Result<PlaceCandidate, GeocodeError> {
        let Some(key) = self.api_key.as_deref() else {
            debug!("No API key configured, skipping without a request");
            return Ok(PlaceCandidate::empty(PROVIDER));
        };

        let url = self.build_url(position, key);

        debug!(
            lat = position.latitude(),
            lon = position.longitude(),
            "Sending Google geocode request"
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

        let api_response: api::GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::ParseError(e.to_string()))?;

        if api_response.status == "ZERO_RESULTS" {
            return Ok(PlaceCandidate::empty(PROVIDER));
        }
        if api_response.status != "OK" {
            return Err(GeocodeError::RequestFailed(format!(
                "Geocode status {}",
                api_response.status
            )));
        }

        Ok(Self::extract_candidate(&api_response))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> GeoPosition {
        GeoPosition::new(28.6139, 77.209, 10.0).expect("valid coordinates")
    }

    fn response(json: serde_json::Value) -> api::GeocodeResponse {
        serde_json::from_value(json).expect("valid response shape")
    }

    #[test]
    fn test_build_url() {
        let config = GeocodingConfig {
            google_api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        let client = GoogleMapsClient::new(&config).expect("client creation");
        let url = client.build_url(&position(), "test-key");

        assert!(url.contains("latlng=28.6139,77.209"));
        assert!(url.contains("key=test-key"));
        assert!(url.contains(
            "result_type=locality|administrative_area_level_2|administrative_area_level_1"
        ));
    }

    #[test]
    fn test_extract_prefers_locality_component() {
        let response = response(serde_json::json!({
            "status": "OK",
            "results": [{
                "types": ["locality"],
                "address_components": [
                    { "long_name": "Delhi", "types": ["administrative_area_level_1"] },
                    { "long_name": "New Delhi", "types": ["locality", "political"] }
                ]
            }]
        }));

        let candidate = GoogleMapsClient::extract_candidate(&response);
        assert_eq!(candidate.name(), Some("New Delhi"));
        assert_eq!(candidate.specificity(), Some(Specificity::Locality));
    }

    #[test]
    fn test_extract_prefers_locality_result_over_admin_result() {
        let response = response(serde_json::json!({
            "status": "OK",
            "results": [
                {
                    "types": ["administrative_area_level_1"],
                    "address_components": [
                        { "long_name": "Delhi", "types": ["administrative_area_level_1"] }
                    ]
                },
                {
                    "types": ["locality"],
                    "address_components": [
                        { "long_name": "New Delhi", "types": ["locality"] }
                    ]
                }
            ]
        }));

        let candidate = GoogleMapsClient::extract_candidate(&response);
        assert_eq!(candidate.name(), Some("New Delhi"));
    }

    #[test]
    fn test_extract_falls_back_to_first_result() {
        let response = response(serde_json::json!({
            "status": "OK",
            "results": [{
                "types": ["administrative_area_level_1", "political"],
                "address_components": [
                    { "long_name": "England", "types": ["administrative_area_level_1"] }
                ]
            }]
        }));

        let candidate = GoogleMapsClient::extract_candidate(&response);
        assert_eq!(candidate.name(), Some("England"));
        assert_eq!(candidate.specificity(), Some(Specificity::Region));
    }

    #[test]
    fn test_extract_empty_results() {
        let response = response(serde_json::json!({ "status": "OK", "results": [] }));
        assert!(!GoogleMapsClient::extract_candidate(&response).has_name());
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits_without_a_request() {
        // An unreachable base URL: any attempted request would fail, so an
        // Ok(empty) here proves nothing was sent.
        let config = GeocodingConfig {
            google_api_key: None,
            google_base_url: "http://127.0.0.1:1".to_string(),
            ..GeocodingConfig::for_testing()
        };
        let client = GoogleMapsClient::new(&config).expect("client creation");

        let candidate = client.reverse(&position()).await.expect("short-circuit");
        assert!(!candidate.has_name());
    }
}
