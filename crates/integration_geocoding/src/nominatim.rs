//! OpenStreetMap Nominatim reverse-geocoding client
//!
//! Keyless provider. Requests zoom-18 address details and ranks the
//! address fields from city down to state district. Nominatim's usage
//! policy requires an identifying User-Agent on every request.

use std::time::Duration;

use async_trait::async_trait;
use domain::{GeoPosition, Specificity};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::{GeocodeError, GeocodingConfig, PlaceCandidate, provider::GeocodeProvider, rank};

const PROVIDER: &str = "nominatim";

const USER_AGENT: &str = "pinpoint/0.1 (https://github.com/twohreichel/pinpoint)";

/// Nominatim reverse API response structures
mod api {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ReverseResponse {
        /// Set instead of an address when the point cannot be geocoded
        /// (e.g. open ocean)
        #[serde(default)]
        pub error: Option<String>,

        #[serde(default)]
        pub address: Option<Address>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct Address {
        #[serde(default)]
        pub city: Option<String>,
        #[serde(default)]
        pub town: Option<String>,
        #[serde(default)]
        pub village: Option<String>,
        #[serde(default)]
        pub suburb: Option<String>,
        #[serde(default)]
        pub municipality: Option<String>,
        #[serde(default)]
        pub county: Option<String>,
        #[serde(default)]
        pub state_district: Option<String>,
    }
}

/// Nominatim reverse-geocoding client
#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    /// Create a new Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GeocodeError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.nominatim_base_url.clone(),
        })
    }

    /// Build the API URL
    fn build_url(&self, position: &GeoPosition) -> String {
        format!(
            "{}/reverse?format=json&lat={}&lon={}&zoom=18&addressdetails=1",
            self.base_url,
            position.latitude(),
            position.longitude()
        )
    }

    /// Rank the address fields, most specific first within each level
    fn extract_candidate(address: api::Address) -> PlaceCandidate {
        let fields = [
            (Specificity::Locality, address.city),
            (Specificity::Locality, address.town),
            (Specificity::Locality, address.village),
            (Specificity::Locality, address.suburb),
            (Specificity::Locality, address.municipality),
            (Specificity::District, address.county),
            (Specificity::District, address.state_district),
        ];

        rank::most_specific(fields).map_or_else(
            || PlaceCandidate::empty(PROVIDER),
            |(name, specificity)| PlaceCandidate::found(name, specificity, PROVIDER),
        )
    }
}

#[async_trait]
impl GeocodeProvider for NominatimClient {
    #[instrument(skip(self, position), fields(provider = PROVIDER))]
    async fn reverse(&self, position: &GeoPosition) -> Result<PlaceCandidate, GeocodeError> {
        let url = self.build_url(position);

        debug!(
            lat = position.latitude(),
            lon = position.longitude(),
            "Sending Nominatim reverse request"
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

        let api_response: api::ReverseResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::ParseError(e.to_string()))?;

        if let Some(reason) = api_response.error {
            debug!(%reason, "Nominatim could not geocode the point");
            return Ok(PlaceCandidate::empty(PROVIDER));
        }

        Ok(api_response
            .address
            .map_or_else(|| PlaceCandidate::empty(PROVIDER), Self::extract_candidate))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
