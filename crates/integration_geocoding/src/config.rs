//! Geocoding configuration

use serde::{Deserialize, Serialize};

/// Configuration for the reverse-geocoding providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Google Maps API key (optional, enables the keyed primary provider)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,

    /// Google Maps Geocoding API base URL
    #[serde(default = "default_google_base_url")]
    pub google_base_url: String,

    /// OpenStreetMap Nominatim base URL
    #[serde(default = "default_nominatim_base_url")]
    pub nominatim_base_url: String,

    /// BigDataCloud base URL
    #[serde(default = "default_bigdatacloud_base_url")]
    pub bigdatacloud_base_url: String,

    /// Per-provider request timeout in seconds
    ///
    /// Deliberately short: a slow provider must only cost the cascade one
    /// bounded step, never stall it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Preferred language for returned place names (ISO 639-1 code)
    #[serde(default = "default_locality_language")]
    pub locality_language: String,
}

fn default_google_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_bigdatacloud_base_url() -> String {
    "https://api.bigdatacloud.net".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

fn default_locality_language() -> String {
    "en".to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_base_url: default_google_base_url(),
            nominatim_base_url: default_nominatim_base_url(),
            bigdatacloud_base_url: default_bigdatacloud_base_url(),
            timeout_secs: default_timeout_secs(),
            locality_language: default_locality_language(),
        }
    }
}

impl GeocodingConfig {
    /// Create a configuration for testing (no API key, short timeout)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            google_api_key: None,
            timeout_secs: 2,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.timeout_secs > 30 {
            return Err("timeout_secs must be 30 or less".to_string());
        }

        if self.locality_language.is_empty() {
            return Err("locality_language must not be empty".to_string());
        }

        Ok(())
    }
}
