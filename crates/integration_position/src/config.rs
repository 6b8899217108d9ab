//! IP lookup configuration

use serde::{Deserialize, Serialize};

/// Configuration for the IP-based position source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpLookupConfig {
    /// Geolocation endpoint returning `latitude`/`longitude` JSON fields
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Accuracy radius in meters reported for IP-based fixes.
    ///
    /// IP geolocation is city-level at best; the default reflects that.
    #[serde(default = "default_accuracy_meters")]
    pub accuracy_meters: f64,
}

fn default_base_url() -> String {
    "https://ipapi.co/json".to_string()
}

const fn default_accuracy_meters() -> f64 {
    25_000.0
}

impl Default for IpLookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            accuracy_meters: default_accuracy_meters(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IpLookupConfig::default();
        assert_eq!(config.base_url, "https://ipapi.co/json");
        assert!((config.accuracy_meters - 25_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_field_defaults_apply() {
        let config: IpLookupConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config.base_url, "https://ipapi.co/json");
    }
}
