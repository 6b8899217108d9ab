//! Position acquisition port
//!
//! Defines the interface for acquiring a single geographic position reading
//! from a platform sensor or a network positioning service.

use async_trait::async_trait;
use domain::GeoPosition;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options controlling a single position acquisition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionOptions {
    /// Prefer a precise sensor fix over coarse network positioning
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,

    /// Acquisition timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum acceptable age of a cached reading in milliseconds;
    /// 0 rejects any cached reading
    #[serde(default)]
    pub max_age_ms: u64,
}

const fn default_high_accuracy() -> bool {
    true
}

const fn default_timeout_ms() -> u64 {
    15_000
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: default_high_accuracy(),
            timeout_ms: default_timeout_ms(),
            max_age_ms: 0,
        }
    }
}

/// Errors that can occur while acquiring a position.
///
/// The display messages are user-facing: each names the remedy for its
/// failure and is shown verbatim by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    /// Access to location data was denied
    #[error("Location access denied. Please allow location access in your settings.")]
    PermissionDenied,

    /// No position could be determined
    #[error("Location unavailable. Please check your device settings.")]
    Unavailable,

    /// The acquisition did not complete in time
    #[error("Location request timed out. Please try again.")]
    TimedOut,
}

impl PositionError {
    /// Whether an automatic retry can be useful.
    ///
    /// A denied permission never resolves on retry; the user has to act first.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable | Self::TimedOut)
    }
}

/// Port for acquiring a position reading
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PositionPort: Send + Sync {
    /// Acquire a single position reading honoring the given options.
    ///
    /// Implementations must bound the acquisition by `options.timeout_ms`
    /// and must not serve a cached reading older than `options.max_age_ms`.
    async fn acquire(&self, options: &PositionOptions) -> Result<GeoPosition, PositionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn PositionPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PositionPort>();
    }

    #[test]
    fn test_default_options() {
        let options = PositionOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout_ms, 15_000);
        assert_eq!(options.max_age_ms, 0);
    }

    #[test]
    fn test_options_field_defaults_apply() {
        let options: PositionOptions = serde_json::from_str("{}").expect("deserialize");
        assert!(options.high_accuracy);
        assert_eq!(options.timeout_ms, 15_000);
        assert_eq!(options.max_age_ms, 0);
    }

    #[test]
    fn test_permission_denied_is_not_retryable() {
        assert!(!PositionError::PermissionDenied.is_retryable());
        assert!(PositionError::Unavailable.is_retryable());
        assert!(PositionError::TimedOut.is_retryable());
    }

    #[test]
    fn test_error_messages_name_a_remedy() {
        assert!(
            PositionError::PermissionDenied
                .to_string()
                .contains("allow location access")
        );
        assert!(
            PositionError::Unavailable
                .to_string()
                .contains("device settings")
        );
        assert!(PositionError::TimedOut.to_string().contains("try again"));
    }
}
