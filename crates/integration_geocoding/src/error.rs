//! Geocoding error types
//!
//! These errors never cross the cascade boundary: the cascade absorbs every
//! provider failure and moves on to the next provider, so callers of the
//! cascade only ever see a resolved place.

use thiserror::Error;

/// Errors that can occur inside a single provider call
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Connection to the geocoding service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the geocoding service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the response from the geocoding service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}
