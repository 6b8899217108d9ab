//! Reverse-geocoding port
//!
//! Defines the interface for turning a position into a place name. The
//! cascade behind this port is total: it always produces a `ResolvedPlace`,
//! degrading to the coordinate fallback when no provider yields a name, so
//! the port has no error type.

use async_trait::async_trait;
use domain::{GeoPosition, ResolvedPlace};
#[cfg(test)]
use mockall::automock;

/// Port for resolving a position into a place name
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReverseGeocodePort: Send + Sync {
    /// Resolve a position to a place name, or the coordinate fallback
    async fn resolve_place(&self, position: &GeoPosition) -> ResolvedPlace;
}
