//! Reverse-geocoding provider trait

use async_trait::async_trait;
use domain::GeoPosition;

use crate::{GeocodeError, PlaceCandidate};

/// Trait for reverse-geocoding providers
///
/// Implemented by all geocoding backends (Google Maps, Nominatim,
/// BigDataCloud). One HTTP request per call, bounded by the configured
/// per-provider timeout.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Reverse-geocode a position into at most one place candidate.
    ///
    /// An `Ok` candidate without a name means the provider had no usable
    /// result. Errors are absorbed by the cascade, which treats them the
    /// same as an empty candidate: one consumed step.
    async fn reverse(&self, position: &GeoPosition) -> Result<PlaceCandidate, GeocodeError>;

    /// Get the provider name (e.g. "google", "nominatim")
    fn provider_name(&self) -> &'static str;
}
