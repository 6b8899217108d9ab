#![forbid(unsafe_code)]
//! Reverse-geocoding integration for Pinpoint
//!
//! Resolves coordinates to a human-meaningful place name by trying a
//! priority-ordered cascade of providers: Google Maps Geocoding (keyed,
//! most accurate), OpenStreetMap Nominatim, then BigDataCloud. The first
//! provider to yield a usable name wins; when every provider comes up
//! empty, the six-decimal coordinate string stands in, so resolution never
//! fails once a position is known.
//!
//! # Architecture
//!
//! The crate follows a provider pattern with a common trait
//! [`GeocodeProvider`] implemented by [`GoogleMapsClient`],
//! [`NominatimClient`] and [`BigDataCloudClient`]. The [`ReverseGeocoder`]
//! iterates them strictly in order, absorbing provider failures; the
//! ordered list it holds is the only place priority is encoded.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::GeoPosition;
//! use integration_geocoding::{GeocodingConfig, ReverseGeocoder};
//!
//! let geocoder = ReverseGeocoder::new(&GeocodingConfig::default())?;
//! let position = GeoPosition::new(28.6139, 77.2090, 20.0)?;
//!
//! let place = geocoder.resolve(&position).await;
//! println!("{} (via {:?})", place.name, place.source);
//! ```

mod bigdatacloud;
mod config;
mod error;
mod google;
mod models;
mod nominatim;
mod provider;
mod rank;

pub use bigdatacloud::BigDataCloudClient;
pub use config::GeocodingConfig;
pub use error::GeocodeError;
pub use google::GoogleMapsClient;
pub use models::PlaceCandidate;
pub use nominatim::NominatimClient;
pub use provider::GeocodeProvider;
pub use rank::most_specific;

use std::fmt;
use std::sync::Arc;

use application::ReverseGeocodePort;
use async_trait::async_trait;
use domain::{GeoPosition, ResolvedPlace};
use tracing::{debug, instrument, warn};

/// Priority-ordered provider cascade with a coordinate fallback.
///
/// Provider trials are strictly sequential: each call completes (result,
/// empty, or its own bounded timeout) before the next provider is tried.
/// Sequential trial is deliberate — providers are ranked by expected
/// accuracy and the earlier ones are cheaper, so skipping unnecessary
/// calls matters more than the latency of the rare full cascade.
pub struct ReverseGeocoder {
    providers: Vec<Arc<dyn GeocodeProvider>>,
}

impl fmt::Debug for ReverseGeocoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReverseGeocoder")
            .field("providers", &self.provider_names())
            .finish()
    }
}

impl ReverseGeocoder {
    /// Create the default cascade: Google Maps, then Nominatim, then
    /// BigDataCloud — the order of expected accuracy.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodeError> {
        if config.google_api_key.is_none() {
            warn!("No Google Maps API key configured; the keyed provider will skip itself");
        }

        let providers: Vec<Arc<dyn GeocodeProvider>> = vec![
            Arc::new(GoogleMapsClient::new(config)?),
            Arc::new(NominatimClient::new(config)?),
            Arc::new(BigDataCloudClient::new(config)?),
        ];

        Ok(Self { providers })
    }

    /// Create a shareable cascade wrapped in Arc
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be initialized.
    pub fn new_shared(config: &GeocodingConfig) -> Result<Arc<Self>, GeocodeError> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// Create a cascade over an explicit, already-ordered provider list.
    ///
    /// The list order is the trial order.
    #[must_use]
    pub fn from_providers(providers: Vec<Arc<dyn GeocodeProvider>>) -> Self {
        Self { providers }
    }

    /// Names of the configured providers in trial order
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .map(|p| p.provider_name())
            .collect()
    }

    /// Resolve a position to a place name.
    ///
    /// Always produces an outcome: the first provider yielding a usable
    /// name stops the cascade; provider failures and empty results each
    /// consume one step and are never surfaced; exhaustion degrades to the
    /// coordinate fallback.
    #[instrument(skip(self, position), fields(lat = position.latitude(), lon = position.longitude()))]
    pub async fn resolve(&self, position: &GeoPosition) -> ResolvedPlace {
        for provider in &self.providers {
            let name = provider.provider_name();
            match provider.reverse(position).await {
                Ok(candidate) => {
                    if let Some(place) = candidate.into_resolved() {
                        debug!(
                            provider = name,
                            place = %place.name,
                            specificity = ?place.specificity,
                            "Provider resolved place"
                        );
                        return place;
                    }
                    debug!(provider = name, "Provider returned no result, trying next");
                },
                Err(e) => {
                    warn!(provider = name, error = %e, "Provider failed, trying next");
                },
            }
        }

        let place = ResolvedPlace::from_coordinates(position);
        debug!(key = %place.name, "All providers empty, using coordinate fallback");
        place
    }
}

#[async_trait]
impl ReverseGeocodePort for ReverseGeocoder {
    async fn resolve_place(&self, position: &GeoPosition) -> ResolvedPlace {
        self.resolve(position).await
    }
}

#[cfg(test)]
mod tests {
    use domain::{PlaceSource, Specificity};

    use super::*;
    use crate::provider::tests::MockGeocodeProvider;

    fn position() -> GeoPosition {
        GeoPosition::new(51.5072, -0.1276, 25.0).expect("valid coordinates")
    }

    #[test]
    fn test_default_cascade_order() {
        let geocoder =
            ReverseGeocoder::new(&GeocodingConfig::for_testing()).expect("cascade creation");
        assert_eq!(
            geocoder.provider_names(),
            vec!["google", "nominatim", "bigdatacloud"]
        );
    }

    #[tokio::test]
    async fn test_first_named_candidate_stops_the_cascade() {
        let first = Arc::new(MockGeocodeProvider::resolving(
            "first",
            "London",
            Specificity::Locality,
        ));
        let second = Arc::new(MockGeocodeProvider::resolving(
            "second",
            "Westminster",
            Specificity::Locality,
        ));

        let geocoder =
            ReverseGeocoder::from_providers(vec![first.clone(), second.clone()]);
        let place = geocoder.resolve(&position()).await;

        assert_eq!(place.name, "London");
        assert_eq!(place.source, PlaceSource::Provider("first".to_string()));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_candidate_never_stops_the_cascade() {
        let first = Arc::new(MockGeocodeProvider::empty("first"));
        let second = Arc::new(MockGeocodeProvider::resolving(
            "second",
            "Surrey",
            Specificity::District,
        ));

        let geocoder =
            ReverseGeocoder::from_providers(vec![first.clone(), second.clone()]);
        let place = geocoder.resolve(&position()).await;

        assert_eq!(place.name, "Surrey");
        assert_eq!(place.specificity, Some(Specificity::District));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_only_consumes_one_step() {
        let failing = Arc::new(MockGeocodeProvider::failing("failing"));
        let next = Arc::new(MockGeocodeProvider::resolving(
            "next",
            "Berlin",
            Specificity::Locality,
        ));

        let geocoder = ReverseGeocoder::from_providers(vec![failing.clone(), next.clone()]);
        let place = geocoder.resolve(&position()).await;

        assert_eq!(place.name, "Berlin");
        assert_eq!(failing.calls(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_cascade_uses_coordinate_fallback() {
        let geocoder = ReverseGeocoder::from_providers(vec![
            Arc::new(MockGeocodeProvider::empty("a")),
            Arc::new(MockGeocodeProvider::failing("b")),
            Arc::new(MockGeocodeProvider::empty("c")),
        ]);

        let place = geocoder.resolve(&position()).await;
        assert!(place.is_coordinate_fallback());
        assert_eq!(place.name, "51.507200,-0.127600");
        assert_eq!(place.source, PlaceSource::Coordinates);
        assert!(place.specificity.is_none());
    }

    #[tokio::test]
    async fn test_empty_provider_list_still_resolves() {
        let geocoder = ReverseGeocoder::from_providers(vec![]);
        let place = geocoder.resolve(&position()).await;
        assert!(place.is_coordinate_fallback());
    }
}
