//! Location resolution service
//!
//! Orchestrates one position acquisition followed by the reverse-geocoding
//! cascade. A position failure aborts the request before any geocoding
//! provider is consulted; once a position is acquired, an outcome is
//! guaranteed.

use std::fmt;
use std::sync::Arc;

use domain::{GeoPosition, ResolvedPlace};
use tracing::{debug, instrument, warn};

use crate::ports::{PositionError, PositionOptions, PositionPort, ReverseGeocodePort};

/// Use case: resolve the device's current location to a place name
#[derive(Clone)]
pub struct LocationService {
    position: Arc<dyn PositionPort>,
    geocoder: Arc<dyn ReverseGeocodePort>,
    options: PositionOptions,
}

impl fmt::Debug for LocationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationService")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl LocationService {
    /// Create a service with default acquisition options
    /// (high accuracy, 15 s timeout, no cached readings)
    #[must_use]
    pub fn new(position: Arc<dyn PositionPort>, geocoder: Arc<dyn ReverseGeocodePort>) -> Self {
        Self {
            position,
            geocoder,
            options: PositionOptions::default(),
        }
    }

    /// Override the acquisition options
    #[must_use]
    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the configured acquisition options
    #[must_use]
    pub const fn options(&self) -> &PositionOptions {
        &self.options
    }

    /// Acquire the current position and resolve it to a place name.
    ///
    /// Exactly one outcome is produced per call. Provider-level failures
    /// inside the cascade are absorbed; the coordinate fallback guarantees
    /// a result once a position is available.
    ///
    /// # Errors
    ///
    /// Returns the classified `PositionError` when no position could be
    /// acquired. No geocoding provider is queried in that case.
    #[instrument(skip(self))]
    pub async fn locate(&self) -> Result<ResolvedPlace, PositionError> {
        let position = match self.position.acquire(&self.options).await {
            Ok(position) => position,
            Err(e) => {
                warn!(error = %e, "Position acquisition failed");
                return Err(e);
            },
        };

        debug!(
            lat = position.latitude(),
            lon = position.longitude(),
            accuracy_m = position.accuracy_meters(),
            "Acquired position fix"
        );

        Ok(self.resolve(&position).await)
    }

    /// Resolve an explicitly supplied position, skipping acquisition
    #[instrument(skip(self, position), fields(lat = position.latitude(), lon = position.longitude()))]
    pub async fn resolve(&self, position: &GeoPosition) -> ResolvedPlace {
        let place = self.geocoder.resolve_place(position).await;
        debug!(name = %place.name, source = ?place.source, "Resolved place");
        place
    }
}
