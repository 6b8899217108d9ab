//! Geographic position value object

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single position reading: coordinates plus the sensor's accuracy estimate
/// and the instant the reading was captured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
    /// Estimated accuracy radius in meters
    accuracy_meters: f64,
    /// When the reading was captured
    captured_at: DateTime<Utc>,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
pub struct InvalidCoordinates;

impl GeoPosition {
    /// Create a new position reading with validation, captured now
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]
    pub fn new(
        latitude: f64,
        longitude: f64,
        accuracy_meters: f64,
    ) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
            accuracy_meters,
            captured_at: Utc::now(),
        })
    }

    /// Create a position without validation (for trusted sources)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub fn new_unchecked(latitude: f64, longitude: f64, accuracy_meters: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters,
            captured_at: Utc::now(),
        }
    }

    /// Create a position with an explicit capture time
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` for out-of-range coordinates
    pub fn with_capture_time(
        latitude: f64,
        longitude: f64,
        accuracy_meters: f64,
        captured_at: DateTime<Utc>,
    ) -> Result<Self, InvalidCoordinates> {
        let mut position = Self::new(latitude, longitude, accuracy_meters)?;
        position.captured_at = captured_at;
        Ok(position)
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get the estimated accuracy radius in meters
    #[must_use]
    pub const fn accuracy_meters(&self) -> f64 {
        self.accuracy_meters
    }

    /// Get the capture time
    #[must_use]
    pub const fn capture_time(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// How old this reading is
    #[must_use]
    pub fn age(&self) -> TimeDelta {
        Utc::now() - self.captured_at
    }

    /// Whether this reading is older than the given number of milliseconds
    #[must_use]
    pub fn is_older_than_ms(&self, max_age_ms: u64) -> bool {
        self.age() > TimeDelta::milliseconds(i64::try_from(max_age_ms).unwrap_or(i64::MAX))
    }

    /// Format the coordinates as a fixed six-decimal `lat,lon` string
    ///
    /// This is the deterministic identifier used when no provider yields a
    /// place name, e.g. `"28.613900,77.209000"`. Downstream services accept
    /// it verbatim as a location query key.
    #[must_use]
    pub fn coordinate_key(&self) -> String {
        format!("{:.6},{:.6}", self.latitude, self.longitude)
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6}, {:.6} (±{:.0}m)",
            self.latitude, self.longitude, self.accuracy_meters
        )
    }
}
