//! Resolved place outcome

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GeoPosition, Specificity};

/// Where a resolved place name came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceSource {
    /// A reverse-geocoding provider, identified by its name
    Provider(String),
    /// The deterministic coordinate fallback
    Coordinates,
}

/// Terminal outcome of a location-resolution request.
///
/// Exactly one of these is produced per successful request. The `name` is
/// handed to downstream collaborators verbatim as an opaque location query
/// key; it is either a provider-supplied place name or the six-decimal
/// `lat,lon` coordinate string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    /// Place name, or formatted coordinates for the fallback
    pub name: String,
    /// Which provider produced the name, or the coordinate fallback
    pub source: PlaceSource,
    /// Granularity of the name; `None` for the coordinate fallback
    pub specificity: Option<Specificity>,
}

impl ResolvedPlace {
    /// Create an outcome from a provider-supplied place name
    #[must_use]
    pub fn from_provider(
        name: impl Into<String>,
        provider: impl Into<String>,
        specificity: Specificity,
    ) -> Self {
        Self {
            name: name.into(),
            source: PlaceSource::Provider(provider.into()),
            specificity: Some(specificity),
        }
    }

    /// Create the coordinate-fallback outcome for a position
    #[must_use]
    pub fn from_coordinates(position: &GeoPosition) -> Self {
        Self {
            name: position.coordinate_key(),
            source: PlaceSource::Coordinates,
            specificity: None,
        }
    }

    /// Whether this outcome is the coordinate fallback
    #[must_use]
    pub const fn is_coordinate_fallback(&self) -> bool {
        matches!(self.source, PlaceSource::Coordinates)
    }
}

impl fmt::Display for ResolvedPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
