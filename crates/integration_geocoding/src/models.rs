//! Geocoding data models

use domain::{ResolvedPlace, Specificity};

/// At most one place name extracted from a single provider response.
///
/// A candidate either carries a name together with its specificity, or
/// neither (the provider had no usable result). The constructors are the
/// only way to build one, so the pairing cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCandidate {
    name: Option<String>,
    specificity: Option<Specificity>,
    provider: &'static str,
}

impl PlaceCandidate {
    /// Create a candidate carrying a place name
    #[must_use]
    pub fn found(name: impl Into<String>, specificity: Specificity, provider: &'static str) -> Self {
        Self {
            name: Some(name.into()),
            specificity: Some(specificity),
            provider,
        }
    }

    /// Create an empty candidate: the provider yielded no usable name.
    ///
    /// An empty candidate never stops the cascade.
    #[must_use]
    pub const fn empty(provider: &'static str) -> Self {
        Self {
            name: None,
            specificity: None,
            provider,
        }
    }

    /// The extracted place name, if any
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Granularity of the extracted name, if any
    #[must_use]
    pub const fn specificity(&self) -> Option<Specificity> {
        self.specificity
    }

    /// Which provider produced this candidate
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        self.provider
    }

    /// Whether this candidate carries a usable name
    #[must_use]
    pub const fn has_name(&self) -> bool {
        self.name.is_some()
    }

    /// Convert into the terminal outcome, if this candidate carries a name
    #[must_use]
    pub fn into_resolved(self) -> Option<ResolvedPlace> {
        match (self.name, self.specificity) {
            (Some(name), Some(specificity)) => Some(ResolvedPlace::from_provider(
                name,
                self.provider,
                specificity,
            )),
            _ => None,
        }
    }
}
