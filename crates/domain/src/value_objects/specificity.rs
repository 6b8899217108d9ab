//! Place-name specificity levels

use std::fmt;

use serde::{Deserialize, Serialize};

/// Granularity of a place name.
///
/// Variants are declared least-specific first so that the derived ordering
/// gives `Locality > District > Region`. The cascade prefers the most
/// specific name a provider can offer; this enum is the single encoding of
/// that precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specificity {
    /// State or province (first-level administrative subdivision)
    Region,
    /// County or district (second-level administrative subdivision)
    District,
    /// City, town or village
    Locality,
}

impl Specificity {
    /// Get a human-readable description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Region => "state/province",
            Self::District => "county/district",
            Self::Locality => "city/town",
        }
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
