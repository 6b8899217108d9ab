//! Specificity ranking
//!
//! The one place where differently-shaped provider responses are
//! normalized. Each provider maps its own response fields to
//! `(Specificity, name)` pairs in the provider's own field order; this
//! module then selects the most specific usable name. Keeping the
//! selection here means the precedence rule exists exactly once and tests
//! without any HTTP.

use domain::Specificity;

/// Select the highest-precedence non-empty name from ranked fields.
///
/// Precedence is `Locality > District > Region`. Among fields of equal
/// specificity the first offered wins; no secondary ordering is applied.
/// Empty and whitespace-only names are treated as absent.
#[must_use]
pub fn most_specific(
    fields: impl IntoIterator<Item = (Specificity, Option<String>)>,
) -> Option<(String, Specificity)> {
    let mut best: Option<(String, Specificity)> = None;

    for (specificity, name) in fields {
        let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
            continue;
        };
        match &best {
            // first-wins on equal specificity
            Some((_, current)) if *current >= specificity => {},
            _ => best = Some((name, specificity)),
        }
    }

    best
}
