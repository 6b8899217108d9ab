//! Value Objects - Immutable, identity-less domain primitives

mod geo_position;
mod resolved_place;
mod specificity;

pub use geo_position::{GeoPosition, InvalidCoordinates};
pub use resolved_place::{PlaceSource, ResolvedPlace};
pub use specificity::Specificity;
