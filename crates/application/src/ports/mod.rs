//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the integration crates implement them.

mod geocoding_port;
mod position_port;

#[cfg(test)]
pub use geocoding_port::MockReverseGeocodePort;
pub use geocoding_port::ReverseGeocodePort;
#[cfg(test)]
pub use position_port::MockPositionPort;
pub use position_port::{PositionError, PositionOptions, PositionPort};
