#![forbid(unsafe_code)]
//! Network position source for Pinpoint
//!
//! Implements the application's `PositionPort` with coarse IP-based
//! geolocation: one request to an ipapi.co-style endpoint per acquisition.
//! This is the "network positioning" arm of position acquisition — it can
//! never deliver sensor-grade accuracy, but it works anywhere with a
//! network connection and needs no permissions beyond outbound HTTP.

mod client;
mod config;

pub use client::IpLookupPositionSource;
pub use config::IpLookupConfig;
