//! Domain layer for Pinpoint
//!
//! Contains the value objects of the location-resolution pipeline.
//! This layer has no I/O dependencies and defines the ubiquitous language.

pub mod value_objects;

pub use value_objects::*;
