//! Domain layer for Wayfinder
//!
//! Contains the map-search vocabulary: coordinates, queries, suggestions,
//! map regions and the screen's view state. This layer has no I/O and
//! defines the ubiquitous language shared by every other crate.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
