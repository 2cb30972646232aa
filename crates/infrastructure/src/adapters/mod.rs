//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geocoding_adapter;
mod static_location_adapter;

pub use geocoding_adapter::GeocodingAdapter;
pub use static_location_adapter::StaticLocationAdapter;
