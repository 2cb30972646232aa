//! Geocoding integration for Wayfinder
//!
//! Turns free-text place names into coordinates using the
//! [OpenRouteService](https://openrouteservice.org) geocoding API.
//!
//! # Architecture
//!
//! [`GeocodingClient`] defines the two read operations the map screen needs:
//! a ranked `search` for suggestion lists and a narrow `autocomplete` for the
//! explicit search action. [`OpenRouteServiceClient`] implements it over HTTP.
//! Responses are GeoJSON feature collections whose positions are
//! `[longitude, latitude]`; [`Feature::coordinate`] is the single place where
//! that order is converted to the latitude-first [`domain::Coordinate`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geocoding::{GeocodingClient, GeocodingConfig, OpenRouteServiceClient};
//!
//! let config = GeocodingConfig::with_api_key("your-ors-key");
//! let client = OpenRouteServiceClient::new(&config)?;
//!
//! let suggestions = client.search("Davao", 5).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{GeocodingClient, OpenRouteServiceClient};
pub use config::GeocodingConfig;
pub use error::GeocodingError;
pub use models::{Feature, FeatureCollection, FeatureProperties, Geometry};
