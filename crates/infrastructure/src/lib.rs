//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the geocoding and device location adapters, layered
//! configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod logging;

pub use adapters::*;
pub use config::{AppConfig, DeviceConfig, GeoLocationConfig, GeocodingAppConfig};
pub use logging::{LogFormat, LoggingConfig, LoggingError, init_logging};
