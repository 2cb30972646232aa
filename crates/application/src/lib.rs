//! Application layer - Use cases and orchestration
//!
//! Contains the map screen's behavior: suggestion throttling, the search
//! input state machine, the map scene description and the top-level shell.
//! External collaborators (geocoder, location sensor, map widget, alert
//! dialogs) are reached only through the ports defined here.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
