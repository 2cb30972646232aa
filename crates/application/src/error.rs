//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::ports::Alert;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The geocoder returned no candidates
    #[error("No place found for '{0}'")]
    NotFound(String),

    /// Network, HTTP or response parsing failure
    #[error("Geocoding service error: {0}")]
    Transport(String),

    /// The user has not granted location access
    #[error("Location permission denied")]
    PermissionDenied,

    /// The device could not determine its position
    #[error("Current position unavailable: {0}")]
    PositionUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if re-triggering the action may succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::PositionUnavailable(_))
    }

    /// Check if this is a location sensor failure
    pub const fn is_location_error(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::PositionUnavailable(_))
    }

    /// Plain-language notification describing this error
    pub fn user_alert(&self) -> Alert {
        match self {
            Self::NotFound(_) => Alert::new(
                "Location not found",
                "Please try a different place name.",
            ),
            Self::Transport(_) => Alert::new("Error", "Something went wrong while searching."),
            Self::PermissionDenied => Alert::new(
                "Location permission denied",
                "Allow location access to center the map on your position.",
            ),
            Self::PositionUnavailable(_) => Alert::new(
                "Location unavailable",
                "Your current position could not be determined.",
            ),
            Self::Domain(_) | Self::Configuration(_) => {
                Alert::new("Error", "Something went wrong.")
            },
        }
    }
}
