//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinates: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

impl DomainError {
    /// Create an invalid coordinates error
    pub const fn invalid_coordinates(latitude: f64, longitude: f64) -> Self {
        Self::InvalidCoordinates {
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_coordinates_creates_correct_error() {
        let err = DomainError::invalid_coordinates(91.0, 10.0);
        let DomainError::InvalidCoordinates {
            latitude,
            longitude,
        } = err;
        assert!((latitude - 91.0).abs() < f64::EPSILON);
        assert!((longitude - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_coordinates_error_message() {
        let err = DomainError::invalid_coordinates(91.0, 10.5);
        assert_eq!(err.to_string(), "Invalid coordinates: (91, 10.5)");
    }
}
