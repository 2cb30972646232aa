//! Geocoding error types

use thiserror::Error;

/// Errors that can occur during geocoding operations
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Query was empty or whitespace-only; no request was sent
    #[error("Query must not be empty")]
    EmptyQuery,

    /// Connection to the geocoding service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to the geocoding service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API key was rejected
    #[error("API key rejected (HTTP {status})")]
    Unauthorized {
        /// HTTP status returned by the service
        status: u16,
    },

    /// Failed to parse response from the geocoding service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl GeocodingError {
    /// Returns true if re-triggering the same request may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(GeocodingError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(GeocodingError::RequestFailed("test".to_string()).is_retryable());
        assert!(GeocodingError::Timeout { timeout_secs: 10 }.is_retryable());
        assert!(
            GeocodingError::RateLimitExceeded {
                retry_after_secs: Some(60)
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!GeocodingError::EmptyQuery.is_retryable());
        assert!(!GeocodingError::ParseError("test".to_string()).is_retryable());
        assert!(!GeocodingError::ConfigurationError("test".to_string()).is_retryable());
        assert!(!GeocodingError::Unauthorized { status: 403 }.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = GeocodingError::RateLimitExceeded {
            retry_after_secs: Some(60),
        };
        assert!(err.to_string().contains("60"));

        let err = GeocodingError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));

        let err = GeocodingError::Unauthorized { status: 403 };
        assert!(err.to_string().contains("403"));
    }
}
