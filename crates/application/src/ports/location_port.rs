//! Device location port

use async_trait::async_trait;
use domain::Coordinate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the device position sensor
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationPort: Send + Sync {
    /// One-shot read of the current position
    ///
    /// # Errors
    ///
    /// `ApplicationError::PermissionDenied` or
    /// `ApplicationError::PositionUnavailable`.
    async fn current_position(&self) -> Result<Coordinate, ApplicationError>;
}
