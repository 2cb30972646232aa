//! Static location adapter - Implements LocationPort from configuration
//!
//! Stands in for a device GPS on hosts without one.

use application::error::ApplicationError;
use application::ports::LocationPort;
use async_trait::async_trait;
use domain::Coordinate;
use tracing::{debug, instrument};

use crate::config::DeviceConfig;

/// Location sensor that reports a fixed, configured position
#[derive(Debug, Clone, PartialEq)]
pub struct StaticLocationAdapter {
    position: Option<Coordinate>,
    permission_granted: bool,
}

impl StaticLocationAdapter {
    /// Sensor that always reports `position`
    pub const fn fixed(position: Coordinate) -> Self {
        Self {
            position: Some(position),
            permission_granted: true,
        }
    }

    /// Sensor the user has not granted access to
    pub const fn denied() -> Self {
        Self {
            position: None,
            permission_granted: false,
        }
    }

    /// Sensor without a fix
    pub const fn unavailable() -> Self {
        Self {
            position: None,
            permission_granted: true,
        }
    }

    /// Build from configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if the configured position is out
    /// of range.
    pub fn from_config(config: &DeviceConfig) -> Result<Self, ApplicationError> {
        let position = config
            .position
            .map(|p| Coordinate::new(p.latitude, p.longitude))
            .transpose()?;
        Ok(Self {
            position,
            permission_granted: config.permission_granted,
        })
    }
}

#[async_trait]
impl LocationPort for StaticLocationAdapter {
    #[instrument(skip(self))]
    async fn current_position(&self) -> Result<Coordinate, ApplicationError> {
        if !self.permission_granted {
            return Err(ApplicationError::PermissionDenied);
        }
        let position = self.position.ok_or_else(|| {
            ApplicationError::PositionUnavailable("no position configured".to_string())
        })?;
        debug!(%position, "Position read");
        Ok(position)
    }
}
