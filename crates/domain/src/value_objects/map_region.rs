//! Map viewport value object

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Zoom extent used when recentering on the device position
pub const RECENTER_DELTA: f64 = 0.0015;

/// Zoom extent used when jumping to a searched place
pub const SELECTION_DELTA: f64 = 0.01;

/// Zoom extent of the initial viewport
pub const DEFAULT_DELTA: f64 = 0.2;

/// A map viewport: center plus latitude/longitude extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    /// Viewport center
    pub center: Coordinate,
    /// Visible latitude span in degrees
    pub latitude_delta: f64,
    /// Visible longitude span in degrees
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Initial viewport shown before any interaction
    #[must_use]
    pub const fn default_region() -> Self {
        Self {
            center: Coordinate::butuan_city(),
            latitude_delta: DEFAULT_DELTA,
            longitude_delta: DEFAULT_DELTA,
        }
    }

    /// Tight viewport around the device position
    #[must_use]
    pub const fn recenter(center: Coordinate) -> Self {
        Self {
            center,
            latitude_delta: RECENTER_DELTA,
            longitude_delta: RECENTER_DELTA,
        }
    }

    /// Wider viewport around a selected place
    #[must_use]
    pub const fn selection(center: Coordinate) -> Self {
        Self {
            center,
            latitude_delta: SELECTION_DELTA,
            longitude_delta: SELECTION_DELTA,
        }
    }
}

impl Default for MapRegion {
    fn default() -> Self {
        Self::default_region()
    }
}
