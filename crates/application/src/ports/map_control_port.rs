//! Map camera control port
//!
//! Imperative handle on the external map widget. Only the app shell calls
//! it; the map viewer itself never moves its own camera.

use std::time::Duration;

use domain::MapRegion;
#[cfg(test)]
use mockall::automock;

/// Port for driving the map camera
#[cfg_attr(test, automock)]
pub trait MapControlPort: Send + Sync {
    /// Animate the camera to `region` over `duration`
    fn animate_to_region(&self, region: MapRegion, duration: Duration);
}
