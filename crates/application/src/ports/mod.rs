//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure and presentation
//! layers implement these ports.

mod geocoding_port;
mod location_port;
mod map_control_port;
mod notification_port;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::{GeocodingPort, MAX_SUGGESTIONS};
#[cfg(test)]
pub use location_port::MockLocationPort;
pub use location_port::LocationPort;
#[cfg(test)]
pub use map_control_port::MockMapControlPort;
pub use map_control_port::MapControlPort;
#[cfg(test)]
pub use notification_port::MockNotificationPort;
pub use notification_port::{Alert, NotificationPort};
