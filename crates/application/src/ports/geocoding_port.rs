//! Geocoding port
//!
//! Place lookup as seen by the search input. Suggestions are advisory:
//! implementations log failures and return an empty list. Resolving is the
//! user's primary action, so its failures are surfaced.

use async_trait::async_trait;
use domain::{Coordinate, SearchQuery, Suggestion};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Most suggestions a single lookup may return
pub const MAX_SUGGESTIONS: u8 = 5;

/// Port for forward geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Up to [`MAX_SUGGESTIONS`] ranked suggestions for a partial query
    ///
    /// Never fails; transport or parse errors yield an empty list.
    async fn suggest(&self, query: &SearchQuery) -> Vec<Suggestion>;

    /// The single best match for a query
    ///
    /// # Errors
    ///
    /// `ApplicationError::NotFound` when the service has no candidate,
    /// `ApplicationError::Transport` on network or parse failure.
    async fn resolve(&self, query: &SearchQuery) -> Result<Coordinate, ApplicationError>;
}
