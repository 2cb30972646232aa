//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod map_region;
mod search_query;
mod suggestion;

pub use coordinate::Coordinate;
pub use map_region::{DEFAULT_DELTA, MapRegion, RECENTER_DELTA, SELECTION_DELTA};
pub use search_query::SearchQuery;
pub use suggestion::Suggestion;
