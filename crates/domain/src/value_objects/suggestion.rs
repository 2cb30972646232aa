//! Place suggestion value object

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A candidate place returned for a partial query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable place label
    pub label: String,
    /// Where the place is
    pub coordinate: Coordinate,
}

impl Suggestion {
    /// Create a new suggestion
    #[must_use]
    pub fn new(label: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            label: label.into(),
            coordinate,
        }
    }

    /// Key identifying this suggestion within a rendered list
    #[must_use]
    pub fn list_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.label,
            self.coordinate.latitude(),
            self.coordinate.longitude()
        )
    }
}
