//! Geocoding data models
//!
//! Typed representation of the GeoJSON feature collections returned by
//! the OpenRouteService `/geocode/search` and `/geocode/autocomplete`
//! endpoints. Only the fields the map screen uses are modelled.

use domain::{Coordinate, Suggestion};
use serde::{Deserialize, Serialize};

use crate::error::GeocodingError;

/// Top-level GeoJSON response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Matches in relevance order
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// A single geocoding match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Point geometry
    pub geometry: Geometry,
    /// Descriptive properties
    #[serde(default)]
    pub properties: FeatureProperties,
}

/// GeoJSON point geometry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Geometry {
    /// Position as `[longitude, latitude]`
    pub coordinates: Vec<f64>,
}

/// Feature properties
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureProperties {
    /// Full human-readable label, e.g. "Davao City, PH"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Short place name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Match confidence (0.0 - 1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Feature {
    /// Latitude-first coordinate of this feature
    ///
    /// # Errors
    ///
    /// Returns `GeocodingError::ParseError` if the position is not a
    /// `[longitude, latitude]` pair inside the valid ranges.
    pub fn coordinate(&self) -> Result<Coordinate, GeocodingError> {
        match self.geometry.coordinates.as_slice() {
            [longitude, latitude, ..] => Coordinate::from_lon_lat(*longitude, *latitude)
                .map_err(|e| GeocodingError::ParseError(e.to_string())),
            other => Err(GeocodingError::ParseError(format!(
                "expected [longitude, latitude], got {} value(s)",
                other.len()
            ))),
        }
    }

    /// Display label, falling back to the short name and then the coordinate
    #[must_use]
    pub fn label_or(&self, coordinate: &Coordinate) -> String {
        self.properties
            .label
            .clone()
            .or_else(|| self.properties.name.clone())
            .unwrap_or_else(|| coordinate.to_string())
    }

    /// Convert into a domain suggestion
    ///
    /// # Errors
    ///
    /// Returns `GeocodingError::ParseError` if the geometry is invalid.
    pub fn to_suggestion(&self) -> Result<Suggestion, GeocodingError> {
        let coordinate = self.coordinate()?;
        Ok(Suggestion::new(self.label_or(&coordinate), coordinate))
    }
}

impl FeatureCollection {
    /// Convert all features, failing on the first malformed one
    ///
    /// # Errors
    ///
    /// Returns `GeocodingError::ParseError` if any feature has invalid geometry.
    pub fn to_suggestions(&self) -> Result<Vec<Suggestion>, GeocodingError> {
        self.features.iter().map(Feature::to_suggestion).collect()
    }
}
