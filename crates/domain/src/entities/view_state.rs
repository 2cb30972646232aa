//! View state entity - Toggle state of the map screen
//!
//! The state is an immutable value. Every change goes through a named
//! transition that consumes the old value and returns the new one.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Coordinate;

/// Base map style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapType {
    /// Plain street map
    #[default]
    Standard,
    /// Satellite imagery with labels
    Hybrid,
}

impl MapType {
    /// The other map style
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Standard => Self::Hybrid,
            Self::Hybrid => Self::Standard,
        }
    }
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// Which input panel is shown on top of the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Single place search box
    #[default]
    Search,
    /// Transport selector with origin/destination fields
    Directions,
}

impl ViewMode {
    /// The other view mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Search => Self::Directions,
            Self::Directions => Self::Search,
        }
    }

    /// Icon shown on the view toggle button
    #[must_use]
    pub const fn toggle_icon(self) -> &'static str {
        match self {
            Self::Search => "directions",
            Self::Directions => "close",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search => write!(f, "search"),
            Self::Directions => write!(f, "directions"),
        }
    }
}

/// Means of travel selected in directions mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// On foot
    Walk,
    /// Bicycle
    Bike,
    /// Car
    #[default]
    Car,
}

impl TransportMode {
    /// All modes in selector order
    pub const ALL: [Self; 3] = [Self::Walk, Self::Bike, Self::Car];
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Walk => write!(f, "walk"),
            Self::Bike => write!(f, "bike"),
            Self::Car => write!(f, "car"),
        }
    }
}

impl std::str::FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walk" | "walking" => Ok(Self::Walk),
            "bike" | "bicycle" => Ok(Self::Bike),
            "car" | "drive" => Ok(Self::Car),
            _ => Err(format!(
                "Invalid transport mode: {s}. Use 'walk', 'bike' or 'car'"
            )),
        }
    }
}

/// Colors of the floating action buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonTheme {
    /// Button fill color
    pub background: &'static str,
    /// Icon color
    pub icon: &'static str,
}

/// Highlight color for the active transport mode
pub const ACCENT_COLOR: &str = "#2196F3";

/// Color for inactive icons
pub const MUTED_COLOR: &str = "#666";

impl ButtonTheme {
    /// Blue buttons with white icons
    pub const FILLED: Self = Self {
        background: ACCENT_COLOR,
        icon: "#fff",
    };

    /// White buttons with grey icons
    pub const LIGHT: Self = Self {
        background: "#fff",
        icon: MUTED_COLOR,
    };

    /// The other palette
    #[must_use]
    pub fn toggled(self) -> Self {
        if self == Self::FILLED {
            Self::LIGHT
        } else {
            Self::FILLED
        }
    }
}

impl Default for ButtonTheme {
    fn default() -> Self {
        Self::FILLED
    }
}

/// Placeholder origin/destination text shown in directions mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionsForm {
    /// Origin field text
    pub origin: String,
    /// Destination field text
    pub destination: String,
}

impl DirectionsForm {
    /// Origin field placeholder
    pub const ORIGIN_PLACEHOLDER: &'static str = "Enter origin";

    /// Destination field placeholder
    pub const DESTINATION_PLACEHOLDER: &'static str = "Enter destination";
}

/// Toggle state of the map screen
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    /// Base map style
    pub map_type: MapType,
    /// Visible input panel
    pub view_mode: ViewMode,
    /// Selected means of travel
    pub transport_mode: TransportMode,
    /// Floating button colors
    pub button_theme: ButtonTheme,
    /// Place currently marked on the map
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_location: Option<Coordinate>,
    /// Directions mode text fields
    pub directions: DirectionsForm,
}

impl ViewState {
    /// Switch between search and directions mode
    #[must_use]
    pub fn toggle_view_mode(self) -> Self {
        Self {
            view_mode: self.view_mode.toggled(),
            ..self
        }
    }

    /// Switch the map style and the button palette together
    #[must_use]
    pub fn toggle_map_layer(self) -> Self {
        Self {
            map_type: self.map_type.toggled(),
            button_theme: self.button_theme.toggled(),
            ..self
        }
    }

    /// Pick a means of travel
    #[must_use]
    pub fn select_transport_mode(self, transport_mode: TransportMode) -> Self {
        Self {
            transport_mode,
            ..self
        }
    }

    /// Mark a place on the map
    #[must_use]
    pub fn select_location(self, location: Coordinate) -> Self {
        Self {
            selected_location: Some(location),
            ..self
        }
    }

    /// Remove the marker (background tap)
    #[must_use]
    pub fn clear_location(self) -> Self {
        Self {
            selected_location: None,
            ..self
        }
    }

    /// Replace the origin field text
    #[must_use]
    pub fn edit_origin(mut self, text: impl Into<String>) -> Self {
        self.directions.origin = text.into();
        self
    }

    /// Replace the destination field text
    #[must_use]
    pub fn edit_destination(mut self, text: impl Into<String>) -> Self {
        self.directions.destination = text.into();
        self
    }
}
