//! Map scene description
//!
//! Pure mapping from view state to what the map widget should draw.

use domain::{Coordinate, MapRegion, MapType};
use serde::Serialize;

/// Title shown on the selected-location pin
pub const SELECTED_MARKER_TITLE: &str = "Selected Location";

/// A pin on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    /// Pin position
    pub coordinate: Coordinate,
    /// Callout headline
    pub title: String,
    /// Callout body
    pub description: String,
}

impl MapMarker {
    fn selected(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            title: SELECTED_MARKER_TITLE.to_string(),
            description: coordinate.to_string(),
        }
    }
}

/// Everything the map widget needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    /// Base map style
    pub map_type: MapType,
    /// Viewport used when the widget first mounts
    pub initial_region: MapRegion,
    /// Show the device position dot
    pub shows_user_location: bool,
    /// Show shops, landmarks and similar places
    pub shows_points_of_interest: bool,
    /// Allow two-finger rotation
    pub rotate_enabled: bool,
    /// Pins to draw
    pub markers: Vec<MapMarker>,
}

/// Stateless renderer for the map widget
#[derive(Debug, Clone, Copy, Default)]
pub struct MapViewer;

impl MapViewer {
    /// Describe the map for the given style and selection
    pub fn render(map_type: MapType, selected: Option<Coordinate>) -> MapScene {
        MapScene {
            map_type,
            initial_region: MapRegion::default_region(),
            shows_user_location: true,
            shows_points_of_interest: true,
            rotate_enabled: false,
            markers: selected.map(MapMarker::selected).into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_selection_has_no_markers() {
        let scene = MapViewer::render(MapType::Standard, None);
        assert!(scene.markers.is_empty());
        assert_eq!(scene.initial_region, MapRegion::default_region());
    }

    #[test]
    fn selection_has_exactly_one_marker() {
        let scene = MapViewer::render(MapType::Hybrid, Some(Coordinate::davao_city()));
        assert_eq!(scene.map_type, MapType::Hybrid);
        assert_eq!(scene.markers.len(), 1);

        let marker = &scene.markers[0];
        assert_eq!(marker.title, "Selected Location");
        assert_eq!(marker.description, "7.0731, 125.6128");
        assert_eq!(marker.coordinate, Coordinate::davao_city());
    }

    #[test]
    fn fixed_widget_flags() {
        let scene = MapViewer::render(MapType::Standard, None);
        assert!(scene.shows_user_location);
        assert!(scene.shows_points_of_interest);
        assert!(!scene.rotate_enabled);
    }

    #[test]
    fn initial_region_ignores_selection() {
        let scene = MapViewer::render(MapType::Standard, Some(Coordinate::davao_city()));
        assert_eq!(scene.initial_region.center, Coordinate::butuan_city());
    }

    #[test]
    fn scene_serializes() {
        let scene = MapViewer::render(MapType::Hybrid, None);
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["map_type"], "hybrid");
        assert_eq!(json["rotate_enabled"], false);
    }
}
