//! Top-level map screen
//!
//! Owns the toggle state, the search input and the map camera handle.
//! This is the only place that moves the camera.

use std::sync::Arc;
use std::time::Duration;

use domain::{Coordinate, MapRegion, TransportMode, ViewMode, ViewState};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use super::map_viewer::{MapScene, MapViewer};
use super::search_input::{SearchInput, SearchSnapshot, SubmitOutcome};
use super::suggestion_throttler::DEFAULT_THROTTLE_INTERVAL;
use crate::ports::{GeocodingPort, LocationPort, MapControlPort, NotificationPort};

/// Behavior knobs for the map screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Minimum spacing between suggestion lookups, in milliseconds
    #[serde(default = "default_throttle_interval_ms")]
    pub throttle_interval_ms: u64,

    /// Camera animation length, in milliseconds
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u64,

    /// Alert the user when recentering fails
    #[serde(default)]
    pub notify_on_location_failure: bool,
}

#[allow(clippy::cast_possible_truncation)]
const fn default_throttle_interval_ms() -> u64 {
    DEFAULT_THROTTLE_INTERVAL.as_millis() as u64
}

const fn default_animation_duration_ms() -> u64 {
    500
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            throttle_interval_ms: default_throttle_interval_ms(),
            animation_duration_ms: default_animation_duration_ms(),
            notify_on_location_failure: false,
        }
    }
}

impl ShellConfig {
    /// Throttle interval as a duration
    pub const fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_interval_ms)
    }

    /// Animation length as a duration
    pub const fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.throttle_interval_ms == 0 {
            return Err("shell.throttle_interval_ms must be greater than 0".to_string());
        }
        if self.animation_duration_ms > 10_000 {
            return Err("shell.animation_duration_ms must be at most 10000".to_string());
        }
        Ok(())
    }
}

/// The map screen
pub struct AppShell {
    config: ShellConfig,
    view: ViewState,
    search: SearchInput,
    location: Arc<dyn LocationPort>,
    map_control: Arc<dyn MapControlPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl std::fmt::Debug for AppShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppShell")
            .field("config", &self.config)
            .field("view", &self.view)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

impl AppShell {
    /// Create the screen in its initial state
    pub fn new(
        config: ShellConfig,
        geocoder: Arc<dyn GeocodingPort>,
        location: Arc<dyn LocationPort>,
        map_control: Arc<dyn MapControlPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        let search = SearchInput::new(geocoder, Arc::clone(&notifier), config.throttle_interval());
        Self {
            config,
            view: ViewState::default(),
            search,
            location,
            map_control,
            notifier,
        }
    }

    /// Current toggle state
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    /// The search box
    pub const fn search(&self) -> &SearchInput {
        &self.search
    }

    /// The search box, mutably (event loop plumbing)
    pub fn search_mut(&mut self) -> &mut SearchInput {
        &mut self.search
    }

    /// Render-ready search box state
    pub fn search_snapshot(&self) -> SearchSnapshot {
        self.search.snapshot()
    }

    /// What the map widget should draw
    pub fn scene(&self) -> MapScene {
        MapViewer::render(self.view.map_type, self.view.selected_location)
    }

    /// Search ⇄ directions
    pub fn toggle_view_mode(&mut self) {
        self.update(ViewState::toggle_view_mode);
        if self.view.view_mode == ViewMode::Directions {
            self.search.reset();
        }
        debug!(mode = %self.view.view_mode, "View mode toggled");
    }

    /// Standard ⇄ hybrid, with the matching button theme
    pub fn toggle_map_layer(&mut self) {
        self.update(ViewState::toggle_map_layer);
        debug!(map_type = %self.view.map_type, "Map layer toggled");
    }

    /// Pick a means of travel
    pub fn select_transport_mode(&mut self, mode: TransportMode) {
        self.update(|view| view.select_transport_mode(mode));
        debug!(%mode, "Transport mode selected");
    }

    /// Directions mode origin field
    pub fn edit_origin(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.update(|view| view.edit_origin(text));
    }

    /// Directions mode destination field
    pub fn edit_destination(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.update(|view| view.edit_destination(text));
    }

    /// The user typed into the search box
    ///
    /// Ignored outside search mode, where the box is not shown.
    pub fn type_query(&mut self, text: impl Into<String>) {
        if self.view.view_mode != ViewMode::Search {
            debug!("Search box hidden, ignoring input");
            return;
        }
        self.search.set_text(text);
    }

    /// Explicit search; jumps to the place on success
    pub async fn submit_search(&mut self) -> SubmitOutcome {
        if self.view.view_mode != ViewMode::Search {
            return SubmitOutcome::Skipped;
        }
        let outcome = self.search.submit().await;
        if let SubmitOutcome::Resolved(coordinate) = outcome {
            self.on_location_found(coordinate);
        }
        outcome
    }

    /// The user tapped a suggestion
    pub fn select_suggestion(&mut self, index: usize) -> Option<Coordinate> {
        let coordinate = self.search.select_suggestion(index)?;
        self.on_location_found(coordinate);
        Some(coordinate)
    }

    /// Close the suggestion list and drop focus, keeping the text
    pub fn dismiss_suggestions(&mut self) {
        self.search.dismiss();
    }

    /// Tap on the map background: clear the marker and drop focus
    pub fn tap_background(&mut self) {
        self.update(ViewState::clear_location);
        self.search.release_focus();
        debug!("Background tapped");
    }

    /// Center the camera on the device position
    ///
    /// Returns the position, or `None` if it could not be read. Failures
    /// leave the camera where it is. Sensor failures alert only when
    /// `notify_on_location_failure` is set; any other failure always alerts.
    #[instrument(skip(self))]
    pub async fn recenter(&mut self) -> Option<Coordinate> {
        match self.location.current_position().await {
            Ok(position) => {
                info!(%position, "Recentering on device position");
                self.map_control.animate_to_region(
                    MapRegion::recenter(position),
                    self.config.animation_duration(),
                );
                Some(position)
            },
            Err(e) if e.is_location_error() => {
                warn!(
                    error = %e,
                    retryable = e.is_retryable(),
                    "Could not read device position"
                );
                if self.config.notify_on_location_failure {
                    self.notifier.alert(&e.user_alert());
                }
                None
            },
            Err(e) => {
                error!(error = %e, "Location lookup failed");
                self.notifier.alert(&e.user_alert());
                None
            },
        }
    }

    fn on_location_found(&mut self, coordinate: Coordinate) {
        info!(%coordinate, "Location selected");
        self.update(|view| view.select_location(coordinate));
        self.map_control.animate_to_region(
            MapRegion::selection(coordinate),
            self.config.animation_duration(),
        );
    }

    fn update(&mut self, transition: impl FnOnce(ViewState) -> ViewState) {
        self.view = transition(std::mem::take(&mut self.view));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::{
        MockGeocodingPort, MockLocationPort, MockMapControlPort, MockNotificationPort,
    };
    use domain::{ButtonTheme, MapType, Suggestion};

    struct Mocks {
        geocoder: MockGeocodingPort,
        location: MockLocationPort,
        map_control: MockMapControlPort,
        notifier: MockNotificationPort,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                geocoder: MockGeocodingPort::new(),
                location: MockLocationPort::new(),
                map_control: MockMapControlPort::new(),
                notifier: MockNotificationPort::new(),
            }
        }

        fn build(self, config: ShellConfig) -> AppShell {
            AppShell::new(
                config,
                Arc::new(self.geocoder),
                Arc::new(self.location),
                Arc::new(self.map_control),
                Arc::new(self.notifier),
            )
        }
    }

    fn shell() -> AppShell {
        Mocks::new().build(ShellConfig::default())
    }

    fn davao() -> Suggestion {
        Suggestion::new("Davao City, PH", Coordinate::davao_city())
    }

    #[test]
    fn config_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.throttle_interval(), Duration::from_millis(500));
        assert_eq!(config.animation_duration(), Duration::from_millis(500));
        assert!(!config.notify_on_location_failure);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_rejects_zero_throttle() {
        let config = ShellConfig {
            throttle_interval_ms: 0,
            ..ShellConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ShellConfig =
            serde_json::from_str(r#"{"notify_on_location_failure": true}"#).unwrap();
        assert!(config.notify_on_location_failure);
        assert_eq!(config.throttle_interval_ms, 500);
    }

    #[test]
    fn map_layer_toggle_flips_type_and_theme() {
        let mut shell = shell();
        shell.toggle_map_layer();
        assert_eq!(shell.view().map_type, MapType::Hybrid);
        assert_eq!(shell.view().button_theme, ButtonTheme::LIGHT);
        assert_eq!(shell.scene().map_type, MapType::Hybrid);

        shell.toggle_map_layer();
        assert_eq!(shell.view().map_type, MapType::Standard);
        assert_eq!(shell.view().button_theme, ButtonTheme::FILLED);
    }

    #[test]
    fn transport_mode_is_last_write_wins() {
        let mut shell = shell();
        shell.select_transport_mode(TransportMode::Walk);
        shell.select_transport_mode(TransportMode::Bike);
        assert_eq!(shell.view().transport_mode, TransportMode::Bike);
    }

    #[tokio::test(start_paused = true)]
    async fn entering_directions_resets_search() {
        let mut mocks = Mocks::new();
        mocks.geocoder.expect_suggest().returning(|_| vec![davao()]);
        let mut shell = mocks.build(ShellConfig::default());

        shell.type_query("Davao");
        shell.toggle_view_mode();
        assert_eq!(shell.view().view_mode, ViewMode::Directions);
        assert_eq!(shell.search_snapshot(), SearchSnapshot::default());

        // Hidden box ignores input
        shell.type_query("Butuan");
        assert_eq!(shell.search().query_text(), "");
        assert_eq!(shell.submit_search().await, SubmitOutcome::Skipped);
    }

    #[test]
    fn directions_fields_are_editable() {
        let mut shell = shell();
        shell.toggle_view_mode();
        shell.edit_origin("Home");
        shell.edit_destination("Work");
        assert_eq!(shell.view().directions.origin, "Home");
        assert_eq!(shell.view().directions.destination, "Work");
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_suggestion_marks_and_animates() {
        let mut mocks = Mocks::new();
        mocks.geocoder.expect_suggest().returning(|_| vec![davao()]);
        mocks
            .map_control
            .expect_animate_to_region()
            .withf(|region, duration| {
                *region == MapRegion::selection(Coordinate::davao_city())
                    && *duration == Duration::from_millis(500)
            })
            .times(1)
            .return_const(());
        let mut shell = mocks.build(ShellConfig::default());

        shell.type_query("Davao");
        let reply = shell.search_mut().next_reply().await.unwrap();
        assert!(shell.search_mut().apply_reply(reply));

        assert_eq!(shell.select_suggestion(0), Some(Coordinate::davao_city()));
        assert_eq!(shell.view().selected_location, Some(Coordinate::davao_city()));
        assert_eq!(shell.scene().markers.len(), 1);
        assert!(shell.search_snapshot().suggestions.is_empty());
    }

    #[tokio::test]
    async fn submit_resolved_moves_camera() {
        let mut mocks = Mocks::new();
        mocks.geocoder.expect_suggest().returning(|_| Vec::new());
        mocks
            .geocoder
            .expect_resolve()
            .returning(|_| Ok(Coordinate::butuan_city()));
        mocks
            .map_control
            .expect_animate_to_region()
            .times(1)
            .return_const(());
        let mut shell = mocks.build(ShellConfig::default());

        shell.type_query("Butuan");
        let outcome = shell.submit_search().await;
        assert_eq!(outcome, SubmitOutcome::Resolved(Coordinate::butuan_city()));
        assert_eq!(shell.view().selected_location, Some(Coordinate::butuan_city()));
    }

    #[tokio::test]
    async fn empty_submit_does_nothing() {
        let mut mocks = Mocks::new();
        mocks.geocoder.expect_resolve().never();
        mocks.map_control.expect_animate_to_region().never();
        mocks.notifier.expect_alert().never();
        let mut shell = mocks.build(ShellConfig::default());

        assert_eq!(shell.submit_search().await, SubmitOutcome::Skipped);
        assert!(shell.view().selected_location.is_none());
    }

    #[test]
    fn background_tap_clears_marker() {
        let mut mocks = Mocks::new();
        mocks.map_control.expect_animate_to_region().return_const(());
        let mut shell = mocks.build(ShellConfig::default());

        shell.on_location_found(Coordinate::davao_city());
        shell.tap_background();
        assert!(shell.view().selected_location.is_none());
        assert!(shell.scene().markers.is_empty());
        assert!(!shell.search().is_focused());
    }

    #[tokio::test]
    async fn recenter_animates_to_tight_region() {
        let mut mocks = Mocks::new();
        mocks
            .location
            .expect_current_position()
            .returning(|| Ok(Coordinate::butuan_city()));
        mocks
            .map_control
            .expect_animate_to_region()
            .withf(|region, _| region.latitude_delta == domain::RECENTER_DELTA)
            .times(1)
            .return_const(());
        let mut shell = mocks.build(ShellConfig::default());

        assert_eq!(shell.recenter().await, Some(Coordinate::butuan_city()));
        // Recentering does not place a marker
        assert!(shell.view().selected_location.is_none());
    }

    #[tokio::test]
    async fn recenter_denied_is_silent_by_default() {
        let mut mocks = Mocks::new();
        mocks
            .location
            .expect_current_position()
            .returning(|| Err(ApplicationError::PermissionDenied));
        mocks.map_control.expect_animate_to_region().never();
        mocks.notifier.expect_alert().never();
        let mut shell = mocks.build(ShellConfig::default());

        assert_eq!(shell.recenter().await, None);
    }

    #[tokio::test]
    async fn recenter_failure_alerts_when_enabled() {
        let mut mocks = Mocks::new();
        mocks
            .location
            .expect_current_position()
            .returning(|| Err(ApplicationError::PositionUnavailable("no fix".to_string())));
        mocks.map_control.expect_animate_to_region().never();
        mocks
            .notifier
            .expect_alert()
            .withf(|a| a.title == "Location unavailable")
            .times(1)
            .return_const(());
        let config = ShellConfig {
            notify_on_location_failure: true,
            ..ShellConfig::default()
        };
        let mut shell = mocks.build(config);

        assert_eq!(shell.recenter().await, None);
    }

    #[tokio::test]
    async fn recenter_non_sensor_failure_always_alerts() {
        let mut mocks = Mocks::new();
        mocks
            .location
            .expect_current_position()
            .returning(|| Err(ApplicationError::Configuration("no sensor".to_string())));
        mocks.map_control.expect_animate_to_region().never();
        mocks
            .notifier
            .expect_alert()
            .withf(|a| a.title == "Error")
            .times(1)
            .return_const(());
        let mut shell = mocks.build(ShellConfig::default());

        assert_eq!(shell.recenter().await, None);
    }
}
