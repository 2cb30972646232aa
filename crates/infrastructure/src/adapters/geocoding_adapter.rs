//! Geocoding adapter - Implements GeocodingPort using integration_geocoding

use application::error::ApplicationError;
use application::ports::{GeocodingPort, MAX_SUGGESTIONS};
use async_trait::async_trait;
use domain::{Coordinate, SearchQuery, Suggestion};
use integration_geocoding::{GeocodingClient, GeocodingError, OpenRouteServiceClient};
use tracing::{debug, instrument, warn};

use crate::config::GeocodingAppConfig;

/// Adapter for place lookup via OpenRouteService
pub struct GeocodingAdapter {
    client: Box<dyn GeocodingClient>,
    suggestion_limit: u8,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("client", &"GeocodingClient")
            .field("suggestion_limit", &self.suggestion_limit)
            .finish()
    }
}

impl GeocodingAdapter {
    /// Wrap an existing client
    ///
    /// `suggestion_limit` is capped at [`MAX_SUGGESTIONS`].
    pub fn new(client: impl GeocodingClient + 'static, suggestion_limit: u8) -> Self {
        Self {
            client: Box::new(client),
            suggestion_limit: suggestion_limit.min(MAX_SUGGESTIONS),
        }
    }

    /// Build the HTTP client from application configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if no API key is configured
    /// or the HTTP client cannot be initialized.
    pub fn from_config(config: &GeocodingAppConfig) -> Result<Self, ApplicationError> {
        let client_config = config
            .to_client_config()
            .map_err(ApplicationError::Configuration)?;
        let client = OpenRouteServiceClient::new(&client_config).map_err(to_application_error)?;
        Ok(Self::new(client, config.suggestion_limit))
    }

    /// Suggestions per query
    pub const fn suggestion_limit(&self) -> u8 {
        self.suggestion_limit
    }
}

/// Map a geocoding failure onto the application's error kinds
fn to_application_error(error: GeocodingError) -> ApplicationError {
    match error {
        GeocodingError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        GeocodingError::EmptyQuery => ApplicationError::NotFound(String::new()),
        other => ApplicationError::Transport(other.to_string()),
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self), fields(query = %query))]
    async fn suggest(&self, query: &SearchQuery) -> Vec<Suggestion> {
        match self.client.search(query.as_str(), self.suggestion_limit).await {
            Ok(mut suggestions) => {
                debug!(count = suggestions.len(), "Suggestions fetched");
                suggestions.truncate(usize::from(self.suggestion_limit));
                suggestions
            },
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "Suggestion lookup failed");
                Vec::new()
            },
        }
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn resolve(&self, query: &SearchQuery) -> Result<Coordinate, ApplicationError> {
        let matches = self
            .client
            .autocomplete(query.as_str(), 1)
            .await
            .map_err(|e| {
                warn!(error = %e, "Place lookup failed");
                to_application_error(e)
            })?;

        matches
            .into_iter()
            .next()
            .map(|best| {
                debug!(label = %best.label, coordinate = %best.coordinate, "Place resolved");
                best.coordinate
            })
            .ok_or_else(|| ApplicationError::NotFound(query.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClient {
        search: Result<Vec<Suggestion>, GeocodingError>,
        autocomplete: Result<Vec<Suggestion>, GeocodingError>,
    }

    fn cloned(
        result: &Result<Vec<Suggestion>, GeocodingError>,
    ) -> Result<Vec<Suggestion>, GeocodingError> {
        match result {
            Ok(v) => Ok(v.clone()),
            Err(e) => Err(GeocodingError::RequestFailed(e.to_string())),
        }
    }

    #[async_trait]
    impl GeocodingClient for FixedClient {
        async fn search(&self, _: &str, size: u8) -> Result<Vec<Suggestion>, GeocodingError> {
            assert_eq!(size, 5);
            cloned(&self.search)
        }

        async fn autocomplete(
            &self,
            _: &str,
            size: u8,
        ) -> Result<Vec<Suggestion>, GeocodingError> {
            assert_eq!(size, 1);
            cloned(&self.autocomplete)
        }
    }

    fn davao() -> Suggestion {
        Suggestion::new("Davao City, PH", Coordinate::davao_city())
    }

    fn query(text: &str) -> SearchQuery {
        SearchQuery::parse(text).unwrap()
    }

    fn adapter(
        search: Result<Vec<Suggestion>, GeocodingError>,
        autocomplete: Result<Vec<Suggestion>, GeocodingError>,
    ) -> GeocodingAdapter {
        GeocodingAdapter::new(
            FixedClient {
                search,
                autocomplete,
            },
            5,
        )
    }

    #[tokio::test]
    async fn suggest_passes_results_through() {
        let adapter = adapter(Ok(vec![davao()]), Ok(vec![]));
        assert_eq!(adapter.suggest(&query("Davao")).await, vec![davao()]);
    }

    #[tokio::test]
    async fn oversized_limit_is_capped() {
        let many: Vec<_> = (0..8)
            .map(|i| Suggestion::new(format!("Place {i}"), Coordinate::davao_city()))
            .collect();
        // FixedClient asserts the requested size is 5
        let adapter = GeocodingAdapter::new(
            FixedClient {
                search: Ok(many),
                autocomplete: Ok(vec![]),
            },
            50,
        );
        assert_eq!(adapter.suggestion_limit(), 5);
        assert_eq!(adapter.suggest(&query("Place")).await.len(), 5);
    }

    #[tokio::test]
    async fn suggest_swallows_errors() {
        let adapter = adapter(Err(GeocodingError::Timeout { timeout_secs: 1 }), Ok(vec![]));
        assert!(adapter.suggest(&query("Davao")).await.is_empty());
    }

    #[tokio::test]
    async fn resolve_takes_first_match() {
        let adapter = adapter(Ok(vec![]), Ok(vec![davao()]));
        assert_eq!(
            adapter.resolve(&query("Davao")).await.unwrap(),
            Coordinate::davao_city()
        );
    }

    #[tokio::test]
    async fn resolve_without_match_is_not_found() {
        let adapter = adapter(Ok(vec![]), Ok(vec![]));
        let err = adapter.resolve(&query("Atlantis")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(q) if q == "Atlantis"));
    }

    #[tokio::test]
    async fn resolve_transport_failure() {
        let adapter = adapter(
            Ok(vec![]),
            Err(GeocodingError::ConnectionFailed("refused".to_string())),
        );
        let err = adapter.resolve(&query("Davao")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Transport(_)));
    }

    #[test]
    fn from_config_requires_api_key() {
        let err = GeocodingAdapter::from_config(&GeocodingAppConfig::default()).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn error_mapping() {
        assert!(matches!(
            to_application_error(GeocodingError::RateLimitExceeded {
                retry_after_secs: None
            }),
            ApplicationError::Transport(_)
        ));
        assert!(matches!(
            to_application_error(GeocodingError::ConfigurationError("x".into())),
            ApplicationError::Configuration(_)
        ));
    }
}
