//! OpenRouteService geocoding client
//!
//! Wraps the `/geocode/search` and `/geocode/autocomplete` endpoints.
//! Suggestion lists may be cached for a short TTL so that retyping a
//! recent query does not hit the API again. Autocomplete lookups are
//! never cached.

use std::time::Duration;

use async_trait::async_trait;
use domain::Suggestion;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::GeocodingError;
use crate::models::FeatureCollection;

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Ranked place matches for a (possibly partial) query
    async fn search(&self, query: &str, size: u8) -> Result<Vec<Suggestion>, GeocodingError>;

    /// Best completions for a query, used for an explicit search
    async fn autocomplete(&self, query: &str, size: u8)
    -> Result<Vec<Suggestion>, GeocodingError>;
}

/// Geocoding endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Search,
    Autocomplete,
}

impl Endpoint {
    const fn path(self) -> &'static str {
        match self {
            Self::Search => "/geocode/search",
            Self::Autocomplete => "/geocode/autocomplete",
        }
    }
}

/// OpenRouteService-based geocoding client
#[derive(Debug)]
pub struct OpenRouteServiceClient {
    client: Client,
    config: GeocodingConfig,
    cache: Option<Cache<(String, u8), Vec<Suggestion>>>,
}

impl OpenRouteServiceClient {
    /// Create a new OpenRouteService client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        config
            .validate()
            .map_err(GeocodingError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("Wayfinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(config.cache_capacity)
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
        })
    }

    /// Issue a GET against one of the geocoding endpoints
    async fn fetch(
        &self,
        endpoint: Endpoint,
        query: &str,
        size: u8,
    ) -> Result<Vec<Suggestion>, GeocodingError> {
        let url = format!("{}{}", self.config.base_url, endpoint.path());
        let params = [
            ("api_key", self.config.api_key.clone()),
            ("text", query.to_string()),
            ("size", size.to_string()),
        ];

        debug!(path = endpoint.path(), %query, size, "Querying geocoder");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GeocodingError::Unauthorized {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let collection: FeatureCollection =
            serde_json::from_str(&body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let mut suggestions = collection.to_suggestions()?;
        suggestions.truncate(usize::from(size));

        if suggestions.is_empty() {
            warn!(%query, "No places found");
        }

        debug!(count = suggestions.len(), "Places found");
        Ok(suggestions)
    }
}

/// Trimmed query text, or `EmptyQuery` before any request is made
fn non_empty(query: &str) -> Result<&str, GeocodingError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(GeocodingError::EmptyQuery)
    } else {
        Ok(trimmed)
    }
}

#[async_trait]
impl GeocodingClient for OpenRouteServiceClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, size: u8) -> Result<Vec<Suggestion>, GeocodingError> {
        let query = non_empty(query)?;

        let cache_key = (query.to_lowercase(), size);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&cache_key).await {
                debug!(%query, "Suggestion cache hit");
                return Ok(hit);
            }
        }

        let suggestions = self.fetch(Endpoint::Search, query, size).await?;

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, suggestions.clone()).await;
        }

        Ok(suggestions)
    }

    #[instrument(skip(self))]
    async fn autocomplete(
        &self,
        query: &str,
        size: u8,
    ) -> Result<Vec<Suggestion>, GeocodingError> {
        let query = non_empty(query)?;
        self.fetch(Endpoint::Autocomplete, query, size).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Search.path(), "/geocode/search");
        assert_eq!(Endpoint::Autocomplete.path(), "/geocode/autocomplete");
    }

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty("  Davao ").unwrap(), "Davao");
    }

    #[test]
    fn test_non_empty_rejects_whitespace() {
        assert!(matches!(non_empty(" \t "), Err(GeocodingError::EmptyQuery)));
        assert!(matches!(non_empty(""), Err(GeocodingError::EmptyQuery)));
    }

    #[test]
    fn test_new_rejects_missing_api_key() {
        let result = OpenRouteServiceClient::new(&GeocodingConfig::default());
        assert!(matches!(
            result,
            Err(GeocodingError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_new_without_cache() {
        let client = OpenRouteServiceClient::new(&GeocodingConfig::for_testing()).unwrap();
        assert!(client.cache.is_none());
    }

    #[test]
    fn test_new_with_cache() {
        let config = GeocodingConfig {
            cache_ttl_secs: 60,
            ..GeocodingConfig::for_testing()
        };
        let client = OpenRouteServiceClient::new(&config).unwrap();
        assert!(client.cache.is_some());
    }
}
