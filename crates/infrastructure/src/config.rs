//! Application configuration
//!
//! Layered as defaults, then an optional `wayfinder.toml`, then
//! `WAYFINDER_*` environment variables (`__` separates sections, e.g.
//! `WAYFINDER_GEOCODING__API_KEY`). If no key was configured anywhere,
//! `ORS_API_KEY` is used.

use std::path::Path;

use application::{MAX_SUGGESTIONS, ShellConfig};
use integration_geocoding::GeocodingConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;

/// Default configuration file name, without extension
pub const CONFIG_FILE_NAME: &str = "wayfinder";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "WAYFINDER";

/// Conventional OpenRouteService key variable, used as a fallback
pub const ORS_API_KEY_VAR: &str = "ORS_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geocoding service configuration
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Map screen behavior
    #[serde(default)]
    pub shell: ShellConfig,

    /// Simulated device sensor
    #[serde(default)]
    pub device: DeviceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `wayfinder.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name(CONFIG_FILE_NAME).required(false))
    }

    /// Load configuration from an explicit file and the environment
    ///
    /// A missing file is an error here, unlike [`AppConfig::load`].
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build(
        file: config::File<config::FileSourceFile, config::FileFormat>,
    ) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("geocoding.base_url", default_base_url())?
            .add_source(file)
            // e.g. WAYFINDER_SHELL__NOTIFY_ON_LOCATION_FAILURE=true
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config.with_fallback_api_key(std::env::var(ORS_API_KEY_VAR).ok()))
    }

    /// Use `key` as the geocoding API key unless one is already set
    #[must_use]
    pub fn with_fallback_api_key(mut self, key: Option<String>) -> Self {
        if self.geocoding.api_key.is_none() {
            self.geocoding.api_key = key
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::from);
        }
        self
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first section error found.
    pub fn validate(&self) -> Result<(), String> {
        self.geocoding.validate()?;
        self.shell.validate()?;
        self.device.validate()?;
        self.logging.validate()
    }
}

/// Geocoding service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Base URL of the OpenRouteService API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Suggestion cache TTL in seconds (0 disables the cache)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Maximum number of cached suggestion lists
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,

    /// Suggestions shown per query, at most 5
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: u8,
}

impl std::fmt::Debug for GeocodingAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("cache_capacity", &self.cache_capacity)
            .field("suggestion_limit", &self.suggestion_limit)
            .finish()
    }
}

fn default_base_url() -> String {
    GeocodingConfig::default().base_url
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_cache_ttl_secs() -> u64 {
    300
}

const fn default_cache_capacity() -> u64 {
    256
}

const fn default_suggestion_limit() -> u8 {
    MAX_SUGGESTIONS
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

impl GeocodingAppConfig {
    /// Get the API key as a string reference (for API calls)
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Check if an API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key_str().is_some_and(|k| !k.trim().is_empty())
    }

    /// Client configuration for the HTTP integration
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured.
    pub fn to_client_config(&self) -> Result<GeocodingConfig, String> {
        let api_key = self
            .api_key_str()
            .filter(|_| self.has_api_key())
            .ok_or_else(|| {
                format!(
                    "No geocoding API key configured. Set {ORS_API_KEY_VAR} or \
                     {ENV_PREFIX}_GEOCODING__API_KEY"
                )
            })?;

        Ok(GeocodingConfig {
            base_url: self.base_url.clone(),
            api_key: api_key.to_string(),
            timeout_secs: self.timeout_secs,
            cache_ttl_secs: self.cache_ttl_secs,
            cache_capacity: self.cache_capacity,
        })
    }

    /// Validate the configuration
    ///
    /// A missing API key is not an error here; it is reported when a client
    /// is actually built.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("geocoding.base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("geocoding.timeout_secs must be greater than 0".to_string());
        }
        if self.suggestion_limit == 0 || self.suggestion_limit > MAX_SUGGESTIONS {
            return Err(format!(
                "geocoding.suggestion_limit must be between 1 and {MAX_SUGGESTIONS}"
            ));
        }
        Ok(())
    }
}

/// A fixed position reported by the simulated location sensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocationConfig {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// Simulated device sensor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Position to report; `None` means the position cannot be determined
    #[serde(default)]
    pub position: Option<GeoLocationConfig>,

    /// Whether location access has been granted
    #[serde(default = "default_true")]
    pub permission_granted: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            position: None,
            permission_granted: true,
        }
    }
}

impl DeviceConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(position) = self.position {
            domain::Coordinate::new(position.latitude, position.longitude)
                .map_err(|e| format!("device.position: {e}"))?;
        }
        Ok(())
    }
}
