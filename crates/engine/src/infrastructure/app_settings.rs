//! Process configuration.
//!
//! Loaded once at startup from environment variables and passed explicitly
//! into constructors. Invalid values abort startup with a `ConfigError`.

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use crate::infrastructure::persistence::DEFAULT_DATABASE_URL;
use crate::infrastructure::random_number_client::DEFAULT_TIMEOUT_SECS;

pub const RANDOM_SERVICE_URL: &str = "RPSSL_RANDOM_SERVICE_URL";
pub const DATABASE_URL: &str = "RPSSL_DATABASE_URL";
pub const LATEST_RESULTS_COUNT: &str = "RPSSL_LATEST_RESULTS_COUNT";
pub const HTTP_TIMEOUT_SECS: &str = "RPSSL_HTTP_TIMEOUT_SECS";
pub const SERVER_HOST: &str = "SERVER_HOST";
pub const SERVER_PORT: &str = "SERVER_PORT";
pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";

/// Default page size of the scoreboard.
pub const DEFAULT_LATEST_RESULTS_COUNT: u32 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    #[error("{key} is invalid: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl ToString) -> Self {
        Self::Invalid {
            key,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Base URL of the random-number service (`GET {url}/random`).
    pub random_service_url: Url,
    pub database_url: String,
    /// Number of entries `GET /results` returns.
    pub latest_results_count: u32,
    pub http_timeout: Duration,
    pub server_host: String,
    pub server_port: u16,
    /// Empty means no CORS layer; `["*"]` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl AppSettings {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let random_service_url = get(RANDOM_SERVICE_URL)
            .ok_or(ConfigError::Missing(RANDOM_SERVICE_URL))
            .and_then(|raw| {
                Url::parse(&raw).map_err(|e| ConfigError::invalid(RANDOM_SERVICE_URL, e))
            })?;

        let settings = Self {
            random_service_url,
            database_url: get(DATABASE_URL).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            latest_results_count: parse_or(
                get(LATEST_RESULTS_COUNT),
                LATEST_RESULTS_COUNT,
                DEFAULT_LATEST_RESULTS_COUNT,
            )?,
            http_timeout: Duration::from_secs(parse_or(
                get(HTTP_TIMEOUT_SECS),
                HTTP_TIMEOUT_SECS,
                DEFAULT_TIMEOUT_SECS,
            )?),
            server_host: get(SERVER_HOST).unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_or(get(SERVER_PORT), SERVER_PORT, 3000)?,
            cors_allowed_origins: get(CORS_ALLOWED_ORIGINS)
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.random_service_url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                RANDOM_SERVICE_URL,
                "must be an http or https URL",
            ));
        }
        if self.latest_results_count == 0 {
            return Err(ConfigError::invalid(LATEST_RESULTS_COUNT, "must be greater than 0"));
        }
        if self.http_timeout.is_zero() {
            return Err(ConfigError::invalid(HTTP_TIMEOUT_SECS, "must be greater than 0"));
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server_host, self.server_port)
            .parse()
            .map_err(|e| ConfigError::invalid(SERVER_HOST, e))
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.parse().map_err(|e| ConfigError::invalid(key, e)),
        None => Ok(default),
    }
}
