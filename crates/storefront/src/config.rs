//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `VIETLONG_ASSISTANT_API_KEY` - Generation API key; the chat endpoint
//!   degrades to its apology reply when unset
//! - `VIETLONG_ASSISTANT_API_URL` - Generation endpoint (default: Anthropic
//!   Messages API)
//! - `VIETLONG_ASSISTANT_MODEL` - Model identifier
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! Storage backend selection is documented in `vietlong-storage`
//! (`VIETLONG_STORAGE` and friends).

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

use vietlong_storage::{StorageConfig, StorageConfigError};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error(transparent)]
    Storage(#[from] StorageConfigError),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Storage backend selection
    pub storage: StorageConfig,
    /// Assistant bridge configuration, if an API key is present
    pub assistant: Option<AssistantConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Generation API configuration for the assistant bridge.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AssistantConfig {
    /// Endpoint URL of the generation API
    pub api_url: String,
    /// API key
    pub api_key: SecretString,
    /// Model identifier
    pub model: String,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or the
    /// selected storage backend is missing its settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_owned(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_owned(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            storage: StorageConfig::from_env()?,
            assistant: AssistantConfig::from_env(),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl AssistantConfig {
    /// Load the assistant configuration, `None` if no API key is set.
    fn from_env() -> Option<Self> {
        let api_key = get_optional_env("VIETLONG_ASSISTANT_API_KEY")?;
        Some(Self {
            api_url: get_env_or_default(
                "VIETLONG_ASSISTANT_API_URL",
                "https://api.anthropic.com/v1/messages",
            ),
            api_key: SecretString::from(api_key),
            model: get_env_or_default("VIETLONG_ASSISTANT_MODEL", "claude-3-5-haiku-latest"),
        })
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            storage: StorageConfig::Local {
                path: "data/vietlong.json".into(),
            },
            assistant: None,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_assistant_config_debug_redacts_key() {
        let config = AssistantConfig {
            api_url: "https://api.anthropic.com/v1/messages".to_owned(),
            api_key: SecretString::from("super-secret-api-key"),
            model: "claude-3-5-haiku-latest".to_owned(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-api-key"));
    }
}
