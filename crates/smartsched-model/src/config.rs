//! Model API client configuration.
//!
//! Configures the endpoint, model name, and credentials for the hosted
//! generative-language API. Defaults point to the production endpoint;
//! override via environment variables or explicit construction for tests.

use url::Url;

/// Configuration for the hosted model endpoint.
///
/// Custom `Debug` implementation redacts the `api_key` field to prevent
/// credential leakage in log output.
#[derive(Clone)]
pub struct ModelApiConfig {
    /// Base URL of the generative-language API.
    /// Default: <https://generativelanguage.googleapis.com>
    pub base_url: Url,
    /// API key sent as `x-goog-api-key` on every request.
    pub api_key: String,
    /// Model name, e.g. `gemini-2.0-flash`.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ModelApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ModelApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SMARTSCHED_MODEL_URL` (default: `https://generativelanguage.googleapis.com`)
    /// - `SMARTSCHED_MODEL_API_KEY` (required)
    /// - `SMARTSCHED_MODEL` (default: `gemini-2.0-flash`)
    /// - `SMARTSCHED_MODEL_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key =
            std::env::var("SMARTSCHED_MODEL_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        Ok(Self {
            base_url: env_url(
                "SMARTSCHED_MODEL_URL",
                "https://generativelanguage.googleapis.com",
            )?,
            api_key,
            model: std::env::var("SMARTSCHED_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            timeout_secs: std::env::var("SMARTSCHED_MODEL_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` cannot be parsed.
    pub fn local_mock(base_url: &str, api_key: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl("base_url".to_string(), e.to_string()))?,
            api_key: api_key.to_string(),
            model: "test-model".to_string(),
            timeout_secs: 5,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SMARTSCHED_MODEL_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
