//! Model API client error types.
//!
//! These errors exist for the wire layer and operator logs only. The two
//! collaborators ([`crate::face::FaceMatchClient`],
//! [`crate::attendance::ConstraintClient`]) never propagate them — they
//! degrade to conservative fallback verdicts.

/// Errors from model API calls.
#[derive(Debug, thiserror::Error)]
pub enum ModelApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Model API returned a non-2xx status.
    #[error("model API {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response envelope deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The response carried no candidate text.
    #[error("model returned no candidate text for {endpoint}")]
    EmptyResponse { endpoint: String },
    /// The candidate text was not a valid verdict document.
    #[error("malformed verdict from {endpoint}: {source}")]
    Verdict {
        endpoint: String,
        source: serde_json::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
