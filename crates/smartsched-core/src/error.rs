//! # Error Hierarchy
//!
//! Structured error types for SmartSched domain primitives, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.

use thiserror::Error;

/// Errors raised while constructing or validating domain primitives.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// An identifier was empty or whitespace-only.
    #[error("{kind} identifier must not be empty")]
    EmptyIdentifier {
        /// The identifier kind ("student", "class", "faculty").
        kind: &'static str,
    },

    /// A data URI did not match `data:<mime>[;params];base64,<payload>`.
    #[error("invalid data URI: {reason}")]
    InvalidDataUri {
        /// Human-readable reason for the rejection.
        reason: String,
    },

    /// A geographic coordinate was outside its valid range.
    #[error("coordinate out of range: {field} = {value}")]
    CoordinateOutOfRange {
        /// Which coordinate field was out of range.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
