//! # Data URI Handling
//!
//! Inline-encoded binary payloads. Face images arrive from capture devices
//! as `data:image/jpeg;base64,...`; GPS locations are encoded as
//! `data:application/json;charset=utf-8;base64,...`. [`DataUri`] validates
//! the shape once at the boundary so downstream code can treat the value
//! as well-formed.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// A validated `data:` URI with a base64-encoded payload.
///
/// Only base64 payloads are accepted; percent-encoded data URIs are not
/// part of the attendance wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUri(String);

impl DataUri {
    /// Parse and validate a data URI string.
    ///
    /// Validates the `data:` scheme, the presence of the `;base64,`
    /// marker, a non-empty media type, and that the payload decodes.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let rest = raw
            .strip_prefix(SCHEME)
            .ok_or_else(|| ValidationError::InvalidDataUri {
                reason: "missing `data:` scheme".to_string(),
            })?;
        let marker =
            rest.find(BASE64_MARKER)
                .ok_or_else(|| ValidationError::InvalidDataUri {
                    reason: "missing `;base64,` marker".to_string(),
                })?;
        let media_type = &rest[..marker];
        if media_type.is_empty() {
            return Err(ValidationError::InvalidDataUri {
                reason: "missing media type".to_string(),
            });
        }
        let payload = &rest[marker + BASE64_MARKER.len()..];
        STANDARD
            .decode(payload)
            .map_err(|e| ValidationError::InvalidDataUri {
                reason: format!("payload is not valid base64: {e}"),
            })?;
        Ok(Self(raw))
    }

    /// Encode raw bytes as a data URI with the given media type.
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        Self(format!(
            "{SCHEME}{media_type}{BASE64_MARKER}{}",
            STANDARD.encode(bytes)
        ))
    }

    /// Encode a JSON value as a `application/json;charset=utf-8` data URI.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValidationError> {
        let bytes = serde_json::to_vec(value)?;
        Ok(Self::from_bytes("application/json;charset=utf-8", &bytes))
    }

    /// The media type portion, including any parameters (e.g.
    /// `image/jpeg` or `application/json;charset=utf-8`).
    pub fn media_type(&self) -> &str {
        // Both markers were validated at construction.
        let rest = &self.0[SCHEME.len()..];
        match rest.find(BASE64_MARKER) {
            Some(idx) => &rest[..idx],
            None => rest,
        }
    }

    /// The media type without parameters (e.g. `application/json` for
    /// `application/json;charset=utf-8`).
    pub fn media_type_base(&self) -> &str {
        self.media_type()
            .split(';')
            .next()
            .unwrap_or_default()
    }

    /// The base64 payload, still encoded.
    pub fn payload_base64(&self) -> &str {
        let rest = &self.0[SCHEME.len()..];
        match rest.find(BASE64_MARKER) {
            Some(idx) => &rest[idx + BASE64_MARKER.len()..],
            None => "",
        }
    }

    /// Decode the base64 payload back to raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, ValidationError> {
        let rest = &self.0[SCHEME.len()..];
        let payload = match rest.find(BASE64_MARKER) {
            Some(idx) => &rest[idx + BASE64_MARKER.len()..],
            None => "",
        };
        STANDARD
            .decode(payload)
            .map_err(|e| ValidationError::InvalidDataUri {
                reason: format!("payload is not valid base64: {e}"),
            })
    }

    /// Access the full URI string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
