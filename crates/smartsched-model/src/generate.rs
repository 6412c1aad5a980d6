//! Wire layer for the hosted `generateContent` endpoint.
//!
//! Request/response types match the generative-language REST schema
//! (camelCase, externally-tagged parts). The client asks for
//! `application/json` responses and deserializes the first candidate's
//! text into the caller's verdict type.
//!
//! There is no retry policy and no per-call timeout management: a single
//! call, a single fallback path. The client-wide timeout is set once at
//! construction from [`ModelApiConfig`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use smartsched_core::DataUri;

use crate::config::ModelApiConfig;
use crate::error::ModelApiError;

// -- Types matching the generative-language API schema ------------------------

/// One piece of a prompt: text or inline media.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    /// Plain prompt text.
    Text(String),
    /// Inline base64 media (face images).
    InlineData(InlineData),
}

impl Part {
    /// Build a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Build an inline-media part from a data URI. The media type loses
    /// its parameters (`image/jpeg;foo=bar` → `image/jpeg`) because the
    /// API expects a bare mime type.
    pub fn inline(uri: &DataUri) -> Self {
        Self::InlineData(InlineData {
            mime_type: uri.media_type_base().to_string(),
            data: uri.payload_base64().to_string(),
        })
    }
}

/// Inline base64 payload with its mime type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// A single content turn.
#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// Generation parameters. Only the response mime type is pinned: verdicts
/// must come back as JSON documents, not prose.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// Response envelope.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One response candidate.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

/// Candidate content parts.
#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

/// One candidate part; only text parts are relevant to verdicts.
#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    fn first_candidate_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// -- Client -------------------------------------------------------------------

/// Low-level client for the hosted model endpoint.
#[derive(Debug, Clone)]
pub struct ModelClient {
    http: reqwest::Client,
    base_url: url::Url,
    model: String,
}

impl ModelClient {
    /// Create a new model client from configuration.
    pub fn new(config: ModelApiConfig) -> Result<Self, ModelApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                let mut key =
                    reqwest::header::HeaderValue::from_str(&config.api_key).map_err(|_| {
                        ModelApiError::Config(crate::config::ConfigError::MissingApiKey)
                    })?;
                key.set_sensitive(true);
                headers.insert("x-goog-api-key", key);
                headers
            })
            .build()
            .map_err(|e| ModelApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
            model: config.model,
        })
    }

    /// Send a prompt and deserialize the first candidate's text as `T`.
    ///
    /// Calls `POST {base_url}/v1beta/models/{model}:generateContent` with
    /// `responseMimeType: application/json`.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        parts: Vec<Part>,
    ) -> Result<T, ModelApiError> {
        let url = format!(
            "{}v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let req = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let resp = self
            .http
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| ModelApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ModelApiError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let envelope: GenerateContentResponse =
            resp.json().await.map_err(|e| ModelApiError::Deserialization {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let text = envelope
            .first_candidate_text()
            .ok_or_else(|| ModelApiError::EmptyResponse {
                endpoint: endpoint.into(),
            })?;

        serde_json::from_str(&text).map_err(|e| ModelApiError::Verdict {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_serialize_in_api_shape() {
        let text = serde_json::to_value(Part::text("hello")).unwrap();
        assert_eq!(text, serde_json::json!({"text": "hello"}));

        let uri = DataUri::from_bytes("image/jpeg", b"face");
        let inline = serde_json::to_value(Part::inline(&uri)).unwrap();
        assert_eq!(
            inline,
            serde_json::json!({"inlineData": {"mimeType": "image/jpeg", "data": "ZmFjZQ=="}})
        );
    }

    #[test]
    fn request_pins_json_response_mime_type() {
        let req = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text("p")],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn first_candidate_text_concatenates_parts() {
        let envelope: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}]
        }))
        .unwrap();
        assert_eq!(envelope.first_candidate_text().unwrap(), "{\"a\":1}");
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let envelope: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(envelope.first_candidate_text().is_none());
    }
}
