//! Face-Match Collaborator.
//!
//! Compares a registered face image against a fresh capture. The verify
//! operation is infallible by contract: any transport, API, or parse
//! failure degrades to a no-match verdict with zero confidence and a
//! service-unavailable reason, so the caller always receives a
//! structurally valid result.

use serde::{Deserialize, Serialize};
use smartsched_core::DataUri;

use crate::generate::{ModelClient, Part};
use crate::prompt;

/// Human-readable reason attached to degraded verdicts.
pub(crate) const SERVICE_UNAVAILABLE: &str =
    "AI service is currently unavailable. Please try again later.";

const ENDPOINT: &str = "face:verify";

/// The two images under comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceComparison {
    /// The face registered at sign-up.
    pub registered: DataUri,
    /// The fresh capture to verify.
    pub current: DataUri,
}

/// Match verdict returned by the face collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceVerdict {
    /// Whether the current face matches the registered face.
    pub is_match: bool,
    /// Confidence score in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Reason for the result (mismatch or ambiguity).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FaceVerdict {
    /// A zero-confidence no-match verdict with the given reason.
    fn no_match(reason: &str) -> Self {
        Self {
            is_match: false,
            confidence: Some(0.0),
            reason: Some(reason.to_string()),
        }
    }
}

/// Client for the face-match collaborator.
#[derive(Debug, Clone)]
pub struct FaceMatchClient {
    model: ModelClient,
}

impl FaceMatchClient {
    pub(crate) fn new(model: ModelClient) -> Self {
        Self { model }
    }

    /// Compare two face images.
    ///
    /// Never fails: blank input and model errors both degrade to a
    /// no-match verdict with zero confidence.
    pub async fn verify(&self, comparison: &FaceComparison) -> FaceVerdict {
        if comparison.registered.payload_base64().is_empty()
            || comparison.current.payload_base64().is_empty()
        {
            return FaceVerdict::no_match("Missing image data for verification.");
        }

        let parts = vec![
            Part::text(prompt::FACE_MATCH),
            Part::text("Registered Face:"),
            Part::inline(&comparison.registered),
            Part::text("Current Face for Verification:"),
            Part::inline(&comparison.current),
        ];

        match self.model.generate_json::<FaceVerdict>(ENDPOINT, parts).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::error!(error = %e, "face verification model call failed");
                FaceVerdict::no_match(SERVICE_UNAVAILABLE)
            }
        }
    }
}
