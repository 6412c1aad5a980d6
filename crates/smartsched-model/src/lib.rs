//! # smartsched-model — Typed client for the hosted verdict model
//!
//! SmartSched delegates its two decisions to a hosted generative model:
//!
//! - **Face match** — compare a registered face image against a capture
//!   and return a match verdict with confidence.
//! - **Constraint validation** — judge whether an attendance attempt is
//!   within college premises and inside the scheduled class window.
//!
//! This crate is the only path between SmartSched and the model endpoint.
//! It marshals data URIs and JSON into structured prompts, parses typed
//! JSON verdicts, and — per the attendance contract — never surfaces an
//! error to its callers: both collaborators degrade to a conservative
//! negative verdict with a human-readable reason.
//!
//! ## Contract
//!
//! - A transport, API, or parse failure in face matching yields
//!   `isMatch = false, confidence = 0`.
//! - A transport, API, or parse failure in constraint validation yields
//!   `isValid = false, logAttempt = true`.
//! - Whenever a constraint verdict carries `logAttempt = true`, the
//!   [`AttemptLogger`] side channel is invoked exactly once.

pub mod attendance;
pub mod config;
pub mod error;
pub mod face;
pub mod generate;
pub mod prompt;

pub use attendance::{
    AttemptLogger, AttendanceAttempt, ConstraintClient, ConstraintVerdict, InvalidAttempt,
    TracingAttemptLogger,
};
pub use config::ModelApiConfig;
pub use error::ModelApiError;
pub use face::{FaceComparison, FaceMatchClient, FaceVerdict};
pub use generate::ModelClient;

/// Top-level model gateway. Holds the two collaborator clients.
#[derive(Debug, Clone)]
pub struct ModelGateway {
    face: FaceMatchClient,
    attendance: ConstraintClient,
}

impl ModelGateway {
    /// Create a new gateway from configuration.
    pub fn new(config: ModelApiConfig) -> Result<Self, ModelApiError> {
        let model = ModelClient::new(config)?;
        Ok(Self {
            face: FaceMatchClient::new(model.clone()),
            attendance: ConstraintClient::new(model),
        })
    }

    /// Access the face-match collaborator.
    pub fn face(&self) -> &FaceMatchClient {
        &self.face
    }

    /// Access the constraint-validation collaborator.
    pub fn attendance(&self) -> &ConstraintClient {
        &self.attendance
    }
}
