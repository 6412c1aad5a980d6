//! Constraint-Validation Collaborator.
//!
//! Judges whether an attendance attempt is inside college premises and
//! within the scheduled class window. Like the face collaborator, the
//! validate operation never fails: any model error is converted into a
//! conservative `isValid = false, logAttempt = true` verdict.
//!
//! ## Logging side channel
//!
//! Whenever a verdict carries `logAttempt = true` — whether the model said
//! so or the conservative fallback did — the supplied [`AttemptLogger`]
//! is invoked exactly once with the verdict's reason, or a default reason
//! string when the model gave none. The logger's boolean acknowledgement
//! does not alter the verdict; a `false` is recorded in the operator log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartsched_core::{ClassId, DataUri, StudentId};

use crate::face::SERVICE_UNAVAILABLE;
use crate::generate::{ModelClient, Part};
use crate::prompt;

const ENDPOINT: &str = "attendance:validate";

/// Reason recorded when a loggable verdict carries none.
pub(crate) const DEFAULT_REASON: &str = "No reason provided.";

/// One attendance attempt, constructed per request and not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceAttempt {
    /// The student marking attendance.
    pub student_id: StudentId,
    /// The class being attended.
    pub class_id: ClassId,
    /// When the attempt was made.
    pub timestamp: DateTime<Utc>,
    /// The student's GPS location as a JSON data URI.
    pub location_data_uri: DataUri,
    /// Scheduled class start.
    pub scheduled_start_time: DateTime<Utc>,
    /// Scheduled class end.
    pub scheduled_end_time: DateTime<Utc>,
}

/// Validity verdict returned by the constraint collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintVerdict {
    /// Whether the attempt satisfies the location and time constraints.
    pub is_valid: bool,
    /// Why the attempt is invalid, when it is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Whether the attempt should be recorded for review.
    pub log_attempt: bool,
    /// Classification of the invalid attempt (e.g. "out_of_bounds").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
}

impl ConstraintVerdict {
    /// The conservative fallback: invalid, loggable, unavailability reason.
    fn service_unavailable() -> Self {
        Self {
            is_valid: false,
            reason: Some(SERVICE_UNAVAILABLE.to_string()),
            log_attempt: true,
            classification: None,
        }
    }
}

/// An invalid attempt as handed to the logging side channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidAttempt {
    /// The student who attempted to mark attendance.
    pub student_id: StudentId,
    /// The class for which attendance was attempted.
    pub class_id: ClassId,
    /// When the invalid attempt happened.
    pub timestamp: DateTime<Utc>,
    /// Why the attempt was invalid.
    pub reason: String,
    /// The student's GPS location at the time.
    pub location_data_uri: DataUri,
}

/// Logging side channel for invalid attendance attempts.
///
/// Implementations return `true` when the attempt was durably recorded.
pub trait AttemptLogger: Send + Sync {
    /// Record an invalid attempt for review.
    fn record(&self, attempt: &InvalidAttempt) -> bool;
}

/// Default logger: emits a structured warn event and acknowledges.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAttemptLogger;

impl AttemptLogger for TracingAttemptLogger {
    fn record(&self, attempt: &InvalidAttempt) -> bool {
        tracing::warn!(
            student_id = %attempt.student_id,
            class_id = %attempt.class_id,
            timestamp = %attempt.timestamp,
            reason = %attempt.reason,
            "invalid attendance attempt"
        );
        true
    }
}

/// Client for the constraint-validation collaborator.
#[derive(Debug, Clone)]
pub struct ConstraintClient {
    model: ModelClient,
}

impl ConstraintClient {
    pub(crate) fn new(model: ModelClient) -> Self {
        Self { model }
    }

    /// Validate an attendance attempt against location and time constraints.
    ///
    /// Never fails: model errors degrade to the conservative
    /// `isValid = false, logAttempt = true` verdict. When the returned
    /// verdict carries `log_attempt`, `logger` is invoked exactly once.
    pub async fn validate(
        &self,
        attempt: &AttendanceAttempt,
        logger: &dyn AttemptLogger,
    ) -> ConstraintVerdict {
        let parts = vec![Part::text(prompt::constraint_validation(attempt))];

        let verdict = match self
            .model
            .generate_json::<ConstraintVerdict>(ENDPOINT, parts)
            .await
        {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::error!(error = %e, "attendance validation model call failed");
                ConstraintVerdict::service_unavailable()
            }
        };

        if verdict.log_attempt {
            let record = InvalidAttempt {
                student_id: attempt.student_id.clone(),
                class_id: attempt.class_id.clone(),
                timestamp: attempt.timestamp,
                reason: verdict
                    .reason
                    .clone()
                    .unwrap_or_else(|| DEFAULT_REASON.to_string()),
                location_data_uri: attempt.location_data_uri.clone(),
            };
            if !logger.record(&record) {
                tracing::warn!(
                    student_id = %record.student_id,
                    class_id = %record.class_id,
                    "attempt logger did not acknowledge the record"
                );
            }
        }

        verdict
    }
}
