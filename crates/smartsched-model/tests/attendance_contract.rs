//! Contract tests for the constraint-validation collaborator.
//!
//! Pinned properties:
//! - Malformed or unreachable model call → `isValid = false, logAttempt = true`.
//! - `logAttempt = true` → the logging side channel is invoked exactly once,
//!   with the verdict's reason or the default reason string.

use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use smartsched_core::{ClassId, GeoLocation, StudentId};
use smartsched_model::{
    AttemptLogger, AttendanceAttempt, InvalidAttempt, ModelApiConfig, ModelGateway,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/test-model:generateContent";

fn gateway(uri: &str) -> ModelGateway {
    let config = ModelApiConfig::local_mock(uri, "test-key").unwrap();
    ModelGateway::new(config).unwrap()
}

fn attempt() -> AttendanceAttempt {
    AttendanceAttempt {
        student_id: StudentId::new("S001").unwrap(),
        class_id: ClassId::new("C01").unwrap(),
        timestamp: Utc.with_ymd_and_hms(2026, 1, 5, 9, 15, 0).unwrap(),
        location_data_uri: GeoLocation::new(24.8607, 67.0011)
            .unwrap()
            .to_data_uri()
            .unwrap(),
        scheduled_start_time: Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap(),
        scheduled_end_time: Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap(),
    }
}

fn envelope(verdict: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"parts": [{"text": verdict.to_string()}]}
        }]
    })
}

/// Test logger that captures every record and optionally refuses to ack.
#[derive(Default)]
struct CapturingLogger {
    records: Mutex<Vec<InvalidAttempt>>,
    refuse: bool,
}

impl AttemptLogger for CapturingLogger {
    fn record(&self, attempt: &InvalidAttempt) -> bool {
        self.records.lock().push(attempt.clone());
        !self.refuse
    }
}

#[tokio::test]
async fn valid_verdict_does_not_invoke_logger() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
            "isValid": true,
            "logAttempt": false
        }))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let logger = CapturingLogger::default();
    let verdict = gateway(&mock_server.uri())
        .attendance()
        .validate(&attempt(), &logger)
        .await;

    assert!(verdict.is_valid);
    assert!(!verdict.log_attempt);
    assert!(logger.records.lock().is_empty());
}

#[tokio::test]
async fn loggable_verdict_invokes_logger_exactly_once_with_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
            "isValid": false,
            "reason": "Student is outside college premises.",
            "logAttempt": true,
            "classification": "out_of_bounds"
        }))))
        .mount(&mock_server)
        .await;

    let logger = CapturingLogger::default();
    let verdict = gateway(&mock_server.uri())
        .attendance()
        .validate(&attempt(), &logger)
        .await;

    assert!(!verdict.is_valid);
    assert_eq!(verdict.classification.as_deref(), Some("out_of_bounds"));

    let records = logger.records.lock();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].reason, "Student is outside college premises.");
    assert_eq!(records[0].student_id, attempt().student_id);
    assert_eq!(records[0].class_id, attempt().class_id);
}

#[tokio::test]
async fn missing_reason_logs_default_reason_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
            "isValid": false,
            "logAttempt": true
        }))))
        .mount(&mock_server)
        .await;

    let logger = CapturingLogger::default();
    gateway(&mock_server.uri())
        .attendance()
        .validate(&attempt(), &logger)
        .await;

    let records = logger.records.lock();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].reason, "No reason provided.");
}

#[tokio::test]
async fn api_error_degrades_to_invalid_and_logs_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let logger = CapturingLogger::default();
    let verdict = gateway(&mock_server.uri())
        .attendance()
        .validate(&attempt(), &logger)
        .await;

    assert!(!verdict.is_valid);
    assert!(verdict.log_attempt);
    assert!(verdict.reason.as_deref().unwrap().contains("unavailable"));
    assert_eq!(logger.records.lock().len(), 1);
}

#[tokio::test]
async fn malformed_verdict_degrades_to_invalid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "attendance looks fine"}]}}]
        })))
        .mount(&mock_server)
        .await;

    let logger = CapturingLogger::default();
    let verdict = gateway(&mock_server.uri())
        .attendance()
        .validate(&attempt(), &logger)
        .await;

    assert!(!verdict.is_valid);
    assert!(verdict.log_attempt);
}

#[tokio::test]
async fn unreachable_endpoint_degrades_to_invalid_and_logs() {
    let logger = CapturingLogger::default();
    let verdict = gateway("http://127.0.0.1:1")
        .attendance()
        .validate(&attempt(), &logger)
        .await;

    assert!(!verdict.is_valid);
    assert!(verdict.log_attempt);
    assert_eq!(logger.records.lock().len(), 1);
}

#[tokio::test]
async fn refused_acknowledgement_does_not_change_verdict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
            "isValid": false,
            "reason": "Attempt outside class window.",
            "logAttempt": true
        }))))
        .mount(&mock_server)
        .await;

    let logger = CapturingLogger {
        refuse: true,
        ..Default::default()
    };
    let verdict = gateway(&mock_server.uri())
        .attendance()
        .validate(&attempt(), &logger)
        .await;

    assert!(!verdict.is_valid);
    assert_eq!(
        verdict.reason.as_deref(),
        Some("Attempt outside class window.")
    );
    assert_eq!(logger.records.lock().len(), 1);
}
