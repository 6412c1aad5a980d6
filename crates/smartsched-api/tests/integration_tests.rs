//! # Integration Tests for smartsched-api
//!
//! Tests roster reads, face registration, 503 behavior without a model
//! client, check-in feed, faculty manual marking, authentication
//! middleware, and OpenAPI spec generation.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use smartsched_api::state::{AppConfig, AppState};

/// Helper: build the test app in demo mode (open access, no model client).
fn test_app() -> axum::Router {
    let state = AppState::new(AppConfig::default(), None);
    smartsched_api::app(state)
}

/// Helper: build the test app with auth enabled.
fn test_app_with_auth(token: &str) -> axum::Router {
    let config = AppConfig {
        port: 8080,
        auth_token: Some(token.to_string()),
    };
    let state = AppState::new(config, None);
    smartsched_api::app(state)
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn liveness_probe_is_open() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn readiness_reports_model_configuration() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["modelConfigured"], false);
}

// -- Roster -------------------------------------------------------------------

#[tokio::test]
async fn list_students_returns_seeded_roster() {
    let response = test_app().oneshot(get("/v1/students")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let students = body.as_array().unwrap();
    assert_eq!(students.len(), 5);
    assert_eq!(students[0]["id"], "S001");
    assert_eq!(students[0]["attendance"]["attended"], 18);
}

#[tokio::test]
async fn get_student_404_for_unknown_id() {
    let response = test_app().oneshot(get("/v1/students/S999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn get_class_includes_schedule() {
    let response = test_app().oneshot(get("/v1/classes/C01")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Computer Science 101");
    assert_eq!(body["facultyId"], "F01");
    assert!(body["schedule"]["startTime"].is_string());
}

#[tokio::test]
async fn timetable_is_keyed_by_full_day_name() {
    let response = test_app().oneshot(get("/v1/timetable")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["Monday"].as_array().unwrap().len(), 2);
    assert_eq!(body["Wednesday"].as_array().unwrap().len(), 0);
    assert!(body.get("Mon").is_none());
}

// -- Faces --------------------------------------------------------------------

#[tokio::test]
async fn register_face_then_replace() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/faces/register",
            serde_json::json!({
                "studentId": "S001",
                "faceDataUri": "data:image/jpeg;base64,ZmFjZQ=="
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["replaced"], false);

    let response = app
        .oneshot(post_json(
            "/v1/faces/register",
            serde_json::json!({
                "studentId": "S001",
                "faceDataUri": "data:image/jpeg;base64,bmV3ZmFjZQ=="
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["replaced"], true);
}

#[tokio::test]
async fn register_face_rejects_unknown_student() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/faces/register",
            serde_json::json!({
                "studentId": "S999",
                "faceDataUri": "data:image/jpeg;base64,ZmFjZQ=="
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn register_face_rejects_malformed_data_uri() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/faces/register",
            serde_json::json!({
                "studentId": "S001",
                "faceDataUri": "nonsense"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// -- Verdict endpoints without a model client ---------------------------------

#[tokio::test]
async fn verify_face_returns_503_without_model_client() {
    let app = test_app();
    app.clone()
        .oneshot(post_json(
            "/v1/faces/register",
            serde_json::json!({
                "studentId": "S001",
                "faceDataUri": "data:image/jpeg;base64,ZmFjZQ=="
            }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/v1/faces/verify",
            serde_json::json!({
                "studentId": "S001",
                "currentFaceDataUri": "data:image/jpeg;base64,ZmFjZQ=="
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "MODEL_UNAVAILABLE");
}

#[tokio::test]
async fn validate_returns_503_without_model_client() {
    let response = test_app()
        .oneshot(post_json(
            "/v1/attendance/validate",
            serde_json::json!({
                "studentId": "S001",
                "classId": "C01",
                "latitude": 24.8607,
                "longitude": 67.0011
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// -- Check-in feed ------------------------------------------------------------

#[tokio::test]
async fn checkins_start_empty() {
    let response = test_app()
        .oneshot(get("/v1/attendance/checkins"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

// -- Manual marking -----------------------------------------------------------

#[tokio::test]
async fn set_and_read_back_marks() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/attendance/classes/C01/marks",
            serde_json::json!({"studentId": "S002", "status": "present"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get("/v1/attendance/classes/C01/marks"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["S002"], "present");
}

#[tokio::test]
async fn marking_unenrolled_student_is_404() {
    // S001 is not enrolled in C03.
    let response = test_app()
        .oneshot(post_json(
            "/v1/attendance/classes/C03/marks",
            serde_json::json!({"studentId": "S001", "status": "absent"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// -- Authentication -----------------------------------------------------------

#[tokio::test]
async fn auth_rejects_missing_token() {
    let response = test_app_with_auth("hunter2")
        .oneshot(get("/v1/students"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn auth_accepts_valid_token() {
    let response = test_app_with_auth("hunter2")
        .oneshot(
            Request::builder()
                .uri("/v1/students")
                .header(header::AUTHORIZATION, "Bearer student:S001:hunter2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn attendance_log_requires_faculty_role() {
    let app = test_app_with_auth("hunter2");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/attendance/log")
                .header(header::AUTHORIZATION, "Bearer student:S001:hunter2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/attendance/log")
                .header(header::AUTHORIZATION, "Bearer faculty:F01:hunter2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_probes_bypass_auth() {
    let response = test_app_with_auth("hunter2")
        .oneshot(get("/health/liveness"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn openapi_spec_lists_attendance_paths() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/v1/attendance/mark"].is_object());
    assert!(body["paths"]["/v1/faces/register"].is_object());
}
