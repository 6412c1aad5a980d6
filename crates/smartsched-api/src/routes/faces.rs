//! # Face Registration & Verification
//!
//! Students register a face image at sign-up; the attendance flow later
//! compares fresh captures against it. Standalone verification is exposed
//! for re-checks without marking attendance.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use smartsched_core::{DataUri, StudentId};
use smartsched_model::{FaceComparison, FaceVerdict};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Register a student's face image.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFaceRequest {
    /// The student registering a face.
    pub student_id: String,
    /// The face image as a data URI.
    pub face_data_uri: String,
}

impl Validate for RegisterFaceRequest {
    fn validate(&self) -> Result<(), String> {
        if self.student_id.trim().is_empty() {
            return Err("studentId must not be empty".to_string());
        }
        if self.face_data_uri.trim().is_empty() {
            return Err("faceDataUri must not be empty".to_string());
        }
        Ok(())
    }
}

/// Registration acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFaceResponse {
    /// The student whose face was registered.
    pub student_id: String,
    /// Whether a previous registration was replaced.
    pub replaced: bool,
}

/// Verify a fresh capture against the registered face.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyFaceRequest {
    /// The student being verified.
    pub student_id: String,
    /// The fresh capture as a data URI.
    pub current_face_data_uri: String,
}

impl Validate for VerifyFaceRequest {
    fn validate(&self) -> Result<(), String> {
        if self.student_id.trim().is_empty() {
            return Err("studentId must not be empty".to_string());
        }
        if self.current_face_data_uri.trim().is_empty() {
            return Err("currentFaceDataUri must not be empty".to_string());
        }
        Ok(())
    }
}

/// Build the faces router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/faces/register", post(register_face))
        .route("/v1/faces/verify", post(verify_face))
}

/// POST /v1/faces/register — Register a student's face.
#[utoipa::path(
    post,
    path = "/v1/faces/register",
    request_body = RegisterFaceRequest,
    responses(
        (status = 201, description = "Face registered", body = RegisterFaceResponse),
        (status = 404, description = "Unknown student", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid data URI", body = crate::error::ErrorBody),
    ),
    tag = "faces"
)]
pub async fn register_face(
    State(state): State<AppState>,
    body: Result<Json<RegisterFaceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterFaceResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let student_id = StudentId::new(req.student_id)?;
    if state.roster.student(&student_id).is_none() {
        return Err(AppError::NotFound(format!(
            "student {student_id} not found"
        )));
    }
    let face = DataUri::parse(req.face_data_uri)?;

    let replaced = state.faces.get(&student_id).is_some();
    state.faces.insert(student_id.clone(), face);
    tracing::info!(student_id = %student_id, replaced, "face registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterFaceResponse {
            student_id: student_id.to_string(),
            replaced,
        }),
    ))
}

/// POST /v1/faces/verify — Verify a capture against the registered face.
///
/// The verdict itself never fails (the collaborator degrades to no-match);
/// this endpoint errors only when the student has no registered face or
/// the model client is not configured.
#[utoipa::path(
    post,
    path = "/v1/faces/verify",
    request_body = VerifyFaceRequest,
    responses(
        (status = 200, description = "Match verdict"),
        (status = 404, description = "No registered face", body = crate::error::ErrorBody),
        (status = 503, description = "Model not configured", body = crate::error::ErrorBody),
    ),
    tag = "faces"
)]
pub async fn verify_face(
    State(state): State<AppState>,
    body: Result<Json<VerifyFaceRequest>, JsonRejection>,
) -> Result<Json<FaceVerdict>, AppError> {
    let req = extract_validated_json(body)?;
    let student_id = StudentId::new(req.student_id)?;
    let registered = state.faces.get(&student_id).ok_or_else(|| {
        AppError::NotFound(format!("no registered face for student {student_id}"))
    })?;
    let current = DataUri::parse(req.current_face_data_uri)?;

    let verdict = state
        .model()?
        .face()
        .verify(&FaceComparison {
            registered,
            current,
        })
        .await;

    Ok(Json(verdict))
}
