//! # Attendance Endpoints
//!
//! The marking flow mirrors the student dashboard sequence: resolve the
//! registered face, run face verification, and only on a match record a
//! check-in and run constraint validation. A face mismatch short-circuits
//! — no location/time check is made. Standalone validation, the
//! invalid-attempt log, the check-in feed, and faculty manual marking
//! round out the surface.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartsched_core::{ClassId, DataUri, GeoLocation, StudentId};
use smartsched_model::{AttendanceAttempt, ConstraintVerdict, FaceComparison, FaceVerdict};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{CallerIdentity, Role};
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::{AppState, CheckIn, InvalidAttemptRecord, MarkStatus, StoreAttemptLogger};

// -- DTOs ---------------------------------------------------------------------

/// Full attendance-marking request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    /// The student marking attendance.
    pub student_id: String,
    /// The class being attended.
    pub class_id: String,
    /// Fresh face capture as a data URI.
    pub current_face_data_uri: String,
    /// GPS latitude at capture time.
    pub latitude: f64,
    /// GPS longitude at capture time.
    pub longitude: f64,
}

impl Validate for MarkAttendanceRequest {
    fn validate(&self) -> Result<(), String> {
        if self.student_id.trim().is_empty() || self.class_id.trim().is_empty() {
            return Err("studentId and classId must not be empty".to_string());
        }
        if self.current_face_data_uri.trim().is_empty() {
            return Err("currentFaceDataUri must not be empty".to_string());
        }
        Ok(())
    }
}

/// Combined verdict for the marking flow.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceResponse {
    /// Face match verdict (always present).
    #[schema(value_type = Object)]
    pub face: FaceVerdict,
    /// Constraint verdict; absent when the face gate short-circuited.
    #[schema(value_type = Object)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<ConstraintVerdict>,
    /// Whether a check-in was recorded.
    pub checked_in: bool,
}

/// Standalone constraint-validation request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateAttemptRequest {
    /// The student marking attendance.
    pub student_id: String,
    /// The class being attended.
    pub class_id: String,
    /// GPS latitude at capture time.
    pub latitude: f64,
    /// GPS longitude at capture time.
    pub longitude: f64,
    /// Attempt timestamp; defaults to now.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Scheduled start override; defaults to the class schedule.
    #[serde(default)]
    pub scheduled_start_time: Option<DateTime<Utc>>,
    /// Scheduled end override; defaults to the class schedule.
    #[serde(default)]
    pub scheduled_end_time: Option<DateTime<Utc>>,
}

impl Validate for ValidateAttemptRequest {
    fn validate(&self) -> Result<(), String> {
        if self.student_id.trim().is_empty() || self.class_id.trim().is_empty() {
            return Err("studentId and classId must not be empty".to_string());
        }
        Ok(())
    }
}

/// Faculty manual mark request.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetMarkRequest {
    /// The student being marked.
    pub student_id: String,
    /// Present or absent.
    pub status: MarkStatus,
}

impl Validate for SetMarkRequest {
    fn validate(&self) -> Result<(), String> {
        if self.student_id.trim().is_empty() {
            return Err("studentId must not be empty".to_string());
        }
        Ok(())
    }
}

// -- Router -------------------------------------------------------------------

/// Build the attendance router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/attendance/mark", post(mark_attendance))
        .route("/v1/attendance/validate", post(validate_attempt))
        .route("/v1/attendance/log", get(get_log))
        .route("/v1/attendance/checkins", get(get_checkins))
        .route(
            "/v1/attendance/classes/:id/marks",
            post(set_mark).get(get_marks),
        )
}

// -- Helpers ------------------------------------------------------------------

/// Resolve an attempt's scheduled window: explicit overrides win,
/// otherwise the class schedule's times are anchored to the attempt date.
fn scheduled_window(
    state: &AppState,
    class_id: &ClassId,
    timestamp: DateTime<Utc>,
    start_override: Option<DateTime<Utc>>,
    end_override: Option<DateTime<Utc>>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    if let (Some(start), Some(end)) = (start_override, end_override) {
        return Ok((start, end));
    }
    let class = state
        .roster
        .class_section(class_id)
        .ok_or_else(|| AppError::NotFound(format!("class {class_id} not found")))?;
    let date = timestamp.date_naive();
    let start = start_override.unwrap_or_else(|| date.and_time(class.schedule.start_time).and_utc());
    let end = end_override.unwrap_or_else(|| date.and_time(class.schedule.end_time).and_utc());
    Ok((start, end))
}

fn build_attempt(
    state: &AppState,
    student_id: StudentId,
    class_id: ClassId,
    location: GeoLocation,
    timestamp: DateTime<Utc>,
    start_override: Option<DateTime<Utc>>,
    end_override: Option<DateTime<Utc>>,
) -> Result<AttendanceAttempt, AppError> {
    let (scheduled_start_time, scheduled_end_time) =
        scheduled_window(state, &class_id, timestamp, start_override, end_override)?;
    Ok(AttendanceAttempt {
        student_id,
        class_id,
        timestamp,
        location_data_uri: location.to_data_uri()?,
        scheduled_start_time,
        scheduled_end_time,
    })
}

// -- Handlers -----------------------------------------------------------------

/// POST /v1/attendance/mark — Full marking flow.
#[utoipa::path(
    post,
    path = "/v1/attendance/mark",
    request_body = MarkAttendanceRequest,
    responses(
        (status = 200, description = "Combined verdict", body = MarkAttendanceResponse),
        (status = 404, description = "Unknown student/class or no registered face", body = crate::error::ErrorBody),
        (status = 503, description = "Model not configured", body = crate::error::ErrorBody),
    ),
    tag = "attendance"
)]
pub async fn mark_attendance(
    State(state): State<AppState>,
    body: Result<Json<MarkAttendanceRequest>, JsonRejection>,
) -> Result<Json<MarkAttendanceResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let student_id = StudentId::new(req.student_id)?;
    let class_id = ClassId::new(req.class_id)?;

    let student = state
        .roster
        .student(&student_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("student {student_id} not found")))?;
    let registered = state.faces.get(&student_id).ok_or_else(|| {
        AppError::NotFound(format!("no registered face for student {student_id}"))
    })?;
    let current = DataUri::parse(req.current_face_data_uri)?;
    let location = GeoLocation::new(req.latitude, req.longitude)?;
    let model = state.model()?;

    let face = model
        .face()
        .verify(&FaceComparison {
            registered,
            current,
        })
        .await;

    if !face.is_match {
        tracing::info!(student_id = %student_id, class_id = %class_id, "face gate rejected attempt");
        return Ok(Json(MarkAttendanceResponse {
            face,
            attendance: None,
            checked_in: false,
        }));
    }

    let timestamp = Utc::now();
    state.push_checkin(CheckIn {
        id: Uuid::new_v4(),
        student_id: student_id.clone(),
        name: student.name,
        timestamp,
    });

    let attempt = build_attempt(&state, student_id, class_id, location, timestamp, None, None)?;
    let logger = StoreAttemptLogger::new(state.invalid_attempts.clone());
    let attendance = model.attendance().validate(&attempt, &logger).await;

    Ok(Json(MarkAttendanceResponse {
        face,
        attendance: Some(attendance),
        checked_in: true,
    }))
}

/// POST /v1/attendance/validate — Constraint validation alone.
#[utoipa::path(
    post,
    path = "/v1/attendance/validate",
    request_body = ValidateAttemptRequest,
    responses(
        (status = 200, description = "Constraint verdict"),
        (status = 503, description = "Model not configured", body = crate::error::ErrorBody),
    ),
    tag = "attendance"
)]
pub async fn validate_attempt(
    State(state): State<AppState>,
    body: Result<Json<ValidateAttemptRequest>, JsonRejection>,
) -> Result<Json<ConstraintVerdict>, AppError> {
    let req = extract_validated_json(body)?;
    let student_id = StudentId::new(req.student_id)?;
    let class_id = ClassId::new(req.class_id)?;
    let location = GeoLocation::new(req.latitude, req.longitude)?;
    let timestamp = req.timestamp.unwrap_or_else(Utc::now);

    let attempt = build_attempt(
        &state,
        student_id,
        class_id,
        location,
        timestamp,
        req.scheduled_start_time,
        req.scheduled_end_time,
    )?;
    let logger = StoreAttemptLogger::new(state.invalid_attempts.clone());
    let verdict = state.model()?.attendance().validate(&attempt, &logger).await;

    Ok(Json(verdict))
}

/// GET /v1/attendance/log — Invalid-attempt log (faculty and above).
#[utoipa::path(
    get,
    path = "/v1/attendance/log",
    responses(
        (status = 200, description = "Logged invalid attempts, newest first", body = [InvalidAttemptRecord]),
        (status = 403, description = "Requires faculty role", body = crate::error::ErrorBody),
    ),
    tag = "attendance"
)]
pub async fn get_log(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Result<Json<Vec<InvalidAttemptRecord>>, AppError> {
    caller.require(Role::Faculty)?;
    let mut records = state.invalid_attempts.values();
    records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    Ok(Json(records))
}

/// GET /v1/attendance/checkins — Recent check-ins, most recent first.
#[utoipa::path(
    get,
    path = "/v1/attendance/checkins",
    responses((status = 200, description = "Recent check-ins", body = [CheckIn])),
    tag = "attendance"
)]
pub async fn get_checkins(State(state): State<AppState>) -> Json<Vec<CheckIn>> {
    Json(state.recent_checkins())
}

/// POST /v1/attendance/classes/:id/marks — Faculty manual marking.
#[utoipa::path(
    post,
    path = "/v1/attendance/classes/{id}/marks",
    params(("id" = String, Path, description = "Class ID")),
    request_body = SetMarkRequest,
    responses(
        (status = 204, description = "Mark recorded"),
        (status = 403, description = "Requires faculty role", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown class or student not enrolled", body = crate::error::ErrorBody),
    ),
    tag = "attendance"
)]
pub async fn set_mark(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<String>,
    body: Result<Json<SetMarkRequest>, JsonRejection>,
) -> Result<axum::http::StatusCode, AppError> {
    caller.require(Role::Faculty)?;
    let class_id = ClassId::new(id)?;
    let req = extract_validated_json(body)?;
    let student_id = StudentId::new(req.student_id)?;

    let class = state
        .roster
        .class_section(&class_id)
        .ok_or_else(|| AppError::NotFound(format!("class {class_id} not found")))?;
    if !class.students.contains(&student_id) {
        return Err(AppError::NotFound(format!(
            "student {student_id} is not enrolled in class {class_id}"
        )));
    }

    state
        .marks
        .update_or_default(class_id, |marks| {
            marks.insert(student_id.clone(), req.status);
        });
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// GET /v1/attendance/classes/:id/marks — Read back manual marks.
#[utoipa::path(
    get,
    path = "/v1/attendance/classes/{id}/marks",
    params(("id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Marks keyed by student ID"),
        (status = 403, description = "Requires faculty role", body = crate::error::ErrorBody),
        (status = 404, description = "Unknown class", body = crate::error::ErrorBody),
    ),
    tag = "attendance"
)]
pub async fn get_marks(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> Result<Json<HashMap<StudentId, MarkStatus>>, AppError> {
    caller.require(Role::Faculty)?;
    let class_id = ClassId::new(id)?;
    if state.roster.class_section(&class_id).is_none() {
        return Err(AppError::NotFound(format!("class {class_id} not found")));
    }
    Ok(Json(state.marks.get(&class_id).unwrap_or_default()))
}
