//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single spec served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SmartSched API",
        version = "0.3.0",
        description = "Attendance marking with model-delegated face matching and location/time constraint validation, roster and timetable reads, and the invalid-attempt review log.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        // Attendance
        crate::routes::attendance::mark_attendance,
        crate::routes::attendance::validate_attempt,
        crate::routes::attendance::get_log,
        crate::routes::attendance::get_checkins,
        crate::routes::attendance::set_mark,
        crate::routes::attendance::get_marks,
        // Faces
        crate::routes::faces::register_face,
        crate::routes::faces::verify_face,
        // Roster
        crate::routes::roster::list_students,
        crate::routes::roster::get_student,
        crate::routes::roster::list_faculty,
        crate::routes::roster::list_classes,
        crate::routes::roster::get_class,
        crate::routes::roster::get_timetable,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::auth::Role,
        crate::state::InvalidAttemptRecord,
        crate::state::CheckIn,
        crate::state::MarkStatus,
        crate::routes::attendance::MarkAttendanceRequest,
        crate::routes::attendance::MarkAttendanceResponse,
        crate::routes::attendance::ValidateAttemptRequest,
        crate::routes::attendance::SetMarkRequest,
        crate::routes::faces::RegisterFaceRequest,
        crate::routes::faces::RegisterFaceResponse,
        crate::routes::faces::VerifyFaceRequest,
    )),
    tags(
        (name = "attendance", description = "Attendance marking and review"),
        (name = "faces", description = "Face registration and verification"),
        (name = "roster", description = "Roster and timetable reads"),
    )
)]
pub struct ApiDoc;

/// Router serving the assembled spec.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_spec))
}

async fn serve_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
