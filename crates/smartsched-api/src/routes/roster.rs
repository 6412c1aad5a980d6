//! # Roster & Timetable — Read-Only Endpoints
//!
//! Backs the dashboards: student lists with attendance tallies, faculty
//! with their classes, class sections with schedules, and the published
//! weekly timetable. All data comes from the seeded roster.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use smartsched_core::roster::{ClassSection, Faculty, Student};
use smartsched_core::{ClassId, StudentId};

use crate::error::AppError;
use crate::state::AppState;

/// Build the roster router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/students", get(list_students))
        .route("/v1/students/:id", get(get_student))
        .route("/v1/faculty", get(list_faculty))
        .route("/v1/classes", get(list_classes))
        .route("/v1/classes/:id", get(get_class))
        .route("/v1/timetable", get(get_timetable))
}

/// GET /v1/students — List all registered students.
#[utoipa::path(
    get,
    path = "/v1/students",
    responses((status = 200, description = "All registered students")),
    tag = "roster"
)]
pub async fn list_students(State(state): State<AppState>) -> Json<Vec<Student>> {
    Json(state.roster.students.clone())
}

/// GET /v1/students/:id — Get one student.
#[utoipa::path(
    get,
    path = "/v1/students/{id}",
    params(("id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "roster"
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = StudentId::new(id)?;
    state
        .roster
        .student(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("student {id} not found")))
}

/// GET /v1/faculty — List all faculty members.
#[utoipa::path(
    get,
    path = "/v1/faculty",
    responses((status = 200, description = "All faculty members")),
    tag = "roster"
)]
pub async fn list_faculty(State(state): State<AppState>) -> Json<Vec<Faculty>> {
    Json(state.roster.faculty.clone())
}

/// GET /v1/classes — List all class sections.
#[utoipa::path(
    get,
    path = "/v1/classes",
    responses((status = 200, description = "All class sections")),
    tag = "roster"
)]
pub async fn list_classes(State(state): State<AppState>) -> Json<Vec<ClassSection>> {
    Json(state.roster.classes.clone())
}

/// GET /v1/classes/:id — Get one class section.
#[utoipa::path(
    get,
    path = "/v1/classes/{id}",
    params(("id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class found"),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "roster"
)]
pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClassSection>, AppError> {
    let id = ClassId::new(id)?;
    state
        .roster
        .class_section(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("class {id} not found")))
}

/// GET /v1/timetable — The published weekly timetable.
#[utoipa::path(
    get,
    path = "/v1/timetable",
    responses((status = 200, description = "Weekly timetable keyed by weekday")),
    tag = "roster"
)]
pub async fn get_timetable(State(state): State<AppState>) -> Json<serde_json::Value> {
    // Serialize as an ordered weekday → slots object for dashboard use.
    let mut days = serde_json::Map::new();
    for (day, slots) in &state.roster.timetable {
        days.insert(
            day_name(*day).to_string(),
            serde_json::to_value(slots).unwrap_or_default(),
        );
    }
    Json(serde_json::Value::Object(days))
}

/// Full day name as published in the timetable (`Monday`, not `Mon`).
fn day_name(day: chrono::Weekday) -> &'static str {
    match day {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}
