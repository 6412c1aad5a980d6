//! # smartsched-api — Axum API Services for SmartSched
//!
//! HTTP surface over the attendance decision logic. The actual decisions
//! — face matching and constraint validation — are delegated to the
//! hosted model via `smartsched-model`; this crate owns the roster, the
//! registered-face store, the invalid-attempt log, the check-in feed, and
//! role-based access.
//!
//! ## API Surface
//!
//! | Prefix                | Module                  | Domain                  |
//! |-----------------------|-------------------------|-------------------------|
//! | `/v1/attendance/*`    | [`routes::attendance`]  | Marking flow & review   |
//! | `/v1/faces/*`         | [`routes::faces`]       | Face registration       |
//! | `/v1/students` etc.   | [`routes::roster`]      | Roster & timetable      |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → AuthMiddleware → Handler
//! ```
//!
//! Health probes (`/health/*`) are mounted outside the auth middleware so
//! they remain accessible without credentials.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
    };

    // Authenticated API routes.
    let api = Router::new()
        .merge(routes::attendance::router())
        .merge(routes::faces::router())
        .merge(routes::roster::router())
        .merge(openapi::router())
        .layer(from_fn(auth::auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(auth_config))
        .with_state(state.clone());

    // Unauthenticated health probes.
    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route(
            "/health/readiness",
            axum::routing::get(readiness).with_state(state),
        );

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — reports whether the model client is configured.
async fn readiness(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ready",
        "modelConfigured": state.model.is_some(),
    }))
}
