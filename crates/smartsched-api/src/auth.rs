//! # Authentication & Authorization Middleware
//!
//! Bearer token middleware with role-based access control.
//!
//! ## Token Format
//!
//! ```text
//! Bearer {role}:{subject}:{secret}   — e.g. "faculty:F01:hunter2"
//! ```
//!
//! The secret is compared in constant time against the configured token.
//! When no token is configured the API runs open in demo mode: every
//! request is treated as an admin caller, matching the original demo
//! deployment's mock auth.
//!
//! ## CallerIdentity
//!
//! Every authenticated request gets a [`CallerIdentity`] injected into the
//! request extensions. Handlers extract it via the `FromRequestParts` impl.

use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use utoipa::ToSchema;

use crate::error::{AppError, ErrorBody, ErrorDetail};

// ── Role ────────────────────────────────────────────────────────────────────

/// Roles in SmartSched, ordered by privilege level.
///
/// The `Ord` derivation respects variant declaration order:
/// `Student < Faculty < Admin`. This enables `>=` comparison for
/// role-based access checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Can mark own attendance and read own records.
    Student,
    /// Can mark class attendance manually and review the attempt log.
    Faculty,
    /// Full access to all resources and endpoints.
    Admin,
}

impl Role {
    /// Return the string representation of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Admin => "admin",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "student" => Some(Self::Student),
            "faculty" => Some(Self::Faculty),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

// ── CallerIdentity ──────────────────────────────────────────────────────────

/// Identity of the authenticated caller, available to all route handlers
/// via Axum's `FromRequestParts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// The caller's role.
    pub role: Role,
    /// The caller's subject identifier (student or faculty ID).
    /// None for admin callers and demo mode.
    pub subject: Option<String>,
}

impl CallerIdentity {
    /// Check if the caller has at least the given minimum role.
    pub fn has_role(&self, minimum: Role) -> bool {
        self.role >= minimum
    }

    /// Require at least the given role, mapping failure to 403.
    pub fn require(&self, minimum: Role) -> Result<(), AppError> {
        if self.has_role(minimum) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "requires at least {} role",
                minimum.as_str()
            )))
        }
    }
}

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("no caller identity".to_string()))
    }
}

// ── Middleware ──────────────────────────────────────────────────────────────

/// Auth configuration injected as a router extension.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// The shared secret. `None` means demo mode (open access as admin).
    pub token: Option<String>,
}

/// Bearer token middleware. Parses `{role}:{subject}:{secret}`, compares
/// the secret in constant time, and injects a [`CallerIdentity`].
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    let config = req
        .extensions()
        .get::<AuthConfig>()
        .cloned()
        .unwrap_or_default();

    let identity = match &config.token {
        None => CallerIdentity {
            role: Role::Admin,
            subject: None,
        },
        Some(expected) => match bearer_identity(&req, expected) {
            Ok(identity) => identity,
            Err(message) => return unauthorized(message),
        },
    };

    req.extensions_mut().insert(identity);
    next.run(req).await
}

/// Constant-time comparison of bearer secrets.
///
/// Prevents timing side-channels that could reveal secret length or prefix.
/// When lengths differ, performs a dummy comparison to avoid leaking length
/// information through timing variance.
fn constant_time_secret_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        // Dummy comparison to keep timing constant regardless of length match.
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

fn bearer_identity(req: &Request, expected_secret: &str) -> Result<CallerIdentity, &'static str> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or("missing Authorization header")?;
    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or("expected Bearer token")?;

    let mut segments = token.splitn(3, ':');
    let (role, subject, secret) = match (segments.next(), segments.next(), segments.next()) {
        (Some(role), Some(subject), Some(secret)) => (role, subject, secret),
        _ => return Err("token must be {role}:{subject}:{secret}"),
    };

    if constant_time_secret_eq(secret, expected_secret) {
        let role = Role::parse(role).ok_or("unknown role")?;
        Ok(CallerIdentity {
            role,
            subject: (!subject.is_empty()).then(|| subject.to_string()),
        })
    } else {
        Err("invalid credentials")
    }
}

fn unauthorized(message: &str) -> Response {
    let body = ErrorBody {
        error: ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
            details: None,
        },
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ordering_supports_privilege_checks() {
        assert!(Role::Admin > Role::Faculty);
        assert!(Role::Faculty > Role::Student);
        let caller = CallerIdentity {
            role: Role::Faculty,
            subject: Some("F01".to_string()),
        };
        assert!(caller.has_role(Role::Student));
        assert!(caller.has_role(Role::Faculty));
        assert!(!caller.has_role(Role::Admin));
    }

    #[test]
    fn require_maps_to_forbidden() {
        let caller = CallerIdentity {
            role: Role::Student,
            subject: Some("S001".to_string()),
        };
        assert!(matches!(
            caller.require(Role::Faculty),
            Err(AppError::Forbidden(_))
        ));
        assert!(caller.require(Role::Student).is_ok());
    }

    #[test]
    fn bearer_identity_parses_role_and_subject() {
        let req = Request::builder()
            .header(header::AUTHORIZATION, "Bearer faculty:F01:hunter2")
            .body(axum::body::Body::empty())
            .unwrap();
        let identity = bearer_identity(&req, "hunter2").unwrap();
        assert_eq!(identity.role, Role::Faculty);
        assert_eq!(identity.subject.as_deref(), Some("F01"));
    }

    #[test]
    fn bearer_identity_rejects_wrong_secret() {
        let req = Request::builder()
            .header(header::AUTHORIZATION, "Bearer admin::nope")
            .body(axum::body::Body::empty())
            .unwrap();
        assert!(bearer_identity(&req, "hunter2").is_err());
    }

    #[test]
    fn secret_comparison_rejects_length_mismatch() {
        assert!(constant_time_secret_eq("hunter2", "hunter2"));
        assert!(!constant_time_secret_eq("hunter", "hunter2"));
        assert!(!constant_time_secret_eq("hunter22", "hunter2"));
        assert!(!constant_time_secret_eq("", "hunter2"));
    }

    #[test]
    fn bearer_identity_rejects_malformed_token() {
        let req = Request::builder()
            .header(header::AUTHORIZATION, "Bearer justasecret")
            .body(axum::body::Body::empty())
            .unwrap();
        assert!(bearer_identity(&req, "justasecret").is_err());
    }
}
