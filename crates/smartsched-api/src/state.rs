//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! AppState holds the seeded roster, the registered-face store, the
//! invalid-attempt log, the recent check-in feed, faculty manual marks,
//! and the optional model gateway. Nothing is persisted: state lives for
//! the lifetime of the process, mirroring the original deployment's
//! ephemeral browser storage.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use smartsched_core::roster::{self, Roster};
use smartsched_core::{ClassId, DataUri, StudentId};
use smartsched_model::{AttemptLogger, InvalidAttempt, ModelGateway};
use utoipa::ToSchema;
use uuid::Uuid;

/// The check-in feed keeps only the most recent entries.
pub const RECENT_CHECKIN_LIMIT: usize = 5;

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points.
/// `parking_lot::RwLock` is non-poisonable — a panicking writer does not
/// permanently corrupt the store.
#[derive(Debug)]
pub struct Store<K: Eq + Hash + Clone, V: Clone + Send + Sync> {
    data: Arc<RwLock<HashMap<K, V>>>,
}

impl<K: Eq + Hash + Clone, V: Clone + Send + Sync> Clone for Store<K, V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone + Send + Sync> Store<K, V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert or replace a value.
    pub fn insert(&self, key: K, value: V) {
        self.data.write().insert(key, value);
    }

    /// Fetch a value by key.
    pub fn get(&self, key: &K) -> Option<V> {
        self.data.read().get(key).cloned()
    }

    /// Snapshot all values.
    pub fn values(&self) -> Vec<V> {
        self.data.read().values().cloned().collect()
    }

    /// Apply a closure to the value under `key`, inserting a default
    /// first if absent.
    pub fn update_or_default(&self, key: K, f: impl FnOnce(&mut V))
    where
        V: Default,
    {
        let mut data = self.data.write();
        f(data.entry(key).or_default());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl<K: Eq + Hash + Clone, V: Clone + Send + Sync> Default for Store<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Records ------------------------------------------------------------------

/// A logged invalid attendance attempt, as reviewed by faculty/admin.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvalidAttemptRecord {
    /// Log entry identifier.
    pub id: Uuid,
    /// The student who attempted to mark attendance.
    #[schema(value_type = String)]
    pub student_id: StudentId,
    /// The class for which attendance was attempted.
    #[schema(value_type = String)]
    pub class_id: ClassId,
    /// When the invalid attempt happened.
    pub timestamp: DateTime<Utc>,
    /// Why the attempt was invalid.
    pub reason: String,
    /// The student's GPS location at the time.
    #[schema(value_type = String)]
    pub location_data_uri: DataUri,
    /// When the entry was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// One entry in the recent check-in feed ("Recently Marked In").
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    /// Feed entry identifier.
    pub id: Uuid,
    /// The student who checked in.
    #[schema(value_type = String)]
    pub student_id: StudentId,
    /// Display name at check-in time.
    pub name: String,
    /// When the check-in happened.
    pub timestamp: DateTime<Utc>,
}

/// Manual attendance status assigned by faculty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MarkStatus {
    /// Student was present.
    Present,
    /// Student was absent.
    Absent,
}

// -- AppState -----------------------------------------------------------------

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Listen port.
    pub port: u16,
    /// Shared bearer secret. `None` runs the API open (demo mode).
    pub auth_token: Option<String>,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The seeded roster (read-only).
    pub roster: Arc<Roster>,
    /// Registered face per student.
    pub faces: Store<StudentId, DataUri>,
    /// Invalid-attempt log.
    pub invalid_attempts: Store<Uuid, InvalidAttemptRecord>,
    /// Recent check-ins, most recent first, capped at
    /// [`RECENT_CHECKIN_LIMIT`].
    pub checkins: Arc<RwLock<Vec<CheckIn>>>,
    /// Faculty manual marks per class.
    pub marks: Store<ClassId, HashMap<StudentId, MarkStatus>>,
    /// Model gateway; `None` when no API key is configured, in which
    /// case verdict endpoints return 503.
    pub model: Option<ModelGateway>,
}

impl AppState {
    /// Build state with the seeded demo roster.
    pub fn new(config: AppConfig, model: Option<ModelGateway>) -> Self {
        Self {
            config: Arc::new(config),
            roster: Arc::new(roster::seed()),
            faces: Store::new(),
            invalid_attempts: Store::new(),
            checkins: Arc::new(RwLock::new(Vec::new())),
            marks: Store::new(),
            model,
        }
    }

    /// Access the model gateway or fail with 503.
    pub fn model(&self) -> Result<&ModelGateway, crate::error::AppError> {
        self.model.as_ref().ok_or_else(|| {
            crate::error::AppError::ModelUnavailable(
                "model client is not configured; set SMARTSCHED_MODEL_API_KEY".to_string(),
            )
        })
    }

    /// Prepend a check-in and trim the feed to the configured cap.
    pub fn push_checkin(&self, checkin: CheckIn) {
        let mut feed = self.checkins.write();
        feed.insert(0, checkin);
        feed.truncate(RECENT_CHECKIN_LIMIT);
    }

    /// Snapshot of the recent check-in feed, most recent first.
    pub fn recent_checkins(&self) -> Vec<CheckIn> {
        self.checkins.read().clone()
    }
}

// -- Logging side channel ----------------------------------------------------

/// [`AttemptLogger`] implementation backed by the invalid-attempt store.
///
/// This binds the model crate's logging side channel to reviewable API
/// state: every acknowledged record shows up in `GET /v1/attendance/log`.
#[derive(Clone)]
pub struct StoreAttemptLogger {
    store: Store<Uuid, InvalidAttemptRecord>,
}

impl StoreAttemptLogger {
    /// Create a logger writing into the given store.
    pub fn new(store: Store<Uuid, InvalidAttemptRecord>) -> Self {
        Self { store }
    }
}

impl AttemptLogger for StoreAttemptLogger {
    fn record(&self, attempt: &InvalidAttempt) -> bool {
        let id = Uuid::new_v4();
        self.store.insert(
            id,
            InvalidAttemptRecord {
                id,
                student_id: attempt.student_id.clone(),
                class_id: attempt.class_id.clone(),
                timestamp: attempt.timestamp,
                reason: attempt.reason.clone(),
                location_data_uri: attempt.location_data_uri.clone(),
                recorded_at: Utc::now(),
            },
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartsched_core::GeoLocation;

    #[test]
    fn checkin_feed_is_capped_and_most_recent_first() {
        let state = AppState::new(AppConfig::default(), None);
        for i in 0..8 {
            state.push_checkin(CheckIn {
                id: Uuid::new_v4(),
                student_id: StudentId::new("S001").unwrap(),
                name: format!("Student {i}"),
                timestamp: Utc::now(),
            });
        }
        let feed = state.recent_checkins();
        assert_eq!(feed.len(), RECENT_CHECKIN_LIMIT);
        assert_eq!(feed[0].name, "Student 7");
    }

    #[test]
    fn store_logger_acknowledges_and_persists() {
        let store = Store::new();
        let logger = StoreAttemptLogger::new(store.clone());
        let acked = logger.record(&InvalidAttempt {
            student_id: StudentId::new("S002").unwrap(),
            class_id: ClassId::new("C01").unwrap(),
            timestamp: Utc::now(),
            reason: "outside premises".to_string(),
            location_data_uri: GeoLocation::new(0.0, 0.0)
                .unwrap()
                .to_data_uri()
                .unwrap(),
        });
        assert!(acked);
        assert_eq!(store.len(), 1);
        assert_eq!(store.values()[0].reason, "outside premises");
    }

    #[test]
    fn model_accessor_maps_absence_to_service_unavailable() {
        let state = AppState::new(AppConfig::default(), None);
        assert!(matches!(
            state.model(),
            Err(crate::error::AppError::ModelUnavailable(_))
        ));
    }
}
