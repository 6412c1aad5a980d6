#![deny(missing_docs)]

//! # smartsched-core — Foundational Types for SmartSched
//!
//! This crate defines the types that every other crate in the workspace
//! depends on. It has no internal crate dependencies — only `serde`,
//! `serde_json`, `thiserror`, `chrono`, and `base64` from the external
//! ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass a [`ClassId`] where a [`StudentId`]
//!    is expected.
//!
//! 2. **[`DataUri`] is the sole carrier for inline binary payloads.**
//!    Face images and encoded GPS locations travel between components as
//!    validated data URIs, never as raw strings.
//!
//! 3. **UTC everywhere.** All timestamps are `chrono::DateTime<Utc>`.
//!    Local time is a presentation concern.
//!
//! 4. **[`ValidationError`] hierarchy.** Structured errors with
//!    `thiserror` — no `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod data_uri;
pub mod error;
pub mod geo;
pub mod ids;
pub mod roster;

// Re-export primary types at crate root for ergonomic imports.
pub use data_uri::DataUri;
pub use error::ValidationError;
pub use geo::GeoLocation;
pub use ids::{ClassId, FacultyId, StudentId};
pub use roster::{
    AttendanceSummary, ClassSchedule, ClassSection, Faculty, Roster, Student, TimetableSlot,
};
