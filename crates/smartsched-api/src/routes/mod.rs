//! # API Route Modules
//!
//! - `attendance` — the attendance marking flow (face gate → check-in →
//!   constraint validation), standalone constraint validation, the
//!   invalid-attempt log, the recent check-in feed, and faculty manual
//!   marking.
//! - `faces` — face registration and standalone face verification.
//! - `roster` — read-only roster and timetable endpoints backing the
//!   dashboards.

pub mod attendance;
pub mod faces;
pub mod roster;
