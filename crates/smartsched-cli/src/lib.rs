//! # smartsched-cli — CLI Tools for SmartSched
//!
//! Provides the `smartsched` command-line interface.
//!
//! ## Subcommands
//!
//! - `smartsched serve` — run the HTTP API server.
//! - `smartsched verify-face` — one-shot face comparison between two
//!   image files on disk.
//! - `smartsched validate` — one-shot attendance constraint validation
//!   for a coordinate pair and class.
//!
//! The verify/validate subcommands talk to the live model endpoint and
//! require `SMARTSCHED_MODEL_API_KEY` to be set.

pub mod serve;
pub mod validate;
pub mod verify;
