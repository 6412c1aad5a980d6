//! # Validate Subcommand
//!
//! Builds an attendance attempt for the given coordinates and times and
//! asks the hosted model whether it satisfies the location and time
//! constraints. Prints the verdict as JSON.
//!
//! When `--start`/`--end` are omitted, the scheduled window is taken from
//! the seeded roster's class schedule, anchored to the attempt date.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;

use smartsched_core::{roster, ClassId, GeoLocation, StudentId};
use smartsched_model::{
    AttendanceAttempt, ModelApiConfig, ModelGateway, TracingAttemptLogger,
};

/// Arguments for the `smartsched validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Student identifier (e.g. S001).
    #[arg(long = "student", value_name = "ID")]
    pub student_id: StudentId,

    /// Class identifier (e.g. C01).
    #[arg(long = "class", value_name = "ID")]
    pub class_id: ClassId,

    /// Latitude of the attempt, in decimal degrees.
    #[arg(long)]
    pub lat: f64,

    /// Longitude of the attempt, in decimal degrees.
    #[arg(long)]
    pub lon: f64,

    /// Scheduled class start, RFC 3339. Defaults to the roster schedule.
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,

    /// Scheduled class end, RFC 3339. Defaults to the roster schedule.
    #[arg(long)]
    pub end: Option<DateTime<Utc>>,
}

/// Execute the validate subcommand.
///
/// Returns exit code 0 when the attempt is valid, 1 when it is not.
pub async fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let location = GeoLocation::new(args.lat, args.lon).context("invalid coordinates")?;
    let timestamp = Utc::now();
    let (scheduled_start_time, scheduled_end_time) = scheduled_window(args, timestamp)?;

    let attempt = AttendanceAttempt {
        student_id: args.student_id.clone(),
        class_id: args.class_id.clone(),
        timestamp,
        location_data_uri: location.to_data_uri()?,
        scheduled_start_time,
        scheduled_end_time,
    };

    let config = ModelApiConfig::from_env().context("model client not configured")?;
    let gateway = ModelGateway::new(config).context("failed to create model client")?;

    let verdict = gateway
        .attendance()
        .validate(&attempt, &TracingAttemptLogger)
        .await;

    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(if verdict.is_valid { 0 } else { 1 })
}

/// Resolve the scheduled window from flags, falling back to the seeded
/// roster's class schedule anchored to the attempt date.
fn scheduled_window(
    args: &ValidateArgs,
    timestamp: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    if let (Some(start), Some(end)) = (args.start, args.end) {
        return Ok((start, end));
    }
    let roster = roster::seed();
    let class = roster
        .class_section(&args.class_id)
        .ok_or_else(|| anyhow!("class {} not found in roster", args.class_id))?;
    let date = timestamp.date_naive();
    let start = args
        .start
        .unwrap_or_else(|| date.and_time(class.schedule.start_time).and_utc());
    let end = args
        .end
        .unwrap_or_else(|| date.and_time(class.schedule.end_time).and_utc());
    Ok((start, end))
}
