//! Timeframe parsing
//!
//! Turns a duration spec ("6M", "2w", "3d", "12h") into an absolute cutoff
//! instant relative to the run clock, and decides whether a cached timestamp
//! still falls inside the `[cutoff, now]` window.

use chrono::{DateTime, Duration, Months, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Static regex for the timeframe grammar
/// Format: <integer><unit> with unit one of M (months), w (weeks), d (days), h (hours)
static TIMEFRAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)([Mwdh])$").expect("Invalid TIMEFRAME_RE regex"));

/// Raised when a timeframe spec cannot be parsed.
///
/// Fatal to engine startup: without a valid cutoff there is no way to decide
/// expiry, so the error propagates to the caller immediately.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeframeError {
    #[error("invalid timeframe '{0}': expected <number><unit> with unit one of M, w, d, h (e.g. \"6M\", \"2w\", \"3d\", \"12h\")")]
    InvalidTimeframe(String),
}

/// Parse a timeframe spec into the cutoff instant `now - <spec>`.
///
/// Month subtraction is calendar-aware (end-of-month dates clamp, so
/// Mar 31 minus one month is the last day of February). Weeks and days are
/// exact multiples of 24 hours; hours subtract second-precise, never rounded
/// to a day boundary.
pub fn parse_timeframe(spec: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, TimeframeError> {
    let invalid = || TimeframeError::InvalidTimeframe(spec.to_string());

    let caps = TIMEFRAME_RE.captures(spec.trim()).ok_or_else(invalid)?;
    let measurement: i64 = caps[1].parse().map_err(|_| invalid())?;

    let cutoff = match &caps[2] {
        "M" => u32::try_from(measurement)
            .ok()
            .and_then(|months| now.checked_sub_months(Months::new(months))),
        "w" => Duration::try_weeks(measurement).and_then(|d| now.checked_sub_signed(d)),
        "d" => Duration::try_days(measurement).and_then(|d| now.checked_sub_signed(d)),
        "h" => Duration::try_hours(measurement).and_then(|d| now.checked_sub_signed(d)),
        _ => None,
    };

    cutoff.ok_or_else(invalid)
}

/// True iff `cutoff <= timestamp <= now`, inclusive on both ends.
///
/// A missing timestamp is never within any timeframe, so records that were
/// persisted without one always trigger a recheck.
pub fn within_timeframe(
    timestamp: Option<DateTime<Utc>>,
    cutoff: DateTime<Utc>,
    now: DateTime<Utc>,
) -> bool {
    match timestamp {
        Some(t) => cutoff <= t && t <= now,
        None => false,
    }
}
