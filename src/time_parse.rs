//! Timestamp normalization for human-entered time strings
//!
//! Clients submit time bounds as free-form text: possibly quoted, possibly
//! using 'T' as the date/time separator, possibly without seconds or without
//! a time of day at all, possibly with a fractional-seconds suffix. This
//! module reduces all of those to epoch seconds or rejects the input.

use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Datetime formats tried in order; the first successful parse wins.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Date-only fallback; resolves to midnight.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a human-entered time string to UTC epoch seconds.
///
/// Normalization before parsing: surrounding whitespace and one layer of
/// single or double quotes are stripped, a 'T' separator becomes a space,
/// and any fractional-seconds suffix is dropped.
///
/// Accepted forms, tried in order: full datetime with seconds, datetime
/// with minutes only, date only. Anything else fails with
/// [`Error::InvalidTimeFormat`] — there is no fallback to "now" or to
/// epoch zero.
pub fn parse_epoch_seconds(input: &str) -> Result<i64> {
    let trimmed = input.trim().trim_matches(|c| c == '"' || c == '\'');
    let normalized = trimmed.replace('T', " ");
    // Drop fractional seconds: everything from the first '.'
    let normalized = normalized.split('.').next().unwrap_or_default().trim();

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(normalized, format) {
            return Ok(datetime.and_utc().timestamp());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(normalized, DATE_FORMAT)
        && let Some(datetime) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(datetime.and_utc().timestamp());
    }

    Err(Error::InvalidTimeFormat {
        input: input.to_string(),
    })
}
