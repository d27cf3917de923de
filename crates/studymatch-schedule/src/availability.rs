// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boundary parser for the account store's weekly availability JSON.
//!
//! The account store serializes availability as
//! `{"Monday": ["09:00-12:00", "14:00-17:00"], ...}`. It is parsed into
//! the typed [`WeeklyAvailability`] exactly once, here; nothing downstream
//! ever touches the raw string again.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveTime;

use studymatch_core::types::{DayOfWeek, TimeRange, WeeklyAvailability};
use studymatch_core::StudyMatchError;

/// Parse the profile-boundary availability JSON.
///
/// An empty or all-whitespace string parses to an empty availability, a
/// deliberate leniency for profiles that never set one. Anything else must
/// be well-formed; malformed day names, time syntax, or inverted ranges
/// are reported, not coerced.
pub fn parse_weekly_availability(raw: &str) -> Result<WeeklyAvailability, StudyMatchError> {
    if raw.trim().is_empty() {
        return Ok(WeeklyAvailability::default());
    }

    let by_day: BTreeMap<String, Vec<String>> = serde_json::from_str(raw)
        .map_err(|e| StudyMatchError::Internal(format!("malformed availability JSON: {e}")))?;

    let mut days: BTreeMap<DayOfWeek, Vec<TimeRange>> = BTreeMap::new();

    for (day_name, spans) in by_day {
        let day = DayOfWeek::from_str(&day_name).map_err(|_| {
            StudyMatchError::Internal(format!("unknown weekday in availability: `{day_name}`"))
        })?;

        let mut ranges = Vec::with_capacity(spans.len());
        for span in spans {
            ranges.push(parse_span(&span)?);
        }
        days.insert(day, ranges);
    }

    Ok(WeeklyAvailability { days })
}

/// Parse one `HH:MM-HH:MM` span.
fn parse_span(span: &str) -> Result<TimeRange, StudyMatchError> {
    let (start, end) = span.split_once('-').ok_or_else(|| {
        StudyMatchError::Internal(format!("availability span `{span}` is not `HH:MM-HH:MM`"))
    })?;

    let start = parse_time(start.trim(), span)?;
    let end = parse_time(end.trim(), span)?;

    if end <= start {
        return Err(StudyMatchError::Internal(format!(
            "availability span `{span}` ends before it starts"
        )));
    }

    Ok(TimeRange { start, end })
}

fn parse_time(value: &str, span: &str) -> Result<NaiveTime, StudyMatchError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| {
        StudyMatchError::Internal(format!("bad time `{value}` in span `{span}`: {e}"))
    })
}
