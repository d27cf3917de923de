// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per entity.

pub mod events;
pub mod matches;
pub mod profiles;
pub mod suggestions;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Wrap a row-decoding failure (uuid, enum, JSON, timestamp) so it can be
/// returned from a rusqlite row-mapping closure.
pub(crate) fn decode_err(
    idx: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
}

/// Canonical text encoding for UTC timestamps (`2026-01-01T00:00:00.000Z`).
pub(crate) fn encode_utc(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn decode_utc(idx: usize, raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| decode_err(idx, e))
}

/// Canonical text encoding for naive event times (`2026-01-15T10:00:00`).
pub(crate) fn encode_naive(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub(crate) fn decode_naive(idx: usize, raw: &str) -> Result<NaiveDateTime, rusqlite::Error> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map_err(|e| decode_err(idx, e))
}
