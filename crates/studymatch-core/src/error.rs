// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the StudyMatch engine.

use thiserror::Error;

use crate::types::UserId;

/// The primary error type used across all StudyMatch store traits and
/// engine operations.
#[derive(Debug, Error)]
pub enum StudyMatchError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// AI provider errors (API failure, malformed response, missing credential).
    ///
    /// These never escape the augmentation layer; they are recovered via
    /// deterministic fallbacks before reaching a caller.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The requested user id does not exist in the profile store.
    #[error("unknown user: {id}")]
    UnknownUser { id: UserId },

    /// Latitude/longitude outside the valid ranges.
    #[error("invalid coordinates: lat={latitude}, lon={longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// A date range whose end does not come after its start.
    #[error("invalid date range: {start} .. {end}")]
    InvalidRange {
        start: chrono::NaiveDateTime,
        end: chrono::NaiveDateTime,
    },

    /// A concurrent swipe raced on the same canonical pair. Retryable.
    #[error("pair conflict: {message}")]
    Conflict { message: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StudyMatchError {
    /// True for errors a caller may retry verbatim (currently only pair conflicts).
    pub fn is_retryable(&self) -> bool {
        matches!(self, StudyMatchError::Conflict { .. })
    }
}
