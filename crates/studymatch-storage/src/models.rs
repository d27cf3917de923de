// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `studymatch-core::types` for use
//! across the store trait boundaries. This module re-exports them for
//! convenience within the storage crate.

pub use studymatch_core::types::{
    AiSuggestion, CalendarEvent, MatchRecord, MatchStatus, Profile, SuggestionStatus,
};
