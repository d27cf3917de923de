// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the StudyMatch engine.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the StudyMatch workspace. Store backends
//! and the AI augmentor implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::StudyMatchError;
pub use types::{
    AiSuggestion, CalendarEvent, CompatibilityResult, Coordinate, MatchRecord,
    MatchStatus, PairKey, Profile, StudyStyle, SuggestionStatus, UserId,
    WeeklyAvailability,
};

// Re-export all collaborator traits at crate root.
pub use traits::{
    CalendarStore, MatchAugmentor, MatchStore, ProfileStore, SuggestionStore,
};
