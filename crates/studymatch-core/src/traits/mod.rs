// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the engine and its external collaborators.
//!
//! The engine owns no state of its own; profiles, match records,
//! suggestions, and calendars all live behind these traits so the
//! persistence backend (and test doubles) can be swapped freely.

pub mod augment;
pub mod calendar;
pub mod matches;
pub mod profile;
pub mod suggestions;

pub use augment::MatchAugmentor;
pub use calendar::CalendarStore;
pub use matches::MatchStore;
pub use profile::ProfileStore;
pub use suggestions::SuggestionStore;
