// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for StudyMatch integration tests.

pub mod memory_stores;
pub mod mock_augmentor;

pub use memory_stores::{
    InMemoryCalendarStore, InMemoryMatchStore, InMemoryProfileStore, InMemorySuggestionStore,
};
pub use mock_augmentor::{MockAugmentor, ScriptedSuggestion};
