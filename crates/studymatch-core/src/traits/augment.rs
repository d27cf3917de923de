// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Match augmentor capability trait.
//!
//! Augmentation is strictly best-effort: implementations absorb every
//! provider failure (missing credential, network error, malformed
//! response) into a deterministic fallback, so none of these methods
//! return `Result`. Callers still bound each call with a timeout and
//! proceed without the overlay when it elapses.

use async_trait::async_trait;

use crate::types::{AiSuggestion, Profile};

/// Best-effort AI overlay over deterministic scoring.
#[async_trait]
pub trait MatchAugmentor: Send + Sync {
    /// Richer score + natural-language reasoning for a candidate pair.
    ///
    /// The returned score is always in [0.0, 1.0] and the reasoning is
    /// never empty, whether the provider answered or the fallback fired.
    async fn suggest_match(&self, user: &Profile, candidate: &Profile) -> AiSuggestion;

    /// Free-text study recommendations from a profile and its available
    /// slot labels. Degrades to a static apology string.
    async fn study_recommendations(&self, user: &Profile, slots: &[String]) -> String;

    /// Bare compatibility float in [0.0, 1.0]; neutral 0.5 on any failure.
    async fn compatibility_score(&self, a: &Profile, b: &Profile) -> f64;
}
