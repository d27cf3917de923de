// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The matching and recommendation engine.
//!
//! Deterministic compatibility scoring with a hard gating filter, the
//! swipe-driven match lifecycle, AI-augmented ranking with best-effort
//! overlay semantics, and the `Matchmaker` facade tying it all together
//! over the store traits.

pub mod lifecycle;
pub mod matchmaker;
pub mod recommend;
pub mod scorer;

pub use matchmaker::{DEFAULT_AI_TIMEOUT, DistanceReport, Matchmaker, NearbyStudent};
pub use recommend::MAX_CANDIDATES;
pub use scorer::{ScoredCandidate, score_candidate};
