// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic candidate scoring.
//!
//! A candidate with zero shared classes is excluded outright (gating
//! filter). For eligible candidates the score is a weighted sum with
//! fixed constants; weights are never renormalized when a term does not
//! apply.

use std::collections::BTreeSet;

use studymatch_core::types::Profile;
use studymatch_geo::are_nearby;

/// Weight of the shared-class ratio term.
pub const CLASS_WEIGHT: f64 = 0.4;

/// Style term when both declare the same style.
pub const STYLE_MATCH: f64 = 0.3;

/// Style term when both declare a style but they differ.
pub const STYLE_MISMATCH: f64 = 0.15;

/// Goal term when at least one goal intersects.
pub const GOAL_SHARED: f64 = 0.2;

/// Goal term when no goal intersects.
pub const GOAL_BASE: f64 = 0.1;

/// Proximity bonus when the pair is within [`PROXIMITY_KM`].
pub const PROXIMITY_BONUS: f64 = 0.1;

/// Distance threshold for the proximity bonus.
pub const PROXIMITY_KM: f64 = 10.0;

/// Deterministic scoring output for one eligible candidate.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub shared_classes: BTreeSet<String>,
    pub shared_goals: Vec<String>,
    /// Clamped to [0.0, 1.0].
    pub score: f64,
    /// Integer percentage, round half up.
    pub percent: u8,
}

/// Score `candidate` against `user`, or `None` when the gating filter
/// (zero shared classes) excludes it.
pub fn score_candidate(user: &Profile, candidate: &Profile) -> Option<ScoredCandidate> {
    let shared_classes = user.shared_classes(candidate);
    if shared_classes.is_empty() {
        return None;
    }
    let shared_goals = user.shared_goals(candidate);

    let mut score = 0.0;

    let larger = user.classes.len().max(candidate.classes.len());
    score += CLASS_WEIGHT * shared_classes.len() as f64 / larger as f64;

    // Zero when either side has no declared style.
    if let (Some(a), Some(b)) = (user.study_style, candidate.study_style) {
        score += if a == b { STYLE_MATCH } else { STYLE_MISMATCH };
    }

    score += if shared_goals.is_empty() { GOAL_BASE } else { GOAL_SHARED };

    if are_nearby(user, candidate, PROXIMITY_KM) {
        score += PROXIMITY_BONUS;
    }

    let score = score.clamp(0.0, 1.0);
    Some(ScoredCandidate {
        shared_classes,
        shared_goals,
        score,
        percent: (score * 100.0).round() as u8,
    })
}
