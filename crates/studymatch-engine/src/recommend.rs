// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ranked candidate recommendation.
//!
//! Composes the deterministic scorer with the best-effort AI overlay.
//! Ranking order depends only on the deterministic percentage; the AI
//! score and reasoning are informational. Each augmentor call is bounded
//! by a timeout so one slow provider call cannot stall the whole ranking
//! beyond that bound per candidate.

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, warn};

use studymatch_core::traits::{MatchAugmentor, SuggestionStore};
use studymatch_core::types::{CompatibilityResult, Profile};
use studymatch_geo::profile_distance;

use crate::scorer;

/// Ranked lists are capped at this many candidates.
pub const MAX_CANDIDATES: usize = 12;

/// Rank all eligible candidates in `pool` for `user`.
///
/// Candidates equal to the user or with incomplete profiles are skipped,
/// the gating filter drops zero-shared-class pairs, and survivors get an
/// AI overlay when the augmentor answers within `ai_timeout`. Successful
/// suggestions are persisted best-effort when a store is given.
pub async fn rank_candidates(
    user: &Profile,
    pool: &[Profile],
    augmentor: &dyn MatchAugmentor,
    suggestions: Option<&dyn SuggestionStore>,
    ai_timeout: Duration,
) -> Vec<CompatibilityResult> {
    let mut results = Vec::new();

    for candidate in pool {
        if candidate.id == user.id || !candidate.profile_completed {
            continue;
        }
        let Some(scored) = scorer::score_candidate(user, candidate) else {
            continue;
        };

        let distance = profile_distance(user, candidate);
        let mut ai_score = None;
        let mut ai_reasoning = None;

        match tokio::time::timeout(ai_timeout, augmentor.suggest_match(user, candidate)).await
        {
            Ok(mut suggestion) => {
                ai_score = Some((suggestion.compatibility_score * 100.0).min(100.0));
                if !suggestion.reasoning.trim().is_empty() {
                    ai_reasoning = Some(suggestion.reasoning.clone());
                }
                if let Some(store) = suggestions {
                    suggestion.distance_km = distance.km();
                    if let Err(e) = store.save(&suggestion).await {
                        warn!(candidate = %candidate.id, error = %e, "failed to persist suggestion");
                    }
                }
            }
            Err(_) => {
                debug!(candidate = %candidate.id, "AI augmentation timed out, using deterministic result");
            }
        }

        let reasoning = ai_reasoning.unwrap_or_else(|| {
            fallback_summary(candidate, &scored.shared_classes, &scored.shared_goals)
        });

        results.push(CompatibilityResult {
            candidate_id: candidate.id,
            shared_classes: scored.shared_classes,
            shared_goals: scored.shared_goals,
            score: scored.percent,
            ai_score,
            ai_reasoning: Some(reasoning),
            distance_description: Some(distance.description()),
        });
    }

    // Stable sort keeps enumeration order among ties.
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(MAX_CANDIDATES);
    results
}

/// Summary text used when the AI overlay yields no reasoning.
pub fn fallback_summary(
    candidate: &Profile,
    shared_classes: &BTreeSet<String>,
    shared_goals: &[String],
) -> String {
    let mut summary = format!(
        "You both share {} {}",
        shared_classes.len(),
        if shared_classes.len() == 1 { "class" } else { "classes" }
    );
    if let Some(first_goal) = shared_goals.first() {
        summary.push_str(" and have similar goals like ");
        summary.push_str(first_goal);
        if shared_goals.len() > 1 {
            summary.push_str(" and more");
        }
        summary.push('.');
    } else {
        summary.push_str(", making collaboration easier.");
    }
    if let Some(style) = candidate.study_style {
        summary.push_str(" Their preferred study style is ");
        summary.push_str(&style.human());
        summary.push('.');
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use studymatch_core::types::{StudyStyle, UserId, WeeklyAvailability};
    use studymatch_test_utils::{InMemorySuggestionStore, MockAugmentor};
    use uuid::Uuid;

    fn profile(n: u128, classes: &[&str], style: Option<StudyStyle>) -> Profile {
        Profile {
            id: UserId(Uuid::from_u128(n)),
            display_name: format!("Student {n}"),
            major: None,
            study_year: None,
            classes: classes.iter().map(|s| s.to_string()).collect(),
            goals: Default::default(),
            study_style: style,
            location: None,
            availability: WeeklyAvailability::default(),
            prefers_groups: false,
            profile_completed: true,
        }
    }

    fn timeout() -> Duration {
        Duration::from_secs(6)
    }

    #[tokio::test]
    async fn gating_excludes_candidates_with_no_shared_classes() {
        let user = profile(1, &["CS101"], None);
        let pool = vec![
            profile(2, &["CS101"], None),
            profile(3, &["BIO100"], None),
        ];
        let augmentor = MockAugmentor::new();

        let ranked = rank_candidates(&user, &pool, &augmentor, None, timeout()).await;
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].candidate_id, pool[0].id);
    }

    #[tokio::test]
    async fn skips_self_and_incomplete_profiles() {
        let user = profile(1, &["CS101"], None);
        let mut incomplete = profile(2, &["CS101"], None);
        incomplete.profile_completed = false;
        let pool = vec![user.clone(), incomplete, profile(3, &["CS101"], None)];
        let augmentor = MockAugmentor::new();

        let ranked = rank_candidates(&user, &pool, &augmentor, None, timeout()).await;
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].candidate_id, pool[2].id);
    }

    #[tokio::test]
    async fn sorts_descending_and_caps_at_twelve() {
        let user = profile(1, &["C0", "C1", "C2", "C3"], Some(StudyStyle::Quiet));
        let mut pool = Vec::new();
        // 15 candidates with varying overlap.
        for n in 0..15u128 {
            let shared = (n % 4 + 1) as usize;
            let classes: Vec<String> = (0..shared).map(|i| format!("C{i}")).collect();
            pool.push(profile(
                n + 10,
                &classes.iter().map(String::as_str).collect::<Vec<_>>(),
                None,
            ));
        }
        let augmentor = MockAugmentor::new();

        let ranked = rank_candidates(&user, &pool, &augmentor, None, timeout()).await;
        assert_eq!(ranked.len(), MAX_CANDIDATES);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn ties_preserve_enumeration_order() {
        let user = profile(1, &["CS101"], None);
        let pool = vec![
            profile(10, &["CS101"], None),
            profile(11, &["CS101"], None),
            profile(12, &["CS101"], None),
        ];
        let augmentor = MockAugmentor::new();

        let ranked = rank_candidates(&user, &pool, &augmentor, None, timeout()).await;
        let ids: Vec<_> = ranked.iter().map(|r| r.candidate_id).collect();
        assert_eq!(ids, vec![pool[0].id, pool[1].id, pool[2].id]);
    }

    #[tokio::test]
    async fn ai_overlay_carries_score_and_reasoning() {
        let user = profile(1, &["CS101"], None);
        let pool = vec![profile(2, &["CS101"], None)];
        let augmentor = MockAugmentor::new();
        augmentor.add_suggestion(0.9, "Great class overlap").await;

        let ranked = rank_candidates(&user, &pool, &augmentor, None, timeout()).await;
        assert_eq!(ranked[0].ai_score, Some(90.0));
        assert_eq!(ranked[0].ai_reasoning.as_deref(), Some("Great class overlap"));
    }

    #[tokio::test]
    async fn ai_percentage_is_clamped_to_one_hundred() {
        let user = profile(1, &["CS101"], None);
        let pool = vec![profile(2, &["CS101"], None)];
        let augmentor = MockAugmentor::new();
        augmentor.add_suggestion(1.7, "overshoot").await;

        let ranked = rank_candidates(&user, &pool, &augmentor, None, timeout()).await;
        assert_eq!(ranked[0].ai_score, Some(100.0));
    }

    #[tokio::test]
    async fn blank_reasoning_falls_back_to_summary() {
        let user = profile(1, &["CS101"], None);
        let pool = vec![profile(2, &["CS101"], Some(StudyStyle::Flashcards))];
        let augmentor = MockAugmentor::new();
        augmentor.add_suggestion(0.8, "  ").await;

        let ranked = rank_candidates(&user, &pool, &augmentor, None, timeout()).await;
        let reasoning = ranked[0].ai_reasoning.as_deref().unwrap();
        assert!(reasoning.starts_with("You both share 1 class"));
        assert!(reasoning.contains("flashcards"));
    }

    #[tokio::test]
    async fn slow_augmentor_times_out_into_deterministic_result() {
        let user = profile(1, &["CS101"], None);
        let pool = vec![profile(2, &["CS101"], None)];
        let augmentor = MockAugmentor::new().with_delay(Duration::from_secs(60));

        let started = std::time::Instant::now();
        let ranked =
            rank_candidates(&user, &pool, &augmentor, None, Duration::from_millis(50)).await;
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].ai_score.is_none());
        assert!(ranked[0].ai_reasoning.as_deref().unwrap().starts_with("You both share"));
    }

    #[tokio::test]
    async fn successful_suggestions_are_persisted() {
        use studymatch_core::traits::SuggestionStore as _;

        let user = profile(1, &["CS101"], None);
        let pool = vec![profile(2, &["CS101"], None)];
        let augmentor = MockAugmentor::new();
        augmentor.add_suggestion(0.75, "saved").await;
        let store = InMemorySuggestionStore::new();

        rank_candidates(&user, &pool, &augmentor, Some(&store), timeout()).await;
        let saved = store.list_for_user(user.id).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].suggested_user_id, pool[0].id);
        assert_eq!(saved[0].compatibility_score, 0.75);
    }

    #[test]
    fn fallback_summary_wording() {
        let candidate = profile(2, &["CS101"], Some(StudyStyle::Quiet));
        let shared: BTreeSet<String> = ["CS101".to_string()].into_iter().collect();

        let plain = fallback_summary(&candidate, &shared, &[]);
        assert_eq!(
            plain,
            "You both share 1 class, making collaboration easier. \
             Their preferred study style is quiet."
        );

        let goals = vec!["ACE_FINAL".to_string(), "PASS_CLASS".to_string()];
        let with_goals = fallback_summary(&candidate, &shared, &goals);
        assert!(with_goals.contains("similar goals like ACE_FINAL and more."));
    }
}
