// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Swipe-driven match state machine.
//!
//! States: no record, `Pending` (one-sided like), `Matched` (terminal
//! positive), `Rejected` (terminal negative). The machine does not track
//! which side liked first; any further like on a `Pending` record
//! promotes it, including a re-swipe by the original liker. That matches
//! the documented behavior and is flagged as a product question rather
//! than silently tightened here.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use studymatch_core::traits::MatchStore;
use studymatch_core::types::{MatchRecord, MatchStatus, PairKey, Profile};
use studymatch_core::StudyMatchError;

use crate::scorer;

/// Apply one swipe from `user` on `target` and return the resulting
/// record.
///
/// A fresh record snapshots the deterministic score and shared classes at
/// creation time. Terminal records treat likes as idempotent no-ops;
/// a pass rejects from any state.
pub async fn swipe(
    store: &dyn MatchStore,
    user: &Profile,
    target: &Profile,
    liked: bool,
) -> Result<MatchRecord, StudyMatchError> {
    let pair = PairKey::new(user.id, target.id);

    if let Some(mut existing) = store.find_by_pair(&pair).await? {
        if liked && existing.status == MatchStatus::Pending {
            existing.status = MatchStatus::Matched;
            existing.matched_at = Some(Utc::now());
            info!(user = %user.id, target = %target.id, "match confirmed");
            return store.save(&existing).await;
        }
        if !liked && existing.status != MatchStatus::Rejected {
            existing.status = MatchStatus::Rejected;
            return store.save(&existing).await;
        }
        return Ok(existing);
    }

    // Gated-out pairs can still be swiped on; they snapshot an empty
    // shared set and a zero score.
    let (percent, shared_classes) = match scorer::score_candidate(user, target) {
        Some(scored) => (scored.percent, scored.shared_classes.into_iter().collect()),
        None => (0, Vec::new()),
    };

    let record = MatchRecord {
        id: Uuid::new_v4(),
        pair,
        compatibility_score: percent,
        shared_classes,
        status: if liked { MatchStatus::Pending } else { MatchStatus::Rejected },
        created_at: Utc::now(),
        matched_at: None,
    };
    store.save(&record).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use studymatch_core::types::{StudyStyle, UserId, WeeklyAvailability};
    use studymatch_test_utils::InMemoryMatchStore;

    fn profile(n: u128, classes: &[&str]) -> Profile {
        Profile {
            id: UserId(Uuid::from_u128(n)),
            display_name: format!("Student {n}"),
            major: None,
            study_year: None,
            classes: classes.iter().map(|s| s.to_string()).collect(),
            goals: Default::default(),
            study_style: Some(StudyStyle::Quiet),
            location: None,
            availability: WeeklyAvailability::default(),
            prefers_groups: false,
            profile_completed: true,
        }
    }

    #[tokio::test]
    async fn mutual_like_yields_one_matched_record() {
        let store = InMemoryMatchStore::new();
        let a = profile(1, &["CS101"]);
        let b = profile(2, &["CS101"]);

        let first = swipe(&store, &a, &b, true).await.unwrap();
        assert_eq!(first.status, MatchStatus::Pending);
        assert!(first.matched_at.is_none());

        let second = swipe(&store, &b, &a, true).await.unwrap();
        assert_eq!(second.status, MatchStatus::Matched);
        assert!(second.matched_at.is_some());
        assert_eq!(second.id, first.id);

        let all = store.find_all_for_user(a.id).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn first_pass_creates_rejected_record() {
        let store = InMemoryMatchStore::new();
        let a = profile(1, &["CS101"]);
        let b = profile(2, &["CS101"]);

        let record = swipe(&store, &a, &b, false).await.unwrap();
        assert_eq!(record.status, MatchStatus::Rejected);
    }

    #[tokio::test]
    async fn pass_rejects_from_any_state_and_stays_rejected() {
        let store = InMemoryMatchStore::new();
        let a = profile(1, &["CS101"]);
        let b = profile(2, &["CS101"]);

        swipe(&store, &a, &b, true).await.unwrap();
        swipe(&store, &b, &a, true).await.unwrap();

        let rejected = swipe(&store, &a, &b, false).await.unwrap();
        assert_eq!(rejected.status, MatchStatus::Rejected);

        // Further likes do not resurrect it.
        let after = swipe(&store, &b, &a, true).await.unwrap();
        assert_eq!(after.status, MatchStatus::Rejected);
        let after = swipe(&store, &a, &b, true).await.unwrap();
        assert_eq!(after.status, MatchStatus::Rejected);
    }

    #[tokio::test]
    async fn like_on_matched_is_a_no_op() {
        let store = InMemoryMatchStore::new();
        let a = profile(1, &["CS101"]);
        let b = profile(2, &["CS101"]);

        swipe(&store, &a, &b, true).await.unwrap();
        let matched = swipe(&store, &b, &a, true).await.unwrap();
        let again = swipe(&store, &a, &b, true).await.unwrap();
        assert_eq!(again.status, MatchStatus::Matched);
        assert_eq!(again.matched_at, matched.matched_at);
    }

    #[tokio::test]
    async fn record_snapshots_score_and_shared_classes() {
        let store = InMemoryMatchStore::new();
        let a = profile(1, &["CS101", "MATH301"]);
        let b = profile(2, &["MATH301", "PHYS201"]);

        let record = swipe(&store, &a, &b, true).await.unwrap();
        // 0.4 * 1/2 + 0.3 style + 0.1 goal base = 0.6.
        assert_eq!(record.compatibility_score, 60);
        assert_eq!(record.shared_classes, vec!["MATH301".to_string()]);
    }

    #[tokio::test]
    async fn swipe_on_gated_pair_snapshots_zero() {
        let store = InMemoryMatchStore::new();
        let a = profile(1, &["CS101"]);
        let b = profile(2, &["BIO100"]);

        let record = swipe(&store, &a, &b, true).await.unwrap();
        assert_eq!(record.compatibility_score, 0);
        assert!(record.shared_classes.is_empty());
    }
}
