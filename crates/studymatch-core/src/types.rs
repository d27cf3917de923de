// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the StudyMatch workspace.
//!
//! Profiles are owned by the external account store and treated as
//! read-only input everywhere in the engine. `CompatibilityResult` is
//! ephemeral per-request output; `MatchRecord` and `AiSuggestion` are the
//! two persisted entities.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Unique identifier for a user profile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// How a student prefers to study.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudyStyle {
    Quiet,
    Collaborative,
    Whiteboard,
    Flashcards,
}

impl StudyStyle {
    /// Lowercase human form used in generated summaries ("quiet", "flashcards").
    pub fn human(&self) -> String {
        self.to_string().to_lowercase().replace('_', " ")
    }
}

/// Day of week for the typed weekly availability mapping.
///
/// Defined locally (rather than `chrono::Weekday`) so it can key a
/// `BTreeMap` and round-trip through serde with the profile-boundary JSON.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// A half-open time-of-day range within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Typed weekly availability: weekday to an ordered list of time ranges.
///
/// The account store holds this as a JSON string; it is parsed exactly once
/// at the boundary (see `studymatch-schedule`) and never re-parsed inside
/// scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAvailability {
    pub days: BTreeMap<DayOfWeek, Vec<TimeRange>>,
}

impl WeeklyAvailability {
    /// True when no day carries any range.
    pub fn is_empty(&self) -> bool {
        self.days.values().all(|ranges| ranges.is_empty())
    }

    /// Compact single-line rendering for prompt embedding,
    /// e.g. `Monday 09:00-12:00, 14:00-17:00; Wednesday 15:00-17:00`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        for (day, ranges) in &self.days {
            if ranges.is_empty() {
                continue;
            }
            let spans: Vec<String> = ranges
                .iter()
                .map(|r| {
                    format!(
                        "{}-{}",
                        r.start.format("%H:%M"),
                        r.end.format("%H:%M")
                    )
                })
                .collect();
            parts.push(format!("{day} {}", spans.join(", ")));
        }
        if parts.is_empty() {
            "unspecified".to_string()
        } else {
            parts.join("; ")
        }
    }
}

/// A geographic coordinate (decimal degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// True when latitude is within [-90, 90] and longitude within [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A student profile as read from the account store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub study_year: Option<String>,
    /// Enrolled class codes. Unique and unordered.
    #[serde(default)]
    pub classes: BTreeSet<String>,
    /// Goal tags ("ACE_FINAL", "PASS_CLASS", ...).
    #[serde(default)]
    pub goals: BTreeSet<String>,
    #[serde(default)]
    pub study_style: Option<StudyStyle>,
    #[serde(default)]
    pub location: Option<Coordinate>,
    #[serde(default)]
    pub availability: WeeklyAvailability,
    /// True when the user wants group sessions rather than pairs.
    #[serde(default)]
    pub prefers_groups: bool,
    /// Incomplete profiles are never offered as candidates.
    #[serde(default)]
    pub profile_completed: bool,
}

impl Profile {
    /// Class codes present on both profiles.
    pub fn shared_classes(&self, other: &Profile) -> BTreeSet<String> {
        self.classes.intersection(&other.classes).cloned().collect()
    }

    /// Goals present on both profiles, in this profile's order.
    pub fn shared_goals(&self, other: &Profile) -> Vec<String> {
        self.goals
            .iter()
            .filter(|goal| other.goals.contains(*goal))
            .cloned()
            .collect()
    }
}

/// Canonical unordered pair of user ids.
///
/// The constructor orders the ids so (A,B) and (B,A) produce the same key;
/// every lookup and insert goes through this type, which is what guarantees
/// at most one `MatchRecord` per pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey {
    user_a: UserId,
    user_b: UserId,
}

impl PairKey {
    /// Build the canonical key for two distinct users (smaller id first).
    pub fn new(x: UserId, y: UserId) -> Self {
        if x <= y {
            Self { user_a: x, user_b: y }
        } else {
            Self { user_a: y, user_b: x }
        }
    }

    /// The lexicographically smaller member.
    pub fn user_a(&self) -> UserId {
        self.user_a
    }

    /// The lexicographically larger member.
    pub fn user_b(&self) -> UserId {
        self.user_b
    }

    /// True when `user` is one of the two members.
    pub fn contains(&self, user: UserId) -> bool {
        self.user_a == user || self.user_b == user
    }

    /// The member that is not `user`, if `user` is a member at all.
    pub fn partner_of(&self, user: UserId) -> Option<UserId> {
        if self.user_a == user {
            Some(self.user_b)
        } else if self.user_b == user {
            Some(self.user_a)
        } else {
            None
        }
    }
}

/// Lifecycle state of a match pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// One-sided like recorded, waiting on the other party.
    Pending,
    /// Terminal positive state. Chat becomes available downstream.
    Matched,
    /// Terminal negative state.
    Rejected,
}

/// The persisted record for one canonical user pair.
///
/// Created on the first swipe between the pair, mutated only through the
/// match lifecycle, never deleted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    pub pair: PairKey,
    /// Deterministic 0-100 score captured at creation time.
    pub compatibility_score: u8,
    /// Snapshot of the shared classes at creation time.
    pub shared_classes: Vec<String>,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    /// Set exactly once, on the transition to `Matched`.
    pub matched_at: Option<DateTime<Utc>>,
}

/// Ephemeral per-request scoring output for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub candidate_id: UserId,
    pub shared_classes: BTreeSet<String>,
    pub shared_goals: Vec<String>,
    /// Deterministic score as an integer percentage, 0-100.
    pub score: u8,
    /// AI overlay score as a percentage, clamped to <= 100. Informational
    /// only; ranking ignores it.
    pub ai_score: Option<f64>,
    pub ai_reasoning: Option<String>,
    pub distance_description: Option<String>,
}

/// Advisory status of a stored AI suggestion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionStatus {
    Pending,
    Viewed,
    Liked,
    Rejected,
    Matched,
}

/// Output of the AI augmentor for one (user, candidate) pair.
///
/// Advisory only: independent of `MatchRecord` and never authoritative for
/// the lifecycle. Persisted for later retrieval and filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSuggestion {
    pub id: Uuid,
    pub user_id: UserId,
    pub suggested_user_id: UserId,
    /// Compatibility in [0.0, 1.0].
    pub compatibility_score: f64,
    pub reasoning: String,
    /// JSON array of shared classes/interests, verbatim from the model.
    pub shared_interests: Option<String>,
    pub distance_km: Option<f64>,
    pub status: SuggestionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AiSuggestion {
    /// New pending suggestion with both timestamps set to now.
    pub fn new(
        user_id: UserId,
        suggested_user_id: UserId,
        compatibility_score: f64,
        reasoning: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            suggested_user_id,
            compatibility_score,
            reasoning,
            shared_interests: None,
            distance_km: None,
            status: SuggestionStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A booked calendar entry, read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub user_id: UserId,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// When false the event is ignored by availability derivation
    /// (e.g. a tentative hold the user still wants to match around).
    pub blocks_matching: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: u128) -> UserId {
        UserId(Uuid::from_u128(n))
    }

    #[test]
    fn pair_key_is_order_independent() {
        let a = uid(1);
        let b = uid(2);
        assert_eq!(PairKey::new(a, b), PairKey::new(b, a));
        assert_eq!(PairKey::new(a, b).user_a(), a);
        assert_eq!(PairKey::new(b, a).user_a(), a);
    }

    #[test]
    fn pair_key_partner_lookup() {
        let a = uid(1);
        let b = uid(2);
        let c = uid(3);
        let key = PairKey::new(b, a);
        assert_eq!(key.partner_of(a), Some(b));
        assert_eq!(key.partner_of(b), Some(a));
        assert_eq!(key.partner_of(c), None);
        assert!(key.contains(a) && key.contains(b) && !key.contains(c));
    }

    #[test]
    fn study_style_round_trips_screaming_snake() {
        use std::str::FromStr;
        for style in [
            StudyStyle::Quiet,
            StudyStyle::Collaborative,
            StudyStyle::Whiteboard,
            StudyStyle::Flashcards,
        ] {
            let s = style.to_string();
            assert_eq!(StudyStyle::from_str(&s).unwrap(), style);
        }
        assert_eq!(StudyStyle::Quiet.to_string(), "QUIET");
        assert_eq!(StudyStyle::Flashcards.human(), "flashcards");
    }

    #[test]
    fn coordinate_validity_bounds() {
        assert!(Coordinate { latitude: 45.0, longitude: -122.0 }.is_valid());
        assert!(Coordinate { latitude: -90.0, longitude: 180.0 }.is_valid());
        assert!(!Coordinate { latitude: 90.5, longitude: 0.0 }.is_valid());
        assert!(!Coordinate { latitude: 0.0, longitude: -180.1 }.is_valid());
    }

    #[test]
    fn shared_classes_and_goals() {
        let mut a = Profile {
            id: uid(1),
            display_name: "A".into(),
            major: None,
            study_year: None,
            classes: ["CS101", "MATH301"].iter().map(|s| s.to_string()).collect(),
            goals: ["ACE_FINAL"].iter().map(|s| s.to_string()).collect(),
            study_style: None,
            location: None,
            availability: WeeklyAvailability::default(),
            prefers_groups: false,
            profile_completed: true,
        };
        let mut b = a.clone();
        b.id = uid(2);
        b.classes = ["MATH301", "PHYS201"].iter().map(|s| s.to_string()).collect();

        let shared = a.shared_classes(&b);
        assert_eq!(shared.len(), 1);
        assert!(shared.contains("MATH301"));
        assert_eq!(a.shared_goals(&b), vec!["ACE_FINAL".to_string()]);

        a.goals.clear();
        assert!(a.shared_goals(&b).is_empty());
    }

    #[test]
    fn availability_summary_renders_ordered_days() {
        let mut avail = WeeklyAvailability::default();
        avail.days.insert(
            DayOfWeek::Wednesday,
            vec![TimeRange {
                start: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            }],
        );
        avail.days.insert(
            DayOfWeek::Monday,
            vec![
                TimeRange {
                    start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    end: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                },
                TimeRange {
                    start: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
                    end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
                },
            ],
        );
        assert_eq!(
            avail.summary(),
            "Monday 09:00-12:00, 14:00-17:00; Wednesday 15:00-17:00"
        );
        assert!(WeeklyAvailability::default().is_empty());
        assert!(!avail.is_empty());
    }
}
