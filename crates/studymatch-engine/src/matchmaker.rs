// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `Matchmaker` facade: every operation the engine exposes to
//! callers, composed over the store traits and the AI augmentor.
//!
//! Input validation happens here (unknown ids, invalid coordinates,
//! malformed date ranges); the inner components assume validated input.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use studymatch_core::traits::{
    CalendarStore, MatchAugmentor, MatchStore, ProfileStore, SuggestionStore,
};
use studymatch_core::types::{CompatibilityResult, MatchRecord, Profile, UserId};
use studymatch_core::StudyMatchError;
use studymatch_geo::{NEARBY_DEFAULT_KM, profile_distance, within_radius};
use studymatch_schedule::{available_slots, common_slot_labels, suggest_session_times};

use crate::{lifecycle, recommend};

/// Bound on each AI augmentation call.
pub const DEFAULT_AI_TIMEOUT: Duration = Duration::from_secs(6);

/// Returned when the study-plan text cannot be generated in time.
const RECOMMENDATIONS_UNAVAILABLE: &str =
    "Unable to generate personalized recommendations at this time. Please try again later.";

/// Distance facts between two users.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceReport {
    /// `None` when either side has no known location.
    pub km: Option<f64>,
    pub description: String,
    pub is_nearby: bool,
}

/// A student found inside a radius search, nearest first.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyStudent {
    pub id: UserId,
    pub display_name: String,
    pub km: f64,
    pub description: String,
}

/// Engine facade over the stores and the augmentor.
pub struct Matchmaker {
    profiles: Arc<dyn ProfileStore>,
    matches: Arc<dyn MatchStore>,
    suggestions: Arc<dyn SuggestionStore>,
    calendar: Arc<dyn CalendarStore>,
    augmentor: Arc<dyn MatchAugmentor>,
    ai_timeout: Duration,
}

impl Matchmaker {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        matches: Arc<dyn MatchStore>,
        suggestions: Arc<dyn SuggestionStore>,
        calendar: Arc<dyn CalendarStore>,
        augmentor: Arc<dyn MatchAugmentor>,
    ) -> Self {
        Self {
            profiles,
            matches,
            suggestions,
            calendar,
            augmentor,
            ai_timeout: DEFAULT_AI_TIMEOUT,
        }
    }

    /// Override the per-call AI timeout.
    pub fn with_ai_timeout(mut self, timeout: Duration) -> Self {
        self.ai_timeout = timeout;
        self
    }

    async fn require_profile(&self, id: UserId) -> Result<Profile, StudyMatchError> {
        self.profiles
            .get_by_id(id)
            .await?
            .ok_or(StudyMatchError::UnknownUser { id })
    }

    fn validate_location(profile: &Profile) -> Result<(), StudyMatchError> {
        if let Some(location) = profile.location
            && !location.is_valid()
        {
            return Err(StudyMatchError::InvalidCoordinates {
                latitude: location.latitude,
                longitude: location.longitude,
            });
        }
        Ok(())
    }

    fn validate_range(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), StudyMatchError> {
        if start >= end {
            return Err(StudyMatchError::InvalidRange { start, end });
        }
        Ok(())
    }

    /// Ranked, capped candidate list for `user`.
    pub async fn rank_candidates(
        &self,
        user: UserId,
    ) -> Result<Vec<CompatibilityResult>, StudyMatchError> {
        let profile = self.require_profile(user).await?;
        let pool = self.profiles.get_all().await?;
        let ranked = recommend::rank_candidates(
            &profile,
            &pool,
            self.augmentor.as_ref(),
            Some(self.suggestions.as_ref()),
            self.ai_timeout,
        )
        .await;
        debug!(user = %user, candidates = ranked.len(), "ranked candidate pool");
        Ok(ranked)
    }

    /// Apply a swipe and return the resulting record.
    pub async fn swipe(
        &self,
        user: UserId,
        target: UserId,
        liked: bool,
    ) -> Result<MatchRecord, StudyMatchError> {
        let user = self.require_profile(user).await?;
        let target = self.require_profile(target).await?;
        lifecycle::swipe(self.matches.as_ref(), &user, &target, liked).await
    }

    /// All match records involving `user`, newest first.
    pub async fn list_matches(
        &self,
        user: UserId,
    ) -> Result<Vec<MatchRecord>, StudyMatchError> {
        self.require_profile(user).await?;
        self.matches.find_all_for_user(user).await
    }

    /// Distance facts between two users.
    pub async fn distance(
        &self,
        user: UserId,
        other: UserId,
    ) -> Result<DistanceReport, StudyMatchError> {
        let user = self.require_profile(user).await?;
        let other = self.require_profile(other).await?;
        Self::validate_location(&user)?;
        Self::validate_location(&other)?;

        let distance = profile_distance(&user, &other);
        Ok(DistanceReport {
            km: distance.km(),
            description: distance.description(),
            is_nearby: distance.is_within(NEARBY_DEFAULT_KM),
        })
    }

    /// Students within `radius_km` (default 5 km) of `user`, nearest
    /// first. A user without a known location matches nobody.
    pub async fn nearby(
        &self,
        user: UserId,
        radius_km: Option<f64>,
    ) -> Result<Vec<NearbyStudent>, StudyMatchError> {
        let profile = self.require_profile(user).await?;
        Self::validate_location(&profile)?;
        let radius = radius_km.unwrap_or(NEARBY_DEFAULT_KM);

        let pool = self.profiles.get_all().await?;
        let mut found: Vec<NearbyStudent> = within_radius(&profile, &pool, radius)
            .into_iter()
            .filter_map(|p| {
                let distance = profile_distance(&profile, p);
                distance.km().map(|km| NearbyStudent {
                    id: p.id,
                    display_name: p.display_name.clone(),
                    km,
                    description: distance.description(),
                })
            })
            .collect();
        found.sort_by(|a, b| a.km.total_cmp(&b.km));
        Ok(found)
    }

    /// Labels of the user's free 2-hour slots inside the range.
    pub async fn available_slots(
        &self,
        user: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<String>, StudyMatchError> {
        self.require_profile(user).await?;
        Self::validate_range(start, end)?;
        let events = self.calendar.find_events_in_range(user, start, end).await?;
        Ok(available_slots(&events, start, end)
            .iter()
            .map(|slot| slot.label())
            .collect())
    }

    /// Slot labels free for both users inside the range, in the first
    /// user's order.
    pub async fn common_slots(
        &self,
        user: UserId,
        other: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<String>, StudyMatchError> {
        self.require_profile(user).await?;
        self.require_profile(other).await?;
        Self::validate_range(start, end)?;

        let user_events = self.calendar.find_events_in_range(user, start, end).await?;
        let other_events = self.calendar.find_events_in_range(other, start, end).await?;
        let user_slots = available_slots(&user_events, start, end);
        let other_slots = available_slots(&other_events, start, end);
        Ok(common_slot_labels(&user_slots, &other_slots))
    }

    /// Free slots starting at preferred session hours, capped.
    pub async fn suggest_times(
        &self,
        user: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<String>, StudyMatchError> {
        self.require_profile(user).await?;
        Self::validate_range(start, end)?;
        let events = self.calendar.find_events_in_range(user, start, end).await?;
        let slots = available_slots(&events, start, end);
        Ok(suggest_session_times(&slots))
    }

    /// Free-text study recommendations for the user's open slots.
    pub async fn study_plan(
        &self,
        user: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<String, StudyMatchError> {
        let profile = self.require_profile(user).await?;
        Self::validate_range(start, end)?;
        let events = self.calendar.find_events_in_range(user, start, end).await?;
        let labels: Vec<String> = available_slots(&events, start, end)
            .iter()
            .map(|slot| slot.label())
            .collect();

        let plan = tokio::time::timeout(
            self.ai_timeout,
            self.augmentor.study_recommendations(&profile, &labels),
        )
        .await
        .unwrap_or_else(|_| RECOMMENDATIONS_UNAVAILABLE.to_string());
        Ok(plan)
    }
}
