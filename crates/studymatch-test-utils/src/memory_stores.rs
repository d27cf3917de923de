// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store implementations for deterministic testing.
//!
//! Behavioral parity with the SQLite stores matters here: the match store
//! enforces pair uniqueness with the same `Conflict` error, and listings
//! come back in the same order.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::Mutex;

use studymatch_core::traits::{CalendarStore, MatchStore, ProfileStore, SuggestionStore};
use studymatch_core::types::{
    AiSuggestion, CalendarEvent, MatchRecord, PairKey, Profile, UserId,
};
use studymatch_core::StudyMatchError;

/// Profile store over a `BTreeMap`, enumerating in id order.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<Mutex<BTreeMap<UserId, Profile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-loaded with the given profiles.
    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        let map = profiles.into_iter().map(|p| (p.id, p)).collect();
        Self {
            profiles: Arc::new(Mutex::new(map)),
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_all(&self) -> Result<Vec<Profile>, StudyMatchError> {
        Ok(self.profiles.lock().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<Profile>, StudyMatchError> {
        Ok(self.profiles.lock().await.get(&id).cloned())
    }

    async fn insert(&self, profile: &Profile) -> Result<(), StudyMatchError> {
        self.profiles.lock().await.insert(profile.id, profile.clone());
        Ok(())
    }
}

/// Match store keyed by the canonical pair.
#[derive(Default)]
pub struct InMemoryMatchStore {
    records: Arc<Mutex<HashMap<PairKey, MatchRecord>>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn find_by_pair(
        &self,
        pair: &PairKey,
    ) -> Result<Option<MatchRecord>, StudyMatchError> {
        Ok(self.records.lock().await.get(pair).cloned())
    }

    async fn save(&self, record: &MatchRecord) -> Result<MatchRecord, StudyMatchError> {
        let mut records = self.records.lock().await;
        if let Some(existing) = records.get(&record.pair)
            && existing.id != record.id
        {
            return Err(StudyMatchError::Conflict {
                message: format!(
                    "pair ({}, {}) already has a match record",
                    record.pair.user_a(),
                    record.pair.user_b()
                ),
            });
        }
        records.insert(record.pair, record.clone());
        Ok(record.clone())
    }

    async fn find_all_for_user(
        &self,
        user: UserId,
    ) -> Result<Vec<MatchRecord>, StudyMatchError> {
        let records = self.records.lock().await;
        let mut found: Vec<MatchRecord> = records
            .values()
            .filter(|r| r.pair.contains(user))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }
}

/// Suggestion store over a plain vector.
#[derive(Default)]
pub struct InMemorySuggestionStore {
    suggestions: Arc<Mutex<Vec<AiSuggestion>>>,
}

impl InMemorySuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SuggestionStore for InMemorySuggestionStore {
    async fn save(&self, suggestion: &AiSuggestion) -> Result<(), StudyMatchError> {
        let mut suggestions = self.suggestions.lock().await;
        suggestions.retain(|s| s.id != suggestion.id);
        suggestions.push(suggestion.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user: UserId,
    ) -> Result<Vec<AiSuggestion>, StudyMatchError> {
        let suggestions = self.suggestions.lock().await;
        let mut found: Vec<AiSuggestion> = suggestions
            .iter()
            .filter(|s| s.user_id == user)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }
}

/// Calendar store over a plain vector.
#[derive(Default)]
pub struct InMemoryCalendarStore {
    events: Arc<Mutex<Vec<CalendarEvent>>>,
}

impl InMemoryCalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-loaded with the given events.
    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self {
            events: Arc::new(Mutex::new(events)),
        }
    }
}

#[async_trait]
impl CalendarStore for InMemoryCalendarStore {
    async fn find_events_in_range(
        &self,
        user: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CalendarEvent>, StudyMatchError> {
        let events = self.events.lock().await;
        let mut found: Vec<CalendarEvent> = events
            .iter()
            .filter(|e| e.user_id == user && e.start < end && e.end > start)
            .cloned()
            .collect();
        found.sort_by_key(|e| e.start);
        Ok(found)
    }

    async fn insert_event(&self, event: &CalendarEvent) -> Result<(), StudyMatchError> {
        self.events.lock().await.push(event.clone());
        Ok(())
    }
}
