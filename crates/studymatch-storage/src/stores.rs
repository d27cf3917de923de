// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed implementations of the engine's store traits.
//!
//! One `SqliteStore` wraps the single `Database` handle and implements all
//! four store traits, so the engine can hold it behind `Arc` and hand out
//! trait-object views as needed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tracing::debug;

use studymatch_config::StorageConfig;
use studymatch_core::traits::{CalendarStore, MatchStore, ProfileStore, SuggestionStore};
use studymatch_core::types::{
    AiSuggestion, CalendarEvent, MatchRecord, PairKey, Profile, UserId,
};
use studymatch_core::StudyMatchError;

use crate::database::Database;
use crate::queries;

/// SQLite persistence for profiles, matches, suggestions, and calendars.
pub struct SqliteStore {
    db: Arc<Database>,
}

impl SqliteStore {
    /// Open the database configured in `config` and run migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, StudyMatchError> {
        let db = Database::open(&config.database_path).await?;
        debug!(path = %config.database_path, "sqlite store ready");
        Ok(Self { db: Arc::new(db) })
    }

    /// Open an on-disk database at an explicit path. Used by tests and
    /// tooling that bypass the config layer.
    pub async fn open_path(path: &str) -> Result<Self, StudyMatchError> {
        let db = Database::open(path).await?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Checkpoint and close the underlying database.
    ///
    /// Fails with `Internal` when other clones of the handle are still
    /// alive.
    pub async fn close(self) -> Result<(), StudyMatchError> {
        let db = Arc::into_inner(self.db).ok_or_else(|| {
            StudyMatchError::Internal("database handle still shared at close".to_string())
        })?;
        db.close().await
    }
}

impl Clone for SqliteStore {
    fn clone(&self) -> Self {
        Self { db: Arc::clone(&self.db) }
    }
}

#[async_trait]
impl ProfileStore for SqliteStore {
    async fn get_all(&self) -> Result<Vec<Profile>, StudyMatchError> {
        queries::profiles::get_all(&self.db).await
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<Profile>, StudyMatchError> {
        queries::profiles::get_by_id(&self.db, id).await
    }

    async fn insert(&self, profile: &Profile) -> Result<(), StudyMatchError> {
        queries::profiles::upsert(&self.db, profile).await
    }
}

#[async_trait]
impl MatchStore for SqliteStore {
    async fn find_by_pair(
        &self,
        pair: &PairKey,
    ) -> Result<Option<MatchRecord>, StudyMatchError> {
        queries::matches::find_by_pair(&self.db, pair).await
    }

    async fn save(&self, record: &MatchRecord) -> Result<MatchRecord, StudyMatchError> {
        match queries::matches::find_by_pair(&self.db, &record.pair).await? {
            Some(existing) if existing.id == record.id => {
                queries::matches::update(&self.db, record).await?;
            }
            Some(_) => {
                // A different record already holds this pair. Surface the
                // same Conflict the UNIQUE constraint would.
                return Err(StudyMatchError::Conflict {
                    message: format!(
                        "pair ({}, {}) already has a match record",
                        record.pair.user_a(),
                        record.pair.user_b()
                    ),
                });
            }
            None => {
                queries::matches::insert(&self.db, record).await?;
            }
        }
        Ok(record.clone())
    }

    async fn find_all_for_user(
        &self,
        user: UserId,
    ) -> Result<Vec<MatchRecord>, StudyMatchError> {
        queries::matches::find_all_for_user(&self.db, user).await
    }
}

#[async_trait]
impl SuggestionStore for SqliteStore {
    async fn save(&self, suggestion: &AiSuggestion) -> Result<(), StudyMatchError> {
        queries::suggestions::upsert(&self.db, suggestion).await
    }

    async fn list_for_user(
        &self,
        user: UserId,
    ) -> Result<Vec<AiSuggestion>, StudyMatchError> {
        queries::suggestions::list_for_user(&self.db, user).await
    }
}

#[async_trait]
impl CalendarStore for SqliteStore {
    async fn find_events_in_range(
        &self,
        user: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CalendarEvent>, StudyMatchError> {
        queries::events::find_in_range(&self.db, user, start, end).await
    }

    async fn insert_event(&self, event: &CalendarEvent) -> Result<(), StudyMatchError> {
        queries::events::insert(&self.db, event).await
    }
}
