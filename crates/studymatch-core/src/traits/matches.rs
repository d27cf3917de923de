// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Match record store trait.

use async_trait::async_trait;

use crate::error::StudyMatchError;
use crate::types::{MatchRecord, PairKey, UserId};

/// Persistence for the canonical pair records.
///
/// Implementations must enforce uniqueness on the canonical pair key so
/// two concurrent first swipes on the same pair cannot both insert; the
/// loser surfaces `StudyMatchError::Conflict`.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Look up the record for a canonical pair.
    async fn find_by_pair(
        &self,
        pair: &PairKey,
    ) -> Result<Option<MatchRecord>, StudyMatchError>;

    /// Insert or update a record, returning the stored value.
    async fn save(&self, record: &MatchRecord) -> Result<MatchRecord, StudyMatchError>;

    /// All records in which `user` is either member of the pair.
    async fn find_all_for_user(
        &self,
        user: UserId,
    ) -> Result<Vec<MatchRecord>, StudyMatchError>;
}
