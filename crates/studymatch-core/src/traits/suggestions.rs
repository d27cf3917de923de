// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI suggestion store trait.

use async_trait::async_trait;

use crate::error::StudyMatchError;
use crate::types::{AiSuggestion, UserId};

/// Persistence for advisory AI suggestions.
///
/// Suggestions are independent of match records: losing or skipping them
/// never affects the lifecycle.
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    /// Persist a suggestion.
    async fn save(&self, suggestion: &AiSuggestion) -> Result<(), StudyMatchError>;

    /// Suggestions generated for `user`, newest first.
    async fn list_for_user(
        &self,
        user: UserId,
    ) -> Result<Vec<AiSuggestion>, StudyMatchError>;
}
