// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile store trait. The account system owns profiles; the engine only
//! reads them.

use async_trait::async_trait;

use crate::error::StudyMatchError;
use crate::types::{Profile, UserId};

/// Read access to the external profile store.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// All profiles, in a stable enumeration order.
    async fn get_all(&self) -> Result<Vec<Profile>, StudyMatchError>;

    /// A single profile by id, or `None` when unknown.
    async fn get_by_id(&self, id: UserId) -> Result<Option<Profile>, StudyMatchError>;

    /// Insert a profile. Exists for tooling and tests; profile creation
    /// flows are not part of the engine.
    async fn insert(&self, profile: &Profile) -> Result<(), StudyMatchError>;
}
