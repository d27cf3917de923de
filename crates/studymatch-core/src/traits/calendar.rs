// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar store trait.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::StudyMatchError;
use crate::types::{CalendarEvent, UserId};

/// Read access to booked calendar events.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// Events for `user` overlapping the given range.
    async fn find_events_in_range(
        &self,
        user: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<CalendarEvent>, StudyMatchError>;

    /// Insert an event. Exists for tooling and tests.
    async fn insert_event(&self, event: &CalendarEvent) -> Result<(), StudyMatchError>;
}
