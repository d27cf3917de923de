// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queries for the `calendar_events` table.

use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{Row, params};

use studymatch_core::types::{CalendarEvent, UserId};
use studymatch_core::StudyMatchError;

use crate::database::{Database, map_tr_err};
use crate::queries::{decode_err, decode_naive, encode_naive};

fn row_to_event(row: &Row<'_>) -> Result<CalendarEvent, rusqlite::Error> {
    let id_raw: String = row.get(0)?;
    let id = uuid::Uuid::parse_str(&id_raw).map_err(|e| decode_err(0, e))?;

    let user_raw: String = row.get(1)?;
    let user_id = UserId::from_str(&user_raw).map_err(|e| decode_err(1, e))?;

    let start_raw: String = row.get(3)?;
    let end_raw: String = row.get(4)?;

    Ok(CalendarEvent {
        id,
        user_id,
        title: row.get(2)?,
        start: decode_naive(3, &start_raw)?,
        end: decode_naive(4, &end_raw)?,
        blocks_matching: row.get(5)?,
    })
}

/// Events for `user` overlapping `[start, end)`, ordered by start time.
pub async fn find_in_range(
    db: &Database,
    user: UserId,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<CalendarEvent>, StudyMatchError> {
    let user = user.to_string();
    let start = encode_naive(start);
    let end = encode_naive(end);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, title, start_time, end_time, blocks_matching
                 FROM calendar_events
                 WHERE user_id = ?1 AND start_time < ?3 AND end_time > ?2
                 ORDER BY start_time",
            )?;
            let events = stmt
                .query_map(params![user, start, end], row_to_event)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(events)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert an event.
pub async fn insert(db: &Database, event: &CalendarEvent) -> Result<(), StudyMatchError> {
    let event = event.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO calendar_events
                 (id, user_id, title, start_time, end_time, blocks_matching)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    event.id.to_string(),
                    event.user_id.to_string(),
                    event.title,
                    encode_naive(event.start),
                    encode_naive(event.end),
                    event.blocks_matching,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
