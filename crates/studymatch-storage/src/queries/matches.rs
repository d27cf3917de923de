// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queries for the `matches` table.
//!
//! Rows are keyed by the canonical pair (smaller id first); the table's
//! UNIQUE(user_a, user_b) constraint backs pair uniqueness under
//! concurrent first swipes.

use std::str::FromStr;

use rusqlite::{OptionalExtension, Row, params};

use studymatch_core::types::{MatchRecord, MatchStatus, PairKey, UserId};
use studymatch_core::StudyMatchError;

use crate::database::{Database, map_tr_err};
use crate::queries::{decode_err, decode_utc, encode_utc};

fn row_to_record(row: &Row<'_>) -> Result<MatchRecord, rusqlite::Error> {
    let id_raw: String = row.get(0)?;
    let id = uuid::Uuid::parse_str(&id_raw).map_err(|e| decode_err(0, e))?;

    let a_raw: String = row.get(1)?;
    let b_raw: String = row.get(2)?;
    let user_a = UserId::from_str(&a_raw).map_err(|e| decode_err(1, e))?;
    let user_b = UserId::from_str(&b_raw).map_err(|e| decode_err(2, e))?;

    let shared_raw: String = row.get(4)?;
    let shared_classes: Vec<String> =
        serde_json::from_str(&shared_raw).map_err(|e| decode_err(4, e))?;

    let status_raw: String = row.get(5)?;
    let status = MatchStatus::from_str(&status_raw).map_err(|e| decode_err(5, e))?;

    let created_raw: String = row.get(6)?;
    let created_at = decode_utc(6, &created_raw)?;

    let matched_raw: Option<String> = row.get(7)?;
    let matched_at = matched_raw.map(|s| decode_utc(7, &s)).transpose()?;

    Ok(MatchRecord {
        id,
        pair: PairKey::new(user_a, user_b),
        compatibility_score: row.get(3)?,
        shared_classes,
        status,
        created_at,
        matched_at,
    })
}

const SELECT_COLUMNS: &str =
    "id, user_a, user_b, compatibility_score, shared_classes, status, created_at, matched_at";

/// Look up the record for a canonical pair.
pub async fn find_by_pair(
    db: &Database,
    pair: &PairKey,
) -> Result<Option<MatchRecord>, StudyMatchError> {
    let user_a = pair.user_a().to_string();
    let user_b = pair.user_b().to_string();
    db.connection()
        .call(move |conn| {
            let sql =
                format!("SELECT {SELECT_COLUMNS} FROM matches WHERE user_a = ?1 AND user_b = ?2");
            let record = conn
                .query_row(&sql, params![user_a, user_b], row_to_record)
                .optional()?;
            Ok(record)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a fresh record. Fails with `Conflict` when the pair already has
/// a row; callers racing on a first swipe should re-read and retry.
pub async fn insert(db: &Database, record: &MatchRecord) -> Result<(), StudyMatchError> {
    let record = record.clone();
    let shared = serde_json::to_string(&record.shared_classes)
        .map_err(|e| StudyMatchError::Internal(e.to_string()))?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO matches
                 (id, user_a, user_b, compatibility_score, shared_classes, status,
                  created_at, matched_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id.to_string(),
                    record.pair.user_a().to_string(),
                    record.pair.user_b().to_string(),
                    record.compatibility_score,
                    shared,
                    record.status.to_string(),
                    encode_utc(record.created_at),
                    record.matched_at.map(encode_utc),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Update the mutable lifecycle fields of an existing record.
pub async fn update(db: &Database, record: &MatchRecord) -> Result<(), StudyMatchError> {
    let record = record.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE matches SET status = ?2, matched_at = ?3 WHERE id = ?1",
                params![
                    record.id.to_string(),
                    record.status.to_string(),
                    record.matched_at.map(encode_utc),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// All records in which `user` is either member, newest first.
pub async fn find_all_for_user(
    db: &Database,
    user: UserId,
) -> Result<Vec<MatchRecord>, StudyMatchError> {
    let user = user.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "SELECT {SELECT_COLUMNS} FROM matches
                 WHERE user_a = ?1 OR user_b = ?1
                 ORDER BY created_at DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let records = stmt
                .query_map(params![user], row_to_record)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
        .await
        .map_err(map_tr_err)
}
