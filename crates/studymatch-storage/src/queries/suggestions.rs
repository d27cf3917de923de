// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queries for the `ai_suggestions` table.

use std::str::FromStr;

use rusqlite::{Row, params};

use studymatch_core::types::{AiSuggestion, SuggestionStatus, UserId};
use studymatch_core::StudyMatchError;

use crate::database::{Database, map_tr_err};
use crate::queries::{decode_err, decode_utc, encode_utc};

fn row_to_suggestion(row: &Row<'_>) -> Result<AiSuggestion, rusqlite::Error> {
    let id_raw: String = row.get(0)?;
    let id = uuid::Uuid::parse_str(&id_raw).map_err(|e| decode_err(0, e))?;

    let user_raw: String = row.get(1)?;
    let user_id = UserId::from_str(&user_raw).map_err(|e| decode_err(1, e))?;

    let suggested_raw: String = row.get(2)?;
    let suggested_user_id =
        UserId::from_str(&suggested_raw).map_err(|e| decode_err(2, e))?;

    let status_raw: String = row.get(7)?;
    let status = SuggestionStatus::from_str(&status_raw).map_err(|e| decode_err(7, e))?;

    let created_raw: String = row.get(8)?;
    let updated_raw: String = row.get(9)?;

    Ok(AiSuggestion {
        id,
        user_id,
        suggested_user_id,
        compatibility_score: row.get(3)?,
        reasoning: row.get(4)?,
        shared_interests: row.get(5)?,
        distance_km: row.get(6)?,
        status,
        created_at: decode_utc(8, &created_raw)?,
        updated_at: decode_utc(9, &updated_raw)?,
    })
}

const SELECT_COLUMNS: &str = "id, user_id, suggested_user_id, compatibility_score, \
     reasoning, shared_interests, distance_km, status, created_at, updated_at";

/// Insert or replace a suggestion.
pub async fn upsert(db: &Database, suggestion: &AiSuggestion) -> Result<(), StudyMatchError> {
    let suggestion = suggestion.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO ai_suggestions
                 (id, user_id, suggested_user_id, compatibility_score, reasoning,
                  shared_interests, distance_km, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    suggestion.id.to_string(),
                    suggestion.user_id.to_string(),
                    suggestion.suggested_user_id.to_string(),
                    suggestion.compatibility_score,
                    suggestion.reasoning,
                    suggestion.shared_interests,
                    suggestion.distance_km,
                    suggestion.status.to_string(),
                    encode_utc(suggestion.created_at),
                    encode_utc(suggestion.updated_at),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Suggestions generated for `user`, newest first.
pub async fn list_for_user(
    db: &Database,
    user: UserId,
) -> Result<Vec<AiSuggestion>, StudyMatchError> {
    let user = user.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "SELECT {SELECT_COLUMNS} FROM ai_suggestions
                 WHERE user_id = ?1
                 ORDER BY created_at DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let suggestions = stmt
                .query_map(params![user], row_to_suggestion)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(suggestions)
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::tempdir;
    use uuid::Uuid;

    fn uid(n: u128) -> UserId {
        UserId(Uuid::from_u128(n))
    }

    #[tokio::test]
    async fn upsert_and_list_round_trip() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("s.db").to_str().unwrap())
            .await
            .unwrap();

        let mut suggestion = AiSuggestion::new(
            uid(1),
            uid(2),
            0.85,
            "Strong class overlap".to_string(),
        );
        suggestion.shared_interests = Some(r#"["CS101"]"#.to_string());
        suggestion.distance_km = Some(1.2);
        upsert(&db, &suggestion).await.unwrap();

        let listed = list_for_user(&db, uid(1)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].suggested_user_id, uid(2));
        assert_eq!(listed[0].compatibility_score, 0.85);
        assert_eq!(listed[0].status, SuggestionStatus::Pending);
        assert_eq!(listed[0].distance_km, Some(1.2));
    }

    #[tokio::test]
    async fn list_is_newest_first_and_scoped_to_user() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("s.db").to_str().unwrap())
            .await
            .unwrap();

        let mut older = AiSuggestion::new(uid(1), uid(2), 0.5, "older".to_string());
        older.created_at = Utc::now() - Duration::hours(2);
        let newer = AiSuggestion::new(uid(1), uid(3), 0.6, "newer".to_string());
        let other_user = AiSuggestion::new(uid(9), uid(2), 0.7, "other".to_string());

        upsert(&db, &older).await.unwrap();
        upsert(&db, &newer).await.unwrap();
        upsert(&db, &other_user).await.unwrap();

        let listed = list_for_user(&db, uid(1)).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].reasoning, "newer");
        assert_eq!(listed[1].reasoning, "older");
    }
}
