// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queries for the `profiles` table.
//!
//! Profiles are owned by the account system; the engine reads them and
//! only writes through tooling and test fixtures. Set-valued fields
//! (classes, goals) and the weekly availability are stored as JSON text.

use std::collections::BTreeSet;
use std::str::FromStr;

use rusqlite::{OptionalExtension, Row, params};

use studymatch_core::types::{
    Coordinate, Profile, StudyStyle, UserId, WeeklyAvailability,
};
use studymatch_core::StudyMatchError;

use crate::database::{Database, map_tr_err};
use crate::queries::decode_err;

fn row_to_profile(row: &Row<'_>) -> Result<Profile, rusqlite::Error> {
    let id_raw: String = row.get(0)?;
    let id = UserId::from_str(&id_raw).map_err(|e| decode_err(0, e))?;

    let classes_raw: String = row.get(4)?;
    let classes: BTreeSet<String> =
        serde_json::from_str(&classes_raw).map_err(|e| decode_err(4, e))?;

    let goals_raw: String = row.get(5)?;
    let goals: BTreeSet<String> =
        serde_json::from_str(&goals_raw).map_err(|e| decode_err(5, e))?;

    let style_raw: Option<String> = row.get(6)?;
    let study_style = style_raw
        .map(|s| StudyStyle::from_str(&s).map_err(|e| decode_err(6, e)))
        .transpose()?;

    let latitude: Option<f64> = row.get(7)?;
    let longitude: Option<f64> = row.get(8)?;
    let location = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinate { latitude, longitude }),
        _ => None,
    };

    let availability_raw: String = row.get(9)?;
    let availability: WeeklyAvailability =
        serde_json::from_str(&availability_raw).map_err(|e| decode_err(9, e))?;

    Ok(Profile {
        id,
        display_name: row.get(1)?,
        major: row.get(2)?,
        study_year: row.get(3)?,
        classes,
        goals,
        study_style,
        location,
        availability,
        prefers_groups: row.get(10)?,
        profile_completed: row.get(11)?,
    })
}

const SELECT_COLUMNS: &str = "id, display_name, major, study_year, classes, goals, \
     study_style, latitude, longitude, availability, prefers_groups, profile_completed";

/// All profiles ordered by id for a stable enumeration.
pub async fn get_all(db: &Database) -> Result<Vec<Profile>, StudyMatchError> {
    db.connection()
        .call(move |conn| {
            let sql = format!("SELECT {SELECT_COLUMNS} FROM profiles ORDER BY id");
            let mut stmt = conn.prepare(&sql)?;
            let profiles = stmt
                .query_map([], row_to_profile)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(profiles)
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch one profile by id.
pub async fn get_by_id(
    db: &Database,
    id: UserId,
) -> Result<Option<Profile>, StudyMatchError> {
    db.connection()
        .call(move |conn| {
            let sql = format!("SELECT {SELECT_COLUMNS} FROM profiles WHERE id = ?1");
            let profile = conn
                .query_row(&sql, params![id.to_string()], row_to_profile)
                .optional()?;
            Ok(profile)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or replace a profile.
pub async fn upsert(db: &Database, profile: &Profile) -> Result<(), StudyMatchError> {
    let profile = profile.clone();
    let classes = serde_json::to_string(&profile.classes)
        .map_err(|e| StudyMatchError::Internal(e.to_string()))?;
    let goals = serde_json::to_string(&profile.goals)
        .map_err(|e| StudyMatchError::Internal(e.to_string()))?;
    let availability = serde_json::to_string(&profile.availability)
        .map_err(|e| StudyMatchError::Internal(e.to_string()))?;

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO profiles
                 (id, display_name, major, study_year, classes, goals, study_style,
                  latitude, longitude, availability, prefers_groups, profile_completed)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    profile.id.to_string(),
                    profile.display_name,
                    profile.major,
                    profile.study_year,
                    classes,
                    goals,
                    profile.study_style.map(|s| s.to_string()),
                    profile.location.map(|c| c.latitude),
                    profile.location.map(|c| c.longitude),
                    availability,
                    profile.prefers_groups,
                    profile.profile_completed,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use uuid::Uuid;

    fn sample(n: u128, name: &str) -> Profile {
        Profile {
            id: UserId(Uuid::from_u128(n)),
            display_name: name.to_string(),
            major: Some("CS".to_string()),
            study_year: Some("JUNIOR".to_string()),
            classes: ["CS101", "MATH301"].iter().map(|s| s.to_string()).collect(),
            goals: ["ACE_FINAL"].iter().map(|s| s.to_string()).collect(),
            study_style: Some(StudyStyle::Quiet),
            location: Some(Coordinate { latitude: 40.0, longitude: -105.0 }),
            availability: WeeklyAvailability::default(),
            prefers_groups: false,
            profile_completed: true,
        }
    }

    #[tokio::test]
    async fn upsert_and_get_round_trip() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("p.db").to_str().unwrap())
            .await
            .unwrap();

        let profile = sample(1, "Alice");
        upsert(&db, &profile).await.unwrap();

        let loaded = get_by_id(&db, profile.id).await.unwrap().unwrap();
        assert_eq!(loaded.display_name, "Alice");
        assert_eq!(loaded.classes, profile.classes);
        assert_eq!(loaded.study_style, Some(StudyStyle::Quiet));
        assert_eq!(loaded.location.unwrap().latitude, 40.0);
        assert!(loaded.profile_completed);
    }

    #[tokio::test]
    async fn get_by_id_unknown_is_none() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("p.db").to_str().unwrap())
            .await
            .unwrap();

        let missing = get_by_id(&db, UserId(Uuid::from_u128(99))).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn get_all_is_ordered_by_id() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("p.db").to_str().unwrap())
            .await
            .unwrap();

        upsert(&db, &sample(2, "B")).await.unwrap();
        upsert(&db, &sample(1, "A")).await.unwrap();

        let all = get_all(&db).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].display_name, "A");
        assert_eq!(all[1].display_name, "B");
    }

    #[tokio::test]
    async fn optional_fields_round_trip_as_none() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("p.db").to_str().unwrap())
            .await
            .unwrap();

        let mut profile = sample(3, "Bare");
        profile.major = None;
        profile.study_style = None;
        profile.location = None;
        upsert(&db, &profile).await.unwrap();

        let loaded = get_by_id(&db, profile.id).await.unwrap().unwrap();
        assert!(loaded.major.is_none());
        assert!(loaded.study_style.is_none());
        assert!(loaded.location.is_none());
    }
}
