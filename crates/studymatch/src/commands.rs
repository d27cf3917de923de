// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Each command opens the configured SQLite store, builds the engine
//! facade, runs one operation, and prints the result as JSON.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::info;

use studymatch_config::StudyMatchConfig;
use studymatch_core::types::{CalendarEvent, Profile};
use studymatch_core::StudyMatchError;
use studymatch_engine::Matchmaker;
use studymatch_gemini::GeminiAugmentor;
use studymatch_storage::SqliteStore;

use crate::{Commands, SwipeDecision};

pub async fn run(command: Commands, config: &StudyMatchConfig) -> Result<(), StudyMatchError> {
    let store = SqliteStore::open(&config.storage).await?;
    let augmentor = GeminiAugmentor::new(&config.gemini)?;
    let matchmaker = Matchmaker::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(augmentor),
    )
    .with_ai_timeout(Duration::from_secs(config.gemini.timeout_secs));

    match command {
        Commands::Recommend { user } => {
            print_json(&matchmaker.rank_candidates(user).await?)?;
        }
        Commands::Swipe { user, target, decision } => {
            let liked = matches!(decision, SwipeDecision::Like);
            print_json(&matchmaker.swipe(user, target, liked).await?)?;
        }
        Commands::Matches { user } => {
            print_json(&matchmaker.list_matches(user).await?)?;
        }
        Commands::Distance { user, other } => {
            print_json(&matchmaker.distance(user, other).await?)?;
        }
        Commands::Nearby { user, radius } => {
            print_json(&matchmaker.nearby(user, radius).await?)?;
        }
        Commands::Slots { user, start, end } => {
            let (start, end) = parse_range(&start, &end)?;
            print_json(&matchmaker.available_slots(user, start, end).await?)?;
        }
        Commands::CommonSlots { user, other, start, end } => {
            let (start, end) = parse_range(&start, &end)?;
            print_json(&matchmaker.common_slots(user, other, start, end).await?)?;
        }
        Commands::SuggestTimes { user, start, end } => {
            let (start, end) = parse_range(&start, &end)?;
            print_json(&matchmaker.suggest_times(user, start, end).await?)?;
        }
        Commands::StudyPlan { user, start, end } => {
            let (start, end) = parse_range(&start, &end)?;
            println!("{}", matchmaker.study_plan(user, start, end).await?);
        }
        Commands::ImportProfiles { file } => {
            let profiles: Vec<Profile> = read_json(&file)?;
            let count = profiles.len();
            for profile in &profiles {
                use studymatch_core::traits::ProfileStore;
                store.insert(profile).await?;
            }
            info!(count, "profiles imported");
            println!("imported {count} profiles");
        }
        Commands::ImportEvents { file } => {
            let events: Vec<CalendarEvent> = read_json(&file)?;
            let count = events.len();
            for event in &events {
                use studymatch_core::traits::CalendarStore;
                store.insert_event(event).await?;
            }
            info!(count, "calendar events imported");
            println!("imported {count} events");
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), StudyMatchError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| StudyMatchError::Internal(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StudyMatchError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        StudyMatchError::Internal(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        StudyMatchError::Internal(format!("cannot parse {}: {e}", path.display()))
    })
}

fn parse_range(start: &str, end: &str) -> Result<(NaiveDateTime, NaiveDateTime), StudyMatchError> {
    Ok((parse_datetime(start)?, parse_datetime(end)?))
}

/// Accepts `YYYY-MM-DDTHH:MM[:SS]` or a bare `YYYY-MM-DD` (midnight).
fn parse_datetime(raw: &str) -> Result<NaiveDateTime, StudyMatchError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        && let Some(dt) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(dt);
    }
    Err(StudyMatchError::Internal(format!(
        "invalid datetime '{raw}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_parsing_accepts_all_forms() {
        assert!(parse_datetime("2026-01-15T08:00").is_ok());
        assert!(parse_datetime("2026-01-15T08:00:30").is_ok());
        let midnight = parse_datetime("2026-01-15").unwrap();
        assert_eq!(midnight.format("%H:%M").to_string(), "00:00");
        assert!(parse_datetime("15/01/2026").is_err());
    }
}
