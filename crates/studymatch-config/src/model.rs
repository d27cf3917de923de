// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the StudyMatch engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level StudyMatch configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StudyMatchConfig {
    /// Engine identity and logging settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Engine identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Display name used in logs.
    #[serde(default = "default_engine_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_engine_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_engine_name() -> String {
    "studymatch".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gemini text-generation API configuration.
///
/// A missing `api_key` is not an error: the augmentor then serves its
/// deterministic fallback for every call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. Absent means AI augmentation is effectively disabled.
    #[serde(default)]
    pub api_key: Option<String>,

    /// generateContent endpoint URL.
    #[serde(default = "default_gemini_url")]
    pub api_url: String,

    /// Per-call timeout bound in seconds.
    #[serde(default = "default_gemini_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_gemini_url(),
            timeout_secs: default_gemini_timeout_secs(),
        }
    }
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        .to_string()
}

fn default_gemini_timeout_secs() -> u64 {
    6
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Whether to enable WAL journal mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "studymatch.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}
