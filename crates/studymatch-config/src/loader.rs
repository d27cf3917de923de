// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./studymatch.toml` > `~/.config/studymatch/studymatch.toml`
//! > `/etc/studymatch/studymatch.toml` with environment variable overrides
//! via the `STUDYMATCH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::StudyMatchConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/studymatch/studymatch.toml` (system-wide)
/// 3. `~/.config/studymatch/studymatch.toml` (user XDG config)
/// 4. `./studymatch.toml` (local directory)
/// 5. `STUDYMATCH_*` environment variables
pub fn load_config() -> Result<StudyMatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StudyMatchConfig::default()))
        .merge(Toml::file("/etc/studymatch/studymatch.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("studymatch/studymatch.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("studymatch.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from inline TOML only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<StudyMatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StudyMatchConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<StudyMatchConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StudyMatchConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `STUDYMATCH_GEMINI_API_KEY` must map
/// to `gemini.api_key`, not `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("STUDYMATCH_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("engine_", "engine.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
