// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects every failure instead of stopping at the first.

use crate::diagnostic::ConfigError;
use crate::model::StudyMatchConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &StudyMatchConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.gemini.api_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.api_url must not be empty".to_string(),
        });
    } else if !config.gemini.api_url.starts_with("http://")
        && !config.gemini.api_url.starts_with("https://")
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "gemini.api_url must be an http(s) URL, got `{}`",
                config.gemini.api_url
            ),
        });
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.timeout_secs must be positive".to_string(),
        });
    }

    let level = config.engine.log_level.to_lowercase();
    if !["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "engine.log_level must be one of trace/debug/info/warn/error, got `{}`",
                config.engine.log_level
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    #[test]
    fn default_config_is_valid() {
        let config = StudyMatchConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_is_rejected() {
        let config = load_config_from_str("[storage]\ndatabase_path = \"  \"").unwrap();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("database_path")));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = load_config_from_str("[gemini]\ntimeout_secs = 0").unwrap();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("timeout_secs")));
    }

    #[test]
    fn bad_url_scheme_is_rejected() {
        let config = load_config_from_str("[gemini]\napi_url = \"ftp://nope\"").unwrap();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn all_failures_are_collected() {
        let config = load_config_from_str(
            r#"
            [engine]
            log_level = "loud"

            [gemini]
            timeout_secs = 0
            "#,
        )
        .unwrap();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
