// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge.
//!
//! Converts Figment deserialization errors into miette diagnostics so
//! startup failures render with codes and help text instead of a bare
//! Debug dump.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A deserialization failure (unknown key, wrong type, bad TOML).
    #[error("configuration error: {message}")]
    #[diagnostic(
        code(studymatch::config::deserialize),
        help("check studymatch.toml against the documented sections: engine, gemini, storage")
    )]
    Deserialize {
        /// Figment's rendered failure, including the offending key path.
        message: String,
    },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(studymatch::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },
}

/// Convert a figment extraction error into diagnostics, one per failure.
pub fn from_figment(error: figment::Error) -> Vec<ConfigError> {
    error
        .into_iter()
        .map(|e| ConfigError::Deserialize {
            message: e.to_string(),
        })
        .collect()
}

/// Render collected errors to stderr in miette's report format.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("{:?}", miette::Report::msg(error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figment_errors_become_diagnostics() {
        let result = crate::loader::load_config_from_str("engine = 5");
        let errors = from_figment(result.unwrap_err());
        assert!(!errors.is_empty());
        assert!(errors[0].to_string().contains("configuration error"));
    }

    #[test]
    fn validation_variant_renders_message() {
        let err = ConfigError::Validation {
            message: "gemini.timeout_secs must be positive".into(),
        };
        assert!(err.to_string().contains("timeout_secs"));
    }
}
