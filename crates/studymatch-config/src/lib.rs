// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the StudyMatch engine.
//!
//! Layered TOML via Figment (defaults < system < user < local < env),
//! strict unknown-key rejection, and post-deserialization validation with
//! miette diagnostics.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{EngineConfig, GeminiConfig, StorageConfig, StudyMatchConfig};
pub use validation::validate_config;

/// Load from the standard hierarchy and validate, collecting all errors.
pub fn load_and_validate() -> Result<StudyMatchConfig, Vec<ConfigError>> {
    let config = loader::load_config().map_err(diagnostic::from_figment)?;
    validation::validate_config(&config)?;
    Ok(config)
}
