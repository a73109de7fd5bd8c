// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for values serde cannot check.

use thiserror::Error;

use crate::model::PrediaConfig;

/// A single validation failure with the offending key and guidance.
#[derive(Debug, Error)]
#[error("{key}: {message}")]
pub struct ConfigError {
    /// Dotted path of the offending key, e.g. `service.log_level`.
    pub key: String,
    /// What is wrong and what the accepted values are.
    pub message: String,
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized config, collecting every failure.
pub fn validate_config(config: &PrediaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError {
            key: "service.log_level".into(),
            message: format!(
                "unknown level {:?}, expected one of: {}",
                config.service.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.gateway.port == 0 {
        errors.push(ConfigError {
            key: "gateway.port".into(),
            message: "port 0 is not a valid listen port".into(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError {
            key: "storage.database_path".into(),
            message: "database path must not be empty".into(),
        });
    }

    if let Some(key) = &config.bot.api_key {
        if key.len() < 16 {
            errors.push(ConfigError {
                key: "bot.api_key".into(),
                message: "api key must be at least 16 characters".into(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Render validation errors to stderr, one per line.
pub fn render_errors(errors: &[ConfigError]) {
    for err in errors {
        eprintln!("error: invalid configuration -- {err}");
    }
}
