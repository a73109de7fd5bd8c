// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./predia.toml` > `~/.config/predia/predia.toml` > `/etc/predia/predia.toml`
//! with environment variable overrides via `PREDIA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PrediaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/predia/predia.toml` (system-wide)
/// 3. `~/.config/predia/predia.toml` (user XDG config)
/// 4. `./predia.toml` (local directory)
/// 5. `PREDIA_*` environment variables
pub fn load_config() -> Result<PrediaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PrediaConfig::default()))
        .merge(Toml::file("/etc/predia/predia.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("predia/predia.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("predia.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PrediaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PrediaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PrediaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PrediaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names. For example, `PREDIA_AUTH_SESSION_TOKEN`
/// must map to `auth.session_token`, not `auth.session.token`.
fn env_provider() -> Env {
    Env::prefixed("PREDIA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: PREDIA_BOT_API_KEY -> "bot_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("bot_", "bot.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
