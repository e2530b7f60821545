// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./textburst.toml` > `~/.config/textburst/textburst.toml`
//! > `/etc/textburst/textburst.toml` with environment variable overrides via
//! `TEXTBURST_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TextburstConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/textburst/textburst.toml` (system-wide)
/// 3. `~/.config/textburst/textburst.toml` (user XDG config)
/// 4. `./textburst.toml` (local directory)
/// 5. `TEXTBURST_*` environment variables
pub fn load_config() -> Result<TextburstConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TextburstConfig::default()))
        .merge(Toml::file("/etc/textburst/textburst.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("textburst/textburst.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("textburst.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TextburstConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TextburstConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TextburstConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TextburstConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TEXTBURST_TWILIO_ACCOUNT_SID` must map
/// to `twilio.account_sid`, not `twilio.account.sid`.
fn env_provider() -> Env {
    Env::prefixed("TEXTBURST_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: TEXTBURST_TWILIO_ACCOUNT_SID -> "twilio_account_sid"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("app_", "app.", 1)
            .replacen("carrier_", "carrier.", 1)
            .replacen("infobip_", "infobip.", 1)
            .replacen("twilio_", "twilio.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
