// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Textburst dispatch service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Textburst configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TextburstConfig {
    /// Application identity and logging settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Active carrier selection and transport behavior.
    #[serde(default)]
    pub carrier: CarrierConfig,

    /// Infobip bulk carrier credentials.
    #[serde(default)]
    pub infobip: InfobipConfig,

    /// Twilio per-message carrier credentials.
    #[serde(default)]
    pub twilio: TwilioConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name of the service.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "textburst".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Carrier selection and transport behavior.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CarrierConfig {
    /// Which transport to use: "infobip", "twilio", or "mock".
    ///
    /// Selection is resolved once at startup. A real carrier with absent or
    /// placeholder credentials silently downgrades to "mock".
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Timeout for each carrier HTTP call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_provider() -> String {
    "mock".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Infobip bulk carrier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InfobipConfig {
    /// Infobip API key. `None` downgrades the infobip provider to mock.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL (account-specific Infobip domains are common).
    #[serde(default = "default_infobip_base_url")]
    pub base_url: String,

    /// Alphanumeric sender ID stamped on outbound messages.
    #[serde(default = "default_sender_id")]
    pub sender_id: String,
}

impl Default for InfobipConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_infobip_base_url(),
            sender_id: default_sender_id(),
        }
    }
}

fn default_infobip_base_url() -> String {
    "https://api.infobip.com".to_string()
}

fn default_sender_id() -> String {
    "Textburst".to_string()
}

/// Twilio per-message carrier configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TwilioConfig {
    /// Twilio account SID. `None` downgrades the twilio provider to mock.
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Twilio auth token.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// E.164 number messages are sent from.
    #[serde(default)]
    pub from_number: Option<String>,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
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
    dirs::data_dir()
        .map(|p| p.join("textburst").join("textburst.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("textburst.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}
