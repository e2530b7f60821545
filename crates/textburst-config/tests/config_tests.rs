// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Textburst configuration system.

use textburst_config::diagnostic::ConfigError;
use textburst_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[app]
name = "textburst-staging"
log_level = "debug"

[carrier]
provider = "infobip"
timeout_secs = 15

[infobip]
api_key = "ib-key-123"
base_url = "https://xyz123.api.infobip.com"
sender_id = "Acme"

[twilio]
account_sid = "AC123"
auth_token = "tok"
from_number = "+15005550006"

[storage]
database_path = "/tmp/textburst-test.db"
wal_mode = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "textburst-staging");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.carrier.provider, "infobip");
    assert_eq!(config.carrier.timeout_secs, 15);
    assert_eq!(config.infobip.api_key.as_deref(), Some("ib-key-123"));
    assert_eq!(config.infobip.base_url, "https://xyz123.api.infobip.com");
    assert_eq!(config.infobip.sender_id, "Acme");
    assert_eq!(config.twilio.account_sid.as_deref(), Some("AC123"));
    assert_eq!(config.storage.database_path, "/tmp/textburst-test.db");
    assert!(!config.storage.wal_mode);
}

/// A typo in a section key is rejected with a suggestion.
#[test]
fn typo_in_carrier_section_gets_suggestion() {
    let toml = r#"
[carrier]
providr = "twilio"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "providr" && suggestion.as_deref() == Some("provider")
        )
    });
    assert!(found, "expected an UnknownKey error with suggestion, got: {errors:?}");
}

/// Semantic validation runs after deserialization.
#[test]
fn unrecognized_provider_fails_validation() {
    let toml = r#"
[carrier]
provider = "smoke-signals"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::Validation { message } if message.contains("smoke-signals")
    )));
}

/// The empty string is a fully-defaulted, valid configuration.
#[test]
fn empty_config_is_valid() {
    let config = load_and_validate_str("").expect("defaults should validate");
    assert_eq!(config.carrier.provider, "mock");
    assert!(config.infobip.api_key.is_none());
    assert!(config.storage.wal_mode);
}
