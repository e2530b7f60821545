// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as the carrier selector naming a known transport.

use crate::diagnostic::ConfigError;
use crate::model::TextburstConfig;

/// Transport names accepted by `carrier.provider`.
const KNOWN_PROVIDERS: &[&str] = &["infobip", "twilio", "mock"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TextburstConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate the carrier selector names a known transport.
    let provider = config.carrier.provider.trim();
    if !KNOWN_PROVIDERS.contains(&provider) {
        errors.push(ConfigError::Validation {
            message: format!(
                "carrier.provider `{provider}` is not recognized; expected one of: {}",
                KNOWN_PROVIDERS.join(", ")
            ),
        });
    }

    // Validate timeout is positive.
    if config.carrier.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "carrier.timeout_secs must be at least 1".to_string(),
        });
    }

    // Validate database_path is not empty.
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate infobip base_url is a http(s) URL when infobip is selected.
    if provider == "infobip" {
        let url = config.infobip.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("infobip.base_url `{url}` must start with http:// or https://"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = TextburstConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_provider_fails_validation() {
        let mut config = TextburstConfig::default();
        config.carrier.provider = "pigeon".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("pigeon"))));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = TextburstConfig::default();
        config.carrier.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("timeout_secs"))));
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = TextburstConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))));
    }

    #[test]
    fn bad_infobip_url_only_checked_when_selected() {
        let mut config = TextburstConfig::default();
        config.infobip.base_url = "ftp://api.infobip.com".to_string();
        // Not selected: passes.
        assert!(validate_config(&config).is_ok());
        // Selected: fails.
        config.carrier.provider = "infobip".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))));
    }
}
