// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Textburst bulk SMS dispatch service.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Textburst workspace. Carrier adapters
//! implement traits defined here; the dispatch coordinator consumes them.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TextburstError;
pub use traits::CarrierAdapter;
pub use types::{
    CarrierKind, DeliveryStatus, DispatchSummary, DispatchTotals, HealthStatus, SendOutcome,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textburst_error_has_all_variants() {
        // Verify all 6 error variants exist and can be constructed.
        let _config = TextburstError::Config("test".into());
        let _storage = TextburstError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _carrier = TextburstError::Carrier {
            message: "test".into(),
            source: None,
        };
        let _not_found = TextburstError::MessageNotFound { message_id: 42 };
        let _nothing = TextburstError::NothingToResend { message_id: 42 };
        let _internal = TextburstError::Internal("test".into());
    }

    #[test]
    fn carrier_kind_round_trips() {
        use std::str::FromStr;

        let variants = [CarrierKind::Infobip, CarrierKind::Twilio, CarrierKind::Mock];
        for variant in &variants {
            let s = variant.to_string();
            let parsed = CarrierKind::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn mock_kind_displays_as_mock() {
        // The summary's provider field is derived from this Display impl,
        // and callers match on the literal string "mock".
        assert_eq!(CarrierKind::Mock.to_string(), "mock");
    }

    #[test]
    fn delivery_status_serializes_lowercase() {
        let json = serde_json::to_string(&DeliveryStatus::Sent).unwrap();
        assert_eq!(json, "\"sent\"");
        let json = serde_json::to_string(&DeliveryStatus::Failed).unwrap();
        assert_eq!(json, "\"failed\"");
    }
}
