// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across carrier adapters and the dispatch coordinator.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies which carrier transport is active for the process.
///
/// Selected once at startup from configuration; the dispatch coordinator
/// never branches on carrier identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CarrierKind {
    Infobip,
    Twilio,
    Mock,
}

/// Per-recipient delivery status.
///
/// `Pending` and `Delivered` exist in the schema for webhook-driven status
/// callbacks; this core only ever produces `Sent` and `Failed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Failed,
    Delivered,
}

/// Health status reported by carrier health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Carrier is fully operational.
    Healthy,
    /// Carrier is operational but experiencing issues.
    Degraded(String),
    /// Carrier is not operational.
    Unhealthy(String),
}

/// The per-destination result of one dispatch attempt.
///
/// Produced in input order by `CarrierAdapter::send` and folded into
/// recipient rows and the returned [`DispatchSummary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    pub phone_number: String,
    pub status: DeliveryStatus,
    /// Provider-assigned identifier for the message, set on success.
    #[serde(rename = "messageId", skip_serializing_if = "Option::is_none")]
    pub provider_message_id: Option<String>,
    /// Carrier error text, set on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Name of the carrier that produced this outcome.
    pub provider: String,
    /// Per-message cost, when the carrier reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl SendOutcome {
    /// A successful delivery outcome.
    pub fn sent(
        phone_number: impl Into<String>,
        provider_message_id: impl Into<String>,
        provider: impl Into<String>,
        cost: Option<f64>,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            status: DeliveryStatus::Sent,
            provider_message_id: Some(provider_message_id.into()),
            error: None,
            provider: provider.into(),
            cost,
        }
    }

    /// A failed delivery outcome carrying the carrier's error text.
    pub fn failed(
        phone_number: impl Into<String>,
        error: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            status: DeliveryStatus::Failed,
            provider_message_id: None,
            error: Some(error.into()),
            provider: provider.into(),
            cost: None,
        }
    }

    pub fn is_sent(&self) -> bool {
        self.status == DeliveryStatus::Sent
    }
}

/// Aggregate counts for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchTotals {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Normalized result of one dispatch, returned to callers and ultimately
/// serialized to JSON by the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchSummary {
    pub success: bool,
    pub provider: String,
    /// Identifier of the persisted parent message; `None` in dry mode.
    pub message_id: Option<i64>,
    pub results: Vec<SendOutcome>,
    pub summary: DispatchTotals,
}

impl DispatchSummary {
    /// Build a summary from an ordered outcome list, counting from the list
    /// itself rather than re-querying persisted rows.
    pub fn from_outcomes(
        provider: impl Into<String>,
        message_id: Option<i64>,
        results: Vec<SendOutcome>,
    ) -> Self {
        let sent = results.iter().filter(|o| o.is_sent()).count();
        let failed = results.len() - sent;
        Self {
            success: true,
            provider: provider.into(),
            message_id,
            results,
            summary: DispatchTotals {
                total: sent + failed,
                sent,
                failed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_constructors_set_status() {
        let ok = SendOutcome::sent("+15550000001", "abc-123", "mock", Some(0.02));
        assert!(ok.is_sent());
        assert_eq!(ok.provider_message_id.as_deref(), Some("abc-123"));
        assert!(ok.error.is_none());

        let bad = SendOutcome::failed("+15550000002", "number blocked", "mock");
        assert!(!bad.is_sent());
        assert!(bad.provider_message_id.is_none());
        assert_eq!(bad.error.as_deref(), Some("number blocked"));
        assert!(bad.cost.is_none());
    }

    #[test]
    fn summary_counts_from_outcome_list() {
        let results = vec![
            SendOutcome::sent("+15550000001", "a", "mock", None),
            SendOutcome::failed("+15550000002", "oops", "mock"),
            SendOutcome::sent("+15550000003", "b", "mock", None),
        ];
        let summary = DispatchSummary::from_outcomes("mock", Some(7), results);
        assert_eq!(summary.summary.total, 3);
        assert_eq!(summary.summary.sent, 2);
        assert_eq!(summary.summary.failed, 1);
        assert_eq!(summary.summary.sent + summary.summary.failed, summary.summary.total);
    }

    #[test]
    fn summary_serializes_to_wire_shape() {
        let results = vec![
            SendOutcome::sent("+15550000001", "prov-1", "infobip", Some(0.05)),
            SendOutcome::failed("+15550000002", "invalid destination", "infobip"),
        ];
        let summary = DispatchSummary::from_outcomes("infobip", Some(42), results);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["provider"], "infobip");
        assert_eq!(json["messageId"], 42);
        assert_eq!(json["results"][0]["phoneNumber"], "+15550000001");
        assert_eq!(json["results"][0]["status"], "sent");
        assert_eq!(json["results"][0]["messageId"], "prov-1");
        assert_eq!(json["results"][0]["cost"], 0.05);
        // Failed outcomes omit messageId/cost and carry error text.
        assert_eq!(json["results"][1]["status"], "failed");
        assert_eq!(json["results"][1]["error"], "invalid destination");
        assert!(json["results"][1].get("messageId").is_none());
        assert!(json["results"][1].get("cost").is_none());
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["summary"]["sent"], 1);
        assert_eq!(json["summary"]["failed"], 1);
    }

    #[test]
    fn dry_mode_summary_has_null_message_id() {
        let summary = DispatchSummary::from_outcomes("mock", None, vec![]);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["messageId"].is_null());
        assert_eq!(json["summary"]["total"], 0);
    }
}
