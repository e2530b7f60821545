// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Infobip bulk carrier adapter.
//!
//! Issues one network call carrying the full destination list; the response
//! is a per-destination result array mapped back into outcomes by echoed
//! destination value, with positional fallback. A transport-level failure
//! (connect, auth, malformed body) degrades the WHOLE batch to failed
//! outcomes; there is no partial-batch retry at this layer.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use textburst_config::model::InfobipConfig;
use textburst_core::{CarrierAdapter, CarrierKind, HealthStatus, SendOutcome, TextburstError};
use tracing::{debug, warn};

/// Send endpoint, relative to the account base URL.
const SEND_PATH: &str = "/sms/2/text/advanced";

/// Balance endpoint used by health checks.
const BALANCE_PATH: &str = "/account/1/balance";

/// Bulk HTTP carrier backed by the Infobip SMS API.
#[derive(Debug, Clone)]
pub struct InfobipCarrier {
    client: reqwest::Client,
    base_url: String,
    sender_id: String,
}

#[derive(Debug, Serialize)]
struct BulkRequest {
    messages: Vec<BulkMessage>,
}

#[derive(Debug, Serialize)]
struct BulkMessage {
    from: String,
    destinations: Vec<Destination>,
    text: String,
}

#[derive(Debug, Serialize)]
struct Destination {
    to: String,
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    messages: Vec<BulkResult>,
}

#[derive(Debug, Deserialize)]
struct BulkResult {
    to: String,
    #[serde(rename = "messageId")]
    message_id: Option<String>,
    status: BulkStatus,
    price: Option<BulkPrice>,
}

#[derive(Debug, Deserialize)]
struct BulkStatus {
    #[serde(rename = "groupName")]
    group_name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BulkPrice {
    #[serde(rename = "pricePerMessage")]
    price_per_message: Option<f64>,
}

impl InfobipCarrier {
    /// Creates the bulk carrier from validated configuration.
    ///
    /// Requires `config.api_key`; callers go through
    /// [`build_carrier`](crate::build_carrier), which falls back to the mock
    /// instead of surfacing this error.
    pub fn new(config: &InfobipConfig, timeout: Duration) -> Result<Self, TextburstError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| TextburstError::Config("infobip.api_key is required".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("App {api_key}"))
                .map_err(|e| TextburstError::Config(format!("invalid API key value: {e}")))?,
        );
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TextburstError::Carrier {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sender_id: config.sender_id.clone(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// The single bulk call. Any error here fails the whole batch.
    async fn send_batch(
        &self,
        destinations: &[String],
        body: &str,
    ) -> Result<BulkResponse, TextburstError> {
        let request = BulkRequest {
            messages: vec![BulkMessage {
                from: self.sender_id.clone(),
                destinations: destinations
                    .iter()
                    .map(|d| Destination { to: d.clone() })
                    .collect(),
                text: body.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}{SEND_PATH}", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| TextburstError::Carrier {
                message: format!("bulk send request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TextburstError::Carrier {
                message: format!("bulk send returned {status}: {body}"),
                source: None,
            });
        }

        response
            .json::<BulkResponse>()
            .await
            .map_err(|e| TextburstError::Carrier {
                message: format!("malformed bulk send response: {e}"),
                source: Some(Box::new(e)),
            })
    }

    /// Map the carrier's result array back onto the input destinations.
    ///
    /// Matched by echoed destination value first; falls back to position for
    /// entries the carrier did not echo. A destination with no matching
    /// entry at all becomes a failed outcome so the summary still accounts
    /// for every input.
    fn map_results(&self, destinations: &[String], response: BulkResponse) -> Vec<SendOutcome> {
        let mut by_destination: HashMap<&str, &BulkResult> = HashMap::new();
        for result in &response.messages {
            by_destination.entry(result.to.as_str()).or_insert(result);
        }

        destinations
            .iter()
            .enumerate()
            .map(|(i, destination)| {
                let result = by_destination
                    .get(destination.as_str())
                    .copied()
                    .or_else(|| response.messages.get(i));
                match result {
                    Some(r) => self.result_to_outcome(destination, r),
                    None => SendOutcome::failed(
                        destination,
                        "no result returned for destination",
                        self.name(),
                    ),
                }
            })
            .collect()
    }

    fn result_to_outcome(&self, destination: &str, result: &BulkResult) -> SendOutcome {
        if result.status.group_name.eq_ignore_ascii_case("REJECTED") {
            let error = result
                .status
                .description
                .clone()
                .unwrap_or_else(|| "rejected by carrier".to_string());
            return SendOutcome::failed(destination, error, self.name());
        }

        let cost = result.price.as_ref().and_then(|p| p.price_per_message);
        match &result.message_id {
            Some(id) => SendOutcome::sent(destination, id, self.name(), cost),
            None => SendOutcome::failed(destination, "carrier returned no message id", self.name()),
        }
    }
}

#[async_trait]
impl CarrierAdapter for InfobipCarrier {
    fn name(&self) -> &str {
        "infobip"
    }

    fn kind(&self) -> CarrierKind {
        CarrierKind::Infobip
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn send(&self, destinations: &[String], body: &str) -> Vec<SendOutcome> {
        match self.send_batch(destinations, body).await {
            Ok(response) => {
                debug!(
                    destinations = destinations.len(),
                    results = response.messages.len(),
                    "bulk send accepted"
                );
                self.map_results(destinations, response)
            }
            Err(e) => {
                // Whole-batch degrade: every destination inherits the
                // transport error text.
                warn!(error = %e, destinations = destinations.len(), "bulk send failed");
                let text = e.to_string();
                destinations
                    .iter()
                    .map(|d| SendOutcome::failed(d, text.clone(), self.name()))
                    .collect()
            }
        }
    }

    async fn health_check(&self) -> Result<HealthStatus, TextburstError> {
        let response = self
            .client
            .get(format!("{}{BALANCE_PATH}", self.base_url))
            .send()
            .await;
        match response {
            Ok(r) if r.status().is_success() => Ok(HealthStatus::Healthy),
            Ok(r) => Ok(HealthStatus::Unhealthy(format!(
                "balance endpoint returned {}",
                r.status()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "carrier unreachable: {e}"
            ))),
        }
    }
}
