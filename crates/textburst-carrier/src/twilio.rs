// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Twilio per-message carrier adapter.
//!
//! Twilio has no bulk endpoint, so the adapter loops over destinations
//! issuing one form-encoded call each, catching failures independently: one
//! destination's failure cannot mark its siblings failed. Outcomes follow
//! strict input order. Twilio does not report cost in the send response, so
//! outcomes leave it unset.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use textburst_config::model::TwilioConfig;
use textburst_core::{CarrierAdapter, CarrierKind, HealthStatus, SendOutcome, TextburstError};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.twilio.com";

/// Per-message HTTP carrier backed by the Twilio Messages API.
#[derive(Debug, Clone)]
pub struct TwilioCarrier {
    client: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    code: Option<i64>,
}

impl TwilioCarrier {
    /// Creates the per-message carrier from validated configuration.
    ///
    /// Requires `account_sid`, `auth_token`, and `from_number`; callers go
    /// through [`build_carrier`](crate::build_carrier), which falls back to
    /// the mock instead of surfacing this error.
    pub fn new(config: &TwilioConfig, timeout: Duration) -> Result<Self, TextburstError> {
        let account_sid = config
            .account_sid
            .as_deref()
            .ok_or_else(|| TextburstError::Config("twilio.account_sid is required".into()))?;
        let auth_token = config
            .auth_token
            .as_deref()
            .ok_or_else(|| TextburstError::Config("twilio.auth_token is required".into()))?;
        let from_number = config
            .from_number
            .as_deref()
            .ok_or_else(|| TextburstError::Config("twilio.from_number is required".into()))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TextburstError::Carrier {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
            from_number: from_number.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// One destination, one call. Errors are returned, not raised past
    /// `send` — the loop there converts them into failed outcomes.
    async fn send_one(&self, destination: &str, body: &str) -> Result<String, TextburstError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );

        let response = self
            .client
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", destination),
                ("From", self.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| TextburstError::Carrier {
                message: format!("request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| TextburstError::Carrier {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiError>(&text) {
                Ok(err) => match err.code {
                    Some(code) => format!("{} (code {code})", err.message),
                    None => err.message,
                },
                Err(_) => format!("carrier returned {status}: {text}"),
            };
            return Err(TextburstError::Carrier {
                message,
                source: None,
            });
        }

        let message: MessageResponse =
            serde_json::from_str(&text).map_err(|e| TextburstError::Carrier {
                message: format!("malformed send response: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(message.sid)
    }
}

#[async_trait]
impl CarrierAdapter for TwilioCarrier {
    fn name(&self) -> &str {
        "twilio"
    }

    fn kind(&self) -> CarrierKind {
        CarrierKind::Twilio
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn send(&self, destinations: &[String], body: &str) -> Vec<SendOutcome> {
        // Sequential by design: preserves strict input-order echo and keeps
        // worst-case latency the caller's explicit tradeoff.
        let mut outcomes = Vec::with_capacity(destinations.len());
        for destination in destinations {
            match self.send_one(destination, body).await {
                Ok(sid) => {
                    debug!(destination, sid, "message accepted");
                    outcomes.push(SendOutcome::sent(destination, sid, self.name(), None));
                }
                Err(e) => {
                    debug!(destination, error = %e, "message rejected");
                    outcomes.push(SendOutcome::failed(destination, e.to_string(), self.name()));
                }
            }
        }
        outcomes
    }

    async fn health_check(&self) -> Result<HealthStatus, TextburstError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}.json",
            self.base_url, self.account_sid
        );
        let response = self
            .client
            .get(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .send()
            .await;
        match response {
            Ok(r) if r.status().is_success() => Ok(HealthStatus::Healthy),
            Ok(r) => Ok(HealthStatus::Unhealthy(format!(
                "account endpoint returned {}",
                r.status()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "carrier unreachable: {e}"
            ))),
        }
    }
}
