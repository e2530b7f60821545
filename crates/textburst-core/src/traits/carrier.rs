// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Carrier adapter trait for SMS transport integrations (Infobip, Twilio, mock).

use async_trait::async_trait;

use crate::error::TextburstError;
use crate::types::{CarrierKind, HealthStatus, SendOutcome};

/// Adapter for outbound SMS carrier transports.
///
/// Exactly one carrier is active per process, constructed once at startup.
/// The central contract: `send` is infallible. Transport-level failures
/// (timeout, auth, malformed response) degrade into `failed` outcomes for
/// the affected destinations; a carrier rejecting one destination is a
/// normal `failed` outcome, never an error. The returned list preserves
/// input destination order.
#[async_trait]
pub trait CarrierAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this carrier (the summary's
    /// `provider` field).
    fn name(&self) -> &str;

    /// Returns which transport variant this adapter is.
    fn kind(&self) -> CarrierKind;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Sends `body` to every destination, returning one outcome per
    /// destination in input order.
    async fn send(&self, destinations: &[String], body: &str) -> Vec<SendOutcome>;

    /// Probes the carrier's availability (account endpoint or equivalent).
    async fn health_check(&self) -> Result<HealthStatus, TextburstError>;
}
