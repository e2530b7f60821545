// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The dispatch and resend coordinators.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use textburst_core::{CarrierAdapter, DispatchSummary, TextburstError};
use textburst_storage::queries::{messages, recipients};
use textburst_storage::Database;
use tracing::{info, instrument};

/// Coordinates one logical send across the carrier and the store.
///
/// Explicitly constructed with its collaborators; there is no process-wide
/// singleton. The carrier is chosen once at startup
/// (see `textburst_carrier::build_carrier`) and never re-selected per call.
///
/// Inputs are trusted: destinations non-empty, deduplicated, and in
/// canonical form, body within one SMS segment. Validation belongs to the
/// calling layer. Defensive behavior for inputs that slip through anyway:
/// an empty destination list yields an all-zero summary, and duplicate
/// destinations each produce their own recipient row and count.
#[derive(Clone)]
pub struct Dispatcher {
    carrier: Arc<dyn CarrierAdapter>,
    db: Database,
}

impl Dispatcher {
    pub fn new(carrier: Arc<dyn CarrierAdapter>, db: Database) -> Self {
        Self { carrier, db }
    }

    /// Dispatch `body` to every destination.
    ///
    /// With `user` present, persists a parent message, one recipient row per
    /// outcome, and a single settled counter update — all attempt rows and
    /// the settlement commit together. With `user` absent (dry mode),
    /// nothing is persisted and the summary's `message_id` is `None`.
    ///
    /// Carrier failures never surface here: they arrive as failed outcomes
    /// inside a well-formed summary. Only storage failures are errors.
    #[instrument(skip(self, destinations, body), fields(provider = self.carrier.name()))]
    pub async fn dispatch(
        &self,
        destinations: &[String],
        body: &str,
        user: Option<i64>,
    ) -> Result<DispatchSummary, TextburstError> {
        let created_at = now_millis();

        let message_id = match user {
            Some(user_id) => Some(
                messages::insert_message(
                    &self.db,
                    user_id,
                    body,
                    destinations.len() as i64,
                    &created_at,
                )
                .await?,
            ),
            None => None,
        };

        let outcomes = self.carrier.send(destinations, body).await;

        if let Some(id) = message_id {
            recipients::record_outcomes(&self.db, id, &outcomes, &now_millis()).await?;
        }

        let summary = DispatchSummary::from_outcomes(self.carrier.name(), message_id, outcomes);
        info!(
            message_id,
            total = summary.summary.total,
            sent = summary.summary.sent,
            failed = summary.summary.failed,
            "dispatch settled"
        );
        Ok(summary)
    }

    /// Re-dispatch a message's body to only its failed destinations.
    ///
    /// Creates a brand-new message with its own recipient rows; the original
    /// message's counters and rows are never touched. Fails with
    /// [`TextburstError::MessageNotFound`] when `message_id` does not exist
    /// or belongs to another user, and with
    /// [`TextburstError::NothingToResend`] when no recipient of the message
    /// failed.
    #[instrument(skip(self))]
    pub async fn resend(&self, message_id: i64, user: i64) -> Result<DispatchSummary, TextburstError> {
        let message = messages::get_message(&self.db, message_id, user)
            .await?
            .ok_or(TextburstError::MessageNotFound { message_id })?;

        let failed = recipients::failed_destinations(&self.db, message_id).await?;
        if failed.is_empty() {
            return Err(TextburstError::NothingToResend { message_id });
        }

        info!(
            message_id,
            destinations = failed.len(),
            "resending failed recipients as a new message"
        );
        self.dispatch(&failed, &message.body, Some(user)).await
    }
}

fn now_millis() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
