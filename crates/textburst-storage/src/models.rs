// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for storage entities.

use serde::{Deserialize, Serialize};

/// A parent send record: one row per dispatch that ran with an owning user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    pub user_id: i64,
    pub body: String,
    pub total_recipients: i64,
    pub successful_sends: i64,
    pub failed_sends: i64,
    pub created_at: String,
}

impl MessageRecord {
    /// Delivery rate as a percentage, rounded to two decimals.
    ///
    /// Always recomputed from the counters — never stored, so it cannot
    /// diverge from them. 0 when the message has no recipients.
    pub fn delivery_rate(&self) -> f64 {
        if self.total_recipients == 0 {
            return 0.0;
        }
        let rate = self.successful_sends as f64 / self.total_recipients as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    }
}

/// A per-destination status row. Written exactly once per dispatch attempt
/// and never updated by this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientRecord {
    pub id: i64,
    pub message_id: i64,
    pub phone_number: String,
    pub status: String,
    pub provider_message_id: Option<String>,
    pub cost: Option<f64>,
    pub error: Option<String>,
    pub sent_at: Option<String>,
}
