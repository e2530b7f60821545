// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Textburst dispatch service.

use thiserror::Error;

/// The primary error type used across all Textburst crates.
///
/// Carrier-level delivery failures are NOT errors: adapters convert them into
/// `failed` outcomes so a batch with mixed results still settles into one
/// summary. Only environment-level failures (storage, misconfiguration)
/// surface through this type.
#[derive(Debug, Error)]
pub enum TextburstError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Carrier transport errors (connection failure, auth, malformed response).
    ///
    /// Internal to adapters: never crosses `CarrierAdapter::send`, which
    /// degrades transport failures into failed outcomes instead.
    #[error("carrier error: {message}")]
    Carrier {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Resend requested for a message that does not exist or is not owned
    /// by the requesting user.
    #[error("message {message_id} not found")]
    MessageNotFound { message_id: i64 },

    /// Resend requested for a message with no failed recipients.
    #[error("message {message_id} has no failed recipients to resend")]
    NothingToResend { message_id: i64 },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
