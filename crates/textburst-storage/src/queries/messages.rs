// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message (parent send record) operations.

use rusqlite::{params, OptionalExtension};
use textburst_core::TextburstError;

use crate::database::{map_tr_err, Database};
use crate::models::MessageRecord;

/// Insert a new parent message with counters at zero.
///
/// Returns the assigned message id.
pub async fn insert_message(
    db: &Database,
    user_id: i64,
    body: &str,
    total_recipients: i64,
    created_at: &str,
) -> Result<i64, TextburstError> {
    let body = body.to_string();
    let created_at = created_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO messages (user_id, body, total_recipients, successful_sends, failed_sends, created_at)
                 VALUES (?1, ?2, ?3, 0, 0, ?4)",
                params![user_id, body, total_recipients, created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch a message by id, scoped to its owning user.
///
/// Returns `None` both for a nonexistent id and for a message owned by a
/// different user, so callers cannot distinguish the two.
pub async fn get_message(
    db: &Database,
    message_id: i64,
    user_id: i64,
) -> Result<Option<MessageRecord>, TextburstError> {
    db.connection()
        .call(move |conn| {
            let record = conn
                .query_row(
                    "SELECT id, user_id, body, total_recipients, successful_sends, failed_sends, created_at
                     FROM messages WHERE id = ?1 AND user_id = ?2",
                    params![message_id, user_id],
                    |row| {
                        Ok(MessageRecord {
                            id: row.get(0)?,
                            user_id: row.get(1)?,
                            body: row.get(2)?,
                            total_recipients: row.get(3)?,
                            successful_sends: row.get(4)?,
                            failed_sends: row.get(5)?,
                            created_at: row.get(6)?,
                        })
                    },
                )
                .optional()?;
            Ok(record)
        })
        .await
        .map_err(map_tr_err)
}

/// List a user's messages, newest first.
pub async fn messages_for_user(
    db: &Database,
    user_id: i64,
    limit: i64,
) -> Result<Vec<MessageRecord>, TextburstError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, body, total_recipients, successful_sends, failed_sends, created_at
                 FROM messages WHERE user_id = ?1
                 ORDER BY id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_id, limit], |row| {
                Ok(MessageRecord {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    body: row.get(2)?,
                    total_recipients: row.get(3)?,
                    successful_sends: row.get(4)?,
                    failed_sends: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?;
            let mut records = Vec::new();
            for row in rows {
                records.push(row?);
            }
            Ok(records)
        })
        .await
        .map_err(map_tr_err)
}
