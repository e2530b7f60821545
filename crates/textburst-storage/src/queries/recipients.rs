// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recipient (per-destination status row) operations.

use rusqlite::params;
use textburst_core::{SendOutcome, TextburstError};

use crate::database::{map_tr_err, Database};
use crate::models::RecipientRecord;

/// Persist the outcomes of one dispatch and settle the parent counters.
///
/// Writes one recipient row per outcome (in outcome order) and the single
/// aggregate update to the parent message, all in ONE transaction: a crash
/// mid-dispatch leaves either no trace of the attempt's rows or a fully
/// settled message, never a partially-written attempt.
///
/// `sent_at` is stamped onto successful rows only.
pub async fn record_outcomes(
    db: &Database,
    message_id: i64,
    outcomes: &[SendOutcome],
    sent_at: &str,
) -> Result<(), TextburstError> {
    let outcomes = outcomes.to_vec();
    let sent_at = sent_at.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let mut sent_count: i64 = 0;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO recipients (message_id, phone_number, status, provider_message_id, cost, error, sent_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                )?;
                for outcome in &outcomes {
                    let row_sent_at = outcome.is_sent().then_some(sent_at.as_str());
                    if outcome.is_sent() {
                        sent_count += 1;
                    }
                    stmt.execute(params![
                        message_id,
                        outcome.phone_number,
                        outcome.status.to_string(),
                        outcome.provider_message_id,
                        outcome.cost,
                        outcome.error,
                        row_sent_at,
                    ])?;
                }
            }
            let failed_count = outcomes.len() as i64 - sent_count;
            tx.execute(
                "UPDATE messages SET successful_sends = ?1, failed_sends = ?2 WHERE id = ?3",
                params![sent_count, failed_count, message_id],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Distinct destinations of a message whose latest attempt under that
/// message failed. Rows are append-only, so "failed" here means the row
/// written by the message's own dispatch.
pub async fn failed_destinations(
    db: &Database,
    message_id: i64,
) -> Result<Vec<String>, TextburstError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT phone_number FROM recipients
                 WHERE message_id = ?1 AND status = 'failed'
                 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![message_id], |row| row.get(0))?;
            let mut destinations = Vec::new();
            for row in rows {
                destinations.push(row?);
            }
            Ok(destinations)
        })
        .await
        .map_err(map_tr_err)
}

/// All recipient rows for a message, in insertion order.
pub async fn recipients_for_message(
    db: &Database,
    message_id: i64,
) -> Result<Vec<RecipientRecord>, TextburstError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, message_id, phone_number, status, provider_message_id, cost, error, sent_at
                 FROM recipients WHERE message_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![message_id], |row| {
                Ok(RecipientRecord {
                    id: row.get(0)?,
                    message_id: row.get(1)?,
                    phone_number: row.get(2)?,
                    status: row.get(3)?,
                    provider_message_id: row.get(4)?,
                    cost: row.get(5)?,
                    error: row.get(6)?,
                    sent_at: row.get(7)?,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::messages::{get_message, insert_message};
    use tempfile::tempdir;

    const T0: &str = "2026-01-01T00:00:00.000Z";

    async fn setup_message(total: i64) -> (Database, tempfile::TempDir, i64) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        let id = insert_message(&db, 7, "hello", total, T0).await.unwrap();
        (db, dir, id)
    }

    #[tokio::test]
    async fn record_outcomes_writes_rows_and_settles_counters() {
        let (db, _dir, msg_id) = setup_message(3).await;

        let outcomes = vec![
            SendOutcome::sent("+15550000001", "prov-1", "mock", None),
            SendOutcome::failed("+15550000002", "carrier rejected", "mock"),
            SendOutcome::sent("+15550000003", "prov-2", "mock", Some(0.04)),
        ];
        record_outcomes(&db, msg_id, &outcomes, T0).await.unwrap();

        let rows = recipients_for_message(&db, msg_id).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].phone_number, "+15550000001");
        assert_eq!(rows[0].status, "sent");
        assert_eq!(rows[0].provider_message_id.as_deref(), Some("prov-1"));
        assert_eq!(rows[0].sent_at.as_deref(), Some(T0));
        assert!(rows[0].error.is_none());

        assert_eq!(rows[1].status, "failed");
        assert_eq!(rows[1].error.as_deref(), Some("carrier rejected"));
        assert!(rows[1].provider_message_id.is_none());
        assert!(rows[1].sent_at.is_none());

        assert_eq!(rows[2].cost, Some(0.04));

        let msg = get_message(&db, msg_id, 7).await.unwrap().unwrap();
        assert_eq!(msg.successful_sends, 2);
        assert_eq!(msg.failed_sends, 1);
        assert_eq!(msg.successful_sends + msg.failed_sends, msg.total_recipients);
        assert_eq!(msg.delivery_rate(), 66.67);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn failed_destinations_are_distinct_and_ordered() {
        let (db, _dir, msg_id) = setup_message(4).await;

        // Duplicate destination that slipped past caller dedup: each attempt
        // gets its own row, but the failed set collapses them.
        let outcomes = vec![
            SendOutcome::failed("+15550000002", "err", "mock"),
            SendOutcome::sent("+15550000001", "prov-1", "mock", None),
            SendOutcome::failed("+15550000003", "err", "mock"),
            SendOutcome::failed("+15550000002", "err again", "mock"),
        ];
        record_outcomes(&db, msg_id, &outcomes, T0).await.unwrap();

        let failed = failed_destinations(&db, msg_id).await.unwrap();
        assert_eq!(failed, vec!["+15550000002", "+15550000003"]);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn failed_destinations_empty_when_all_sent() {
        let (db, _dir, msg_id) = setup_message(1).await;

        let outcomes = vec![SendOutcome::sent("+15550000001", "prov-1", "mock", None)];
        record_outcomes(&db, msg_id, &outcomes, T0).await.unwrap();

        assert!(failed_destinations(&db, msg_id).await.unwrap().is_empty());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_destinations_each_get_a_row() {
        let (db, _dir, msg_id) = setup_message(2).await;

        let outcomes = vec![
            SendOutcome::sent("+15550000001", "a", "mock", None),
            SendOutcome::sent("+15550000001", "b", "mock", None),
        ];
        record_outcomes(&db, msg_id, &outcomes, T0).await.unwrap();

        let rows = recipients_for_message(&db, msg_id).await.unwrap();
        assert_eq!(rows.len(), 2);

        let msg = get_message(&db, msg_id, 7).await.unwrap().unwrap();
        assert_eq!(msg.successful_sends, 2);

        db.close().await.unwrap();
    }
}
