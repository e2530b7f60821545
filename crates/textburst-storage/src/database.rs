// SPDX-FileCopyrightText: 2026 Textburst Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. The `Database` struct IS the single writer: query modules accept
//! `&Database` and go through `connection().call()`. Do NOT create
//! additional Connection instances for writes.

use textburst_core::TextburstError;
use tokio_rusqlite::Connection;
use tracing::info;

use crate::migrations;

/// Handle to the SQLite database, shared across the process.
///
/// Cloning is cheap; all clones funnel into the same background writer
/// thread.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path` with WAL mode enabled and
    /// run pending migrations.
    pub async fn open(path: &str) -> Result<Self, TextburstError> {
        Self::open_with_options(path, true).await
    }

    /// Open with explicit control over WAL mode (disabled in some test and
    /// containerized-filesystem setups).
    pub async fn open_with_options(path: &str, wal_mode: bool) -> Result<Self, TextburstError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| TextburstError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path).await.map_err(map_sqlite_err)?;

        conn.call(move |conn| -> Result<(), TextburstError> {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")
                    .map_err(map_sqlite_err)?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")
                .map_err(map_sqlite_err)?;
            conn.pragma_update(None, "synchronous", "NORMAL")
                .map_err(map_sqlite_err)?;
            migrations::run_migrations(conn)?;
            Ok(())
        })
        .await
        .map_err(|e| match e {
            tokio_rusqlite::Error::Error(inner) => inner,
            other => TextburstError::Storage {
                source: other.to_string().into(),
            },
        })?;

        info!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the database, flushing the writer thread.
    pub async fn close(self) -> Result<(), TextburstError> {
        self.conn.close().await.map_err(map_tr_err)
    }
}

/// Map a tokio-rusqlite error into the workspace error type.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> TextburstError {
    TextburstError::Storage {
        source: Box::new(e),
    }
}

/// Map a rusqlite error into the workspace error type.
pub fn map_sqlite_err(e: rusqlite::Error) -> TextburstError {
    TextburstError::Storage {
        source: Box::new(e),
    }
}
