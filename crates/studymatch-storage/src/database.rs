// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. The `Database` struct IS the single writer; query modules accept
//! `&Database` and go through `connection().call()`. Do NOT create
//! additional Connection instances for writes.

use rusqlite::ErrorCode;
use tracing::debug;

use studymatch_core::StudyMatchError;

/// Handle to the single SQLite connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run all
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, StudyMatchError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_tr_err)?;

        conn.call(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            crate::migrations::run_migrations(conn)
                .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), StudyMatchError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;

        self.conn.close().await.map_err(|e| StudyMatchError::Storage {
            source: Box::new(e),
        })?;
        debug!("database closed");
        Ok(())
    }
}

/// Convert a tokio-rusqlite error into the engine error taxonomy.
///
/// UNIQUE/constraint violations become `Conflict` so a raced first swipe
/// on a pair surfaces as retryable rather than as a generic storage
/// failure.
pub fn map_tr_err(err: tokio_rusqlite::Error) -> StudyMatchError {
    if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(inner, ref msg)) = err
        && inner.code == ErrorCode::ConstraintViolation
    {
        return StudyMatchError::Conflict {
            message: msg
                .clone()
                .unwrap_or_else(|| "constraint violation".to_string()),
        };
    }
    StudyMatchError::Storage {
        source: Box::new(err),
    }
}
