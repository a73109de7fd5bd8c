// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access goes through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use predia_config::model::StorageConfig;
use predia_core::PrediaError;

use crate::migrations;

/// Handle to the service's SQLite database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database, apply PRAGMAs, and run migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, PrediaError> {
        let conn = tokio_rusqlite::Connection::open(&config.database_path)
            .await
            .map_err(|e| map_tr_err(e.into()))?;

        let wal_mode = config.wal_mode;
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(move |conn| -> Result<(), refinery::Error> {
            migrations::run_migrations(conn)
        })
        .await
        .map_err(map_tr_err)?;

        Ok(Self { conn })
    }

    /// The underlying serialized connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

/// Map a tokio-rusqlite error into the workspace error type.
pub(crate) fn map_tr_err<E>(e: tokio_rusqlite::Error<E>) -> PrediaError
where
    tokio_rusqlite::Error<E>: std::error::Error + Send + Sync + 'static,
{
    PrediaError::Storage {
        source: Box::new(e),
    }
}
