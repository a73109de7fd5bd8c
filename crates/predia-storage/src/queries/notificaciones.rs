// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification row CRUD operations.
//!
//! Rows come back exactly as stored -- the normalizer downstream owns
//! cleanup. The one exception is the `data` column: a value that is not
//! valid JSON is surfaced as absent rather than failing the whole read.

use predia_core::PrediaError;
use rusqlite::params;

use crate::database::{map_tr_err, Database};
use crate::models::{NotificacionDbRecord, NotificacionFilter};

/// Insert a new notification row.
pub async fn insert_notificacion(
    db: &Database,
    record: &NotificacionDbRecord,
) -> Result<(), PrediaError> {
    let record = record.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO notificacion (id, tipo, titulo, mensaje, leida, data, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id,
                    record.tipo,
                    record.titulo,
                    record.mensaje,
                    record.leida,
                    record.data.as_ref().map(|d| d.to_string()),
                    record.created_at,
                    record.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Newest-first rows matching `filter`, capped at `limit`.
pub async fn list_notifications(
    db: &Database,
    filter: &NotificacionFilter,
    limit: u32,
) -> Result<Vec<NotificacionDbRecord>, PrediaError> {
    let since = filter.since.clone();
    let unread_only = filter.unread_only;
    db.connection()
        .call(move |conn| -> Result<Vec<NotificacionDbRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, tipo, titulo, mensaje, leida, data, created_at, updated_at
                 FROM notificacion
                 WHERE (?1 IS NULL OR created_at > ?1)
                   AND (?2 = 0 OR leida IS NULL OR leida = 0)
                 ORDER BY created_at DESC
                 LIMIT ?3",
            )?;
            let rows = stmt.query_map(params![since, unread_only, limit], |row| {
                let data: Option<String> = row.get(5)?;
                Ok(NotificacionDbRecord {
                    id: row.get(0)?,
                    tipo: row.get(1)?,
                    titulo: row.get(2)?,
                    mensaje: row.get(3)?,
                    leida: row.get(4)?,
                    data: data.and_then(|raw| serde_json::from_str(&raw).ok()),
                    created_at: row.get(6)?,
                    updated_at: row.get(7)?,
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

/// Count of unread rows.
pub async fn unread_count(db: &Database) -> Result<u64, PrediaError> {
    db.connection()
        .call(|conn| -> Result<u64, rusqlite::Error> {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM notificacion WHERE leida IS NULL OR leida = 0",
                [],
                |row| row.get(0),
            )?;
            Ok(count as u64)
        })
        .await
        .map_err(map_tr_err)
}

/// Mark every unread row as read. Returns the number of rows changed.
pub async fn mark_all_read(db: &Database, updated_at: String) -> Result<u64, PrediaError> {
    db.connection()
        .call(move |conn| -> Result<u64, rusqlite::Error> {
            let changed = conn.execute(
                "UPDATE notificacion SET leida = 1, updated_at = ?1
                 WHERE leida IS NULL OR leida = 0",
                params![updated_at],
            )?;
            Ok(changed as u64)
        })
        .await
        .map_err(map_tr_err)
}

/// Mark one row as read. Returns `false` when no such row exists.
pub async fn mark_read(db: &Database, id: String, updated_at: String) -> Result<bool, PrediaError> {
    db.connection()
        .call(move |conn| -> Result<bool, rusqlite::Error> {
            let changed = conn.execute(
                "UPDATE notificacion SET leida = 1, updated_at = ?2 WHERE id = ?1",
                params![id, updated_at],
            )?;
            Ok(changed == 1)
        })
        .await
        .map_err(map_tr_err)
}
