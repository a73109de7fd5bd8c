// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage seam for persisted notification records.

use async_trait::async_trait;

use crate::error::PrediaError;
use crate::types::{NotificacionDbRecord, NotificacionFilter};

/// Read/update access to persisted notification rows.
///
/// The service layer composes these raw rows with the normalizer and
/// deduplicator; implementations return rows as stored, without cleanup.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Newest-first rows matching `filter`, capped at `limit`.
    async fn list_notifications(
        &self,
        filter: &NotificacionFilter,
        limit: u32,
    ) -> Result<Vec<NotificacionDbRecord>, PrediaError>;

    /// Count of unread rows.
    async fn unread_count(&self) -> Result<u64, PrediaError>;

    /// Mark every unread row as read. Returns the number of rows changed.
    async fn mark_all_read(&self) -> Result<u64, PrediaError>;

    /// Mark one row as read. Returns `false` when no such row exists.
    async fn mark_read(&self, id: &str) -> Result<bool, PrediaError>;
}
