// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-path service composing storage, normalization, and deduplication.
//!
//! The normalizer and deduplicator only ever run on successfully fetched
//! rows; a storage failure propagates to the caller untouched.

use std::sync::Arc;

use predia_core::types::{NotificacionFilter, NotificacionItem};
use predia_core::{NotificationStore, PrediaError};

use crate::dedupe::dedupe_notifications;
use crate::normalize::normalize_notifications;

/// Hard cap on records returned by a single read, newest first.
pub const MAX_NOTIFICATIONS: u32 = 100;

/// Result of a notification list read.
#[derive(Debug, Clone)]
pub struct NotificationListing {
    /// Normalized, deduplicated items, newest first.
    pub data: Vec<NotificacionItem>,
    /// Count of unread rows, independent of the filters.
    pub unread_count: u64,
}

/// The dashboard-facing notification read service.
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Fetch, normalize, and dedupe the notification list.
    ///
    /// The row fetch and the unread count run concurrently, the way the
    /// dashboard issues them.
    pub async fn list(
        &self,
        filter: &NotificacionFilter,
    ) -> Result<NotificationListing, PrediaError> {
        let (rows, unread_count) = tokio::try_join!(
            self.store.list_notifications(filter, MAX_NOTIFICATIONS),
            self.store.unread_count(),
        )?;

        let items = dedupe_notifications(&normalize_notifications(rows));
        Ok(NotificationListing {
            data: items,
            unread_count,
        })
    }

    /// Mark every unread notification as read. Returns the rows changed.
    pub async fn mark_all_read(&self) -> Result<u64, PrediaError> {
        self.store.mark_all_read().await
    }

    /// Mark one notification as read. Returns `false` when it does not exist.
    pub async fn mark_read(&self, id: &str) -> Result<bool, PrediaError> {
        self.store.mark_read(id).await
    }
}
