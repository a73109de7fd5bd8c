// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the NotificationStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;

use predia_config::model::StorageConfig;
use predia_core::types::{NotificacionDbRecord, NotificacionFilter};
use predia_core::{NotificationStore, PrediaError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed notification store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query module. The database is lazily opened on the first call to
/// [`initialize`](Self::initialize).
pub struct SqliteNotificationStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteNotificationStore {
    /// Create a store with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](Self::initialize)
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database and run migrations. Idempotent.
    pub async fn initialize(&self) -> Result<(), PrediaError> {
        self.db
            .get_or_try_init(|| Database::open(&self.config))
            .await?;
        Ok(())
    }

    /// Insert a row. Exposed for seeding and tests; the realtime service
    /// itself only reads.
    pub async fn insert(&self, record: &NotificacionDbRecord) -> Result<(), PrediaError> {
        queries::notificaciones::insert_notificacion(self.db()?, record).await
    }

    fn db(&self) -> Result<&Database, PrediaError> {
        self.db.get().ok_or_else(|| PrediaError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl NotificationStore for SqliteNotificationStore {
    async fn list_notifications(
        &self,
        filter: &NotificacionFilter,
        limit: u32,
    ) -> Result<Vec<NotificacionDbRecord>, PrediaError> {
        queries::notificaciones::list_notifications(self.db()?, filter, limit).await
    }

    async fn unread_count(&self) -> Result<u64, PrediaError> {
        queries::notificaciones::unread_count(self.db()?).await
    }

    async fn mark_all_read(&self) -> Result<u64, PrediaError> {
        let now = chrono::Utc::now().to_rfc3339();
        queries::notificaciones::mark_all_read(self.db()?, now).await
    }

    async fn mark_read(&self, id: &str) -> Result<bool, PrediaError> {
        let now = chrono::Utc::now().to_rfc3339();
        queries::notificaciones::mark_read(self.db()?, id.to_string(), now).await
    }
}
