// SPDX-FileCopyrightText: 2026 Predia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Removal of duplicate notifications from a batch.
//!
//! Duplicates arrive through retried inserts and realtime re-delivery.
//! Identity is the record id when present; rows without one fall back to
//! `tipo:created_at`. Known limitation kept for compatibility with the
//! dashboard: two id-less notifications of the same type created in the
//! same instant collapse into one.

use std::collections::HashSet;

use predia_core::types::{NotificacionDbRecord, NotificacionItem};

/// Anything that can participate in notification deduplication.
pub trait Dedupable {
    /// Primary identity, when the row has one.
    fn dedupe_id(&self) -> Option<&str>;
    /// Type component of the fallback key.
    fn dedupe_tipo(&self) -> &str;
    /// Timestamp component of the fallback key.
    fn dedupe_created_at(&self) -> &str;
}

impl Dedupable for NotificacionDbRecord {
    fn dedupe_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn dedupe_tipo(&self) -> &str {
        self.tipo.as_deref().unwrap_or("")
    }

    fn dedupe_created_at(&self) -> &str {
        &self.created_at
    }
}

impl Dedupable for NotificacionItem {
    fn dedupe_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn dedupe_tipo(&self) -> &str {
        self.tipo.as_str()
    }

    fn dedupe_created_at(&self) -> &str {
        &self.created_at
    }
}

/// Drop duplicates, keeping the first occurrence of each identity.
///
/// Order-preserving, single pass, input untouched.
pub fn dedupe_notifications<T: Dedupable + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(identity_key(*item)))
        .cloned()
        .collect()
}

fn identity_key<T: Dedupable + ?Sized>(item: &T) -> String {
    match item.dedupe_id() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("{}:{}", item.dedupe_tipo(), item.dedupe_created_at()),
    }
}
